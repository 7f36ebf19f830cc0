//! Fluent query builder for remote JSON resource collections.
//!
//! A [`QueryBuilder`] collects filter constraints, ordering, pagination and
//! arbitrary parameters, serializes them into a canonical query string, and
//! issues get / update / insert / delete requests whose records come back
//! wrapped as models and collections.
//!
//! ```no_run
//! use resource_query::{Endpoint, Ordering, QueryBuilder};
//! use serde_json::Value;
//!
//! # async fn run() -> Result<(), resource_query::Error> {
//! let mut query = QueryBuilder::new(Endpoint::<Value>::new("https://api.example.com/posts"));
//! query
//!     .where_("status", "published")
//!     .order_by([Ordering::desc("created_at")])
//!     .set_limit(50);
//! assert_eq!(
//!     query.to_query_string(),
//!     "?filters[status][]=published&limit=50&page=1&order[]=%7B%22attribute%22%3A%22created_at%22%2C%22direction%22%3A%22desc%22%7D"
//! );
//!
//! let fetched = query.get().await?;
//! for post in &fetched.collection {
//!     println!("{}", post.attributes());
//! }
//! # Ok(())
//! # }
//! ```

mod client;
mod errors;
mod query;
pub mod resource;
pub mod types;
pub use self::client::{Client, ClientConfig, RawResponse};
pub use self::errors::Error;
pub use self::query::{
    decode, encode, parse_query_string, Constraint, ConstraintStore, Ordering, Parameter,
    ParameterStore, ParsedQuery, QueryBuilder, SortDirection, DEFAULT_LIMIT, DEFAULT_PAGE, ORDER,
};
pub use self::resource::{Collection, Endpoint, Resource};
