mod builder;
pub use self::builder::{QueryBuilder, ORDER};

mod constraints;
pub use self::constraints::{Constraint, ConstraintStore};

mod params;
pub use self::params::{Parameter, ParameterStore, DEFAULT_LIMIT, DEFAULT_PAGE};

mod ordering;
pub use self::ordering::{Ordering, SortDirection};

pub mod decode;
pub mod encode;
pub use self::decode::{parse_query_string, ParsedQuery};

mod request;
