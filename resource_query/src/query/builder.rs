//! Fluent query state: filter constraints plus appended parameters.

use serde_json::Value;
use url::Url;

use super::constraints::{Constraint, ConstraintStore};
use super::encode;
use super::params::{Parameter, ParameterStore, DEFAULT_PAGE};
use crate::{Client, Error, Resource};

/// Reserved parameter holding the ordering descriptors.
pub const ORDER: &str = "order";
const LIMIT: &str = "limit";
const PAGE: &str = "page";

/// Builds and issues queries against one resource collection.
///
/// A new builder always carries `limit = 15` and `page = 1`. The builder may
/// be mutated and re-issued freely; every request works from a copy of the
/// state taken when it was issued.
#[derive(Clone, Debug)]
pub struct QueryBuilder<R> {
    pub(super) resource: R,
    pub(super) client: Client,
    constraints: ConstraintStore,
    parameters: ParameterStore,
}

impl<R: Resource> QueryBuilder<R> {
    /// Creates a builder using a transport configured from the environment.
    pub fn new(resource: R) -> Self {
        Self::with_client(resource, Client::new())
    }

    pub fn with_client(resource: R, client: Client) -> Self {
        Self {
            resource,
            client,
            constraints: ConstraintStore::new(),
            parameters: ParameterStore::with_defaults(),
        }
    }

    pub fn resource(&self) -> &R {
        &self.resource
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn constraints(&self) -> impl Iterator<Item = &Constraint> {
        self.constraints.iter()
    }

    pub fn parameters(&self) -> impl Iterator<Item = &Parameter> {
        self.parameters.iter()
    }

    // -- Constraints --

    /// Returns a copy of the constraint's value, or `None` if the filter is unset.
    pub fn constraint_value(&self, filter: &str) -> Option<Value> {
        self.constraints.get(filter).map(|c| c.value.clone())
    }

    pub fn has_constraint(&self, filter: &str) -> bool {
        self.constraints.has(filter)
    }

    /// Sets the value of a filter, replacing any previous value.
    pub fn where_(&mut self, filter: &str, value: impl Into<Value>) -> &mut Self {
        self.constraints.upsert(filter, value.into());
        self
    }

    /// Alias for [`QueryBuilder::where_`].
    pub fn filter(&mut self, filter: &str, value: impl Into<Value>) -> &mut Self {
        self.where_(filter, value)
    }

    // -- Ordering --

    /// Replaces the ordering with the given descriptors, in priority order.
    pub fn order_by<I>(&mut self, orderings: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        let value = Value::Array(orderings.into_iter().map(Into::into).collect());
        self.parameters.upsert(ORDER, value);
        self
    }

    /// Returns a copy of the current ordering, or `None` if none was set.
    pub fn ordering_by(&self) -> Option<Value> {
        self.parameters.get(ORDER).map(|p| p.value.clone())
    }

    // -- Pagination --

    /// Page size, or `-1` if the `limit` parameter holds no integer.
    pub fn limit(&self) -> i64 {
        self.parameters
            .get(LIMIT)
            .and_then(|p| p.value.as_i64())
            .unwrap_or(-1)
    }

    pub fn set_limit(&mut self, limit: i64) -> &mut Self {
        self.parameters.upsert(LIMIT, Value::from(limit));
        self
    }

    /// Current page. A non-integer `page` value reads as the default page;
    /// [`increment_page`](Self::increment_page) and
    /// [`decrement_page`](Self::decrement_page) leave such a value alone.
    pub fn current_page(&self) -> i64 {
        self.integer_page().unwrap_or(DEFAULT_PAGE)
    }

    pub fn set_page(&mut self, page: i64) -> &mut Self {
        self.parameters.upsert(PAGE, Value::from(page));
        self
    }

    pub fn increment_page(&mut self) -> &mut Self {
        if let Some(page) = self.integer_page() {
            self.set_page(page + 1);
        }
        self
    }

    /// Moves one page back. The page is not clamped and may go below 1.
    pub fn decrement_page(&mut self) -> &mut Self {
        if let Some(page) = self.integer_page() {
            self.set_page(page - 1);
        }
        self
    }

    fn integer_page(&self) -> Option<i64> {
        self.parameters.get(PAGE).and_then(|p| p.value.as_i64())
    }

    // -- Arbitrary parameters --

    /// Appends a new query parameter. Fails with [`Error::DuplicateVariable`]
    /// if a parameter of that name exists.
    pub fn append(&mut self, name: &str, value: impl Into<Value>) -> Result<&mut Self, Error> {
        self.parameters.append(name, value.into())?;
        Ok(self)
    }

    pub fn has_variable(&self, name: &str) -> bool {
        self.parameters.has(name)
    }

    /// Returns a copy of the parameter's value, or `default` if it is absent.
    pub fn variable(&self, name: &str, default: Value) -> Value {
        self.parameters
            .get(name)
            .map(|p| p.value.clone())
            .unwrap_or(default)
    }

    /// Replaces an existing parameter's value. Fails with
    /// [`Error::UnknownVariable`] if it was never appended.
    pub fn update_variable(
        &mut self,
        name: &str,
        value: impl Into<Value>,
    ) -> Result<&mut Self, Error> {
        self.parameters.update(name, value.into())?;
        Ok(self)
    }

    // -- Serialization --

    /// Serializes the state into a canonical query string, `?` included.
    pub fn to_query_string(&self) -> String {
        encode::to_query_string(&self.constraints, &self.parameters)
    }

    /// The resource URL followed by the query string.
    pub fn url(&self) -> String {
        format!("{}{}", self.resource.resource_url(), self.to_query_string())
    }

    /// Appends the serialized pairs to an existing URL, after any query it
    /// already has.
    pub fn add_to_url(&self, url: &Url) -> Url {
        let mut url = url.clone();
        let ours = self.to_query_string();
        let ours = ours.trim_start_matches('?');
        if ours.is_empty() {
            return url;
        }
        let query = match url.query() {
            Some(existing) if !existing.is_empty() => format!("{}&{}", existing, ours),
            _ => ours.to_string(),
        };
        url.set_query(Some(&query));
        url
    }
}
