use serde::Serialize;
use serde_json::Value;

use crate::resource::{Collection, Resource};
use crate::QueryBuilder;

/// A model wrapping one record's attributes.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Record<T> {
    #[serde(flatten)]
    attributes: T,
    #[serde(skip)]
    exists: bool,
}

impl<T> Record<T> {
    /// A record that has not been stored yet.
    pub fn new(attributes: T) -> Self {
        Self {
            attributes,
            exists: false,
        }
    }

    /// A record read back from the server.
    pub fn persisted(attributes: T) -> Self {
        Self {
            attributes,
            exists: true,
        }
    }

    /// Whether this record is known to exist on the server.
    pub fn exists(&self) -> bool {
        self.exists
    }

    pub fn attributes(&self) -> &T {
        &self.attributes
    }

    pub fn attributes_mut(&mut self) -> &mut T {
        &mut self.attributes
    }

    pub fn into_inner(self) -> T {
        self.attributes
    }
}

/// Models returned by one request, bound to a copy of the query that fetched them.
pub struct RecordCollection<R: Resource> {
    models: Vec<R::Model>,
    query: Option<QueryBuilder<R>>,
}

impl<R: Resource> RecordCollection<R> {
    pub fn new(models: Vec<R::Model>) -> Self {
        Self {
            models,
            query: None,
        }
    }

    pub fn models(&self) -> &[R::Model] {
        &self.models
    }

    pub fn iter(&self) -> std::slice::Iter<'_, R::Model> {
        self.models.iter()
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    pub fn into_models(self) -> Vec<R::Model> {
        self.models
    }

    /// The query this collection was fetched with, if bound.
    pub fn query(&self) -> Option<&QueryBuilder<R>> {
        self.query.as_ref()
    }

    /// A copy of the bound query moved one page forward.
    pub fn next_page(&self) -> Option<QueryBuilder<R>> {
        let mut query = self.query.clone()?;
        query.increment_page();
        Some(query)
    }

    /// A copy of the bound query moved one page back. The page is not clamped.
    pub fn previous_page(&self) -> Option<QueryBuilder<R>> {
        let mut query = self.query.clone()?;
        query.decrement_page();
        Some(query)
    }
}

impl<R> std::fmt::Debug for RecordCollection<R>
where
    R: Resource + std::fmt::Debug,
    R::Model: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordCollection")
            .field("models", &self.models)
            .field("query", &self.query)
            .finish()
    }
}

impl<R: Resource> Collection<R> for RecordCollection<R> {
    fn set_query(&mut self, query: QueryBuilder<R>) {
        self.query = Some(query);
    }
}

impl<'a, R: Resource> IntoIterator for &'a RecordCollection<R> {
    type Item = &'a R::Model;
    type IntoIter = std::slice::Iter<'a, R::Model>;

    fn into_iter(self) -> Self::IntoIter {
        self.models.iter()
    }
}

/// Result of a list request: the bound collection plus the full decoded payload.
#[derive(Debug)]
pub struct Fetched<C> {
    pub collection: C,
    pub payload: Value,
}
