//! The seams between the query builder and the application's own types.

use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::types::{Record, RecordCollection};
use crate::{Error, QueryBuilder};

/// Describes a remote resource collection: where it lives and how raw
/// records become models and models become a collection.
pub trait Resource: Clone {
    type Model;
    type Collection: Collection<Self>;

    /// Base URL of the collection, without a query string.
    fn resource_url(&self) -> String;

    /// Builds a model from one raw record. The model must come back marked
    /// as persisted, since it was read from the server.
    fn make_model(&self, record: Value) -> Result<Self::Model, Error>;

    fn make_collection(&self, models: Vec<Self::Model>) -> Self::Collection;
}

/// A collection of models that remembers the query that produced it.
pub trait Collection<R> {
    fn set_query(&mut self, query: QueryBuilder<R>);
}

/// A [`Resource`] whose records deserialize straight into `T`.
pub struct Endpoint<T> {
    url: String,
    _record: PhantomData<fn() -> T>,
}

impl<T> Endpoint<T> {
    pub fn new(url: &str) -> Self {
        Self {
            url: url.trim_end_matches('/').to_string(),
            _record: PhantomData,
        }
    }
}

impl<T> Clone for Endpoint<T> {
    fn clone(&self) -> Self {
        Self {
            url: self.url.clone(),
            _record: PhantomData,
        }
    }
}

impl<T> std::fmt::Debug for Endpoint<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Endpoint").field("url", &self.url).finish()
    }
}

impl<T: DeserializeOwned> Resource for Endpoint<T> {
    type Model = Record<T>;
    type Collection = RecordCollection<Self>;

    fn resource_url(&self) -> String {
        self.url.clone()
    }

    fn make_model(&self, record: Value) -> Result<Self::Model, Error> {
        let attributes = serde_json::from_value(record).map_err(|e| {
            tracing::error!("Failed to decode record from {}: {}", self.url, e);
            Error::Decode(e.to_string())
        })?;
        Ok(Record::persisted(attributes))
    }

    fn make_collection(&self, models: Vec<Self::Model>) -> Self::Collection {
        RecordCollection::new(models)
    }
}
