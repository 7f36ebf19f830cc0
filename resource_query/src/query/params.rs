//! Ordered, key-unique appended query parameters.
//!
//! Unlike constraints, parameters distinguish between appending a new slot
//! and updating an existing one. Appending a name twice or updating a name
//! that was never appended is reported as an error.

use std::collections::HashMap;

use serde_json::Value;

use crate::Error;

/// Default page size sent with every query.
pub const DEFAULT_LIMIT: i64 = 15;
/// Default (1-indexed) page sent with every query.
pub const DEFAULT_PAGE: i64 = 1;

/// A named query parameter.
#[derive(Clone, Debug, PartialEq)]
pub struct Parameter {
    pub name: String,
    pub value: Value,
}

/// Parameters in insertion order, indexed by name.
#[derive(Clone, Debug, Default)]
pub struct ParameterStore {
    entries: Vec<Parameter>,
    index: HashMap<String, usize>,
}

impl ParameterStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store seeded with `limit = 15` and `page = 1`.
    pub fn with_defaults() -> Self {
        let mut store = Self::new();
        store.push("limit", Value::from(DEFAULT_LIMIT));
        store.push("page", Value::from(DEFAULT_PAGE));
        store
    }

    pub fn get(&self, name: &str) -> Option<&Parameter> {
        self.index.get(name).map(|&pos| &self.entries[pos])
    }

    pub(crate) fn get_mut(&mut self, name: &str) -> Option<&mut Parameter> {
        self.index.get(name).map(|&pos| &mut self.entries[pos])
    }

    pub fn has(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Appends a new parameter. Fails with [`Error::DuplicateVariable`] if
    /// `name` is already present.
    pub fn append(&mut self, name: &str, value: Value) -> Result<(), Error> {
        if self.has(name) {
            return Err(Error::DuplicateVariable(name.to_string()));
        }
        self.push(name, value);
        Ok(())
    }

    /// Replaces the value of an existing parameter. Fails with
    /// [`Error::UnknownVariable`] if `name` was never appended.
    pub fn update(&mut self, name: &str, value: Value) -> Result<(), Error> {
        match self.get_mut(name) {
            Some(param) => {
                param.value = value;
                Ok(())
            }
            None => Err(Error::UnknownVariable(name.to_string())),
        }
    }

    /// Updates `name` if present, appends it otherwise. Reserved for the
    /// builder's own slots (`limit`, `page`, `order`).
    pub(crate) fn upsert(&mut self, name: &str, value: Value) {
        match self.get_mut(name) {
            Some(param) => param.value = value,
            None => self.push(name, value),
        }
    }

    /// Visits parameters in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Parameter> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn push(&mut self, name: &str, value: Value) {
        self.index.insert(name.to_string(), self.entries.len());
        self.entries.push(Parameter {
            name: name.to_string(),
            value,
        });
    }
}
