//! Ordered, key-unique filter conditions.

use std::collections::HashMap;

use serde_json::Value;

/// A single filter condition. At most one exists per filter name.
#[derive(Clone, Debug, PartialEq)]
pub struct Constraint {
    pub filter: String,
    pub value: Value,
}

/// Filter conditions in insertion order, indexed by filter name.
#[derive(Clone, Debug, Default)]
pub struct ConstraintStore {
    entries: Vec<Constraint>,
    index: HashMap<String, usize>,
}

impl ConstraintStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, filter: &str) -> Option<&Constraint> {
        self.index.get(filter).map(|&pos| &self.entries[pos])
    }

    pub fn has(&self, filter: &str) -> bool {
        self.index.contains_key(filter)
    }

    /// Inserts a new constraint, or overwrites the value of the existing one
    /// in place. Never fails.
    pub fn upsert(&mut self, filter: &str, value: Value) {
        match self.index.get(filter) {
            Some(&pos) => self.entries[pos].value = value,
            None => {
                self.index.insert(filter.to_string(), self.entries.len());
                self.entries.push(Constraint {
                    filter: filter.to_string(),
                    value,
                });
            }
        }
    }

    /// Visits constraints in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Constraint> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
