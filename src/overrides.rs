// Per-call override table: field name to literal value or generator thunk.
// One table per top-level call, passed unchanged through the whole recursion.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::Value;

use crate::template::GenFn;

/// Replaces default generation for one named field.
#[derive(Clone)]
pub enum Override {
    Literal(Value),
    Generator(GenFn),
}

impl Override {
    pub fn literal(value: impl Into<Value>) -> Self {
        Override::Literal(value.into())
    }

    pub fn generator<F>(f: F) -> Self
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        Override::Generator(Arc::new(f))
    }

    /// Produce the override's value: clone the literal, or invoke the thunk.
    pub fn resolve(&self) -> Value {
        match self {
            Override::Literal(value) => value.clone(),
            Override::Generator(f) => f(),
        }
    }
}

impl fmt::Debug for Override {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Override::Literal(value) => f.debug_tuple("Literal").field(value).finish(),
            Override::Generator(_) => f.write_str("Generator(<generator>)"),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Overrides(IndexMap<String, Override>);

impl Overrides {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pin a field to a literal value.
    pub fn literal(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(field.into(), Override::Literal(value.into()));
        self
    }

    /// Attach a generator thunk to a field.
    pub fn generator<F>(mut self, field: impl Into<String>, f: F) -> Self
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        self.0.insert(field.into(), Override::Generator(Arc::new(f)));
        self
    }

    pub fn get(&self, field: &str) -> Option<&Override> {
        self.0.get(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl FromIterator<(String, Override)> for Overrides {
    fn from_iter<I: IntoIterator<Item = (String, Override)>>(iter: I) -> Self {
        Overrides(iter.into_iter().collect())
    }
}
