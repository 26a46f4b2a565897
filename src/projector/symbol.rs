use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::dispatch::Projection;
use super::value::{ProjectionError, Value};

/// Names of the types and routines declared in a directory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SymbolTable {
    names: BTreeSet<String>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>) {
        self.names.insert(name.into());
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for SymbolTable {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl Projection for SymbolTable {
    const VISITS_ROUTINES: bool = true;

    fn type_spec(&mut self, name: String, _underlying: Value) {
        self.insert(name);
    }

    fn routine(&mut self, name: String) {
        self.insert(name);
    }

    fn field_list(&self, _fields: Vec<Value>) -> Result<Value, ProjectionError> {
        Ok(Value::Absent)
    }

    fn field(
        &self,
        _names: Vec<Value>,
        _type_value: Value,
        _tag: Option<Value>,
    ) -> Result<Value, ProjectionError> {
        Ok(Value::Absent)
    }

    fn absorb(&mut self, other: Self) {
        self.names.extend(other.names);
    }
}
