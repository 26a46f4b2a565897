use serde::Serialize;
use thiserror::Error;

use super::model::{DataRecord, Field};

/// Value a single walked node resolves to.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Identifier spelling, raw literal text or a dotted reference.
    Text(String),
    Field(Field),
    /// Aggregate type whose name is filled in by the enclosing type specification.
    RecordShape(DataRecord),
    Absent,
}

impl Value {
    pub fn variant_name(&self) -> &'static str {
        match self {
            Value::Text(_) => "text",
            Value::Field(_) => "field",
            Value::RecordShape(_) => "record shape",
            Value::Absent => "absent",
        }
    }

    pub fn into_text(self, context: &'static str) -> Result<String, ProjectionError> {
        match self {
            Value::Text(text) => Ok(text),
            other => Err(ProjectionError::mismatch(context, "text", &other)),
        }
    }

    pub fn into_field(self, context: &'static str) -> Result<Field, ProjectionError> {
        match self {
            Value::Field(field) => Ok(field),
            other => Err(ProjectionError::mismatch(context, "field", &other)),
        }
    }
}

/// Failure of a single walk.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ProjectionError {
    /// A node that must resolve to a specific value kind resolved to another one.
    #[error("structural mismatch in {context}: expected {expected}, found {found}")]
    StructuralMismatch {
        context: &'static str,
        expected: &'static str,
        found: &'static str,
    },
}

impl ProjectionError {
    pub fn mismatch(context: &'static str, expected: &'static str, found: &Value) -> Self {
        ProjectionError::StructuralMismatch {
            context,
            expected,
            found: found.variant_name(),
        }
    }
}
