//! Derivation-time and schema loading errors
//!
//! These are reported once, when a codec is built, and never at parse time.

use thiserror::Error;

/// Result type for schema operations
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Schema errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("No codec for type '{type_name}' of field '{field_path}'")]
    UnresolvedType {
        field_path: String,
        type_name: String,
    },

    #[error("Duplicate field '{field}' in record '{record}'")]
    DuplicateField { record: String, field: String },

    #[error("Type '{name}' contains itself")]
    RecursiveType { name: String },

    #[error("Malformed schema file '{path}': {reason}")]
    Malformed { path: String, reason: String },
}

impl SchemaError {
    /// No codec can be resolved for a field type
    pub fn unresolved(field_path: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self::UnresolvedType {
            field_path: field_path.into(),
            type_name: type_name.into(),
        }
    }

    /// Create an error for a malformed schema file
    pub fn malformed(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Malformed {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
