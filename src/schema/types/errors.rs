use super::field::FieldFormat;
use thiserror::Error;

/// Convenience alias for fallible schema operations.
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Errors raised by schema registration, resolution, and validation.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("Schema not found: {0}")]
    NotFound(String),

    #[error("Schema '{schema}' field '{field}' references unknown schema '{reference}'")]
    UnresolvedReference {
        schema: String,
        field: String,
        reference: String,
    },

    #[error("Schema already registered: {0}")]
    Duplicate(String),

    #[error("Invalid schema definition: {0}")]
    InvalidDefinition(String),

    #[error("Invalid schema JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to read schema file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Payload validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// A payload's specific violation of a field contract.
///
/// `field` is a dotted path from the validation root; direct scalar and
/// enum validation reports the path as `value`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Schema '{schema}': missing required field '{field}'")]
    MissingField { schema: String, field: String },

    #[error("Schema '{schema}' field '{field}': expected {expected}, got {actual}")]
    UnexpectedType {
        schema: String,
        field: String,
        expected: String,
        actual: String,
    },

    #[error("Schema '{schema}' field '{field}': value {value} does not satisfy format '{format}'")]
    InvalidFormat {
        schema: String,
        field: String,
        format: FieldFormat,
        value: String,
    },

    #[error("Schema '{schema}' field '{field}': '{value}' is not a known variant")]
    UnknownVariant {
        schema: String,
        field: String,
        value: String,
    },

    #[error("Schema '{schema}': unknown field '{field}'")]
    UnknownField { schema: String, field: String },
}
