//! Error types for model construction and JSON encoding/decoding.

use thiserror::Error;

/// Invariant violation while building a model object.
///
/// Construction either succeeds completely or fails with one of these;
/// no partially built object is ever returned.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConstructionError {
    #[error("coordinates precision must be strictly positive, got {precision}")]
    NonPositivePrecision { precision: f64 },

    #[error("coordinates {field} must be a finite number, got {value}")]
    NonFiniteCoordinate { field: &'static str, value: f64 },

    #[error("time {field} {value} outside range [{min}, {max}]")]
    TimeComponentOutOfRange {
        field: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },

    #[error("invalid {kind} id {id:?}")]
    InvalidEntityId { kind: &'static str, id: String },

    #[error("invalid decimal {input:?}")]
    InvalidDecimal { input: String },

    #[error("multiple labels provided for language {language:?}")]
    DuplicateLabel { language: String },

    #[error("multiple descriptions provided for language {language:?}")]
    DuplicateDescription { language: String },

    #[error("multiple site links provided for site {site_key:?}")]
    DuplicateSiteLink { site_key: String },

    #[error("multiple statement groups provided for property {property}")]
    DuplicateStatementGroup { property: String },

    #[error("snak group must contain at least one snak")]
    EmptySnakGroup,

    #[error("statement group must contain at least one statement")]
    EmptyStatementGroup,

    #[error("statement about {found} cannot be stored in document {expected}")]
    SubjectMismatch { expected: String, found: String },

    #[error("{id} belongs to site {found:?} but the document belongs to {expected:?}")]
    SiteMismatch {
        id: String,
        expected: String,
        found: String,
    },
}

/// Error while decoding wire JSON into model objects.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecodeError {
    #[error("malformed JSON: {0}")]
    Json(String),

    #[error("{context} must be a JSON object")]
    NotAnObject { context: &'static str },

    #[error("missing required field {field:?} in {context}")]
    MissingField {
        field: &'static str,
        context: &'static str,
    },

    #[error("field {field:?} in {context} must be {expected}")]
    InvalidType {
        field: &'static str,
        context: &'static str,
        expected: &'static str,
    },

    #[error("unknown {kind} {value:?}")]
    UnknownTag { kind: &'static str, value: String },

    #[error("invalid timestamp {value:?}: {reason}")]
    InvalidTimestamp { value: String, reason: String },

    #[error(transparent)]
    Construction(#[from] ConstructionError),
}

impl From<serde_json::Error> for DecodeError {
    fn from(err: serde_json::Error) -> Self {
        DecodeError::Json(err.to_string())
    }
}

/// Error while encoding model objects into wire JSON.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EncodeError {
    #[error("{field} is not representable in JSON: {value}")]
    NonFiniteNumber { field: &'static str, value: f64 },

    #[error("JSON serialization failed: {0}")]
    Json(String),
}

impl From<serde_json::Error> for EncodeError {
    fn from(err: serde_json::Error) -> Self {
        EncodeError::Json(err.to_string())
    }
}
