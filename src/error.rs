// file: src/error.rs
// description: Custom error types and result type aliases
// reference: https://docs.rs/thiserror

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, IngestError>;

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("Pattern registry error: {0}")]
    Registry(String),

    #[error("Unknown project: {0}")]
    UnknownProject(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Cannot read {path}: {source}")]
    FileOperation {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    SchemaDrift(#[from] SchemaDrift),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// A pattern matched but one of its captures did not convert to the declared
/// field type. Always a pattern/schema bug, never bad input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Schema drift in {basename}: field `{field}` captured {raw:?} ({reason})")]
pub struct SchemaDrift {
    pub basename: String,
    pub field: String,
    pub raw: String,
    pub reason: String,
}

impl SchemaDrift {
    pub fn new(
        basename: impl Into<String>,
        field: impl Into<String>,
        raw: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            basename: basename.into(),
            field: field.into(),
            raw: raw.into(),
            reason: reason.into(),
        }
    }
}
