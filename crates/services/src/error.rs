//! Shared error types for the services crate.

use std::path::PathBuf;

use thiserror::Error;

use quiz_core::model::{QuestionError, QuestionKind};

/// Errors emitted while fetching session questions.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("question load failed: {0}")]
    Injected(String),
    #[error("catalog has no {0} questions")]
    MissingKind(QuestionKind),
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Decode(#[from] serde_json::Error),
    #[error("catalog request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}
