use std::path::PathBuf;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use quiz_core::model::{Question, QuestionDraft, validate_catalog};

use super::QuestionSource;
use crate::error::CatalogError;

/// On-disk and over-the-wire catalog format.
///
/// ```json
/// { "questions": [
///     { "kind": "binary_choice", "id": "tf1", "text": "...", "correct_answer": true },
///     { "kind": "multiple_choice", "id": "mc1", "text": "...",
///       "options": ["A", "B"], "correct_option_index": 0 }
/// ] }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogDocument {
    pub questions: Vec<QuestionDraft>,
}

impl CatalogDocument {
    /// Parse and validate a JSON catalog.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Decode` for malformed JSON and `CatalogError::Question`
    /// for drafts that fail validation.
    pub fn parse(json: &str) -> Result<Vec<Question>, CatalogError> {
        let document: CatalogDocument = serde_json::from_str(json)?;
        document.into_questions()
    }

    /// # Errors
    ///
    /// Returns `CatalogError::Question` for the first invalid draft.
    pub fn into_questions(self) -> Result<Vec<Question>, CatalogError> {
        Ok(validate_catalog(self.questions)?)
    }
}

/// Catalog read from a local JSON file on every fetch.
#[derive(Debug, Clone)]
pub struct JsonFileCatalog {
    path: PathBuf,
}

impl JsonFileCatalog {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl QuestionSource for JsonFileCatalog {
    async fn fetch_catalog(&self) -> Result<Vec<Question>, CatalogError> {
        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| CatalogError::Io {
                path: self.path.clone(),
                source,
            })?;
        CatalogDocument::parse(&raw)
    }
}

/// Catalog fetched with an HTTP GET.
#[derive(Clone)]
pub struct RemoteCatalog {
    client: Client,
    url: String,
}

impl RemoteCatalog {
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            url: url.into(),
        }
    }
}

#[async_trait]
impl QuestionSource for RemoteCatalog {
    async fn fetch_catalog(&self) -> Result<Vec<Question>, CatalogError> {
        let response = self.client.get(&self.url).send().await?;

        if !response.status().is_success() {
            return Err(CatalogError::HttpStatus(response.status()));
        }

        let document: CatalogDocument = response.json().await?;
        document.into_questions()
    }
}
