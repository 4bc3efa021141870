mod builtin;
mod document;
mod provider;

use std::sync::Arc;

use async_trait::async_trait;
use quiz_core::model::Question;

use crate::error::CatalogError;

pub use builtin::StaticCatalog;
pub use document::{CatalogDocument, JsonFileCatalog, RemoteCatalog};
pub use provider::{CatalogProvider, DEFAULT_LOAD_DELAY, Fault};

/// Where the full question catalog comes from.
#[async_trait]
pub trait QuestionSource: Send + Sync {
    /// Fetch every question in the catalog, validated.
    async fn fetch_catalog(&self) -> Result<Vec<Question>, CatalogError>;
}

/// Pick a source for a configured catalog location.
///
/// `None` selects the built-in catalog, `http://` and `https://` locations are
/// fetched remotely, anything else is read as a JSON file path.
#[must_use]
pub fn source_for_location(location: Option<&str>) -> Arc<dyn QuestionSource> {
    match location.map(str::trim) {
        None | Some("") => Arc::new(StaticCatalog),
        Some(url) if url.starts_with("http://") || url.starts_with("https://") => {
            Arc::new(RemoteCatalog::new(url))
        }
        Some(path) => Arc::new(JsonFileCatalog::new(path)),
    }
}
