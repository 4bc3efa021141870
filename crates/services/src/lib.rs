#![forbid(unsafe_code)]

pub mod assessment;
pub mod catalog;
pub mod error;

pub use quiz_core::Clock;

pub use assessment::AssessmentController;
pub use catalog::{
    CatalogDocument, CatalogProvider, DEFAULT_LOAD_DELAY, Fault, JsonFileCatalog, QuestionSource,
    RemoteCatalog, StaticCatalog, source_for_location,
};
pub use error::CatalogError;
