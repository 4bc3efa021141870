use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use quiz_core::model::{Question, QuestionKind};

use super::QuestionSource;
use crate::error::CatalogError;

/// Simulated fetch latency used unless configured otherwise.
pub const DEFAULT_LOAD_DELAY: Duration = Duration::from_secs(3);

/// Failure injected into the provider, for exercising the error path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Fault {
    #[default]
    None,
    FailWith(String),
}

/// Supplies the questions for one session: one binary-choice question followed by
/// one multiple-choice question, each drawn at random from the catalog.
pub struct CatalogProvider {
    source: Arc<dyn QuestionSource>,
    latency: Duration,
    fault: Fault,
    rng: Mutex<StdRng>,
}

impl CatalogProvider {
    #[must_use]
    pub fn new(source: Arc<dyn QuestionSource>) -> Self {
        Self {
            source,
            latency: DEFAULT_LOAD_DELAY,
            fault: Fault::None,
            rng: Mutex::new(StdRng::from_rng(&mut rand::rng())),
        }
    }

    #[must_use]
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Make selection deterministic.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Mutex::new(StdRng::seed_from_u64(seed));
        self
    }

    #[must_use]
    pub fn with_fault(mut self, fault: Fault) -> Self {
        self.fault = fault;
        self
    }

    #[must_use]
    pub fn latency(&self) -> Duration {
        self.latency
    }

    /// Fetch the questions for a new session.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Injected` when a fault is configured,
    /// `CatalogError::MissingKind` when the catalog lacks one of the two kinds, or
    /// the source's own error.
    pub async fn fetch_session_questions(&self) -> Result<Vec<Question>, CatalogError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        if let Fault::FailWith(message) = &self.fault {
            return Err(CatalogError::Injected(message.clone()));
        }

        let catalog = self.source.fetch_catalog().await?;
        let (mut binary, mut multiple): (Vec<Question>, Vec<Question>) = catalog
            .into_iter()
            .partition(|question| question.kind() == QuestionKind::BinaryChoice);

        {
            let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
            binary.shuffle(&mut *rng);
            multiple.shuffle(&mut *rng);
        }

        let first_binary = binary
            .into_iter()
            .next()
            .ok_or(CatalogError::MissingKind(QuestionKind::BinaryChoice))?;
        let first_multiple = multiple
            .into_iter()
            .next()
            .ok_or(CatalogError::MissingKind(QuestionKind::MultipleChoice))?;

        Ok(vec![first_binary, first_multiple])
    }
}
