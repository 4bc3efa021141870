use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{AssessmentState, SessionId};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SummaryError {
    #[error("assessment has not been completed")]
    NotCompleted,

    #[error("assessment has no questions")]
    NoQuestions,
}

/// Result of a completed assessment session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentSummary {
    session_id: SessionId,
    score: usize,
    total: usize,
    completed_at: DateTime<Utc>,
}

impl AssessmentSummary {
    /// Summarize a completed state.
    ///
    /// # Errors
    ///
    /// Returns `SummaryError::NotCompleted` unless `state.is_completed()`.
    /// Returns `SummaryError::NoQuestions` if the state holds no questions.
    pub fn from_state(
        session_id: SessionId,
        state: &AssessmentState,
        completed_at: DateTime<Utc>,
    ) -> Result<Self, SummaryError> {
        if !state.is_completed() {
            return Err(SummaryError::NotCompleted);
        }
        if state.questions().is_empty() {
            return Err(SummaryError::NoQuestions);
        }

        Ok(Self {
            session_id,
            score: state.score(),
            total: state.questions().len(),
            completed_at,
        })
    }

    #[must_use]
    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    #[must_use]
    pub fn score(&self) -> usize {
        self.score
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.total
    }

    #[must_use]
    pub fn completed_at(&self) -> DateTime<Utc> {
        self.completed_at
    }

    /// Score as a whole percentage, rounded down.
    #[must_use]
    pub fn percent(&self) -> usize {
        if self.total == 0 {
            return 0;
        }
        self.score * 100 / self.total
    }

    #[must_use]
    pub fn is_perfect(&self) -> bool {
        self.total > 0 && self.score == self.total
    }
}
