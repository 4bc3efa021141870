use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::watch;
use tracing::{debug, info, warn};

use quiz_core::{AssessmentEvent, Clock};
use quiz_core::model::{AnswerValue, AssessmentState, AssessmentSummary, SessionId};
use quiz_core::reducer;

use crate::catalog::CatalogProvider;

/// Owns the state of one assessment session and serializes every transition.
///
/// The state lives in a `watch` channel: each transition is a read-modify-write
/// under the channel's lock, and observers from [`subscribe`](Self::subscribe) see
/// every state that actually changed.
pub struct AssessmentController {
    provider: Arc<CatalogProvider>,
    clock: Clock,
    state: watch::Sender<AssessmentState>,
    session_id: Mutex<SessionId>,
    has_started: AtomicBool,
}

impl AssessmentController {
    #[must_use]
    pub fn new(provider: Arc<CatalogProvider>, clock: Clock) -> Self {
        let (state, _) = watch::channel(reducer::create_initial());
        Self {
            provider,
            clock,
            state,
            session_id: Mutex::new(SessionId::generate()),
            has_started: AtomicBool::new(false),
        }
    }

    /// The state after the most recent transition.
    #[must_use]
    pub fn latest(&self) -> AssessmentState {
        self.state.borrow().clone()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<AssessmentState> {
        self.state.subscribe()
    }

    #[must_use]
    pub fn session_id(&self) -> SessionId {
        *self.session_id.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Load the session's questions. Only the first call does anything; later calls,
    /// while loading or after completion, return immediately.
    pub async fn start(&self) {
        if self.has_started.swap(true, Ordering::AcqRel) {
            debug!(session_id = %self.session_id(), "assessment already started");
            return;
        }
        self.load(self.session_id()).await;
    }

    /// Discard the current session and load a fresh one.
    ///
    /// A load still running for the discarded session is dropped when it completes.
    pub async fn restart(&self) {
        let session_id = SessionId::generate();
        self.state.send_modify(|state| {
            *self.session_id.lock().unwrap_or_else(PoisonError::into_inner) = session_id;
            *state = reducer::create_initial();
        });
        self.has_started.store(true, Ordering::Release);
        info!(%session_id, "assessment restarted");
        self.load(session_id).await;
    }

    pub fn next(&self) {
        self.update(|state| reducer::reduce(state, AssessmentEvent::Next));
    }

    pub fn previous(&self) {
        self.update(|state| reducer::reduce(state, AssessmentEvent::Previous));
    }

    /// Record a true/false answer for the current question.
    pub fn select_binary(&self, value: bool) {
        self.select(AnswerValue::Bool(value));
    }

    /// Record a multiple-choice answer (0-based option index) for the current question.
    pub fn select_option(&self, index: usize) {
        self.select(AnswerValue::OptionIndex(index));
    }

    /// Complete the assessment if every question is answered.
    ///
    /// Returns `None`, leaving the state untouched, when the assessment cannot be
    /// finished or was already completed.
    pub fn finish(&self) -> Option<AssessmentSummary> {
        let session_id = self.session_id();
        let mut summary = None;

        self.state.send_if_modified(|state| {
            if state.is_completed() || !state.can_finish() {
                return false;
            }
            let next = reducer::reduce(state, AssessmentEvent::Finished);
            match AssessmentSummary::from_state(session_id, &next, self.clock.now()) {
                Ok(done) => summary = Some(done),
                Err(err) => {
                    warn!(%session_id, error = %err, "cannot summarize assessment");
                    return false;
                }
            }
            *state = next;
            true
        });

        match &summary {
            Some(done) => info!(
                %session_id,
                score = done.score(),
                total = done.total(),
                "assessment completed"
            ),
            None => debug!(%session_id, "finish ignored"),
        }
        summary
    }

    async fn load(&self, session_id: SessionId) {
        info!(%session_id, "loading assessment questions");

        match self.provider.fetch_session_questions().await {
            Ok(questions) => {
                let count = questions.len();
                if self.apply_for(session_id, |state| {
                    reducer::reduce(state, AssessmentEvent::Loaded(questions))
                }) {
                    info!(%session_id, count, "assessment questions loaded");
                }
            }
            Err(err) => {
                warn!(%session_id, error = %err, "failed to load assessment questions");
                self.apply_for(session_id, |state| {
                    reducer::reduce(state, AssessmentEvent::LoadFailed)
                });
            }
        }
    }

    fn select(&self, answer: AnswerValue) {
        self.update(|state| match state.current_question() {
            Some(question) if question.accepts(answer) => reducer::reduce(
                state,
                AssessmentEvent::Answered {
                    question_id: question.id().clone(),
                    value: answer,
                },
            ),
            Some(question) => {
                debug!(
                    question_id = %question.id(),
                    ?answer,
                    "answer does not fit the current question"
                );
                state.clone()
            }
            None => state.clone(),
        });
    }

    /// Apply `transition`, notifying observers only if the state changed.
    ///
    /// A completed assessment is frozen until the next restart.
    fn update(&self, transition: impl FnOnce(&AssessmentState) -> AssessmentState) -> bool {
        self.state.send_if_modified(|state| {
            if state.is_completed() {
                return false;
            }
            let next = transition(state);
            if next == *state {
                return false;
            }
            *state = next;
            true
        })
    }

    /// Apply `transition` only if `session_id` is still the current session.
    fn apply_for(
        &self,
        session_id: SessionId,
        transition: impl FnOnce(&AssessmentState) -> AssessmentState,
    ) -> bool {
        let applied = self.state.send_if_modified(|state| {
            if self.session_id() != session_id {
                return false;
            }
            *state = transition(state);
            true
        });
        if !applied {
            debug!(%session_id, "dropping load result for a discarded session");
        }
        applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use quiz_core::model::QuestionKind;
    use quiz_core::time::fixed_clock;

    use crate::catalog::{Fault, StaticCatalog};

    fn controller() -> AssessmentController {
        let provider = CatalogProvider::new(Arc::new(StaticCatalog))
            .with_latency(Duration::ZERO)
            .with_seed(1);
        AssessmentController::new(Arc::new(provider), fixed_clock())
    }

    #[tokio::test]
    async fn starts_in_loading_state() {
        let controller = controller();
        assert!(controller.latest().is_loading());
        controller.start().await;
        assert!(!controller.latest().is_loading());
        assert_eq!(controller.latest().questions().len(), 2);
    }

    #[tokio::test]
    async fn mismatched_answers_are_ignored() {
        let controller = controller();
        controller.start().await;
        assert_eq!(
            controller.latest().current_question().map(|q| q.kind()),
            Some(QuestionKind::BinaryChoice)
        );

        controller.select_option(0);
        assert!(controller.latest().answers().is_empty());

        controller.select_binary(true);
        assert_eq!(controller.latest().current_answer(), Some(AnswerValue::Bool(true)));
    }

    #[tokio::test]
    async fn out_of_range_option_is_ignored() {
        let controller = controller();
        controller.start().await;
        controller.select_binary(false);
        controller.next();

        controller.select_option(99);
        assert_eq!(controller.latest().current_answer(), None);
    }

    #[tokio::test]
    async fn no_op_transitions_do_not_notify() {
        let controller = controller();
        controller.start().await;
        let rx = controller.subscribe();

        controller.previous();
        controller.next();
        assert!(!rx.has_changed().unwrap());

        controller.select_binary(true);
        assert!(rx.has_changed().unwrap());
    }

    #[tokio::test]
    async fn failed_load_sets_error() {
        let provider = CatalogProvider::new(Arc::new(StaticCatalog))
            .with_latency(Duration::ZERO)
            .with_fault(Fault::FailWith("boom".into()));
        let controller = AssessmentController::new(Arc::new(provider), fixed_clock());

        controller.start().await;
        let state = controller.latest();
        assert!(state.is_error());
        assert!(!state.is_loading());
    }
}
