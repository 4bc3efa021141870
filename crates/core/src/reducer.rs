//! Pure transitions over [`AssessmentState`].
//!
//! Every function takes the current state by reference and returns a new one. The
//! transitions are total: a navigation step that is not allowed returns an equal
//! state instead of an error.

use std::collections::BTreeMap;

use crate::model::{AnswerValue, AssessmentState, Question, QuestionId};

/// A user or loader action, as data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssessmentEvent {
    Loaded(Vec<Question>),
    LoadFailed,
    Next,
    Previous,
    Answered {
        question_id: QuestionId,
        value: AnswerValue,
    },
    Finished,
}

/// Apply `event` to `state`.
#[must_use]
pub fn reduce(state: &AssessmentState, event: AssessmentEvent) -> AssessmentState {
    match event {
        AssessmentEvent::Loaded(questions) => with_questions(state, questions),
        AssessmentEvent::LoadFailed => with_error(state),
        AssessmentEvent::Next => go_next(state),
        AssessmentEvent::Previous => go_previous(state),
        AssessmentEvent::Answered { question_id, value } => {
            record_answer(state, question_id, value)
        }
        AssessmentEvent::Finished => finish(state),
    }
}

/// Fresh session state: loading, nothing loaded or answered yet.
#[must_use]
pub fn create_initial() -> AssessmentState {
    AssessmentState {
        questions: Vec::new(),
        current_index: 0,
        answers: BTreeMap::new(),
        is_loading: true,
        is_error: false,
        is_completed: false,
    }
}

/// Questions could not be loaded. Questions and answers are kept as they are.
#[must_use]
pub fn with_error(state: &AssessmentState) -> AssessmentState {
    AssessmentState {
        is_loading: false,
        is_error: true,
        ..state.clone()
    }
}

/// Questions arrived. Position and answers are left untouched.
#[must_use]
pub fn with_questions(state: &AssessmentState, questions: Vec<Question>) -> AssessmentState {
    AssessmentState {
        questions,
        is_loading: false,
        is_error: false,
        ..state.clone()
    }
}

#[must_use]
pub fn go_next(state: &AssessmentState) -> AssessmentState {
    if !state.can_go_next() {
        return state.clone();
    }
    AssessmentState {
        current_index: state.current_index + 1,
        ..state.clone()
    }
}

#[must_use]
pub fn go_previous(state: &AssessmentState) -> AssessmentState {
    if !state.can_go_previous() {
        return state.clone();
    }
    AssessmentState {
        current_index: state.current_index - 1,
        ..state.clone()
    }
}

/// Insert or overwrite the answer for `question_id`.
///
/// The id is not checked against the loaded questions.
#[must_use]
pub fn record_answer(
    state: &AssessmentState,
    question_id: QuestionId,
    value: AnswerValue,
) -> AssessmentState {
    let mut answers = state.answers.clone();
    answers.insert(question_id, value);
    AssessmentState {
        answers,
        ..state.clone()
    }
}

/// Mark the assessment completed.
///
/// This transition does not check [`AssessmentState::can_finish`]; callers are
/// expected to.
#[must_use]
pub fn finish(state: &AssessmentState) -> AssessmentState {
    AssessmentState {
        is_completed: true,
        ..state.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BinaryChoice, MultipleChoice};

    fn tf1() -> Question {
        BinaryChoice::new("tf1", "Q1", true).unwrap().into()
    }

    fn mc1() -> Question {
        MultipleChoice::new(
            "mc1",
            "Q2",
            vec!["A".into(), "B".into(), "C".into(), "D".into()],
            0,
        )
        .unwrap()
        .into()
    }

    fn questions() -> Vec<Question> {
        vec![tf1(), mc1()]
    }

    fn loaded() -> AssessmentState {
        with_questions(&create_initial(), questions())
    }

    #[test]
    fn initial_state_is_loading_and_empty() {
        let state = create_initial();
        assert!(state.is_loading());
        assert!(!state.is_error());
        assert!(!state.is_completed());
        assert!(state.questions().is_empty());
        assert!(state.answers().is_empty());
        assert_eq!(state.current_index(), 0);
    }

    #[test]
    fn with_error_clears_loading_and_keeps_data() {
        let state = record_answer(&loaded(), QuestionId::new("tf1"), AnswerValue::Bool(true));
        let failed = with_error(&state);

        assert!(!failed.is_loading());
        assert!(failed.is_error());
        assert_eq!(failed.questions(), state.questions());
        assert_eq!(failed.answers(), state.answers());
    }

    #[test]
    fn with_questions_keeps_order_and_resets_flags() {
        let failed = with_error(&create_initial());
        let state = with_questions(&failed, questions());

        assert!(!state.is_loading());
        assert!(!state.is_error());
        assert_eq!(state.questions(), questions().as_slice());
        assert_eq!(state.current_index(), 0);
    }

    #[test]
    fn go_next_advances_when_current_is_answered() {
        let state = record_answer(&loaded(), QuestionId::new("tf1"), AnswerValue::Bool(true));
        let next = go_next(&state);
        assert_eq!(next.current_index(), 1);
    }

    #[test]
    fn go_next_is_a_no_op_when_unanswered() {
        let state = loaded();
        assert_eq!(go_next(&state), state);
    }

    #[test]
    fn go_next_is_idempotent_at_the_boundary() {
        let state = AssessmentState::from_parts(
            questions(),
            0,
            [
                (QuestionId::new("tf1"), AnswerValue::Bool(true)),
                (QuestionId::new("mc1"), AnswerValue::OptionIndex(0)),
            ],
        );
        let once = go_next(&state);
        assert_eq!(once.current_index(), 1);
        assert!(!once.can_go_next());
        assert_eq!(go_next(&once), once);
    }

    #[test]
    fn go_previous_decrements() {
        let state = AssessmentState::from_parts(questions(), 1, []);
        assert_eq!(go_previous(&state).current_index(), 0);
    }

    #[test]
    fn go_previous_at_start_returns_equal_state() {
        let state = loaded();
        assert_eq!(go_previous(&state), state);
    }

    #[test]
    fn record_answer_overwrites_existing_entry() {
        let first = record_answer(&loaded(), QuestionId::new("tf1"), AnswerValue::Bool(false));
        let second = record_answer(&first, QuestionId::new("tf1"), AnswerValue::Bool(true));

        assert_eq!(second.answers().len(), 1);
        assert_eq!(second.answer_for("tf1"), Some(AnswerValue::Bool(true)));
        // The input state is untouched.
        assert_eq!(first.answer_for("tf1"), Some(AnswerValue::Bool(false)));
    }

    #[test]
    fn record_answer_accepts_unknown_ids() {
        let state = record_answer(&loaded(), QuestionId::new("nope"), AnswerValue::Bool(true));
        assert_eq!(state.answer_for("nope"), Some(AnswerValue::Bool(true)));
    }

    #[test]
    fn scenario_one_right_one_wrong() {
        let state = record_answer(&loaded(), QuestionId::new("tf1"), AnswerValue::Bool(true));
        let state = record_answer(&state, QuestionId::new("mc1"), AnswerValue::OptionIndex(1));

        assert_eq!(state.score(), 1);
        assert!(state.can_finish());
    }

    #[test]
    fn finish_sets_completed() {
        let state = record_answer(&loaded(), QuestionId::new("tf1"), AnswerValue::Bool(true));
        let state = record_answer(&state, QuestionId::new("mc1"), AnswerValue::OptionIndex(0));
        assert!(finish(&state).is_completed());
    }

    #[test]
    fn finish_has_no_guard_of_its_own() {
        let state = loaded();
        assert!(!state.can_finish());
        assert!(finish(&state).is_completed());
    }

    #[test]
    fn reduce_dispatches_events() {
        let mut state = create_initial();
        for event in [
            AssessmentEvent::Loaded(questions()),
            AssessmentEvent::Answered {
                question_id: QuestionId::new("tf1"),
                value: AnswerValue::Bool(true),
            },
            AssessmentEvent::Next,
            AssessmentEvent::Answered {
                question_id: QuestionId::new("mc1"),
                value: AnswerValue::OptionIndex(0),
            },
            AssessmentEvent::Previous,
            AssessmentEvent::Finished,
        ] {
            state = reduce(&state, event);
        }

        assert_eq!(state.current_index(), 0);
        assert_eq!(state.score(), 2);
        assert!(state.is_completed());

        let failed = reduce(&create_initial(), AssessmentEvent::LoadFailed);
        assert!(failed.is_error());
    }
}
