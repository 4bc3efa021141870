use std::collections::BTreeMap;

use crate::model::{AnswerValue, Question, QuestionId};

/// Position within a loaded assessment, useful for progress indicators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssessmentProgress {
    /// 1-based position of the current question.
    pub position: usize,
    pub total: usize,
    pub answered: usize,
}

impl AssessmentProgress {
    /// Fraction of the way through the questions, in `0.0..=1.0`.
    #[must_use]
    pub fn fraction(&self) -> f32 {
        if self.total == 0 {
            return 0.0;
        }
        #[allow(clippy::cast_precision_loss)]
        let fraction = self.position as f32 / self.total as f32;
        fraction.min(1.0)
    }
}

/// Snapshot of an assessment session.
///
/// Values are replaced wholesale by the transitions in [`crate::reducer`]; nothing
/// mutates a state in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssessmentState {
    pub(crate) questions: Vec<Question>,
    pub(crate) current_index: usize,
    pub(crate) answers: BTreeMap<QuestionId, AnswerValue>,
    pub(crate) is_loading: bool,
    pub(crate) is_error: bool,
    pub(crate) is_completed: bool,
}

impl AssessmentState {
    /// Rebuild a loaded, not yet completed state from its parts.
    ///
    /// No invariants are checked: `current_index` may be out of range, and answers
    /// may refer to ids that are not in `questions`.
    #[must_use]
    pub fn from_parts(
        questions: Vec<Question>,
        current_index: usize,
        answers: impl IntoIterator<Item = (QuestionId, AnswerValue)>,
    ) -> Self {
        Self {
            questions,
            current_index,
            answers: answers.into_iter().collect(),
            is_loading: false,
            is_error: false,
            is_completed: false,
        }
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    #[must_use]
    pub fn answers(&self) -> &BTreeMap<QuestionId, AnswerValue> {
        &self.answers
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        self.is_error
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.is_completed
    }

    #[must_use]
    pub fn answer_for(&self, id: &str) -> Option<AnswerValue> {
        self.answers.get(id).copied()
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current_index)
    }

    #[must_use]
    pub fn current_answer(&self) -> Option<AnswerValue> {
        self.current_question()
            .and_then(|question| self.answer_for(question.id().as_str()))
    }

    #[must_use]
    pub fn is_last_question(&self) -> bool {
        !self.questions.is_empty() && self.current_index + 1 == self.questions.len()
    }

    /// Not on the last question, and the current question has an answer.
    #[must_use]
    pub fn can_go_next(&self) -> bool {
        self.current_index + 1 < self.questions.len() && self.current_answer().is_some()
    }

    #[must_use]
    pub fn can_go_previous(&self) -> bool {
        self.current_index > 0
    }

    /// Every question has exactly one recorded answer, and there is at least one
    /// question.
    #[must_use]
    pub fn can_finish(&self) -> bool {
        !self.questions.is_empty()
            && self.answers.len() == self.questions.len()
            && self
                .questions
                .iter()
                .all(|question| self.answers.contains_key(question.id()))
    }

    /// Number of questions whose recorded answer is correct.
    #[must_use]
    pub fn score(&self) -> usize {
        self.questions
            .iter()
            .filter(|question| {
                self.answer_for(question.id().as_str())
                    .is_some_and(|answer| question.is_correct(answer))
            })
            .count()
    }

    #[must_use]
    pub fn progress(&self) -> AssessmentProgress {
        let total = self.questions.len();
        AssessmentProgress {
            position: if total == 0 { 0 } else { self.current_index + 1 },
            total,
            answered: self
                .questions
                .iter()
                .filter(|question| self.answers.contains_key(question.id()))
                .count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BinaryChoice, MultipleChoice};

    fn tf() -> Question {
        BinaryChoice::new("tf1", "TF Q", true).unwrap().into()
    }

    fn mc() -> Question {
        MultipleChoice::new("mc1", "MC Q", vec!["A".into(), "B".into()], 0)
            .unwrap()
            .into()
    }

    fn answered(pairs: &[(&str, AnswerValue)]) -> Vec<(QuestionId, AnswerValue)> {
        pairs
            .iter()
            .map(|(id, value)| (QuestionId::new(*id), *value))
            .collect()
    }

    #[test]
    fn current_question_follows_index() {
        let at_start = AssessmentState::from_parts(vec![tf(), mc()], 0, []);
        assert_eq!(at_start.current_question(), Some(&tf()));

        let at_end = AssessmentState::from_parts(vec![tf(), mc()], 1, []);
        assert_eq!(at_end.current_question(), Some(&mc()));
    }

    #[test]
    fn current_question_is_none_out_of_range_or_empty() {
        let out_of_range = AssessmentState::from_parts(vec![tf(), mc()], 2, []);
        assert_eq!(out_of_range.current_question(), None);
        assert_eq!(out_of_range.current_answer(), None);

        let empty = AssessmentState::from_parts(Vec::new(), 0, []);
        assert_eq!(empty.current_question(), None);
    }

    #[test]
    fn can_go_next_needs_answer_and_a_following_question() {
        let unanswered = AssessmentState::from_parts(vec![tf(), mc()], 0, []);
        assert!(!unanswered.can_go_next());

        let answered_first = AssessmentState::from_parts(
            vec![tf(), mc()],
            0,
            answered(&[("tf1", AnswerValue::Bool(true))]),
        );
        assert!(answered_first.can_go_next());

        let at_end = AssessmentState::from_parts(
            vec![tf(), mc()],
            1,
            answered(&[
                ("tf1", AnswerValue::Bool(true)),
                ("mc1", AnswerValue::OptionIndex(0)),
            ]),
        );
        assert!(!at_end.can_go_next());
        assert!(at_end.is_last_question());
    }

    #[test]
    fn can_go_previous_only_after_first() {
        assert!(!AssessmentState::from_parts(vec![tf(), mc()], 0, []).can_go_previous());
        assert!(AssessmentState::from_parts(vec![tf(), mc()], 1, []).can_go_previous());
    }

    #[test]
    fn can_finish_requires_every_question_answered() {
        let partial = AssessmentState::from_parts(
            vec![tf(), mc()],
            1,
            answered(&[("tf1", AnswerValue::Bool(true))]),
        );
        assert!(!partial.can_finish());

        let empty = AssessmentState::from_parts(Vec::new(), 0, []);
        assert!(!empty.can_finish());

        let complete = AssessmentState::from_parts(
            vec![tf(), mc()],
            1,
            answered(&[
                ("tf1", AnswerValue::Bool(false)),
                ("mc1", AnswerValue::OptionIndex(1)),
            ]),
        );
        assert!(complete.can_finish());
    }

    #[test]
    fn can_finish_is_false_when_answers_include_unknown_ids() {
        let state = AssessmentState::from_parts(
            vec![tf(), mc()],
            1,
            answered(&[
                ("tf1", AnswerValue::Bool(true)),
                ("mc1", AnswerValue::OptionIndex(0)),
                ("other", AnswerValue::Bool(true)),
            ]),
        );
        assert!(!state.can_finish());
    }

    #[test]
    fn score_counts_only_exact_matches() {
        let all_wrong = AssessmentState::from_parts(
            vec![tf(), mc()],
            0,
            answered(&[
                ("tf1", AnswerValue::Bool(false)),
                ("mc1", AnswerValue::OptionIndex(1)),
            ]),
        );
        assert_eq!(all_wrong.score(), 0);

        let unanswered = AssessmentState::from_parts(vec![tf(), mc()], 0, []);
        assert_eq!(unanswered.score(), 0);

        let mismatched = AssessmentState::from_parts(
            vec![tf(), mc()],
            0,
            answered(&[
                ("tf1", AnswerValue::OptionIndex(1)),
                ("mc1", AnswerValue::Bool(false)),
            ]),
        );
        assert_eq!(mismatched.score(), 0);

        let all_right = AssessmentState::from_parts(
            vec![tf(), mc()],
            0,
            answered(&[
                ("tf1", AnswerValue::Bool(true)),
                ("mc1", AnswerValue::OptionIndex(0)),
            ]),
        );
        assert_eq!(all_right.score(), 2);
    }

    #[test]
    fn progress_reports_position_and_answered() {
        let state = AssessmentState::from_parts(
            vec![tf(), mc()],
            1,
            answered(&[("tf1", AnswerValue::Bool(true))]),
        );
        let progress = state.progress();
        assert_eq!(progress.position, 2);
        assert_eq!(progress.total, 2);
        assert_eq!(progress.answered, 1);
        assert!((progress.fraction() - 1.0).abs() < f32::EPSILON);

        let empty = AssessmentState::from_parts(Vec::new(), 0, []);
        assert_eq!(empty.progress().position, 0);
        assert!(empty.progress().fraction().abs() < f32::EPSILON);
    }
}
