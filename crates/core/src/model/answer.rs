use serde::{Deserialize, Serialize};

/// A recorded answer: a boolean for binary-choice questions, an option index for
/// multiple-choice questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerValue {
    Bool(bool),
    OptionIndex(usize),
}

impl AnswerValue {
    #[must_use]
    pub fn as_bool(self) -> Option<bool> {
        match self {
            AnswerValue::Bool(value) => Some(value),
            AnswerValue::OptionIndex(_) => None,
        }
    }

    #[must_use]
    pub fn as_option_index(self) -> Option<usize> {
        match self {
            AnswerValue::OptionIndex(index) => Some(index),
            AnswerValue::Bool(_) => None,
        }
    }
}
