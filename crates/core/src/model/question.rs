use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use thiserror::Error;

use crate::model::{AnswerValue, QuestionId};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question id cannot be empty")]
    EmptyId,

    #[error("question {id} has no text")]
    EmptyText { id: QuestionId },

    #[error("question {id} needs at least two options, found {len}")]
    TooFewOptions { id: QuestionId, len: usize },

    #[error("question {id} has an empty option at index {index}")]
    EmptyOption { id: QuestionId, index: usize },

    #[error("question {id} marks option {index} correct but only has {len} options")]
    CorrectOptionOutOfRange {
        id: QuestionId,
        index: usize,
        len: usize,
    },

    #[error("duplicate question id: {id}")]
    DuplicateId { id: QuestionId },
}

//
// ─── KIND ──────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuestionKind {
    BinaryChoice,
    MultipleChoice,
}

impl fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionKind::BinaryChoice => f.write_str("binary-choice"),
            QuestionKind::MultipleChoice => f.write_str("multiple-choice"),
        }
    }
}

//
// ─── QUESTIONS ─────────────────────────────────────────────────────────────────
//

/// A true/false question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryChoice {
    id: QuestionId,
    text: String,
    correct_answer: bool,
}

impl BinaryChoice {
    /// # Errors
    ///
    /// Returns `QuestionError` if the id or text is blank.
    pub fn new(
        id: impl Into<String>,
        text: impl Into<String>,
        correct_answer: bool,
    ) -> Result<Self, QuestionError> {
        let id = validated_id(id.into())?;
        let text = validated_text(&id, text.into())?;
        Ok(Self {
            id,
            text,
            correct_answer,
        })
    }

    #[must_use]
    pub fn id(&self) -> &QuestionId {
        &self.id
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn correct_answer(&self) -> bool {
        self.correct_answer
    }
}

/// A single-select question over an ordered list of at least two options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultipleChoice {
    id: QuestionId,
    text: String,
    options: Vec<String>,
    correct_option_index: usize,
}

impl MultipleChoice {
    /// # Errors
    ///
    /// Returns `QuestionError` if the id, text or any option is blank, if there are
    /// fewer than two options, or if `correct_option_index` is out of range.
    pub fn new(
        id: impl Into<String>,
        text: impl Into<String>,
        options: Vec<String>,
        correct_option_index: usize,
    ) -> Result<Self, QuestionError> {
        let id = validated_id(id.into())?;
        let text = validated_text(&id, text.into())?;

        if options.len() < 2 {
            return Err(QuestionError::TooFewOptions {
                id,
                len: options.len(),
            });
        }
        if let Some(index) = options.iter().position(|option| option.trim().is_empty()) {
            return Err(QuestionError::EmptyOption { id, index });
        }
        if correct_option_index >= options.len() {
            return Err(QuestionError::CorrectOptionOutOfRange {
                id,
                index: correct_option_index,
                len: options.len(),
            });
        }

        Ok(Self {
            id,
            text,
            options,
            correct_option_index,
        })
    }

    #[must_use]
    pub fn id(&self) -> &QuestionId {
        &self.id
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn correct_option_index(&self) -> usize {
        self.correct_option_index
    }
}

fn validated_id(raw: String) -> Result<QuestionId, QuestionError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(QuestionError::EmptyId);
    }
    Ok(QuestionId::new(trimmed))
}

fn validated_text(id: &QuestionId, text: String) -> Result<String, QuestionError> {
    if text.trim().is_empty() {
        return Err(QuestionError::EmptyText { id: id.clone() });
    }
    Ok(text)
}

/// A question in an assessment session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Question {
    BinaryChoice(BinaryChoice),
    MultipleChoice(MultipleChoice),
}

impl Question {
    #[must_use]
    pub fn id(&self) -> &QuestionId {
        match self {
            Question::BinaryChoice(q) => q.id(),
            Question::MultipleChoice(q) => q.id(),
        }
    }

    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Question::BinaryChoice(q) => q.text(),
            Question::MultipleChoice(q) => q.text(),
        }
    }

    #[must_use]
    pub fn kind(&self) -> QuestionKind {
        match self {
            Question::BinaryChoice(_) => QuestionKind::BinaryChoice,
            Question::MultipleChoice(_) => QuestionKind::MultipleChoice,
        }
    }

    /// Returns true when `answer` has the right shape for this question: a boolean
    /// for binary-choice, an in-range option index for multiple-choice.
    #[must_use]
    pub fn accepts(&self, answer: AnswerValue) -> bool {
        match (self, answer) {
            (Question::BinaryChoice(_), AnswerValue::Bool(_)) => true,
            (Question::MultipleChoice(q), AnswerValue::OptionIndex(index)) => {
                index < q.options().len()
            }
            _ => false,
        }
    }

    /// Returns true when `answer` is the correct answer. A variant mismatch is never
    /// correct.
    #[must_use]
    pub fn is_correct(&self, answer: AnswerValue) -> bool {
        match (self, answer) {
            (Question::BinaryChoice(q), AnswerValue::Bool(value)) => q.correct_answer() == value,
            (Question::MultipleChoice(q), AnswerValue::OptionIndex(index)) => {
                q.correct_option_index() == index
            }
            _ => false,
        }
    }
}

impl From<BinaryChoice> for Question {
    fn from(question: BinaryChoice) -> Self {
        Self::BinaryChoice(question)
    }
}

impl From<MultipleChoice> for Question {
    fn from(question: MultipleChoice) -> Self {
        Self::MultipleChoice(question)
    }
}

//
// ─── DRAFTS ────────────────────────────────────────────────────────────────────
//

/// Unvalidated question as it appears in a catalog document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum QuestionDraft {
    BinaryChoice {
        id: String,
        text: String,
        correct_answer: bool,
    },
    MultipleChoice {
        id: String,
        text: String,
        options: Vec<String>,
        correct_option_index: usize,
    },
}

impl QuestionDraft {
    /// # Errors
    ///
    /// Returns `QuestionError` if the draft breaks a question invariant.
    pub fn validate(self) -> Result<Question, QuestionError> {
        match self {
            QuestionDraft::BinaryChoice {
                id,
                text,
                correct_answer,
            } => BinaryChoice::new(id, text, correct_answer).map(Question::from),
            QuestionDraft::MultipleChoice {
                id,
                text,
                options,
                correct_option_index,
            } => MultipleChoice::new(id, text, options, correct_option_index).map(Question::from),
        }
    }
}

/// Validate every draft and reject duplicate ids, preserving order.
///
/// # Errors
///
/// Returns the first `QuestionError` encountered.
pub fn validate_catalog(
    drafts: impl IntoIterator<Item = QuestionDraft>,
) -> Result<Vec<Question>, QuestionError> {
    let mut seen = HashSet::new();
    let mut questions = Vec::new();
    for draft in drafts {
        let question = draft.validate()?;
        if !seen.insert(question.id().clone()) {
            return Err(QuestionError::DuplicateId {
                id: question.id().clone(),
            });
        }
        questions.push(question);
    }
    Ok(questions)
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
