mod answer;
mod ids;
mod question;
mod state;
mod summary;

pub use answer::AnswerValue;
pub use ids::{QuestionId, SessionId};

pub use question::{
    BinaryChoice, MultipleChoice, Question, QuestionDraft, QuestionError, QuestionKind,
    validate_catalog,
};
pub use state::{AssessmentProgress, AssessmentState};
pub use summary::{AssessmentSummary, SummaryError};
