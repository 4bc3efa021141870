use std::fmt;

use quiz_core::model::{
    AnswerValue, AssessmentProgress, AssessmentState, AssessmentSummary, Question,
};

pub const ERROR_MESSAGE: &str = "Something unexpected has happened!";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    pub label: String,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionScreen {
    pub progress: AssessmentProgress,
    pub text: String,
    pub choices: Vec<Choice>,
    /// Choices are typed as `t`/`f` rather than numbered.
    pub is_binary: bool,
    pub can_go_previous: bool,
    pub can_go_next: bool,
    pub can_finish: bool,
    pub is_last: bool,
}

/// What the terminal shows for a given state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Loading,
    Error,
    Question(QuestionScreen),
    Completed { score: usize, total: usize },
}

impl Screen {
    #[must_use]
    pub fn project(state: &AssessmentState) -> Self {
        if state.is_loading() {
            return Screen::Loading;
        }
        if state.is_error() {
            return Screen::Error;
        }
        if state.is_completed() {
            return Screen::Completed {
                score: state.score(),
                total: state.questions().len(),
            };
        }
        let Some(question) = state.current_question() else {
            return Screen::Error;
        };

        let answer = state.current_answer();
        let (choices, is_binary) = match question {
            Question::BinaryChoice(_) => {
                let selected = answer.and_then(AnswerValue::as_bool);
                (
                    vec![
                        Choice {
                            label: "True".into(),
                            selected: selected == Some(true),
                        },
                        Choice {
                            label: "False".into(),
                            selected: selected == Some(false),
                        },
                    ],
                    true,
                )
            }
            Question::MultipleChoice(q) => {
                let selected = answer.and_then(AnswerValue::as_option_index);
                let choices = q
                    .options()
                    .iter()
                    .enumerate()
                    .map(|(index, option)| Choice {
                        label: option.clone(),
                        selected: selected == Some(index),
                    })
                    .collect();
                (choices, false)
            }
        };

        Screen::Question(QuestionScreen {
            progress: state.progress(),
            text: question.text().to_string(),
            choices,
            is_binary,
            can_go_previous: state.can_go_previous(),
            can_go_next: state.can_go_next(),
            can_finish: state.can_finish(),
            is_last: state.is_last_question(),
        })
    }
}

const BAR_WIDTH: usize = 20;

fn progress_bar(fraction: f32) -> String {
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_precision_loss,
        clippy::cast_sign_loss
    )]
    let filled = ((fraction.clamp(0.0, 1.0) * BAR_WIDTH as f32).round() as usize).min(BAR_WIDTH);
    format!("[{}{}]", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled))
}

/// Line printed once when an assessment is finished.
#[must_use]
pub fn celebration(summary: &AssessmentSummary) -> String {
    if summary.is_perfect() {
        format!("*** Perfect score! {}% ***", summary.percent())
    } else {
        format!("You answered {}% of the questions correctly.", summary.percent())
    }
}

fn enabled(flag: bool, label: &str) -> String {
    if flag {
        label.to_string()
    } else {
        format!("({label})")
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Screen::Loading => writeln!(f, "Loading questions..."),
            Screen::Error => {
                writeln!(f, "{ERROR_MESSAGE}")?;
                writeln!(f, "Type `restart` to try again or `quit` to leave.")
            }
            Screen::Completed { score, total } => {
                writeln!(f, "Assessment Completed!")?;
                writeln!(f, "Your Score: {score} out of {total}")?;
                writeln!(f, "Type `restart` to start a new assessment.")
            }
            Screen::Question(q) => {
                writeln!(
                    f,
                    "{} Question {} of {}",
                    progress_bar(q.progress.fraction()),
                    q.progress.position,
                    q.progress.total
                )?;
                writeln!(f)?;
                writeln!(f, "{}", q.text)?;
                for (index, choice) in q.choices.iter().enumerate() {
                    let marker = if choice.selected { "x" } else { " " };
                    let key = if q.is_binary {
                        choice.label[..1].to_ascii_lowercase()
                    } else {
                        (index + 1).to_string()
                    };
                    writeln!(f, "  [{marker}] {key}) {}", choice.label)?;
                }
                writeln!(f)?;
                let forward = if q.is_last {
                    enabled(q.can_finish, "finish")
                } else {
                    enabled(q.can_go_next, "next")
                };
                writeln!(f, "{}  {}", enabled(q.can_go_previous, "prev"), forward)
            }
        }
    }
}
