use async_trait::async_trait;
use quiz_core::model::{Question, QuestionDraft, validate_catalog};

use super::QuestionSource;
use crate::error::CatalogError;

/// The questions shipped with the app.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticCatalog;

#[async_trait]
impl QuestionSource for StaticCatalog {
    async fn fetch_catalog(&self) -> Result<Vec<Question>, CatalogError> {
        Ok(validate_catalog(builtin_drafts())?)
    }
}

fn binary(id: &str, text: &str, correct_answer: bool) -> QuestionDraft {
    QuestionDraft::BinaryChoice {
        id: id.to_string(),
        text: text.to_string(),
        correct_answer,
    }
}

fn multiple(
    id: &str,
    text: &str,
    options: [&str; 4],
    correct_option_index: usize,
) -> QuestionDraft {
    QuestionDraft::MultipleChoice {
        id: id.to_string(),
        text: text.to_string(),
        options: options.iter().map(|option| (*option).to_string()).collect(),
        correct_option_index,
    }
}

fn builtin_drafts() -> Vec<QuestionDraft> {
    vec![
        binary(
            "tf1",
            "Kotlin is the official language for Android development.",
            true,
        ),
        binary(
            "tf2",
            "An Activity is destroyed during recomposition in Jetpack Compose.",
            false,
        ),
        binary(
            "tf3",
            "ViewModels are automatically cleared when their associated fragment or activity is destroyed.",
            true,
        ),
        binary(
            "tf4",
            "Room database operations can be performed on the main thread by default.",
            false,
        ),
        binary(
            "tf5",
            "Material3 is the latest design system for Android applications.",
            true,
        ),
        multiple(
            "mc1",
            "Which of the following is the preferred programming language for Android app development?",
            ["Swift", "Kotlin", "Objective-C", "Java"],
            1,
        ),
        multiple(
            "mc2",
            "Which architectural pattern is recommended by Google for Android apps?",
            ["MVC", "MVVM", "MVP", "VIPER"],
            1,
        ),
        multiple(
            "mc3",
            "Which component is NOT part of Android Jetpack?",
            ["Room", "LiveData", "Volley", "Navigation"],
            2,
        ),
        multiple(
            "mc4",
            "Which of the following is NOT a Compose UI layout composable?",
            ["Column", "Row", "GridView", "Box"],
            2,
        ),
        multiple(
            "mc5",
            "What is the build system used in modern Android projects?",
            ["Maven", "Ant", "Make", "Gradle"],
            3,
        ),
    ]
}
