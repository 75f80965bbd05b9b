use serde::{Deserialize, Serialize};

/// Difficulty of a question, derived from the name of the catalog file it
/// was loaded from. Anything that is not a known level maps to `Unknown`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Junior,
    Middle,
    Senior,
    #[default]
    Unknown,
}

impl Level {
    pub fn from_file_stem(stem: &str) -> Self {
        match stem {
            "junior" => Level::Junior,
            "middle" => Level::Middle,
            "senior" => Level::Senior,
            _ => Level::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Junior => "junior",
            Level::Middle => "middle",
            Level::Senior => "senior",
            Level::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerOption {
    pub answer_id: i32,
    pub answer_text: String,
}

/// A single multiple-choice question as it appears in the catalog files.
/// `correct_answer_id`, `hint` and `theme` are optional in the source data;
/// the owning category and level are filled in by the loader.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub question: String,
    pub answers: Vec<AnswerOption>,
    #[serde(default)]
    pub correct_answer_id: Option<i32>,
    #[serde(default)]
    pub hint: Option<String>,
    #[serde(default)]
    pub theme: Option<String>,
    #[serde(skip)]
    pub category: String,
    #[serde(skip)]
    pub level: Level,
}

impl Question {
    /// A question without a correct-answer id can never be graded, so the
    /// selector must skip it.
    pub fn is_selectable(&self) -> bool {
        self.correct_answer_id.is_some() && !self.answers.is_empty()
    }
}
