use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: i32,
    pub title: String,
    pub question_text: String,
    pub question_type: QuestionType,
    pub difficulty: Difficulty,
    pub correct_answer: Option<String>, // letter for choice questions, model answer otherwise
    pub options: Option<Vec<String>>,
    pub max_score: i32,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, Copy)]
#[serde(rename_all = "lowercase")]
pub enum QuestionType {
    Reading,
    Vocabulary,
    Grammar,
    Writing,
}

impl QuestionType {
    /// Vocabulary and grammar questions are answered by picking a choice.
    pub fn is_choice(&self) -> bool {
        matches!(self, QuestionType::Vocabulary | QuestionType::Grammar)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, Copy)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Medium => write!(f, "medium"),
            Difficulty::Hard => write!(f, "hard"),
        }
    }
}
