use serde::Serialize;
use std::str::FromStr;

/// Which of the two fields on a deck line holds the question.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColumnRole {
    Left,
    Right,
}

impl ColumnRole {
    pub fn assign(self, first: &str, second: &str) -> QuestionPair {
        let (question, answer) = match self {
            ColumnRole::Left => (first, second),
            ColumnRole::Right => (second, first),
        };
        QuestionPair::new(question, answer)
    }
}

impl FromStr for ColumnRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_ref() {
            "left" => Ok(ColumnRole::Left),
            "right" => Ok(ColumnRole::Right),
            other => Err(format!("unknown column role {:?}, expected left or right", other)),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct QuestionPair {
    pub question: String,
    pub answer: String,
}

impl QuestionPair {
    pub fn new<Q: Into<String>, A: Into<String>>(question: Q, answer: A) -> Self {
        QuestionPair {
            question: question.into(),
            answer: answer.into(),
        }
    }

    pub fn is_answer_correct(&self, submitted: &str) -> bool {
        normalize_answer(submitted) == normalize_answer(&self.answer)
    }
}

// Only edges and case are forgiven. Inner whitespace, punctuation and accents must match.
pub fn normalize_answer(answer: &str) -> String {
    answer.trim().to_lowercase()
}
