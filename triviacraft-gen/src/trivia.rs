//! The trivia domain object

use serde::{Deserialize, Serialize};

/// A question/answer pair produced by one generation request.
///
/// Both keys are required when decoding; extra keys are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriviaItem {
    pub question: String,
    pub answer: String,
}

impl TriviaItem {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }
}
