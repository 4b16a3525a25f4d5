// ============================================================
// Layer 3 — Question Domain Type
// ============================================================
// A single trivia record from the questions file:
//
//   NEWSPAPERS                                  ← category
//   The dominant paper in our nation's capital  ← question
//   The Washington Post                         ← expected answer
//                                               ← separator
//
// Reference: Rust Book §5 (Structs)

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Jeopardy-style category line
    pub category: String,

    /// The clue text that becomes the search query
    pub text: String,

    /// The title we expect the index to return
    pub answer: String,
}

impl Question {
    pub fn new(
        category: impl Into<String>,
        text:     impl Into<String>,
        answer:   impl Into<String>,
    ) -> Self {
        Self {
            category: category.into(),
            text:     text.into(),
            answer:   answer.into(),
        }
    }
}
