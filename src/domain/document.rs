// ============================================================
// Layer 3 — WikiDocument Domain Type
// ============================================================
// One section of the wiki dump: the text between two
// `[[Title]]` markers. The title doubles as the answer the
// harness hopes to retrieve, so it is kept verbatim.
//
// Reference: Rust Book §5 (Structs and Methods)

use serde::{Deserialize, Serialize};

/// A titled document ready to be handed to the index writer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WikiDocument {
    /// Text found inside the `[[...]]` marker
    pub title: String,

    /// All content lines of the section joined by spaces
    /// (lemmatized if the run asked for it)
    pub contents: String,
}

impl WikiDocument {
    pub fn new(title: impl Into<String>, contents: impl Into<String>) -> Self {
        Self {
            title:    title.into(),
            contents: contents.into(),
        }
    }

    /// True if no content line survived parsing
    pub fn is_empty(&self) -> bool {
        self.contents.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_empty_ignores_whitespace() {
        assert!(WikiDocument::new("Paris", "   ").is_empty());
        assert!(!WikiDocument::new("Paris", "capital of France").is_empty());
    }
}
