// ============================================================
// Layer 4 — Query Text Normalizer
// ============================================================
// Turns a Question into the text handed to the query parser.
//
//   1. Replace query-syntax characters  - + ! . ^ : ,  with spaces
//      so the parser never sees them as operators
//   2. BETTER / BEST: append the category (same cleanup, lower case)
//   3. Optionally lemmatize the whole string
//
// Example (BETTER, no lemmatizer):
//   category: "U.S. CITIES"
//   question: "Home of the Space Needle: Seattle, WA"
//   → "Home of the Space Needle  Seattle  WA u s  cities"

use crate::domain::{config::Tier, question::Question, traits::Lemmatizer};

const QUERY_SYNTAX_CHARS: [char; 7] = ['-', '+', '!', '.', '^', ':', ','];

/// Replace each query-syntax character with a space.
pub fn strip_query_syntax(text: &str) -> String {
    text.chars()
        .map(|c| if QUERY_SYNTAX_CHARS.contains(&c) { ' ' } else { c })
        .collect()
}

/// Build the query string for a question at the given tier.
pub fn build_query_text(
    question:   &Question,
    tier:       Tier,
    lemmatizer: Option<&dyn Lemmatizer>,
) -> String {
    let mut text = strip_query_syntax(&question.text);

    if tier.uses_category() {
        text.push(' ');
        text.push_str(&strip_query_syntax(&question.category).to_lowercase());
    }

    match lemmatizer {
        Some(lemmatizer) => lemmatizer.lemmatize_to_string(&text),
        None             => text,
    }
}
