// ============================================================
// Layer 5 — Lemmatizer
// ============================================================
// Reduces words to a base form before they are indexed or
// queried. The reduction itself is tantivy's Snowball stemmer
// (rust-stemmers under the hood); this type only chains it
// behind a tokenizer and lower-caser and exposes it through
// the Lemmatizer trait.
//
//   "The Romans were building roads"
//   → ["the", "roman", "were", "build", "road"]
//
// Stop words are kept: deciding what to drop is the analyzer's
// job, not the lemmatizer's.

use tantivy::tokenizer::{Language, LowerCaser, SimpleTokenizer, Stemmer, TextAnalyzer};

use crate::domain::traits::Lemmatizer;
use crate::search::analyzer;

#[derive(Clone)]
pub struct StemmingLemmatizer {
    analyzer: TextAnalyzer,
}

impl StemmingLemmatizer {
    pub fn english() -> Self {
        Self::new(Language::English)
    }

    pub fn new(language: Language) -> Self {
        let analyzer = TextAnalyzer::builder(SimpleTokenizer::default())
            .filter(LowerCaser)
            .filter(Stemmer::new(language))
            .build();
        Self { analyzer }
    }
}

impl Default for StemmingLemmatizer {
    fn default() -> Self {
        Self::english()
    }
}

impl Lemmatizer for StemmingLemmatizer {
    fn lemmatize(&self, text: &str) -> Vec<String> {
        // token_stream needs &mut; the analyzer is cheap to clone
        let mut analyzer = self.analyzer.clone();
        analyzer::tokens(&mut analyzer, text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lemmatize_keeps_order_and_stop_words() {
        let lem = StemmingLemmatizer::english();
        assert_eq!(
            lem.lemmatize("The Romans were building roads"),
            vec!["the", "roman", "were", "build", "road"]
        );
    }

    #[test]
    fn test_lemmatize_to_string_joins_with_spaces() {
        let lem = StemmingLemmatizer::english();
        assert_eq!(lem.lemmatize_to_string("Cities, rivers!"), "citi river");
    }

    #[test]
    fn test_empty_text() {
        assert!(StemmingLemmatizer::default().lemmatize("  ...  ").is_empty());
    }
}
