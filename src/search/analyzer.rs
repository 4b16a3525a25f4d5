// ============================================================
// Layer 5 — Analyzers
// ============================================================
// Maps each AnalyzerKind onto a tantivy TextAnalyzer chain:
//
//   STANDARD    SimpleTokenizer → RemoveLong(40) → LowerCaser
//   WHITESPACE  WhitespaceTokenizer                (case kept)
//   ENGLISH     SimpleTokenizer → RemoveLong(40) → LowerCaser
//               → StopWordFilter(English) → Stemmer(English)
//
// The English stop set is tantivy's built-in one (the 33 words
// Lucene's EnglishAnalyzer drops), not the longer list the echo
// filter uses.
//
// The contents field records the tokenizer *name* in the schema,
// so every index opened for searching must have all three names
// registered again before the query parser is built.
//
// Reference: tantivy::tokenizer documentation

use anyhow::{Context, Result};
use tantivy::{
    tokenizer::{
        Language, LowerCaser, RemoveLongFilter, SimpleTokenizer, Stemmer, StopWordFilter,
        TextAnalyzer, TokenStream, WhitespaceTokenizer,
    },
    Index,
};

use crate::domain::config::AnalyzerKind;

/// Tokens longer than this are dropped (URLs, base64 blobs)
const MAX_TOKEN_LEN: usize = 40;

/// Name the analyzer is registered under in the index
pub fn tokenizer_name(kind: AnalyzerKind) -> &'static str {
    match kind {
        AnalyzerKind::English    => "wiki_english",
        AnalyzerKind::Standard   => "wiki_standard",
        AnalyzerKind::Whitespace => "wiki_whitespace",
    }
}

pub fn build(kind: AnalyzerKind) -> Result<TextAnalyzer> {
    let analyzer = match kind {
        AnalyzerKind::Standard => TextAnalyzer::builder(SimpleTokenizer::default())
            .filter(RemoveLongFilter::limit(MAX_TOKEN_LEN))
            .filter(LowerCaser)
            .build(),
        AnalyzerKind::Whitespace => TextAnalyzer::builder(WhitespaceTokenizer::default()).build(),
        AnalyzerKind::English => TextAnalyzer::builder(SimpleTokenizer::default())
            .filter(RemoveLongFilter::limit(MAX_TOKEN_LEN))
            .filter(LowerCaser)
            .filter(
                StopWordFilter::new(Language::English)
                    .context("tantivy was built without English stop words")?,
            )
            .filter(Stemmer::new(Language::English))
            .build(),
    };
    Ok(analyzer)
}

/// Register every analyzer on the index's tokenizer manager.
pub fn register_all(index: &Index) -> Result<()> {
    for kind in AnalyzerKind::ALL {
        index.tokenizers().register(tokenizer_name(kind), build(kind)?);
    }
    Ok(())
}

/// Run text through an analyzer and collect the token texts.
pub fn tokens(analyzer: &mut TextAnalyzer, text: &str) -> Vec<String> {
    let mut stream = analyzer.token_stream(text);
    let mut out    = Vec::new();
    while stream.advance() {
        out.push(stream.token().text.clone());
    }
    out
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn analyze(kind: AnalyzerKind, text: &str) -> Vec<String> {
        tokens(&mut build(kind).unwrap(), text)
    }

    #[test]
    fn test_standard_lowercases_and_splits_punctuation() {
        assert_eq!(
            analyze(AnalyzerKind::Standard, "The Eiffel-Tower, Paris!"),
            vec!["the", "eiffel", "tower", "paris"]
        );
    }

    #[test]
    fn test_whitespace_keeps_case_and_punctuation() {
        assert_eq!(
            analyze(AnalyzerKind::Whitespace, "The Eiffel-Tower, Paris!"),
            vec!["The", "Eiffel-Tower,", "Paris!"]
        );
    }

    #[test]
    fn test_english_drops_stop_words_and_stems() {
        assert_eq!(
            analyze(AnalyzerKind::English, "The cats are running"),
            vec!["cat", "run"]
        );
    }

    #[test]
    fn test_english_uses_lucene_stop_set() {
        // "not" is in the Lucene set, "what" is not
        assert_eq!(
            analyze(AnalyzerKind::English, "what is not here"),
            vec!["what", "here"]
        );
    }

    #[test]
    fn test_tokenizer_names_are_distinct() {
        let names: std::collections::HashSet<_> =
            AnalyzerKind::ALL.iter().map(|k| tokenizer_name(*k)).collect();
        assert_eq!(names.len(), 3);
    }
}
