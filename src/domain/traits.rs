// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The seams between the harness and the outside world:
//
//   DocumentSource → where wiki documents come from
//                    (WikiDumpLoader reads a directory of dumps)
//   Lemmatizer     → the NLP step that reduces words to base forms
//                    (StemmingLemmatizer wraps tantivy's Snowball stemmer)
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)

use anyhow::Result;

use crate::domain::document::WikiDocument;

// ─── DocumentSource ───────────────────────────────────────────────────────────
/// Any component that can produce the documents to index.
pub trait DocumentSource {
    fn load_all(&self) -> Result<Vec<WikiDocument>>;
}

// ─── Lemmatizer ───────────────────────────────────────────────────────────────
/// Turns free text into its ordered sequence of lemma tokens.
pub trait Lemmatizer {
    fn lemmatize(&self, text: &str) -> Vec<String>;

    /// Lemmatize and re-join with single spaces, the form stored in
    /// the index and sent to the query parser.
    fn lemmatize_to_string(&self, text: &str) -> String {
        self.lemmatize(text).join(" ")
    }
}
