// ============================================================
// Layer 3 — Answer Matching Heuristics
// ============================================================
// Two small string rules decide everything the harness reports:
//
//   1. Echo filtering (BEST tier): a hit whose title already
//      appears in the question is skipped in favour of the next
//      one, so "This city in France..." is not answered "France".
//
//   2. Correctness: the retrieved title counts as correct when
//      either string contains the other.
//
// Reference: Rust Book §8 (Strings), §13 (Iterators)

use std::collections::HashSet;

use crate::domain::hit::TopHit;

/// English stop words ignored when comparing title words with
/// question words.
pub const STOP_WORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "am", "an", "and", "any",
    "are", "as", "at", "be", "because", "been", "before", "being", "below", "between", "both",
    "but", "by", "could", "did", "do", "does", "doing", "down", "during", "each", "few", "for",
    "from", "further", "had", "has", "have", "having", "he", "he'd", "he'll", "he's", "her",
    "here", "here's", "hers", "herself", "him", "himself", "his", "how", "how's", "i", "i'd",
    "i'll", "i'm", "i've", "if", "in", "into", "is", "it", "it's", "its", "itself", "let's",
    "me", "more", "most", "my", "myself", "nor", "of", "on", "once", "only", "or", "other",
    "ought", "our", "ours", "ourselves", "out", "over", "own", "same", "she", "she'd",
    "she'll", "she's", "should", "so", "some", "such", "than", "that", "that's", "the",
    "their", "theirs", "them", "themselves", "then", "there", "there's", "these", "they",
    "they'd", "they'll", "they're", "they've", "this", "those", "through", "to", "too",
    "under", "until", "up", "very", "was", "we", "we'd", "we'll", "we're", "we've", "were",
    "what", "what's", "when", "when's", "where", "where's", "which", "while", "who", "who's",
    "whom", "why", "why's", "with", "would", "you", "you'd", "you'll", "you're", "you've",
    "your", "yours", "yourself", "yourselves",
];

pub fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.contains(&word)
}

/// True if any non-stop-word of the (lower-cased) title appears
/// verbatim among the whitespace-separated words of the query.
///
/// The query is not lower-cased: query text built from a lemmatizer
/// is already lower case, raw question text keeps its capitals.
pub fn title_overlaps_question(title: &str, query: &str) -> bool {
    let title = title.to_lowercase();
    let query_words: HashSet<&str> = query.split_whitespace().collect();

    title
        .split_whitespace()
        .filter(|w| !is_stop_word(w))
        .any(|w| query_words.contains(w))
}

/// BEST-tier rule: skip a hit when the title and the query contain
/// one another, or share a meaningful word.
pub fn is_excluded_hit(title: &str, query: &str) -> bool {
    query.contains(title) || title.contains(query) || title_overlaps_question(title, query)
}

/// A retrieved title is correct when it contains the expected answer
/// or the expected answer contains it. Sentinel outcomes and empty
/// strings never match.
pub fn is_correct(expected: &str, result: &TopHit) -> bool {
    let Some(title) = result.title() else {
        return false;
    };
    titles_match(expected, title)
}

/// Symmetric containment between an expected answer and a title
pub fn titles_match(expected: &str, title: &str) -> bool {
    let expected = expected.trim();
    let title    = title.trim();
    if expected.is_empty() || title.is_empty() {
        return false;
    }
    title.contains(expected) || expected.contains(title)
}
