// ============================================================
// Layer 3 — Search Outcome Types
// ============================================================

use std::fmt;

/// A retrieved document reduced to what the harness judges: its title.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredTitle {
    pub title: String,
    pub score: f32,
}

/// What the index answered for one question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TopHit {
    /// The first acceptable hit's title
    Found(String),
    /// The query matched no document at all
    NoHits,
    /// Every hit was filtered out (BEST tier echo filtering)
    NoMatch,
}

impl TopHit {
    pub fn title(&self) -> Option<&str> {
        match self {
            TopHit::Found(title) => Some(title),
            _ => None,
        }
    }
}

impl fmt::Display for TopHit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TopHit::Found(title) => f.write_str(title),
            TopHit::NoHits       => f.write_str("NO HITS"),
            TopHit::NoMatch      => f.write_str("no match"),
        }
    }
}
