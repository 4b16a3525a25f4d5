// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Plain Rust types that describe the harness: what a wiki
// document is, what a trivia question is, which knobs a run
// can turn, and how a retrieved title is judged.
//
// Rules for this layer:
//   - NO tantivy types allowed here
//   - NO file I/O
//   - Only plain structs, enums, traits and pure functions
//
// Reference: Rust Book §5 (Structs), §6 (Enums), §10 (Traits)

// A titled section of the wiki dump
pub mod document;

// A category / question / answer record
pub mod question;

// Quality tier, scoring function, analyzer and the run config
pub mod config;

// The outcome of asking the index one question
pub mod hit;

// Stop words and the answer-matching heuristics
pub mod matching;

// Core abstractions (traits) that other layers implement
pub mod traits;
