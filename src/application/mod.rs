// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// Each use case wires the lower layers together for one job:
//
//   index_use_case.rs    — dump files → documents → tantivy index
//   evaluate_use_case.rs — questions file → queries → accuracy
//   ask_use_case.rs      — one ad-hoc question → top title
//
// Rules for this layer:
//   - No scoring math or tokenization here (Layer 5)
//   - No argument parsing or prompting (Layer 1)
//   - Per-question transcript lines go to a caller-supplied writer
//
// Reference: Clean Architecture pattern
//            Rust Book §7 (Module System)

// Build an index from the wiki dump
pub mod index_use_case;

// Score the questions file against a built index
pub mod evaluate_use_case;

// Answer a single question
pub mod ask_use_case;
