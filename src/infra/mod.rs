// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Files the harness writes besides the index itself:
//
//   manifest.rs — harness_manifest.json inside each index
//                 directory: tier, analyzer, lemmatization and
//                 document count of the build
//
//   report.rs   — per-question CSV of an evaluation run plus
//                 the accuracy / MRR summary
//
// Reference: Rust Book §7 (Modules)
//            Rust Book §9 (Error Handling with anyhow)

/// Build settings persisted next to the index
pub mod manifest;

/// Evaluation results CSV and summary
pub mod report;
