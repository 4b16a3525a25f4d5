// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything between raw text files and the search layer:
//
//   data/*.txt (wiki dump)            questions.txt
//       │                                 │
//       ▼                                 ▼
//   WikiDumpLoader                    QuestionReader
//       │                                 │
//       ▼                                 ▼
//   WikiDumpParser → WikiDocument     Question
//                                         │
//                                         ▼
//                                     normalizer → query text
//
// Reference: Rust Book §12 (I/O), §13 (Iterators and Closures)

/// Reads a directory of dump files
pub mod loader;

/// Segments one dump into titled documents
pub mod wiki_parser;

/// Reads 4-line question records
pub mod questions;

/// Builds query text from a question
pub mod normalizer;
