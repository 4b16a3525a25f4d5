// ============================================================
// Layer 5 — Search Layer (tantivy)
// ============================================================
// All tantivy-specific code lives here. Everything above this
// layer talks in WikiDocument / TopHit / Similarity terms.
//
//   schema.rs      title + contents fields
//   analyzer.rs    STANDARD / WHITESPACE / ENGLISH token chains
//   lemmatizer.rs  Snowball-backed Lemmatizer implementation
//   indexer.rs     create index, add documents, commit
//   searcher.rs    reopen index, parse, rank, pick the top hit
//   similarity.rs  TF-IDF and tunable BM25 over tantivy statistics
//
// Reference: tantivy documentation

pub mod analyzer;

pub mod schema;

pub mod lemmatizer;

pub mod indexer;

pub mod searcher;

pub mod similarity;
