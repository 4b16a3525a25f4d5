// ============================================================
// Layer 5 — Index Builder
// ============================================================
// Creates (or recreates) an on-disk tantivy index and streams
// WikiDocuments into it.
//
//   IndexBuilder::create(path, analyzer)
//       │  wipe the old index, write a fresh schema
//       ▼
//   add_document(doc) × N
//       │
//       ▼
//   commit()  → documents become visible to readers
//
// Indexing runs on a single writer thread so that document
// order on disk follows input order.
//
// Reference: tantivy::IndexWriter documentation

use anyhow::{bail, Context, Result};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tantivy::{Index, IndexWriter, TantivyDocument};

use crate::domain::{config::AnalyzerKind, document::WikiDocument};
use crate::search::{analyzer, schema::WikiSchema};

/// Arena size for the single indexing thread
const WRITER_MEMORY_BYTES: usize = 50_000_000;

/// tantivy writes this file into every index directory
const INDEX_META_FILE: &str = "meta.json";

pub struct IndexBuilder {
    path:    PathBuf,
    schema:  WikiSchema,
    writer:  IndexWriter,
    written: usize,
}

impl IndexBuilder {
    /// Create a new index at `path`, replacing any index already there.
    pub fn create(path: impl AsRef<Path>, analyzer_kind: AnalyzerKind) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        prepare_directory(&path)?;

        let schema = WikiSchema::build(analyzer_kind);
        let index  = Index::create_in_dir(&path, schema.schema.clone())
            .with_context(|| format!("Cannot create index in '{}'", path.display()))?;
        analyzer::register_all(&index)?;

        let writer = index
            .writer_with_num_threads(1, WRITER_MEMORY_BYTES)
            .context("Cannot open index writer")?;

        tracing::debug!("Created empty index in {} ({} analyzer)", path.display(), analyzer_kind);
        Ok(Self { path, schema, writer, written: 0 })
    }

    pub fn add_document(&mut self, doc: &WikiDocument) -> Result<()> {
        let mut tantivy_doc = TantivyDocument::default();
        tantivy_doc.add_text(self.schema.title, &doc.title);
        tantivy_doc.add_text(self.schema.contents, &doc.contents);

        self.writer
            .add_document(tantivy_doc)
            .with_context(|| format!("Cannot index document '{}'", doc.title))?;
        self.written += 1;
        Ok(())
    }

    pub fn add_documents<'d>(&mut self, docs: impl IntoIterator<Item = &'d WikiDocument>) -> Result<()> {
        for doc in docs {
            self.add_document(doc)?;
        }
        Ok(())
    }

    /// Commit, wait for background merges, and return how many
    /// documents were written.
    pub fn commit(mut self) -> Result<usize> {
        self.writer
            .commit()
            .with_context(|| format!("Cannot commit index '{}'", self.path.display()))?;
        self.writer
            .wait_merging_threads()
            .context("Index merge thread failed")?;

        tracing::debug!("Committed {} documents", self.written);
        Ok(self.written)
    }
}

/// Make `path` an empty directory. An existing tantivy index is
/// removed; any other non-empty directory is left alone and the
/// build is refused.
fn prepare_directory(path: &Path) -> Result<()> {
    if path.exists() {
        if !path.is_dir() {
            bail!("'{}' exists and is not a directory", path.display());
        }
        let is_empty = fs::read_dir(path)
            .with_context(|| format!("Cannot read '{}'", path.display()))?
            .next()
            .is_none();
        if !is_empty && !path.join(INDEX_META_FILE).exists() {
            bail!(
                "'{}' is not empty and does not hold an index; refusing to overwrite it",
                path.display()
            );
        }
        fs::remove_dir_all(path)
            .with_context(|| format!("Cannot remove old index '{}'", path.display()))?;
    }
    fs::create_dir_all(path).with_context(|| format!("Cannot create '{}'", path.display()))?;
    Ok(())
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn docs() -> Vec<WikiDocument> {
        vec![
            WikiDocument::new("Paris", "capital of france"),
            WikiDocument::new("Lyon", "festival of lights"),
        ]
    }

    #[test]
    fn test_create_and_commit() {
        let tmp  = TempDir::new().unwrap();
        let path = tmp.path().join("index");

        let mut builder = IndexBuilder::create(&path, AnalyzerKind::Standard).unwrap();
        builder.add_documents(&docs()).unwrap();
        assert_eq!(builder.commit().unwrap(), 2);
        assert!(path.join(INDEX_META_FILE).exists());
    }

    #[test]
    fn test_rebuild_replaces_existing_index() {
        let tmp  = TempDir::new().unwrap();
        let path = tmp.path().join("index");

        let mut first = IndexBuilder::create(&path, AnalyzerKind::Standard).unwrap();
        first.add_documents(&docs()).unwrap();
        first.commit().unwrap();

        let mut second = IndexBuilder::create(&path, AnalyzerKind::English).unwrap();
        second.add_document(&docs()[0]).unwrap();
        assert_eq!(second.commit().unwrap(), 1);

        let index = Index::open_in_dir(&path).unwrap();
        let reader = index.reader().unwrap();
        assert_eq!(reader.searcher().num_docs(), 1);
    }

    #[test]
    fn test_refuses_foreign_directory() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("notes.txt"), "keep me").unwrap();

        let err = IndexBuilder::create(tmp.path(), AnalyzerKind::Standard).err().unwrap();
        assert!(err.to_string().contains("refusing"));
        assert!(tmp.path().join("notes.txt").exists());
    }
}
