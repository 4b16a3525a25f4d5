// ============================================================
// Layer 4 — Wiki Dump Loader
// ============================================================
// Reads every dump file in a directory and runs it through the
// WikiDumpParser.
//
//   data/
//     enwiki-20140602-pages-articles.xml-0005.txt
//     enwiki-20140602-pages-articles.xml-0006.txt
//     .DS_Store                     ← hidden, skipped
//
// Files are visited in name order so repeated builds produce
// the same document order.
//
// Reference: Rust Book §9 (Error Handling), §12 (I/O)

use anyhow::{bail, Context, Result};
use std::{
    fs::{self, File},
    io::BufReader,
    path::{Path, PathBuf},
};

use crate::data::wiki_parser::WikiDumpParser;
use crate::domain::{
    config::Tier,
    document::WikiDocument,
    traits::{DocumentSource, Lemmatizer},
};

/// Loads every dump file from a directory.
/// Implements the DocumentSource trait from Layer 3.
pub struct WikiDumpLoader<'a> {
    dir:        PathBuf,
    tier:       Tier,
    lemmatizer: Option<&'a dyn Lemmatizer>,
}

impl<'a> WikiDumpLoader<'a> {
    pub fn new(dir: impl Into<PathBuf>, tier: Tier) -> Self {
        Self {
            dir: dir.into(),
            tier,
            lemmatizer: None,
        }
    }

    pub fn with_lemmatizer(mut self, lemmatizer: &'a dyn Lemmatizer) -> Self {
        self.lemmatizer = Some(lemmatizer);
        self
    }

    /// Regular, non-hidden files of the directory in name order
    pub fn dump_files(&self) -> Result<Vec<PathBuf>> {
        if !self.dir.is_dir() {
            bail!("Wiki dump directory '{}' does not exist", self.dir.display());
        }

        let mut files = Vec::new();
        for entry in fs::read_dir(&self.dir)
            .with_context(|| format!("Cannot read directory '{}'", self.dir.display()))?
        {
            let path = entry?.path();
            if path.is_file() && !is_hidden(&path) {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }

    fn load_file(&self, path: &Path) -> Result<Vec<WikiDocument>> {
        let file = File::open(path)
            .with_context(|| format!("Cannot open '{}'", path.display()))?;

        let mut parser = WikiDumpParser::new(self.tier);
        if let Some(lemmatizer) = self.lemmatizer {
            parser = parser.with_lemmatizer(lemmatizer);
        }
        parser
            .parse(BufReader::new(file))
            .with_context(|| format!("Cannot parse '{}'", path.display()))
    }
}

impl DocumentSource for WikiDumpLoader<'_> {
    fn load_all(&self) -> Result<Vec<WikiDocument>> {
        let mut docs = Vec::new();

        for path in self.dump_files()? {
            let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("?");
            tracing::info!("Indexing file {}", name);

            match self.load_file(&path) {
                Ok(file_docs) => {
                    tracing::debug!("{}: {} documents", name, file_docs.len());
                    docs.extend(file_docs);
                }
                // One unreadable file should not sink the whole corpus
                Err(e) => tracing::warn!("Skipping '{}': {:#}", path.display(), e),
            }
        }

        tracing::info!("Parsed {} documents from '{}'", docs.len(), self.dir.display());
        Ok(docs)
    }
}

/// `.DS_Store`, `.gitkeep` and friends
fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with('.'))
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &Path, name: &str, body: &str) {
        fs::write(dir.join(name), body).unwrap();
    }

    #[test]
    fn test_loads_files_in_name_order() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "b.txt", "[[Second]]\ntwo\n");
        write(tmp.path(), "a.txt", "[[First]]\none\n");

        let docs = WikiDumpLoader::new(tmp.path(), Tier::Good).load_all().unwrap();
        let titles: Vec<_> = docs.iter().map(|d| d.title.as_str()).collect();
        assert_eq!(titles, vec!["First", "Second"]);
    }

    #[test]
    fn test_skips_hidden_files_and_subdirs() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), ".DS_Store", "[[Junk]]\n");
        write(tmp.path(), "dump.txt", "[[Real]]\nbody\n");
        fs::create_dir(tmp.path().join("nested")).unwrap();

        let loader = WikiDumpLoader::new(tmp.path(), Tier::Good);
        assert_eq!(loader.dump_files().unwrap().len(), 1);
        assert_eq!(loader.load_all().unwrap()[0].title, "Real");
    }

    #[test]
    fn test_missing_directory_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let err = WikiDumpLoader::new(tmp.path().join("nope"), Tier::Good)
            .load_all()
            .unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }
}
