// ============================================================
// Layer 2 — IndexUseCase
// ============================================================
// Builds the index for one configuration:
//
//   Step 1: Pick the lemmatizer (or none)        (Layer 5 - search)
//   Step 2: Parse every dump file into documents (Layer 4 - data)
//   Step 3: Write and commit the tantivy index   (Layer 5 - search)
//   Step 4: Save the build manifest              (Layer 6 - infra)
//
// The index directory is derived from the configuration, so
// every tier / analyzer / lemmatization combination gets its own.
//
// Reference: Rust Book §13 (Iterators and Closures)
//            tantivy::IndexWriter

use anyhow::Result;
use std::{path::PathBuf, time::Instant};

use crate::data::loader::WikiDumpLoader;
use crate::domain::{config::HarnessConfig, traits::DocumentSource};
use crate::infra::manifest::IndexManifest;
use crate::search::{indexer::IndexBuilder, lemmatizer::StemmingLemmatizer};

/// What a finished build produced
#[derive(Debug, Clone, PartialEq)]
pub struct IndexStats {
    pub path:      PathBuf,
    pub documents: usize,
    pub millis:    u64,
}

pub struct IndexUseCase {
    config: HarnessConfig,
}

impl IndexUseCase {
    pub fn new(config: HarnessConfig) -> Self {
        Self { config: config.resolved() }
    }

    /// Directory the index will be written to
    pub fn index_path(&self) -> PathBuf {
        self.config.index_path()
    }

    pub fn execute(&self) -> Result<IndexStats> {
        let cfg   = &self.config;
        let start = Instant::now();
        let path  = cfg.index_path();

        tracing::info!(
            "Indexing '{}' into '{}' ({} analyzer, tier {}, lemmatize={})",
            cfg.data_dir,
            path.display(),
            cfg.analyzer,
            cfg.tier,
            cfg.lemmatize
        );

        // ── Step 1: Lemmatizer ────────────────────────────────────────────
        let lemmatizer = cfg.lemmatize.then(StemmingLemmatizer::english);

        // ── Step 2: Parse the dump ────────────────────────────────────────
        let mut loader = WikiDumpLoader::new(&cfg.data_dir, cfg.tier);
        if let Some(lemmatizer) = &lemmatizer {
            loader = loader.with_lemmatizer(lemmatizer);
        }
        let documents = loader.load_all()?;
        let title_only = documents.iter().filter(|d| d.is_empty()).count();
        if title_only > 0 {
            tracing::debug!("{} documents have a title but no content", title_only);
        }

        // ── Step 3: Write the index ───────────────────────────────────────
        let mut builder = IndexBuilder::create(&path, cfg.analyzer)?;
        builder.add_documents(&documents)?;
        let written = builder.commit()?;

        // ── Step 4: Manifest ──────────────────────────────────────────────
        let millis = start.elapsed().as_millis() as u64;
        IndexManifest::new(cfg, written, millis).save(&path)?;

        tracing::debug!("Indexed {} documents in {} ms", written, millis);
        Ok(IndexStats { path, documents: written, millis })
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::config::{AnalyzerKind, Tier};
    use crate::search::searcher::WikiSearcher;
    use std::fs;
    use tempfile::TempDir;

    const DUMP: &str = "\
[[Paris]]
CATEGORIES: Capitals in Europe
Paris is the capital of France.
[[Lyon]]
Lyon is known for its festival of lights.
";

    fn config(tmp: &TempDir) -> HarnessConfig {
        let data = tmp.path().join("data");
        fs::create_dir_all(&data).unwrap();
        fs::write(data.join("enwiki-0001.txt"), DUMP).unwrap();
        HarnessConfig {
            data_dir:   data.to_string_lossy().into_owned(),
            index_root: tmp.path().to_string_lossy().into_owned(),
            ..HarnessConfig::default()
        }
    }

    #[test]
    fn test_builds_index_and_manifest() {
        let tmp   = TempDir::new().unwrap();
        let cfg   = config(&tmp);
        let stats = IndexUseCase::new(cfg.clone()).execute().unwrap();

        assert_eq!(stats.documents, 2);
        assert_eq!(stats.path, tmp.path().join("index_STANDARD_GOOD_LEMMA"));

        let manifest = IndexManifest::load(&stats.path).unwrap().unwrap();
        assert_eq!(manifest.documents, 2);
        assert!(manifest.mismatches(&cfg).is_empty());

        let searcher = WikiSearcher::open(&stats.path).unwrap();
        assert_eq!(searcher.num_docs(), 2);
    }

    #[test]
    fn test_best_tier_builds_english_index() {
        let tmp = TempDir::new().unwrap();
        let cfg = HarnessConfig { tier: Tier::Best, lemmatize: false, ..config(&tmp) };
        let stats = IndexUseCase::new(cfg).execute().unwrap();

        assert!(stats.path.ends_with("index_ENGLISH_BEST_NOLEMMA"));
        let searcher = WikiSearcher::open(&stats.path).unwrap();
        assert_eq!(searcher.analyzer(), AnalyzerKind::English);
    }

    #[test]
    fn test_rebuild_replaces_previous_index() {
        let tmp = TempDir::new().unwrap();
        let cfg = config(&tmp);
        IndexUseCase::new(cfg.clone()).execute().unwrap();
        let stats = IndexUseCase::new(cfg).execute().unwrap();

        let searcher = WikiSearcher::open(&stats.path).unwrap();
        assert_eq!(searcher.num_docs(), 2);
    }

    #[test]
    fn test_missing_data_dir_fails() {
        let tmp = TempDir::new().unwrap();
        let cfg = HarnessConfig {
            data_dir:   tmp.path().join("nope").to_string_lossy().into_owned(),
            index_root: tmp.path().to_string_lossy().into_owned(),
            ..HarnessConfig::default()
        };
        assert!(IndexUseCase::new(cfg).execute().is_err());
    }
}
