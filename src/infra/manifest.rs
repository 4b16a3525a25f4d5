// ============================================================
// Layer 6 — Index Manifest
// ============================================================
// A small JSON file written next to the tantivy files after a
// successful build, recording how the index was made:
//
//   index_ENGLISH_BEST_LEMMA/
//     meta.json                 ← tantivy
//     *.idx, *.pos, *.store ... ← tantivy
//     harness_manifest.json     ← this file
//
// Evaluation reads it back to warn when the current settings
// disagree with the ones the index was built with (for
// example, lemmatized queries against an unlemmatized index).
//
// Reference: Rust Book §9 (Error Handling)
//            serde_json documentation

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

use crate::domain::config::{AnalyzerKind, HarnessConfig, Tier};

pub const MANIFEST_FILE: &str = "harness_manifest.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexManifest {
    pub tier:         Tier,
    pub analyzer:     AnalyzerKind,
    pub lemmatized:   bool,
    pub data_dir:     String,
    pub documents:    usize,
    pub build_millis: u64,
}

impl IndexManifest {
    pub fn new(cfg: &HarnessConfig, documents: usize, build_millis: u64) -> Self {
        Self {
            tier:       cfg.tier,
            analyzer:   cfg.analyzer,
            lemmatized: cfg.lemmatize,
            data_dir:   cfg.data_dir.clone(),
            documents,
            build_millis,
        }
    }

    pub fn save(&self, index_dir: &Path) -> Result<()> {
        let path = index_dir.join(MANIFEST_FILE);
        let json = serde_json::to_string_pretty(self)?;
        fs::write(&path, json)
            .with_context(|| format!("Cannot write manifest '{}'", path.display()))?;
        tracing::debug!("Saved index manifest to '{}'", path.display());
        Ok(())
    }

    /// `Ok(None)` when the index has no manifest (built elsewhere)
    pub fn load(index_dir: &Path) -> Result<Option<Self>> {
        let path = index_dir.join(MANIFEST_FILE);
        if !path.exists() {
            return Ok(None);
        }
        let json = fs::read_to_string(&path)
            .with_context(|| format!("Cannot read manifest '{}'", path.display()))?;
        let manifest = serde_json::from_str(&json)
            .with_context(|| format!("Malformed manifest '{}'", path.display()))?;
        Ok(Some(manifest))
    }

    /// Human-readable differences between this build and `cfg`
    pub fn mismatches(&self, cfg: &HarnessConfig) -> Vec<String> {
        let mut out = Vec::new();
        if self.tier != cfg.tier {
            out.push(format!("index built at tier {}, running at {}", self.tier, cfg.tier));
        }
        if self.analyzer != cfg.analyzer {
            out.push(format!(
                "index built with {} analyzer, config asks for {}",
                self.analyzer, cfg.analyzer
            ));
        }
        if self.lemmatized != cfg.lemmatize {
            out.push(format!(
                "index lemmatized={}, queries lemmatized={}",
                self.lemmatized, cfg.lemmatize
            ));
        }
        out
    }
}
