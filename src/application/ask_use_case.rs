// ============================================================
// Layer 2 — Ask Use Case
// ============================================================
// Opens the index for a configuration and answers questions
// against it:
//   1. Turn category + question into query text (strip syntax
//      characters, add the category, lemmatize)
//   2. Rank the index with the configured similarity
//   3. Take the first title the tier accepts
//
// EvaluateUseCase drives the same engine over a whole file.

use anyhow::Result;

use crate::data::normalizer::build_query_text;
use crate::domain::{
    config::HarnessConfig,
    hit::{ScoredTitle, TopHit},
    question::Question,
    traits::Lemmatizer,
};
use crate::infra::manifest::IndexManifest;
use crate::search::{
    lemmatizer::StemmingLemmatizer,
    searcher::{RankedHits, WikiSearcher},
    similarity::Similarity,
};

pub struct AskUseCase {
    config:     HarnessConfig,
    searcher:   WikiSearcher,
    similarity: Similarity,
    lemmatizer: Option<StemmingLemmatizer>,
}

impl AskUseCase {
    /// Open the index that `config` names. Fails if it was never built.
    pub fn open(config: HarnessConfig) -> Result<Self> {
        let config   = config.resolved();
        let searcher = WikiSearcher::open(config.index_path())?;
        warn_on_mismatch(&config, &searcher)?;

        let similarity = Similarity::from_choice(config.scoring, config.bm25_tuned);
        let lemmatizer = config.lemmatize.then(StemmingLemmatizer::english);

        tracing::info!(
            "Searching '{}' ({} docs) with {}",
            searcher.path().display(),
            searcher.num_docs(),
            similarity
        );
        Ok(Self { config, searcher, similarity, lemmatizer })
    }

    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    /// The lemmatizer query text is built with, if lemmatization is on
    pub fn lemmatizer(&self) -> Option<&dyn Lemmatizer> {
        self.lemmatizer.as_ref().map(|l| l as &dyn Lemmatizer)
    }

    /// Query text for a question under the current tier and lemmatizer
    pub fn query_text(&self, question: &Question) -> String {
        build_query_text(question, self.config.tier, self.lemmatizer())
    }

    /// Build the query and rank the index. Returns the query text
    /// alongside the hits since the BEST filter needs it.
    pub fn rank(&self, question: &Question) -> Result<(String, RankedHits)> {
        let query  = self.query_text(question);
        let ranked = self.searcher.ranked(&query, self.similarity, self.config.top_n)?;
        Ok((query, ranked))
    }

    /// Top title for one ad-hoc question
    pub fn answer(&self, category: &str, question: &str) -> Result<TopHit> {
        let question = Question::new(category, question, "");
        let query    = self.query_text(&question);
        self.searcher.top_hit(
            &query,
            self.similarity,
            self.config.top_n,
            self.config.tier,
            self.lemmatizer(),
        )
    }

    /// Best `k` titles with scores, before any tier filtering
    pub fn candidates(&self, category: &str, question: &str, k: usize) -> Result<Vec<ScoredTitle>> {
        let question = Question::new(category, question, "");
        let query    = self.query_text(&question);
        self.searcher.search(&query, self.similarity, k)
    }
}

/// Log when the index was built with other settings than the ones
/// in use. The analyzer stored in the schema is what gets used.
fn warn_on_mismatch(config: &HarnessConfig, searcher: &WikiSearcher) -> Result<()> {
    match IndexManifest::load(searcher.path())? {
        Some(manifest) => {
            for problem in manifest.mismatches(config) {
                tracing::warn!("{}", problem);
            }
        }
        None => {
            tracing::debug!("No manifest in '{}'", searcher.path().display());
            if searcher.analyzer() != config.analyzer {
                tracing::warn!(
                    "index built with {} analyzer, config asks for {}",
                    searcher.analyzer(),
                    config.analyzer
                );
            }
        }
    }
    Ok(())
}
