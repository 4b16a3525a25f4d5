// ============================================================
// Layer 5 — Index Searcher
// ============================================================
// Reopens an index built by IndexBuilder and answers queries.
//
//   WikiSearcher::open(path)
//       │  register analyzers, resolve fields, build query parser
//       ▼
//   ranked(query_text, similarity, top_n) → RankedHits
//       │
//       ├── top_hit(query_text, tier, lemmatizer)  first acceptable title
//       └── answer_rank(expected, ...)             where the answer shows up
//
// Titles are read from the doc store lazily: most questions
// only ever need the first hit.
//
// When the query text was lemmatized, titles go through the same
// lemmatizer before the BEST-tier echo check, so "France" is
// compared as "franc" against a query that says "franc".
//
// Reference: tantivy::Searcher, tantivy::query::QueryParser

use anyhow::{bail, Context, Result};
use std::{
    borrow::Cow,
    path::{Path, PathBuf},
};
use tantivy::{
    collector::TopDocs,
    query::{Query, QueryParser},
    schema::{Field, Value},
    DocAddress, Index, IndexReader, Score, Searcher, TantivyDocument,
};

use crate::domain::{
    config::{AnalyzerKind, Tier},
    hit::{ScoredTitle, TopHit},
    matching::{is_excluded_hit, titles_match},
    traits::Lemmatizer,
};
use crate::search::{analyzer, schema::WikiSchema, similarity::{self, Similarity}};

pub struct WikiSearcher {
    path:     PathBuf,
    reader:   IndexReader,
    schema:   WikiSchema,
    parser:   QueryParser,
    analyzer: AnalyzerKind,
}

impl WikiSearcher {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if !path.join("meta.json").exists() {
            bail!(
                "No index found at '{}'. Build it first with the `index` command.",
                path.display()
            );
        }

        let index = Index::open_in_dir(&path)
            .with_context(|| format!("Cannot open index '{}'", path.display()))?;
        analyzer::register_all(&index)?;

        let schema   = WikiSchema::from_schema(index.schema())?;
        let analyzer = schema.contents_analyzer()?;
        let reader   = index.reader().context("Cannot open index reader")?;
        let parser   = QueryParser::for_index(&index, vec![schema.contents]);

        tracing::debug!("Opened '{}' ({} analyzer)", path.display(), analyzer);
        Ok(Self { path, reader, schema, parser, analyzer })
    }

    /// Analyzer the index was built with
    pub fn analyzer(&self) -> AnalyzerKind {
        self.analyzer
    }

    pub fn num_docs(&self) -> u64 {
        self.reader.searcher().num_docs()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parse leniently: whatever the grammar rejects is logged and
    /// left out, the rest is still searched.
    pub fn parse(&self, query_text: &str) -> Box<dyn Query> {
        let (query, errors) = self.parser.parse_query_lenient(query_text);
        for err in &errors {
            tracing::warn!("Query syntax problem in '{}': {}", query_text, err);
        }
        query
    }

    /// Run a query and keep up to `top_n` hits (never more than the
    /// index holds).
    pub fn ranked(&self, query_text: &str, similarity: Similarity, top_n: usize) -> Result<RankedHits> {
        let searcher = self.reader.searcher();
        let limit    = top_n.min(searcher.num_docs() as usize);
        let query    = self.parse(query_text);

        let hits = if limit == 0 {
            Vec::new()
        } else if similarity.is_native() {
            searcher.search(query.as_ref(), &TopDocs::with_limit(limit))?
        } else {
            similarity::rank(&searcher, self.schema.contents, query.as_ref(), similarity, limit)?
        };

        tracing::debug!("'{}' → {} hits ({})", query_text, hits.len(), similarity);
        Ok(RankedHits { searcher, title: self.schema.title, hits })
    }

    /// Title-only view of the best `k` hits
    pub fn search(
        &self,
        query_text: &str,
        similarity: Similarity,
        k:          usize,
    ) -> Result<Vec<ScoredTitle>> {
        self.ranked(query_text, similarity, k)?.titles().collect()
    }

    /// Rank, then pick the top hit for `tier`. `lemmatizer` is the
    /// one `query_text` was built with, if any.
    pub fn top_hit(
        &self,
        query_text: &str,
        similarity: Similarity,
        top_n:      usize,
        tier:       Tier,
        lemmatizer: Option<&dyn Lemmatizer>,
    ) -> Result<TopHit> {
        self.ranked(query_text, similarity, top_n)?
            .top_hit(query_text, tier, lemmatizer)
    }
}

// ─── RankedHits ───────────────────────────────────────────────────────────────
/// Result list of one query, highest score first.
pub struct RankedHits {
    searcher: Searcher,
    title:    Field,
    hits:     Vec<(Score, DocAddress)>,
}

impl RankedHits {
    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    /// Stored titles in rank order; documents without a title are skipped.
    pub fn titles(&self) -> impl Iterator<Item = Result<ScoredTitle>> + '_ {
        self.hits.iter().filter_map(move |&(score, addr)| {
            let doc: TantivyDocument = match self.searcher.doc(addr) {
                Ok(doc) => doc,
                Err(e)  => return Some(Err(e.into())),
            };
            let title = doc
                .get_first(self.title)
                .and_then(|v| v.as_str())
                .map(str::to_string);
            title.map(|title| Ok(ScoredTitle { title, score }))
        })
    }

    /// Titles that survive the tier's echo filter, in rank order
    fn accepted<'h>(
        &'h self,
        query_text: &'h str,
        tier:       Tier,
        lemmatizer: Option<&'h dyn Lemmatizer>,
    ) -> impl Iterator<Item = Result<ScoredTitle>> + 'h {
        self.titles().filter(move |hit| match hit {
            Ok(hit) => {
                !(tier.filters_echoed_titles()
                    && is_excluded_hit(&comparable_title(&hit.title, lemmatizer), query_text))
            }
            Err(_) => true,
        })
    }

    /// First acceptable title. At the BEST tier, titles echoed by
    /// the query text are skipped.
    pub fn top_hit(
        &self,
        query_text: &str,
        tier:       Tier,
        lemmatizer: Option<&dyn Lemmatizer>,
    ) -> Result<TopHit> {
        if self.is_empty() {
            return Ok(TopHit::NoHits);
        }
        match self.accepted(query_text, tier, lemmatizer).next() {
            Some(hit) => Ok(TopHit::Found(hit?.title)),
            None      => Ok(TopHit::NoMatch),
        }
    }

    /// 1-based position of the first acceptable title matching
    /// `expected`, looking no deeper than `depth` titles.
    pub fn answer_rank(
        &self,
        expected:   &str,
        query_text: &str,
        tier:       Tier,
        lemmatizer: Option<&dyn Lemmatizer>,
        depth:      usize,
    ) -> Result<Option<usize>> {
        for (i, hit) in self.accepted(query_text, tier, lemmatizer).take(depth).enumerate() {
            if titles_match(expected, &hit?.title) {
                return Ok(Some(i + 1));
            }
        }
        Ok(None)
    }
}

/// Title in the form the query text is in. Falls back to the raw
/// title when lemmatizing leaves nothing (e.g. "!!!").
fn comparable_title<'t>(title: &'t str, lemmatizer: Option<&dyn Lemmatizer>) -> Cow<'t, str> {
    match lemmatizer.map(|l| l.lemmatize_to_string(title)) {
        Some(lemmas) if !lemmas.is_empty() => Cow::Owned(lemmas),
        _                                  => Cow::Borrowed(title),
    }
}
