// ============================================================
// Layer 5 — Similarity (scoring functions)
// ============================================================
// tantivy ranks with BM25 using fixed parameters (k1 = 1.2,
// b = 0.75). The harness also needs classic TF-IDF and a tuned
// BM25 (k1 = 1.5, b = 0.1), so those two are scored here from
// the statistics tantivy already keeps:
//
//   N       searcher.num_docs()
//   df      searcher.doc_freq(term)
//   tf      SegmentPostings::term_freq()
//   len     FieldNormReader::fieldnorm(doc)
//   avglen  Σ InvertedIndexReader::total_num_tokens() / N
//
// Formulas:
//
//   TF-IDF  sqrt(tf) · (1 + ln((N + 1) / (df + 1))) · 1 / sqrt(len)
//   BM25    ln(1 + (N − df + 0.5) / (df + 0.5))
//             · tf / (tf + k1 · (1 − b + b · len / avglen))
//
// A document's score is the sum over every term occurrence in
// the parsed query.
//
// Reference: tantivy::postings, tantivy::fieldnorm documentation

use anyhow::Result;
use std::{collections::HashMap, fmt, sync::Arc};
use tantivy::{
    fieldnorm::FieldNormReader,
    index::InvertedIndexReader,
    postings::Postings,
    query::Query,
    schema::{Field, IndexRecordOption},
    DocAddress, DocSet, Score, Searcher, SegmentReader, Term, TERMINATED,
};

use crate::domain::config::ScoringFunction;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Similarity {
    TfIdf,
    Bm25 { k1: f32, b: f32 },
}

impl Similarity {
    /// The parameters tantivy's own scorer uses
    pub const BM25_DEFAULT: Similarity = Similarity::Bm25 { k1: 1.2, b: 0.75 };

    /// Higher term-frequency saturation, almost no length normalization
    pub const BM25_TUNED: Similarity = Similarity::Bm25 { k1: 1.5, b: 0.1 };

    pub fn from_choice(scoring: ScoringFunction, tuned: bool) -> Self {
        match (scoring, tuned) {
            (ScoringFunction::TfIdf, _)    => Similarity::TfIdf,
            (ScoringFunction::Bm25, false) => Self::BM25_DEFAULT,
            (ScoringFunction::Bm25, true)  => Self::BM25_TUNED,
        }
    }

    /// True when tantivy's built-in scorer computes exactly this
    pub fn is_native(&self) -> bool {
        *self == Self::BM25_DEFAULT
    }

    pub fn idf(&self, doc_freq: u64, doc_count: u64) -> f32 {
        let n  = doc_count as f32;
        let df = doc_freq as f32;
        match self {
            Similarity::TfIdf       => 1.0 + ((n + 1.0) / (df + 1.0)).ln(),
            Similarity::Bm25 { .. } => (1.0 + (n - df + 0.5) / (df + 0.5)).ln(),
        }
    }

    /// Contribution of one query term to one document
    pub fn term_score(&self, term_freq: u32, doc_len: u32, avg_len: f32, idf: f32) -> f32 {
        let tf  = term_freq as f32;
        let len = doc_len.max(1) as f32;
        match *self {
            Similarity::TfIdf => tf.sqrt() * idf / len.sqrt(),
            Similarity::Bm25 { k1, b } => {
                let avg_len = if avg_len > 0.0 { avg_len } else { 1.0 };
                idf * tf / (tf + k1 * (1.0 - b + b * len / avg_len))
            }
        }
    }
}

impl fmt::Display for Similarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Similarity::TfIdf          => f.write_str("TF-IDF"),
            Similarity::Bm25 { k1, b } => write!(f, "BM25(k1={k1}, b={b})"),
        }
    }
}

/// Per-segment readers for one field, opened once per query
struct SegmentStats<'s> {
    ord:        u32,
    segment:    &'s SegmentReader,
    inverted:   Arc<InvertedIndexReader>,
    fieldnorms: FieldNormReader,
}

/// Rank every document matching any term of `query` on `field`
/// and return the best `limit`, highest score first.
pub fn rank(
    searcher:   &Searcher,
    field:      Field,
    query:      &dyn Query,
    similarity: Similarity,
    limit:      usize,
) -> Result<Vec<(Score, DocAddress)>> {
    let doc_count = searcher.num_docs();
    if doc_count == 0 || limit == 0 {
        return Ok(Vec::new());
    }

    let mut terms: Vec<Term> = Vec::new();
    query.query_terms(&mut |term, _| {
        if term.field() == field {
            terms.push(term.clone());
        }
    });

    let mut segments   = Vec::with_capacity(searcher.segment_readers().len());
    let mut token_total = 0u64;
    for (ord, segment) in searcher.segment_readers().iter().enumerate() {
        let inverted = segment.inverted_index(field)?;
        token_total += inverted.total_num_tokens();
        segments.push(SegmentStats {
            ord: ord as u32,
            segment,
            inverted,
            fieldnorms: segment.get_fieldnorms_reader(field)?,
        });
    }
    let avg_len = token_total as f32 / doc_count as f32;

    let mut scores: HashMap<DocAddress, Score> = HashMap::new();
    for term in &terms {
        let doc_freq = searcher.doc_freq(term)?;
        if doc_freq == 0 {
            continue;
        }
        let idf = similarity.idf(doc_freq, doc_count);

        for seg in &segments {
            let Some(mut postings) = seg.inverted.read_postings(term, IndexRecordOption::WithFreqs)? else {
                continue;
            };
            let mut doc = postings.doc();
            while doc != TERMINATED {
                if !seg.segment.is_deleted(doc) {
                    let score = similarity.term_score(
                        postings.term_freq(),
                        seg.fieldnorms.fieldnorm(doc),
                        avg_len,
                        idf,
                    );
                    *scores.entry(DocAddress::new(seg.ord, doc)).or_insert(0.0) += score;
                }
                doc = postings.advance();
            }
        }
    }

    let mut ranked: Vec<(Score, DocAddress)> =
        scores.into_iter().map(|(addr, score)| (score, addr)).collect();
    ranked.sort_by(|a, b| b.0.total_cmp(&a.0).then_with(|| a.1.cmp(&b.1)));
    ranked.truncate(limit);
    Ok(ranked)
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::config::AnalyzerKind;
    use crate::search::{analyzer, schema::WikiSchema};
    use tantivy::{query::QueryParser, schema::Value, Index, IndexWriter, TantivyDocument};

    fn ram_index(docs: &[(&str, &str)]) -> (Index, WikiSchema) {
        let schema = WikiSchema::build(AnalyzerKind::Standard);
        let index  = Index::create_in_ram(schema.schema.clone());
        analyzer::register_all(&index).unwrap();

        let mut writer: IndexWriter = index.writer_with_num_threads(1, 15_000_000).unwrap();
        for (title, contents) in docs {
            let mut doc = TantivyDocument::default();
            doc.add_text(schema.title, title);
            doc.add_text(schema.contents, contents);
            writer.add_document(doc).unwrap();
        }
        writer.commit().unwrap();
        (index, schema)
    }

    fn titles(index: &Index, schema: &WikiSchema, query: &str, sim: Similarity) -> Vec<String> {
        let searcher = index.reader().unwrap().searcher();
        let parser   = QueryParser::for_index(index, vec![schema.contents]);
        let query    = parser.parse_query(query).unwrap();
        rank(&searcher, schema.contents, query.as_ref(), sim, 10)
            .unwrap()
            .into_iter()
            .map(|(_, addr)| {
                let doc: TantivyDocument = searcher.doc(addr).unwrap();
                doc.get_first(schema.title).and_then(|v| v.as_str()).unwrap().to_string()
            })
            .collect()
    }

    #[test]
    fn test_from_choice() {
        use ScoringFunction::*;
        assert_eq!(Similarity::from_choice(TfIdf, true), Similarity::TfIdf);
        assert_eq!(Similarity::from_choice(Bm25, false), Similarity::BM25_DEFAULT);
        assert_eq!(Similarity::from_choice(Bm25, true), Similarity::BM25_TUNED);
        assert!(Similarity::BM25_DEFAULT.is_native());
        assert!(!Similarity::BM25_TUNED.is_native());
    }

    #[test]
    fn test_idf_decreases_with_doc_freq() {
        for sim in [Similarity::TfIdf, Similarity::BM25_DEFAULT] {
            assert!(sim.idf(1, 100) > sim.idf(50, 100));
            assert!(sim.idf(50, 100) > 0.0);
        }
    }

    #[test]
    fn test_bm25_without_length_norm_ignores_length() {
        let sim = Similarity::Bm25 { k1: 1.2, b: 0.0 };
        assert_eq!(sim.term_score(2, 5, 10.0, 1.0), sim.term_score(2, 500, 10.0, 1.0));
    }

    #[test]
    fn test_tfidf_prefers_short_documents() {
        let sim = Similarity::TfIdf;
        assert!(sim.term_score(1, 4, 0.0, 1.0) > sim.term_score(1, 16, 0.0, 1.0));
    }

    #[test]
    fn test_rank_orders_by_term_density() {
        let (index, schema) = ram_index(&[
            ("Italy", "italy rome pasta wine cheese bread olive oil"),
            ("Rome", "rome rome rome empire"),
            ("Paris", "france capital"),
        ]);
        for sim in [Similarity::TfIdf, Similarity::BM25_TUNED] {
            assert_eq!(titles(&index, &schema, "rome", sim), vec!["Rome", "Italy"]);
        }
    }

    #[test]
    fn test_rank_sums_over_terms() {
        let (index, schema) = ram_index(&[
            ("A", "alpha filler filler filler"),
            ("B", "alpha beta filler filler"),
        ]);
        assert_eq!(titles(&index, &schema, "alpha beta", Similarity::TfIdf)[0], "B");
    }

    #[test]
    fn test_rank_no_matching_terms() {
        let (index, schema) = ram_index(&[("A", "alpha")]);
        assert!(titles(&index, &schema, "zeta", Similarity::TfIdf).is_empty());
    }
}
