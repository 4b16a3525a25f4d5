// ============================================================
// Layer 5 — Index Schema
// ============================================================
// Two stored fields per document:
//
//   title     STRING | STORED   one untokenized term, returned as the answer
//   contents  TEXT   | STORED   analyzed with the run's analyzer,
//                               freqs + positions for phrase queries
//
// Reference: tantivy::schema documentation

use anyhow::{anyhow, Context, Result};
use tantivy::schema::{
    Field, FieldType, IndexRecordOption, Schema, TextFieldIndexing, TextOptions, STORED, STRING,
};

use crate::domain::config::AnalyzerKind;
use crate::search::analyzer::tokenizer_name;

pub const TITLE_FIELD: &str = "title";
pub const CONTENTS_FIELD: &str = "contents";

#[derive(Clone)]
pub struct WikiSchema {
    pub schema:   Schema,
    pub title:    Field,
    pub contents: Field,
}

impl WikiSchema {
    /// Fresh schema whose contents field uses `analyzer`
    pub fn build(analyzer: AnalyzerKind) -> Self {
        let mut builder = Schema::builder();

        let title = builder.add_text_field(TITLE_FIELD, STRING | STORED);

        let indexing = TextFieldIndexing::default()
            .set_tokenizer(tokenizer_name(analyzer))
            .set_index_option(IndexRecordOption::WithFreqsAndPositions);
        let contents = builder.add_text_field(
            CONTENTS_FIELD,
            TextOptions::default().set_indexing_options(indexing).set_stored(),
        );

        Self { schema: builder.build(), title, contents }
    }

    /// Resolve the field handles of an index that already exists
    pub fn from_schema(schema: Schema) -> Result<Self> {
        let title = schema
            .get_field(TITLE_FIELD)
            .context("Index has no 'title' field; was it built by this tool?")?;
        let contents = schema
            .get_field(CONTENTS_FIELD)
            .context("Index has no 'contents' field; was it built by this tool?")?;
        Ok(Self { schema, title, contents })
    }

    /// Which analyzer the contents field was indexed with
    pub fn contents_analyzer(&self) -> Result<AnalyzerKind> {
        let FieldType::Str(options) = self.schema.get_field_entry(self.contents).field_type() else {
            return Err(anyhow!("'contents' is not a text field"));
        };
        let tokenizer = options
            .get_indexing_options()
            .map(|indexing| indexing.tokenizer())
            .ok_or_else(|| anyhow!("'contents' is not indexed"))?;

        AnalyzerKind::ALL
            .into_iter()
            .find(|kind| tokenizer_name(*kind) == tokenizer)
            .ok_or_else(|| anyhow!("Unknown tokenizer '{tokenizer}' on 'contents'"))
    }
}
