//! Review record-set cleaning.

use std::sync::Arc;

use arrow::{
    array::{Array, BooleanArray, Date32Array, RecordBatch, StringArray},
    datatypes::DataType,
};

use super::Normalizer;
use crate::{
    batch, dates,
    error::{Error, Result},
    schema::review as col,
    vocab::{self, COMMENT_DEFAULT},
};

/// Cleans the review record set.
///
/// The recommendation flag becomes a boolean (`"Sim"` and nothing else maps
/// to `true`), empty or missing comments become `"Sem comentário"`, and the
/// review date is parsed into a structured `Date32` value. Unlike the other
/// three entities the review date is *not* rendered as a display string: it
/// feeds the rating aggregation path, not the export path.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReviewNormalizer;

impl ReviewNormalizer {
    /// Creates a review normalizer.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn map_recommends(batch_in: &RecordBatch) -> Result<RecordBatch> {
        let idx = batch::col_idx(batch_in, col::RECOMMENDS)?;
        let column = batch_in.column(idx);
        let mapped: BooleanArray = if let Some(raw) = column.as_any().downcast_ref::<StringArray>()
        {
            raw.iter().map(|v| Some(vocab::recommends_flag(v))).collect()
        } else if let Some(flags) = column.as_any().downcast_ref::<BooleanArray>() {
            if flags.null_count() == 0 {
                return Ok(batch_in.clone());
            }
            // Nulls in an already-boolean column still default to false.
            flags.iter().map(|v| Some(v.unwrap_or(false))).collect()
        } else {
            return Err(Error::column_type(
                col::RECOMMENDS,
                "Utf8 or Boolean",
                column.data_type(),
            ));
        };
        batch::with_column(
            batch_in,
            col::RECOMMENDS,
            DataType::Boolean,
            true,
            Arc::new(mapped),
        )
    }

    fn default_comments(batch_in: &RecordBatch) -> Result<RecordBatch> {
        let comments = batch::str_array(batch_in, col::COMMENT)?;
        let filled: StringArray = comments
            .iter()
            .map(|v| match v {
                Some(text) if !text.is_empty() => Some(text),
                _ => Some(COMMENT_DEFAULT),
            })
            .collect();
        batch::with_column(
            batch_in,
            col::COMMENT,
            DataType::Utf8,
            true,
            Arc::new(filled),
        )
    }

    fn parse_dates(batch_in: &RecordBatch) -> Result<RecordBatch> {
        let idx = batch::col_idx(batch_in, col::REVIEW_DATE)?;
        let column = batch_in.column(idx);
        let parsed: Date32Array = if let Some(raw) = column.as_any().downcast_ref::<StringArray>()
        {
            raw.iter()
                .map(|v| {
                    v.and_then(dates::parse_flexible)
                        .map(dates::to_days_since_epoch)
                })
                .collect()
        } else if column.as_any().downcast_ref::<Date32Array>().is_some() {
            return Ok(batch_in.clone());
        } else {
            return Err(Error::column_type(
                col::REVIEW_DATE,
                "Utf8 or Date32",
                column.data_type(),
            ));
        };
        batch::with_column(
            batch_in,
            col::REVIEW_DATE,
            DataType::Date32,
            true,
            Arc::new(parsed),
        )
    }
}

impl Normalizer for ReviewNormalizer {
    fn normalize(&self, batch_in: RecordBatch) -> Result<RecordBatch> {
        let cleaned = Self::map_recommends(&batch_in)?;
        let cleaned = Self::default_comments(&cleaned)?;
        Self::parse_dates(&cleaned)
    }
}
