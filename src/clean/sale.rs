//! Sale record-set cleaning.

use std::sync::Arc;

use arrow::{
    array::{BooleanArray, Float64Array, RecordBatch, StringArray},
    datatypes::DataType,
};

use super::Normalizer;
use crate::{batch, dates, error::Result, schema::sale as col};

/// Cleans the sales record set.
///
/// Rows with a non-positive (or missing) quantity or unit price are dropped
/// at the validity gate; surviving rows get their sale date reformatted to
/// `dd/mm/yyyy` (null on parse failure) and a derived `total_revenue`
/// column, `quantity × unit_price` rounded to 2 decimals half away from
/// zero. The derived column is replaced when it already exists, so the pass
/// is a fixed point.
#[derive(Debug, Clone, Copy, Default)]
pub struct SaleNormalizer;

impl SaleNormalizer {
    /// Creates a sale normalizer.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn filter_valid(batch_in: &RecordBatch) -> Result<RecordBatch> {
        let quantities = batch::float_values(batch_in, col::QUANTITY)?;
        let prices = batch::float_values(batch_in, col::UNIT_PRICE)?;
        let mask: BooleanArray = quantities
            .iter()
            .zip(&prices)
            .map(|(quantity, price)| {
                let keep = matches!((quantity, price), (Some(q), Some(p)) if *q > 0.0 && *p > 0.0);
                Some(keep)
            })
            .collect();
        batch::filter_rows(batch_in, &mask)
    }

    fn normalize_dates(batch_in: &RecordBatch) -> Result<RecordBatch> {
        let raw = batch::str_array(batch_in, col::SALE_DATE)?;
        let display: StringArray = raw.iter().map(dates::normalize_display).collect();
        batch::with_column(
            batch_in,
            col::SALE_DATE,
            DataType::Utf8,
            true,
            Arc::new(display),
        )
    }

    fn derive_revenue(batch_in: &RecordBatch) -> Result<RecordBatch> {
        let quantities = batch::float_values(batch_in, col::QUANTITY)?;
        let prices = batch::float_values(batch_in, col::UNIT_PRICE)?;
        let revenue: Float64Array = quantities
            .iter()
            .zip(&prices)
            .map(|(quantity, price)| match (quantity, price) {
                (Some(q), Some(p)) => Some(batch::round2(q * p)),
                _ => None,
            })
            .collect();
        batch::with_column(
            batch_in,
            col::TOTAL_REVENUE,
            DataType::Float64,
            true,
            Arc::new(revenue),
        )
    }
}

impl Normalizer for SaleNormalizer {
    fn normalize(&self, batch_in: RecordBatch) -> Result<RecordBatch> {
        let cleaned = Self::filter_valid(&batch_in)?;
        let cleaned = Self::normalize_dates(&cleaned)?;
        Self::derive_revenue(&cleaned)
    }
}
