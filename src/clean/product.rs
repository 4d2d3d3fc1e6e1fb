//! Product record-set cleaning.

use std::sync::Arc;

use arrow::{
    array::{Array, Float64Array, Int64Array, RecordBatch, StringArray},
    datatypes::DataType,
};

use super::Normalizer;
use crate::{
    batch, dates,
    error::{Error, Result},
    schema::product as col,
    vocab::CategoryRollup,
};

/// Cleans the product record set.
///
/// No rows are dropped here: a cost price that fails to parse becomes null,
/// a negative (or missing) stock count floors to zero, the stock date is
/// reformatted to `dd/mm/yyyy` (null on parse failure), and alias
/// categories are rewritten to their canonical name via [`CategoryRollup`].
#[derive(Debug, Clone, Default)]
pub struct ProductNormalizer {
    categories: CategoryRollup,
}

impl ProductNormalizer {
    /// Creates a normalizer with the default category table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a normalizer with a custom category table.
    #[must_use]
    pub fn with_categories(categories: CategoryRollup) -> Self {
        Self { categories }
    }

    fn parse_cost(batch_in: &RecordBatch) -> Result<RecordBatch> {
        let idx = batch::col_idx(batch_in, col::COST_PRICE)?;
        let column = batch_in.column(idx);
        let parsed: Float64Array = if let Some(raw) = column.as_any().downcast_ref::<StringArray>()
        {
            raw.iter().map(|v| v.and_then(parse_locale_decimal)).collect()
        } else if column.as_any().downcast_ref::<Float64Array>().is_some() {
            // Already numeric; nothing to parse.
            return Ok(batch_in.clone());
        } else if let Some(raw) = column.as_any().downcast_ref::<Int64Array>() {
            raw.iter().map(|v| v.map(|v| v as f64)).collect()
        } else {
            return Err(Error::column_type(
                col::COST_PRICE,
                "Utf8, Float64 or Int64",
                column.data_type(),
            ));
        };
        batch::with_column(
            batch_in,
            col::COST_PRICE,
            DataType::Float64,
            true,
            Arc::new(parsed),
        )
    }

    fn normalize_dates(batch_in: &RecordBatch) -> Result<RecordBatch> {
        let raw = batch::str_array(batch_in, col::STOCK_DATE)?;
        let display: StringArray = raw.iter().map(dates::normalize_display).collect();
        batch::with_column(
            batch_in,
            col::STOCK_DATE,
            DataType::Utf8,
            true,
            Arc::new(display),
        )
    }

    fn floor_stock(batch_in: &RecordBatch) -> Result<RecordBatch> {
        let stocks = batch::int_array(batch_in, col::CURRENT_STOCK)?;
        let floored: Int64Array = (0..stocks.len())
            .map(|i| {
                if stocks.is_null(i) {
                    Some(0)
                } else {
                    Some(stocks.value(i).max(0))
                }
            })
            .collect();
        batch::with_column(
            batch_in,
            col::CURRENT_STOCK,
            DataType::Int64,
            true,
            Arc::new(floored),
        )
    }

    fn consolidate_categories(&self, batch_in: &RecordBatch) -> Result<RecordBatch> {
        let raw = batch::str_array(batch_in, col::CATEGORY)?;
        let merged: StringArray = raw
            .iter()
            .map(|v| v.map(|category| self.categories.consolidate(category).to_string()))
            .collect();
        batch::with_column(
            batch_in,
            col::CATEGORY,
            DataType::Utf8,
            true,
            Arc::new(merged),
        )
    }
}

impl Normalizer for ProductNormalizer {
    fn normalize(&self, batch_in: RecordBatch) -> Result<RecordBatch> {
        let cleaned = Self::parse_cost(&batch_in)?;
        let cleaned = Self::normalize_dates(&cleaned)?;
        let cleaned = Self::floor_stock(&cleaned)?;
        self.consolidate_categories(&cleaned)
    }
}

/// Parses a decimal written with a comma separator, `"10,50"` → `10.50`.
///
/// Values with thousands separators ("1.234,56") end up with two periods
/// after the swap and fail to parse; they become null like any other
/// unparseable cost.
fn parse_locale_decimal(raw: &str) -> Option<f64> {
    raw.trim().replace(',', ".").parse().ok()
}

#[cfg(test)]
mod tests {
    use arrow::datatypes::{Field, Schema};

    use super::*;
    use crate::batch::{float_values, int_array, str_array};

    fn product_batch(
        costs: Vec<Option<&str>>,
        stocks: Vec<Option<i64>>,
        categories: Vec<Option<&str>>,
    ) -> RecordBatch {
        let rows = costs.len();
        let names: Vec<String> = (0..rows).map(|i| format!("product_{i}")).collect();
        let schema = Arc::new(Schema::new(vec![
            Field::new(col::NAME, DataType::Utf8, false),
            Field::new(col::COST_PRICE, DataType::Utf8, true),
            Field::new(col::STOCK_DATE, DataType::Utf8, true),
            Field::new(col::CURRENT_STOCK, DataType::Int64, true),
            Field::new(col::CATEGORY, DataType::Utf8, true),
        ]));
        RecordBatch::try_new(
            schema,
            vec![
                Arc::new(StringArray::from(names)),
                Arc::new(StringArray::from(costs)),
                Arc::new(StringArray::from(vec![Some("2024-01-10"); rows])),
                Arc::new(Int64Array::from(stocks)),
                Arc::new(StringArray::from(categories)),
            ],
        )
        .ok()
        .unwrap_or_else(|| panic!("Should create batch"))
    }

    #[test]
    fn test_parse_locale_decimal() {
        assert_eq!(parse_locale_decimal("10,50"), Some(10.50));
        assert_eq!(parse_locale_decimal("25,00"), Some(25.0));
        assert_eq!(parse_locale_decimal("19.99"), Some(19.99));
        assert_eq!(parse_locale_decimal("1.234,56"), None);
        assert_eq!(parse_locale_decimal("caro"), None);
    }

    #[test]
    fn test_cost_parsing_keeps_rows() {
        let raw = product_batch(
            vec![Some("10,50"), Some("abc"), None],
            vec![Some(5); 3],
            vec![Some("Livros"); 3],
        );
        let cleaned = ProductNormalizer::new().normalize(raw).unwrap();
        assert_eq!(cleaned.num_rows(), 3);
        let costs = float_values(&cleaned, col::COST_PRICE).unwrap();
        assert_eq!(costs, vec![Some(10.5), None, None]);
    }

    #[test]
    fn test_stock_floor() {
        let raw = product_batch(
            vec![Some("1,00"); 4],
            vec![Some(-5), Some(0), Some(7), None],
            vec![Some("Livros"); 4],
        );
        let cleaned = ProductNormalizer::new().normalize(raw).unwrap();
        let stocks = int_array(&cleaned, col::CURRENT_STOCK).unwrap();
        assert_eq!(stocks.value(0), 0);
        assert_eq!(stocks.value(1), 0);
        assert_eq!(stocks.value(2), 7);
        assert_eq!(stocks.value(3), 0);
    }

    #[test]
    fn test_category_consolidation() {
        let raw = product_batch(
            vec![Some("1,00"); 4],
            vec![Some(1); 4],
            vec![
                Some("Informática"),
                Some("Telefonia"),
                Some("Acessórios"),
                Some("Livros"),
            ],
        );
        let cleaned = ProductNormalizer::new().normalize(raw).unwrap();
        let categories = str_array(&cleaned, col::CATEGORY).unwrap();
        assert_eq!(categories.value(0), "Eletrônicos");
        assert_eq!(categories.value(1), "Eletrônicos");
        assert_eq!(categories.value(2), "Eletrônicos");
        assert_eq!(categories.value(3), "Livros");
    }

    #[test]
    fn test_stock_date_reformatted() {
        let raw = product_batch(vec![Some("1,00")], vec![Some(1)], vec![Some("Livros")]);
        let cleaned = ProductNormalizer::new().normalize(raw).unwrap();
        let stock_dates = str_array(&cleaned, col::STOCK_DATE).unwrap();
        assert_eq!(stock_dates.value(0), "10/01/2024");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let raw = product_batch(
            vec![Some("10,50"), Some("ruim"), Some("7,25")],
            vec![Some(-3), Some(12), None],
            vec![Some("Telefonia"), Some("Livros"), Some("Informática")],
        );
        let normalizer = ProductNormalizer::new();
        let once = normalizer.normalize(raw).unwrap();
        let twice = normalizer.normalize(once.clone()).unwrap();
        assert_eq!(once, twice);
    }
}
