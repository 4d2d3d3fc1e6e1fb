//! Joins the four cleaned record sets into one consolidated batch.

use std::collections::HashMap;
use std::sync::Arc;

use arrow::{
    array::{Array, ArrayRef, Float64Array, Int64Array, RecordBatch, StringArray},
    datatypes::{DataType, Field, Schema},
};

use crate::{
    batch,
    error::{Error, Result},
    schema::{customer, product, review, sale, AVG_PRODUCT_RATING},
};

/// Produces the consolidated record set.
///
/// The algorithm is a single forward pass: inner join sales to customers on
/// `customer_id = id`, inner join the result to products on
/// `product_name = name`, then left join the per-product average rating so
/// products without reviews keep their rows with a null
/// `avg_product_rating`.
///
/// Row order is the cleaned-sales row order restricted to surviving rows,
/// so identical inputs always produce the identical output. The right side
/// of each join is expected to have unique keys (the normalizers guarantee
/// it); if a duplicate slips through, the first occurrence wins. Join-key
/// columns from the right side are dropped — their values duplicate the
/// left key.
#[derive(Debug, Clone, Copy, Default)]
pub struct Integrator;

impl Integrator {
    /// Creates an integrator.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Computes the per-product average rating table.
    ///
    /// Groups reviews by `product_name` in first-appearance order and takes
    /// the arithmetic mean of `rating`, rounded to 2 decimals half away
    /// from zero. Null ratings are excluded from the mean; a product whose
    /// ratings are all null gets a null average.
    ///
    /// # Errors
    ///
    /// Returns an error if the review columns are missing or mistyped.
    #[allow(clippy::cast_precision_loss)]
    pub fn average_ratings(&self, reviews: &RecordBatch) -> Result<RecordBatch> {
        let names = batch::str_array(reviews, review::PRODUCT_NAME)?;
        let ratings = batch::float_values(reviews, review::RATING)?;

        let mut order: Vec<String> = Vec::new();
        let mut sums: HashMap<String, (f64, u64)> = HashMap::new();
        for (i, rating) in ratings.iter().enumerate() {
            if names.is_null(i) {
                continue;
            }
            let name = names.value(i);
            if !sums.contains_key(name) {
                order.push(name.to_string());
            }
            let entry = sums.entry(name.to_string()).or_insert((0.0, 0));
            if let Some(value) = rating {
                entry.0 += value;
                entry.1 += 1;
            }
        }

        let mut averages: Vec<Option<f64>> = Vec::with_capacity(order.len());
        for name in &order {
            let (sum, count) = sums.get(name).copied().unwrap_or((0.0, 0));
            averages.push((count > 0).then(|| batch::round2(sum / count as f64)));
        }

        let schema = Arc::new(Schema::new(vec![
            Field::new(review::PRODUCT_NAME, DataType::Utf8, false),
            Field::new(AVG_PRODUCT_RATING, DataType::Float64, true),
        ]));
        RecordBatch::try_new(
            schema,
            vec![
                Arc::new(StringArray::from(order)),
                Arc::new(Float64Array::from(averages)),
            ],
        )
        .map_err(Error::Arrow)
    }

    /// Joins the four cleaned record sets into the consolidated output.
    ///
    /// # Errors
    ///
    /// Returns an error if a join-key column is missing or mistyped, or if
    /// the joined schemas cannot be combined.
    pub fn integrate(
        &self,
        customers: &RecordBatch,
        sales: &RecordBatch,
        products: &RecordBatch,
        reviews: &RecordBatch,
    ) -> Result<RecordBatch> {
        let with_customers = inner_join(sales, customers, sale::CUSTOMER_ID, customer::ID)?;
        let with_products = inner_join(&with_customers, products, sale::PRODUCT_NAME, product::NAME)?;
        let ratings = self.average_ratings(reviews)?;
        left_join_ratings(&with_products, &ratings)
    }
}

/// Extracts one join key per row as its string representation, the same
/// cell encoding the dedup pass uses. Null cells yield `None` and never
/// match anything.
fn join_keys(batch_ref: &RecordBatch, name: &str) -> Result<Vec<Option<String>>> {
    let idx = batch::col_idx(batch_ref, name)?;
    let column = batch_ref.column(idx);
    if let Some(arr) = column.as_any().downcast_ref::<StringArray>() {
        Ok((0..arr.len())
            .map(|i| (!arr.is_null(i)).then(|| arr.value(i).to_string()))
            .collect())
    } else if let Some(arr) = column.as_any().downcast_ref::<Int64Array>() {
        Ok((0..arr.len())
            .map(|i| (!arr.is_null(i)).then(|| arr.value(i).to_string()))
            .collect())
    } else {
        Err(Error::column_type(
            name,
            "Utf8 or Int64",
            column.data_type(),
        ))
    }
}

/// Inner-joins two batches, keeping left row order and dropping the right
/// key column from the output.
fn inner_join(
    left: &RecordBatch,
    right: &RecordBatch,
    left_key: &str,
    right_key: &str,
) -> Result<RecordBatch> {
    let left_keys = join_keys(left, left_key)?;
    let right_keys = join_keys(right, right_key)?;

    let mut index: HashMap<&str, usize> = HashMap::with_capacity(right_keys.len());
    for (i, key) in right_keys.iter().enumerate() {
        if let Some(key) = key {
            index.entry(key.as_str()).or_insert(i);
        }
    }

    let mut left_rows: Vec<usize> = Vec::new();
    let mut right_rows: Vec<usize> = Vec::new();
    for (i, key) in left_keys.iter().enumerate() {
        if let Some(key) = key {
            if let Some(&j) = index.get(key.as_str()) {
                left_rows.push(i);
                right_rows.push(j);
            }
        }
    }

    let left_taken = batch::take_rows(left, &left_rows)?;
    let right_taken = batch::take_rows(right, &right_rows)?;

    let right_key_idx = batch::col_idx(right, right_key)?;
    let mut fields: Vec<Field> = left_taken
        .schema()
        .fields()
        .iter()
        .map(|f| f.as_ref().clone())
        .collect();
    let mut columns: Vec<ArrayRef> = left_taken.columns().to_vec();
    let right_schema = right_taken.schema();
    for (i, field) in right_schema.fields().iter().enumerate() {
        if i == right_key_idx {
            continue;
        }
        fields.push(field.as_ref().clone());
        columns.push(Arc::clone(right_taken.column(i)));
    }
    RecordBatch::try_new(Arc::new(Schema::new(fields)), columns).map_err(Error::Arrow)
}

/// Left-joins the average-rating table onto the joined batch by
/// `product_name`, nulling the rating for products with no reviews.
fn left_join_ratings(joined: &RecordBatch, ratings: &RecordBatch) -> Result<RecordBatch> {
    let names = batch::str_array(ratings, review::PRODUCT_NAME)?;
    let averages = batch::float_values(ratings, AVG_PRODUCT_RATING)?;

    let mut index: HashMap<&str, Option<f64>> = HashMap::with_capacity(names.len());
    for (i, average) in averages.iter().enumerate() {
        if !names.is_null(i) {
            index.entry(names.value(i)).or_insert(*average);
        }
    }

    let keys = join_keys(joined, sale::PRODUCT_NAME)?;
    let column: Float64Array = keys
        .iter()
        .map(|key| {
            key.as_ref()
                .and_then(|key| index.get(key.as_str()).copied().flatten())
        })
        .collect();
    batch::with_column(
        joined,
        AVG_PRODUCT_RATING,
        DataType::Float64,
        true,
        Arc::new(column),
    )
}
