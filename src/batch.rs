//! Column access and row-gathering helpers over `RecordBatch`.
//!
//! Every normalizer is built from the same three primitives: downcast a
//! column, rebuild the batch with one column swapped, or gather a subset of
//! rows by index.

use std::sync::Arc;

use arrow::{
    array::{
        Array, ArrayRef, BooleanArray, Float64Array, Int64Array, RecordBatch, StringArray,
        UInt64Array,
    },
    datatypes::{DataType, Field, Schema},
};

use crate::error::{Error, Result};

/// Returns the index of a named column.
///
/// # Errors
///
/// Returns [`Error::ColumnNotFound`] if the column does not exist.
pub fn col_idx(batch: &RecordBatch, name: &str) -> Result<usize> {
    batch
        .schema()
        .column_with_name(name)
        .map(|(idx, _)| idx)
        .ok_or_else(|| Error::column_not_found(name))
}

/// Downcasts a named column to a `StringArray`.
///
/// # Errors
///
/// Returns an error if the column is missing or not Utf8.
pub fn str_array<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a StringArray> {
    let idx = col_idx(batch, name)?;
    let column = batch.column(idx);
    column
        .as_any()
        .downcast_ref::<StringArray>()
        .ok_or_else(|| Error::column_type(name, "Utf8", column.data_type()))
}

/// Downcasts a named column to an `Int64Array`.
///
/// # Errors
///
/// Returns an error if the column is missing or not Int64.
pub fn int_array<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a Int64Array> {
    let idx = col_idx(batch, name)?;
    let column = batch.column(idx);
    column
        .as_any()
        .downcast_ref::<Int64Array>()
        .ok_or_else(|| Error::column_type(name, "Int64", column.data_type()))
}

/// Reads a numeric column as `f64` values, accepting Float64 or Int64.
///
/// # Errors
///
/// Returns an error if the column is missing or not numeric.
#[allow(clippy::cast_precision_loss)]
pub fn float_values(batch: &RecordBatch, name: &str) -> Result<Vec<Option<f64>>> {
    let idx = col_idx(batch, name)?;
    let column = batch.column(idx);
    if let Some(arr) = column.as_any().downcast_ref::<Float64Array>() {
        Ok(arr.iter().collect())
    } else if let Some(arr) = column.as_any().downcast_ref::<Int64Array>() {
        Ok(arr.iter().map(|v| v.map(|v| v as f64)).collect())
    } else {
        Err(Error::column_type(
            name,
            "Float64 or Int64",
            column.data_type(),
        ))
    }
}

/// Rebuilds a batch with one column replaced in place, or appended at the
/// end if no column of that name exists.
///
/// Replace-if-present is what makes each cleaning pass a fixed point: a
/// derived column is appended on the first run and overwritten on the next.
///
/// # Errors
///
/// Returns an error if the new array's length disagrees with the batch.
pub fn with_column(
    batch: &RecordBatch,
    name: &str,
    data_type: DataType,
    nullable: bool,
    array: ArrayRef,
) -> Result<RecordBatch> {
    let schema = batch.schema();
    let field = Field::new(name, data_type, nullable);
    let mut fields: Vec<Field> = schema.fields().iter().map(|f| f.as_ref().clone()).collect();
    let mut columns = batch.columns().to_vec();
    match schema.column_with_name(name) {
        Some((idx, _)) => {
            fields[idx] = field;
            columns[idx] = array;
        }
        None => {
            fields.push(field);
            columns.push(array);
        }
    }
    RecordBatch::try_new(Arc::new(Schema::new(fields)), columns).map_err(Error::Arrow)
}

/// Gathers the given row indices into a new batch, preserving their order.
///
/// # Errors
///
/// Returns an error if an index is out of bounds.
pub fn take_rows(batch: &RecordBatch, indices: &[usize]) -> Result<RecordBatch> {
    let indices_array = UInt64Array::from_iter_values(indices.iter().map(|&i| i as u64));
    let columns = batch
        .columns()
        .iter()
        .map(|col| arrow::compute::take(col.as_ref(), &indices_array, None).map_err(Error::Arrow))
        .collect::<Result<Vec<_>>>()?;
    RecordBatch::try_new(batch.schema(), columns).map_err(Error::Arrow)
}

/// Keeps the rows where the mask is `true`.
///
/// # Errors
///
/// Returns an error if the mask length disagrees with the batch.
pub fn filter_rows(batch: &RecordBatch, mask: &BooleanArray) -> Result<RecordBatch> {
    arrow::compute::filter_record_batch(batch, mask).map_err(Error::Arrow)
}

/// Rounds to two decimal places, half away from zero.
///
/// `round2(2.125)` is `2.13`, not the `2.12` a half-to-even rule would give.
/// This is the rounding mode used for `total_revenue` and for per-product
/// average ratings.
#[must_use]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
