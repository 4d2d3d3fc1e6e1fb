//! Customer record-set cleaning.

use std::collections::HashSet;
use std::sync::Arc;

use arrow::{
    array::{Array, BooleanArray, Float64Array, RecordBatch, StringArray},
    datatypes::DataType,
};

use super::Normalizer;
use crate::{
    batch, dates,
    error::Result,
    schema::customer as col,
    vocab::{CityStates, FlagVocab, PHONE_DEFAULT},
};

/// Domain fragment recognized by the email repair rule.
const DOMAIN_FRAGMENT: &str = "email.com";

const AGE_MIN: i64 = 10;
const AGE_MAX: i64 = 120;

/// Cleans the customer record set.
///
/// Rules, in application order:
///
/// 1. drop rows with `age` outside `10..=120` (null ages fail the range);
/// 2. repair emails that lost their `@` before the `email.com` domain;
/// 3. normalize the active flag to `{"Sim", "Não", ""}` via [`FlagVocab`];
/// 4. override the state for recognized cities via [`CityStates`];
/// 5. reformat the registration date to `dd/mm/yyyy`, null on parse failure;
/// 6. fill missing phones with `"N/A"`;
/// 7. take the absolute value of the monthly income;
/// 8. deduplicate by `id`, keeping the first occurrence in row order.
#[derive(Debug, Clone, Default)]
pub struct CustomerNormalizer {
    city_states: CityStates,
    flags: FlagVocab,
}

impl CustomerNormalizer {
    /// Creates a normalizer with the default lookup tables.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a normalizer with custom lookup tables.
    #[must_use]
    pub fn with_tables(city_states: CityStates, flags: FlagVocab) -> Self {
        Self { city_states, flags }
    }

    fn filter_age(batch_in: &RecordBatch) -> Result<RecordBatch> {
        let ages = batch::int_array(batch_in, col::AGE)?;
        let mask: BooleanArray = (0..ages.len())
            .map(|i| {
                let keep = !ages.is_null(i) && (AGE_MIN..=AGE_MAX).contains(&ages.value(i));
                Some(keep)
            })
            .collect();
        batch::filter_rows(batch_in, &mask)
    }

    fn repair_emails(batch_in: &RecordBatch) -> Result<RecordBatch> {
        let emails = batch::str_array(batch_in, col::EMAIL)?;
        let repaired: StringArray = emails.iter().map(|v| v.map(repair_email)).collect();
        batch::with_column(batch_in, col::EMAIL, DataType::Utf8, true, Arc::new(repaired))
    }

    fn normalize_flags(&self, batch_in: &RecordBatch) -> Result<RecordBatch> {
        let idx = batch::col_idx(batch_in, col::ACTIVE_FLAG)?;
        let column = batch_in.column(idx);
        // A non-text flag column carries no recognizable vocabulary; every
        // value normalizes to the empty string, same as unknown text.
        let mapped: StringArray = match column.as_any().downcast_ref::<StringArray>() {
            Some(flags) => (0..flags.len())
                .map(|i| {
                    let raw = (!flags.is_null(i)).then(|| flags.value(i));
                    Some(self.flags.normalize(raw))
                })
                .collect(),
            None => (0..column.len()).map(|_| Some("")).collect(),
        };
        batch::with_column(
            batch_in,
            col::ACTIVE_FLAG,
            DataType::Utf8,
            true,
            Arc::new(mapped),
        )
    }

    fn correct_states(&self, batch_in: &RecordBatch) -> Result<RecordBatch> {
        let cities = batch::str_array(batch_in, col::CITY)?;
        let states = batch::str_array(batch_in, col::STATE)?;
        let corrected: StringArray = (0..cities.len())
            .map(|i| {
                let known = (!cities.is_null(i))
                    .then(|| self.city_states.lookup(cities.value(i)))
                    .flatten();
                match known {
                    Some(state) => Some(state.to_string()),
                    None => (!states.is_null(i)).then(|| states.value(i).to_string()),
                }
            })
            .collect();
        batch::with_column(
            batch_in,
            col::STATE,
            DataType::Utf8,
            true,
            Arc::new(corrected),
        )
    }

    fn normalize_dates(batch_in: &RecordBatch) -> Result<RecordBatch> {
        let raw = batch::str_array(batch_in, col::REGISTRATION_DATE)?;
        let display: StringArray = raw.iter().map(dates::normalize_display).collect();
        batch::with_column(
            batch_in,
            col::REGISTRATION_DATE,
            DataType::Utf8,
            true,
            Arc::new(display),
        )
    }

    fn fill_phones(batch_in: &RecordBatch) -> Result<RecordBatch> {
        let phones = batch::str_array(batch_in, col::PHONE)?;
        let filled: StringArray = phones.iter().map(|v| Some(v.unwrap_or(PHONE_DEFAULT))).collect();
        batch::with_column(batch_in, col::PHONE, DataType::Utf8, true, Arc::new(filled))
    }

    fn abs_income(batch_in: &RecordBatch) -> Result<RecordBatch> {
        let incomes = batch::float_values(batch_in, col::MONTHLY_INCOME)?;
        let corrected: Float64Array = incomes.into_iter().map(|v| v.map(f64::abs)).collect();
        batch::with_column(
            batch_in,
            col::MONTHLY_INCOME,
            DataType::Float64,
            true,
            Arc::new(corrected),
        )
    }

    fn dedup_by_id(batch_in: &RecordBatch) -> Result<RecordBatch> {
        let ids = batch::int_array(batch_in, col::ID)?;
        let mut seen: HashSet<Option<i64>> = HashSet::with_capacity(ids.len());
        let mut keep: Vec<usize> = Vec::with_capacity(ids.len());
        for i in 0..ids.len() {
            let key = (!ids.is_null(i)).then(|| ids.value(i));
            if seen.insert(key) {
                keep.push(i);
            }
        }
        if keep.len() == batch_in.num_rows() {
            return Ok(batch_in.clone());
        }
        batch::take_rows(batch_in, &keep)
    }
}

impl Normalizer for CustomerNormalizer {
    fn normalize(&self, batch_in: RecordBatch) -> Result<RecordBatch> {
        // Row elimination first so the per-field passes touch fewer rows.
        let cleaned = Self::filter_age(&batch_in)?;
        let cleaned = Self::repair_emails(&cleaned)?;
        let cleaned = self.normalize_flags(&cleaned)?;
        let cleaned = self.correct_states(&cleaned)?;
        let cleaned = Self::normalize_dates(&cleaned)?;
        let cleaned = Self::fill_phones(&cleaned)?;
        let cleaned = Self::abs_income(&cleaned)?;
        Self::dedup_by_id(&cleaned)
    }
}

/// Reinserts a missing `@` before the `email.com` domain fragment.
///
/// Any whitespace left where the `@` used to be is removed with it; emails
/// that already have an `@`, or that are broken in some other way, pass
/// through unchanged.
fn repair_email(raw: &str) -> String {
    if raw.contains('@') {
        return raw.to_string();
    }
    match raw.find(DOMAIN_FRAGMENT) {
        Some(pos) => {
            let prefix = raw[..pos].trim_end();
            let (_, suffix) = raw.split_at(pos);
            format!("{prefix}@{suffix}")
        }
        None => raw.to_string(),
    }
}
