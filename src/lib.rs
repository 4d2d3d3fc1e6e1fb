//! varejo - Retail record-set cleaning and integration
//!
//! Cleans four heterogeneous retail record sets — customers, sales,
//! products, and product reviews — and integrates them into one
//! consolidated record set suitable for reporting. Record sets are Arrow
//! `RecordBatch` values; the crate performs no I/O. Loading raw files,
//! exporting the result, and rendering summaries belong to the caller.
//!
//! # Design Principles
//!
//! 1. **Pure transformations** - every pass returns a new batch, nothing is
//!    mutated in place
//! 2. **Keep the row** - bad cell values are nulled or defaulted; only the
//!    explicit data-quality gates (age range, non-positive quantity/price)
//!    drop rows
//! 3. **Tables are configuration** - vocabularies and lookup maps are
//!    values handed to the normalizers, not literals buried in logic
//! 4. **Idempotent** - re-running any normalizer on its own output is a
//!    no-op
//!
//! # Quick Start
//!
//! ```
//! use std::sync::Arc;
//!
//! use arrow::array::{Float64Array, Int64Array, RecordBatch, StringArray};
//! use arrow::datatypes::{DataType, Field, Schema};
//! use varejo::{Normalizer, SaleNormalizer};
//!
//! let schema = Arc::new(Schema::new(vec![
//!     Field::new("customer_id", DataType::Int64, false),
//!     Field::new("product_name", DataType::Utf8, false),
//!     Field::new("seller", DataType::Utf8, false),
//!     Field::new("quantity", DataType::Int64, false),
//!     Field::new("unit_price", DataType::Float64, false),
//!     Field::new("sale_date", DataType::Utf8, true),
//! ]));
//! let sales = RecordBatch::try_new(
//!     schema,
//!     vec![
//!         Arc::new(Int64Array::from(vec![1, 2])),
//!         Arc::new(StringArray::from(vec!["Mouse", "Teclado"])),
//!         Arc::new(StringArray::from(vec!["Ana", "Bruno"])),
//!         Arc::new(Int64Array::from(vec![3, 0])),
//!         Arc::new(Float64Array::from(vec![19.99, 45.0])),
//!         Arc::new(StringArray::from(vec![Some("2024-01-15"), None])),
//!     ],
//! )
//! .unwrap();
//!
//! let cleaned = SaleNormalizer::new().normalize(sales).unwrap();
//! assert_eq!(cleaned.num_rows(), 1); // zero-quantity row dropped
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
// Allow common test patterns
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::float_cmp,
        clippy::too_many_lines
    )
)]

pub mod batch;
pub mod clean;
pub mod dates;
pub mod error;
pub mod integrate;
pub mod pipeline;
pub mod schema;
pub mod vocab;

pub use clean::{
    CustomerNormalizer, Normalizer, ProductNormalizer, ReviewNormalizer, SaleNormalizer,
};
pub use error::{Error, Result};
pub use integrate::Integrator;
pub use pipeline::{EntityCounts, Pipeline, PipelineRun, RunReport};
pub use vocab::{CategoryRollup, CityStates, FlagVocab};
