//! The four entity normalizers.
//!
//! Each normalizer cleans one record set in isolation: it consumes a batch,
//! applies the per-field rules and row-elimination gates for its entity, and
//! returns a new batch. Normalizers share no state, so they can run in any
//! order or in parallel; the integrator is the only fan-in point.

use arrow::array::RecordBatch;

use crate::error::Result;

mod customer;
mod product;
mod review;
mod sale;

pub use customer::CustomerNormalizer;
pub use product::ProductNormalizer;
pub use review::ReviewNormalizer;
pub use sale::SaleNormalizer;

/// A cleaning pass over one entity's record set.
///
/// Normalizers are pure functions of their input: the caller's batch is
/// consumed and a new cleaned batch returned, never a mutation of shared
/// state. Every implementation is idempotent — running it on its own output
/// changes nothing.
///
/// # Thread Safety
///
/// Normalizers are `Send + Sync` so the four entity passes can be run
/// data-parallel before the integration barrier.
pub trait Normalizer: Send + Sync {
    /// Applies the cleaning rules to a record set.
    ///
    /// # Errors
    ///
    /// Returns an error if a required column is missing or has a type the
    /// rules cannot work with. Bad cell values never error; they are nulled,
    /// defaulted, or (at the data-quality gates) dropped with their row.
    fn normalize(&self, batch: RecordBatch) -> Result<RecordBatch>;
}
