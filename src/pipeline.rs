//! Fan-out/fan-in orchestration of the cleaning pipeline.

use arrow::array::RecordBatch;
use serde::Serialize;

use crate::{
    clean::{CustomerNormalizer, Normalizer, ProductNormalizer, ReviewNormalizer, SaleNormalizer},
    error::Result,
    integrate::Integrator,
    vocab::{CategoryRollup, CityStates, FlagVocab},
};

/// Row-count accounting for one entity's cleaning pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EntityCounts {
    /// Rows received from the loader.
    pub rows_in: usize,
    /// Rows surviving the cleaning pass.
    pub rows_out: usize,
}

impl EntityCounts {
    /// Rows removed by the pass's data-quality gates.
    #[must_use]
    pub fn rows_dropped(&self) -> usize {
        self.rows_in.saturating_sub(self.rows_out)
    }
}

/// Row-count summary of a full pipeline run.
///
/// This is the accounting the operation's run log is built from; it is data,
/// not behavior, and serializes to JSON as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RunReport {
    /// Customer record-set counts.
    pub customers: EntityCounts,
    /// Sale record-set counts.
    pub sales: EntityCounts,
    /// Product record-set counts.
    pub products: EntityCounts,
    /// Review record-set counts.
    pub reviews: EntityCounts,
    /// Rows in the consolidated output.
    pub integrated_rows: usize,
}

/// Output of [`Pipeline::run`]: the consolidated batch plus its accounting.
#[derive(Debug, Clone)]
pub struct PipelineRun {
    /// The consolidated record set, ready for export.
    pub integrated: RecordBatch,
    /// Row-count accounting for the run.
    pub report: RunReport,
}

/// The four normalizers and the integrator, wired together.
///
/// The normalizers are mutually independent; the integrator is the single
/// synchronization barrier. `run` executes them sequentially — the passes
/// are pure, so a caller that wants data parallelism can instead invoke the
/// individual normalizers from separate threads and call
/// [`Integrator::integrate`] once all four outputs are in hand.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    customer: CustomerNormalizer,
    sale: SaleNormalizer,
    product: ProductNormalizer,
    review: ReviewNormalizer,
    integrator: Integrator,
}

impl Pipeline {
    /// Creates a pipeline with the default lookup tables.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a pipeline with custom lookup tables.
    #[must_use]
    pub fn with_tables(
        city_states: CityStates,
        flags: FlagVocab,
        categories: CategoryRollup,
    ) -> Self {
        Self {
            customer: CustomerNormalizer::with_tables(city_states, flags),
            product: ProductNormalizer::with_categories(categories),
            ..Self::default()
        }
    }

    /// Cleans the four record sets and integrates them.
    ///
    /// # Errors
    ///
    /// Returns an error if any record set is missing a required column or
    /// carries a column type the rules cannot work with.
    pub fn run(
        &self,
        customers: RecordBatch,
        sales: RecordBatch,
        products: RecordBatch,
        reviews: RecordBatch,
    ) -> Result<PipelineRun> {
        let customers_in = customers.num_rows();
        let sales_in = sales.num_rows();
        let products_in = products.num_rows();
        let reviews_in = reviews.num_rows();

        let customers = self.customer.normalize(customers)?;
        let sales = self.sale.normalize(sales)?;
        let products = self.product.normalize(products)?;
        let reviews = self.review.normalize(reviews)?;

        let integrated = self
            .integrator
            .integrate(&customers, &sales, &products, &reviews)?;

        let report = RunReport {
            customers: EntityCounts {
                rows_in: customers_in,
                rows_out: customers.num_rows(),
            },
            sales: EntityCounts {
                rows_in: sales_in,
                rows_out: sales.num_rows(),
            },
            products: EntityCounts {
                rows_in: products_in,
                rows_out: products.num_rows(),
            },
            reviews: EntityCounts {
                rows_in: reviews_in,
                rows_out: reviews.num_rows(),
            },
            integrated_rows: integrated.num_rows(),
        };
        Ok(PipelineRun { integrated, report })
    }
}
