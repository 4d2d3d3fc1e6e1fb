//! Error types for varejo.

/// Result type alias for varejo operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while cleaning or integrating record sets.
///
/// These cover structural misuse only: missing columns, wrong column types,
/// Arrow construction failures. Row-level data problems (malformed dates,
/// non-numeric cost prices, unmapped categorical values) are never errors —
/// the affected field is nulled or defaulted and the row is kept.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Arrow error during batch construction or row gathering.
    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    /// Column not found in schema.
    #[error("Column '{name}' not found in schema")]
    ColumnNotFound {
        /// The name of the missing column.
        name: String,
    },

    /// Column present but with an unusable data type.
    #[error("Column '{name}' has type {actual}, expected {expected}")]
    ColumnType {
        /// The name of the offending column.
        name: String,
        /// The data type(s) the operation accepts.
        expected: String,
        /// The data type actually found.
        actual: String,
    },

    /// Schema mismatch between record sets.
    #[error("Schema mismatch: {message}")]
    SchemaMismatch {
        /// Description of the schema mismatch.
        message: String,
    },
}

impl Error {
    /// Create a column not found error.
    pub fn column_not_found(name: impl Into<String>) -> Self {
        Self::ColumnNotFound { name: name.into() }
    }

    /// Create a column type error.
    pub fn column_type(
        name: impl Into<String>,
        expected: impl Into<String>,
        actual: &arrow::datatypes::DataType,
    ) -> Self {
        Self::ColumnType {
            name: name.into(),
            expected: expected.into(),
            actual: actual.to_string(),
        }
    }

    /// Create a schema mismatch error.
    pub fn schema_mismatch(message: impl Into<String>) -> Self {
        Self::SchemaMismatch {
            message: message.into(),
        }
    }
}
