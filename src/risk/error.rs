//! Risk engine error types

use crate::data::TableError;
use thiserror::Error;

/// Errors that abort a risk assessment.
///
/// Every precondition violation is fatal: there is no partial-results
/// mode, and validation happens before any computation starts.
#[derive(Error, Debug)]
pub enum RiskError {
    #[error("background knowledge size {size} is outside the valid range [1, {n_features}]")]
    InvalidSize { size: usize, n_features: usize },

    #[error("column '{0}' does not exist in the table")]
    UnknownColumn(String),

    #[error("id column '{0}' cannot be listed among the excluded columns")]
    ExcludedIdColumn(String),

    #[error("table has no rows to assess")]
    EmptyTable,

    #[error(transparent)]
    Table(#[from] TableError),
}

/// Result type alias for risk engine operations
pub type RiskResult<T> = Result<T, RiskError>;
