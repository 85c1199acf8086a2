use crate::loader::error::LoadError;
use polars::error::PolarsError;
use thiserror::Error;

/// Top-level error for pipeline runs.
///
/// Only structural problems surface here; per-field decode failures are
/// counted on the report instead.
#[derive(Debug, Error)]
pub enum StormStatError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Frame(#[from] PolarsError),
}
