use polars::error::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

/// Structural failures while loading the raw event log.
///
/// These are the only fatal errors in the pipeline: a load either produces
/// the full record set or nothing. Per-field decode failures are not errors;
/// they surface as `None` fields on the records.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to read input file '{0}'")]
    InputRead(PathBuf, #[source] std::io::Error),

    #[error("Failed to decompress gzip input")]
    Decompress(#[source] std::io::Error),

    #[error("I/O error staging CSV data for parsing")]
    CsvStageIo(#[source] std::io::Error),

    #[error("Failed to parse CSV input")]
    CsvParse(#[source] PolarsError),

    #[error("Input contains no data rows")]
    EmptyInput,

    #[error("Required column '{0}' is missing from the input")]
    MissingColumn(&'static str),

    #[error("Background parsing task failed")]
    Join(#[from] tokio::task::JoinError),
}
