//! Price dataset error types.

use std::path::PathBuf;

/// Errors that can occur while loading the price dataset.
///
/// Malformed rows are not errors: they are skipped during load.
#[derive(Debug, thiserror::Error)]
pub enum PriceError {
    /// Dataset file could not be opened
    #[error("failed to read price dataset {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Header row could not be read
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A required column is absent from the header row
    #[error("price dataset is missing the {0:?} column")]
    MissingColumn(&'static str),

    /// Background load task failed
    #[error("price table load failed: {message}")]
    Load { message: String },
}
