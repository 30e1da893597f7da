use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RentalError {
    #[error("failed to open dataset {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed dataset: {0}")]
    Csv(#[from] csv::Error),
    /// Only raised by the strict monthly aggregation.
    #[error("unknown month key {month:?} on {date}")]
    UnknownMonth {
        month: String,
        date: chrono::NaiveDate,
    },
}
