use thiserror::Error;

/// Errors raised by hash table operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    #[error("key {0:?} is not a non-negative integer")]
    InvalidKey(String),
    #[error("a table needs at least one bucket")]
    ZeroBuckets,
}

/// Errors raised while reading records from a source
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("failed to open record source: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed csv: {0}")]
    Csv(#[from] csv::Error),
    #[error("row {row} has no column {column}")]
    MissingField { row: u64, column: usize },
    #[error(transparent)]
    Table(#[from] TableError),
}
