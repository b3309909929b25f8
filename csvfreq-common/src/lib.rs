pub mod config;
pub use config::{Config, ReaderConfig, WriterConfig};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CsvFreqError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("a column index or name must be specified")]
    MissingColumns,
    #[error("column not found: {0}")]
    ColumnNotFound(String),
    #[error("{0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, CsvFreqError>;
