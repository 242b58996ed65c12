use thiserror::Error;

use crate::domain::{CatalogError, LedgerError, ParseCentsError, PurchaseError};

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Purchase(#[from] PurchaseError),

    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("Invalid amount '{input}': {source}")]
    InvalidAmount {
        input: String,
        source: ParseCentsError,
    },

    #[error("Unsupported catalog file format: {0} (expected .json or .csv)")]
    UnsupportedFormat(String),

    #[error("Catalog file error at record {record}: {message}")]
    CatalogFile { record: usize, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
