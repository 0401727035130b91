use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("ledger file not found: {0}")]
    NotFound(PathBuf),
    #[error("could not read ledger file")]
    Io(#[from] std::io::Error),
    #[error("could not parse CSV rows to financial records")]
    Csv(#[from] csv::Error),
    #[error("could not parse `{0}` as a month, expected YYYY-MM or YYYY-MM-DD")]
    InvalidMonth(String),
    #[error("ledger is missing required column `{0}`")]
    MissingColumn(&'static str),
    #[error("ledger contains no data rows")]
    EmptyLedger,
}

pub type Result<T> = std::result::Result<T, Error>;
