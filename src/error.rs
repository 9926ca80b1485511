use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("invalid amount {0}: must be greater than zero")]
    InvalidAmount(Decimal),
    #[error("invalid date {0}: year must be between 0 and 9999")]
    InvalidDate(NaiveDate),
    #[error("total spent overflowed the decimal range")]
    AmountOverflow,
    #[error("ledger schema is not available; database setup failed")]
    SchemaUnavailable,
    #[error("transaction with ID {0} not found")]
    NotFound(i64),
    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),
}

pub type Result<T> = std::result::Result<T, LedgerError>;
