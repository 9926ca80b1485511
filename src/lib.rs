//! Daily expense ledger backed by SQLite.
//!
//! [`LedgerRepository`] records expenses and answers totals per day and per
//! category. Open one from a [`LedgerConfig`], or wrap an existing
//! [`rusqlite::Connection`] with [`LedgerRepository::new`].

pub mod config;
pub mod currency;
pub mod db;
pub mod error;
pub mod models;
pub mod telemetry;

pub use config::LedgerConfig;
pub use currency::CurrencyFormatter;
pub use db::connection::SchemaStatus;
pub use db::repository::LedgerRepository;
pub use error::LedgerError;
pub use models::ledger_table::{LedgerRow, LedgerTable};
pub use models::transaction::{Transaction, UNCATEGORIZED};
