pub mod ledger_table;
pub mod transaction;
