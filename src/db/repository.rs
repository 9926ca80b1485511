use crate::config::LedgerConfig;
use crate::currency::CurrencyFormatter;
use crate::db::connection::{self, SchemaStatus};
use crate::error::{LedgerError, Result};
use crate::models::ledger_table::{LedgerRow, LedgerTable};
use crate::models::transaction::{DATE_FORMAT, Transaction, UNCATEGORIZED, parse_amount_column};
use chrono::{Datelike, NaiveDate};
use rusqlite::{Connection, params, params_from_iter};
use rust_decimal::Decimal;
use std::collections::HashMap;

const SELECT_TRANSACTIONS: &str =
    "SELECT id, date, category, description, amount FROM transactions";

/// Persistence and queries over the `transactions` table.
pub struct LedgerRepository {
    conn: Connection,
    schema: SchemaStatus,
    formatter: CurrencyFormatter,
}

impl LedgerRepository {
    /// Wraps an open connection, setting up the schema unless this process already did.
    pub fn new(conn: Connection) -> Self {
        Self::with_formatter(conn, CurrencyFormatter::default())
    }

    pub fn with_formatter(conn: Connection, formatter: CurrencyFormatter) -> Self {
        let schema = connection::ensure_schema(&conn);
        Self {
            conn,
            schema,
            formatter,
        }
    }

    pub fn open(config: &LedgerConfig) -> Result<Self> {
        let conn = connection::establish_connection(&config.database_path)?;
        let formatter =
            CurrencyFormatter::probe(&config.currency_prefix, config.locale.as_deref());
        Ok(Self::with_formatter(conn, formatter))
    }

    pub fn schema_status(&self) -> &SchemaStatus {
        &self.schema
    }

    pub fn formatter(&self) -> &CurrencyFormatter {
        &self.formatter
    }

    /// Inserts the transaction and writes the generated id back onto it.
    pub fn add(&self, transaction: &mut Transaction) -> Result<i64> {
        if transaction.amount <= Decimal::ZERO {
            return Err(LedgerError::InvalidAmount(transaction.amount));
        }
        // years past 9999 render as `+10000-..` and break text ordering
        if !(0..=9999).contains(&transaction.date.year()) {
            return Err(LedgerError::InvalidDate(transaction.date));
        }
        if !self.schema.is_ready() {
            return Err(LedgerError::SchemaUnavailable);
        }

        self.conn.execute(
            "INSERT INTO transactions (description, amount, category, date)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                &transaction.description,
                transaction.amount.to_string(),
                transaction.stored_category(),
                transaction.date.format(DATE_FORMAT).to_string(),
            ],
        )?;

        let id = self.conn.last_insert_rowid();
        transaction.id = Some(id);
        tracing::debug!(id, amount = %transaction.amount, "transaction added");
        Ok(id)
    }

    /// Transactions newest first, optionally restricted to a single day.
    pub fn list(&self, date: Option<NaiveDate>) -> Result<Vec<Transaction>> {
        let (filter, args) = date_filter(date);
        let sql = format!(
            "{}{} ORDER BY date DESC, id DESC",
            SELECT_TRANSACTIONS, filter
        );

        let mut stmt = self.conn.prepare(&sql)?;
        let transactions = stmt
            .query_map(params_from_iter(args.iter()), Transaction::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(transactions)
    }

    pub fn list_as_table(&self, date: Option<NaiveDate>) -> Result<LedgerTable> {
        let rows = self
            .list(date)?
            .into_iter()
            .map(|transaction| LedgerRow {
                formatted_amount: self.formatter.format(transaction.amount),
                transaction,
            })
            .collect();
        Ok(LedgerTable::new(rows))
    }

    pub fn delete(&self, id: i64) -> Result<()> {
        if !self.schema.is_ready() {
            return Err(LedgerError::SchemaUnavailable);
        }

        let rows_affected = self
            .conn
            .execute("DELETE FROM transactions WHERE id = ?1", [id])?;

        if rows_affected == 0 {
            return Err(LedgerError::NotFound(id));
        }
        tracing::debug!(id, "transaction deleted");
        Ok(())
    }

    pub fn total_spent(&self, date: Option<NaiveDate>) -> Result<Decimal> {
        self.category_amounts(date)?
            .into_iter()
            .try_fold(Decimal::ZERO, |acc, (_, amount)| acc.checked_add(amount))
            .ok_or(LedgerError::AmountOverflow)
    }

    /// Sums per category label; missing and blank categories land under [`UNCATEGORIZED`].
    pub fn spent_by_category(
        &self,
        date: Option<NaiveDate>,
    ) -> Result<HashMap<String, Decimal>> {
        let mut totals: HashMap<String, Decimal> = HashMap::new();
        for (category, amount) in self.category_amounts(date)? {
            let label = category
                .as_deref()
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .unwrap_or(UNCATEGORIZED);
            let total = totals.entry(label.to_string()).or_insert(Decimal::ZERO);
            *total = total.checked_add(amount).ok_or(LedgerError::AmountOverflow)?;
        }
        Ok(totals)
    }

    fn category_amounts(
        &self,
        date: Option<NaiveDate>,
    ) -> Result<Vec<(Option<String>, Decimal)>> {
        let (filter, args) = date_filter(date);
        let sql = format!("SELECT category, amount FROM transactions{}", filter);

        let mut stmt = self.conn.prepare(&sql)?;
        let amounts = stmt
            .query_map(params_from_iter(args.iter()), |row| {
                let amount_str: String = row.get("amount")?;
                let amount = parse_amount_column(row, "amount", &amount_str)?;
                Ok((row.get("category")?, amount))
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(amounts)
    }
}

fn date_filter(date: Option<NaiveDate>) -> (&'static str, Vec<String>) {
    match date {
        Some(date) => (
            " WHERE date = ?1",
            vec![date.format(DATE_FORMAT).to_string()],
        ),
        None => ("", Vec::new()),
    }
}
