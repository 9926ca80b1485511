use chrono::NaiveDate;
use rusqlite::Row;
use rusqlite::types::Type;
use rust_decimal::Decimal;
use std::str::FromStr;

pub const UNCATEGORIZED: &str = "uncategorized";

pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub id: Option<i64>,
    pub date: NaiveDate,
    pub description: String,
    pub amount: Decimal,
    pub category: Option<String>,
}

impl Transaction {
    pub fn new(
        date: NaiveDate,
        description: String,
        amount: Decimal,
        category: Option<String>,
    ) -> Self {
        Self {
            id: None,
            date,
            description,
            amount,
            category,
        }
    }

    /// Category as it is persisted: trimmed, with blank labels mapped to `None`.
    pub fn stored_category(&self) -> Option<&str> {
        self.category
            .as_deref()
            .map(str::trim)
            .filter(|category| !category.is_empty())
    }

    /// Category as it is reported, falling back to [`UNCATEGORIZED`].
    pub fn category_label(&self) -> &str {
        self.stored_category().unwrap_or(UNCATEGORIZED)
    }

    /// Decodes a row selected with the `id, date, category, description, amount` columns.
    pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        let date_str: String = row.get("date")?;
        let amount_str: String = row.get("amount")?;

        Ok(Self {
            id: Some(row.get("id")?),
            date: parse_date_column(row, "date", &date_str)?,
            description: row.get("description")?,
            amount: parse_amount_column(row, "amount", &amount_str)?,
            category: row.get("category")?,
        })
    }
}

pub(crate) fn parse_date_column(
    row: &Row<'_>,
    column: &str,
    value: &str,
) -> rusqlite::Result<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|e| conversion_failure(row, column, Box::new(e)))
}

pub(crate) fn parse_amount_column(
    row: &Row<'_>,
    column: &str,
    value: &str,
) -> rusqlite::Result<Decimal> {
    Decimal::from_str(value).map_err(|e| conversion_failure(row, column, Box::new(e)))
}

fn conversion_failure(
    row: &Row<'_>,
    column: &str,
    error: Box<dyn std::error::Error + Send + Sync>,
) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(column_index(row, column), Type::Text, error)
}

fn column_index(row: &Row<'_>, column: &str) -> usize {
    row.as_ref().column_index(column).unwrap_or_default()
}
