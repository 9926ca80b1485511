use crate::models::transaction::Transaction;
use std::fmt;

pub const COLUMNS: [&str; 5] = ["id", "date", "category", "description", "amount"];

#[derive(Debug, Clone, PartialEq)]
pub struct LedgerRow {
    pub transaction: Transaction,
    pub formatted_amount: String,
}

impl LedgerRow {
    fn cells(&self) -> [String; 5] {
        [
            self.transaction.id.map(|id| id.to_string()).unwrap_or_default(),
            self.transaction.date.to_string(),
            self.transaction.category_label().to_string(),
            self.transaction.description.clone(),
            self.formatted_amount.clone(),
        ]
    }
}

/// Tabular listing of transactions, newest first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LedgerTable {
    rows: Vec<LedgerRow>,
}

impl LedgerTable {
    pub fn new(rows: Vec<LedgerRow>) -> Self {
        Self { rows }
    }

    pub fn columns(&self) -> &'static [&'static str] {
        &COLUMNS
    }

    pub fn rows(&self) -> &[LedgerRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn ids(&self) -> Vec<i64> {
        self.rows.iter().filter_map(|row| row.transaction.id).collect()
    }
}

impl fmt::Display for LedgerTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cells: Vec<[String; 5]> = self.rows.iter().map(LedgerRow::cells).collect();

        let mut widths = COLUMNS.map(|header| header.chars().count());
        for row in &cells {
            for (width, cell) in widths.iter_mut().zip(row.iter()) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let header: Vec<String> = COLUMNS
            .iter()
            .zip(widths.iter())
            .map(|(name, width)| format!("{:<width$}", name, width = width))
            .collect();
        writeln!(f, "{}", header.join(" | ").trim_end())?;

        let separator: Vec<String> = widths.iter().map(|width| "-".repeat(*width)).collect();
        writeln!(f, "{}", separator.join("-+-"))?;

        for row in &cells {
            // amounts are right-aligned, everything else left-aligned
            let line: Vec<String> = row
                .iter()
                .zip(widths.iter())
                .enumerate()
                .map(|(idx, (cell, width))| {
                    if idx == COLUMNS.len() - 1 {
                        format!("{:>width$}", cell, width = width)
                    } else {
                        format!("{:<width$}", cell, width = width)
                    }
                })
                .collect();
            writeln!(f, "{}", line.join(" | ").trim_end())?;
        }
        Ok(())
    }
}
