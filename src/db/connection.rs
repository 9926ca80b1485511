use rusqlite::{Connection, Result};
use std::collections::HashSet;
use std::path::Path;
use std::sync::{LazyLock, Mutex, PoisonError};

pub const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS transactions (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    description TEXT NOT NULL,
    amount      TEXT NOT NULL,
    category    TEXT,
    date        TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_transactions_date ON transactions(date);
";

/// Database files whose schema has been set up by this process.
static PREPARED_DATABASES: LazyLock<Mutex<HashSet<String>>> =
    LazyLock::new(|| Mutex::new(HashSet::new()));

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaStatus {
    /// Setup ran on this connection.
    Created,
    /// Another connection in this process already set up the same file.
    AlreadyPrepared,
    /// Setup failed; the store is readable at best.
    Degraded(String),
}

impl SchemaStatus {
    pub fn is_ready(&self) -> bool {
        !matches!(self, SchemaStatus::Degraded(_))
    }
}

pub fn establish_connection(path: &Path) -> Result<Connection> {
    Connection::open(path)
}

/// Runs schema setup at most once per database file per process.
///
/// In-memory databases are private to their connection, so each of them is set up.
pub fn ensure_schema(conn: &Connection) -> SchemaStatus {
    let key = database_key(conn);
    let mut prepared = PREPARED_DATABASES
        .lock()
        .unwrap_or_else(PoisonError::into_inner);

    if let Some(key) = &key {
        if prepared.contains(key) {
            tracing::debug!(database = %key, "ledger schema already prepared");
            return SchemaStatus::AlreadyPrepared;
        }
    }

    tracing::info!(database = key.as_deref().unwrap_or(":memory:"), "checking ledger schema");
    match conn.execute_batch(SCHEMA) {
        Ok(()) => {
            if let Some(key) = key {
                prepared.insert(key);
            }
            tracing::info!("ledger schema ready");
            SchemaStatus::Created
        }
        Err(e) => {
            tracing::error!(error = %e, "ledger schema setup failed; repository is degraded");
            SchemaStatus::Degraded(e.to_string())
        }
    }
}

fn database_key(conn: &Connection) -> Option<String> {
    conn.path()
        .filter(|path| !path.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
pub fn establish_test_connection() -> Result<Connection> {
    let conn = Connection::open_in_memory()?;
    conn.execute_batch(SCHEMA)?;
    Ok(conn)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::OpenFlags;
    use tempfile::{NamedTempFile, tempdir};

    fn table_exists(conn: &Connection) -> bool {
        conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'transactions'",
            [],
            |row| row.get::<_, i64>(0),
        )
        .unwrap()
            == 1
    }

    #[test]
    fn test_establish_test_connection_has_schema() {
        let conn = establish_test_connection().unwrap();
        assert!(table_exists(&conn));
    }

    #[test]
    fn test_ensure_schema_runs_once_per_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ledger.db");

        let first = establish_connection(&path).unwrap();
        assert_eq!(ensure_schema(&first), SchemaStatus::Created);
        assert!(table_exists(&first));

        let second = establish_connection(&path).unwrap();
        assert_eq!(ensure_schema(&second), SchemaStatus::AlreadyPrepared);
        assert_eq!(ensure_schema(&first), SchemaStatus::AlreadyPrepared);
    }

    #[test]
    fn test_ensure_schema_in_memory_always_created() {
        let first = Connection::open_in_memory().unwrap();
        let second = Connection::open_in_memory().unwrap();

        assert_eq!(ensure_schema(&first), SchemaStatus::Created);
        assert_eq!(ensure_schema(&second), SchemaStatus::Created);
        assert!(table_exists(&second));
    }

    #[test]
    fn test_ensure_schema_failure_is_degraded_and_not_remembered() {
        let file = NamedTempFile::new().unwrap();

        let read_only =
            Connection::open_with_flags(file.path(), OpenFlags::SQLITE_OPEN_READ_ONLY).unwrap();
        let status = ensure_schema(&read_only);
        assert!(matches!(status, SchemaStatus::Degraded(_)));
        assert!(!status.is_ready());

        let writable = establish_connection(file.path()).unwrap();
        assert_eq!(ensure_schema(&writable), SchemaStatus::Created);
    }
}
