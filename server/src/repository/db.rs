//! Database Connection and Setup
//!
//! Manages the SQLite connection and schema migrations.

use rusqlite::Connection;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::domain::DomainError;

/// Connection shared by every repository
pub type SharedConnection = Arc<Mutex<Connection>>;

/// Database state wrapper
#[derive(Clone)]
pub struct DbState {
    pub conn: SharedConnection,
}

impl DbState {
    fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }
}

/// Open (or create) the database at `db_path` and run migrations
///
/// `:memory:` opens a private in-memory database.
pub fn init_db(db_path: &Path) -> rusqlite::Result<DbState> {
    let conn = if db_path.as_os_str() == ":memory:" {
        Connection::open_in_memory()?
    } else {
        Connection::open(db_path)?
    };
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    run_migrations(&conn)?;
    Ok(DbState::from_connection(conn))
}

/// Map a storage error into the domain error type
pub(crate) fn db_error(e: rusqlite::Error) -> DomainError {
    DomainError::Internal(e.to_string())
}

/// Map a JSON column error into the domain error type
pub(crate) fn json_error(e: serde_json::Error) -> DomainError {
    DomainError::Internal(format!("malformed JSON column: {}", e))
}

/// Check if a column exists in a table
fn column_exists(conn: &Connection, table: &str, column: &str) -> rusqlite::Result<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({})", table))?;
    let names = stmt.query_map([], |row| row.get::<_, String>(1))?;
    for name in names {
        if name? == column {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Run database migrations
fn run_migrations(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS inventory (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            quantity INTEGER NOT NULL DEFAULT 0,
            location TEXT NOT NULL,
            status TEXT NOT NULL,
            item_code TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS produksi (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            target INTEGER NOT NULL,
            completed INTEGER NOT NULL DEFAULT 0,
            status TEXT NOT NULL DEFAULT '',
            start_date TEXT,
            end_date TEXT,
            personnel_data TEXT NOT NULL DEFAULT '[]',
            materials_data TEXT NOT NULL DEFAULT '[]',
            progress_data TEXT NOT NULL DEFAULT '[]'
        );

        CREATE TABLE IF NOT EXISTS overhaul (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            location TEXT NOT NULL,
            status TEXT NOT NULL,
            estimate TEXT,
            progress INTEGER NOT NULL DEFAULT 0,
            personalia_id INTEGER,
            inventory_id INTEGER
        );

        CREATE TABLE IF NOT EXISTS overhaul_history (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            overhaul_id INTEGER NOT NULL REFERENCES overhaul(id) ON DELETE CASCADE,
            timestamp TEXT,
            description TEXT NOT NULL DEFAULT ''
        );

        CREATE TABLE IF NOT EXISTS kalibrasi (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            tool_name TEXT NOT NULL,
            status TEXT NOT NULL,
            progress_step INTEGER NOT NULL DEFAULT 0,
            due_date TEXT,
            last_update TEXT
        );

        CREATE TABLE IF NOT EXISTS personalia (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            nip TEXT NOT NULL,
            jabatan TEXT NOT NULL,
            divisi TEXT NOT NULL,
            status TEXT NOT NULL,
            join_date TEXT,
            phone_number TEXT NOT NULL,
            urgent_number TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS quality_control (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            product_name TEXT NOT NULL,
            batch_code TEXT NOT NULL,
            status TEXT NOT NULL,
            tested_count INTEGER NOT NULL DEFAULT 0,
            passed_count INTEGER NOT NULL DEFAULT 0,
            qc_date TEXT,
            department TEXT NOT NULL,
            produksi_id INTEGER,
            overhaul_id INTEGER
        );

        CREATE TABLE IF NOT EXISTS stock_production (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            item_name TEXT NOT NULL,
            quantity INTEGER NOT NULL DEFAULT 0,
            location TEXT NOT NULL,
            status TEXT NOT NULL,
            last_update TEXT,
            inventory_id INTEGER,
            produksi_id INTEGER
        );

        CREATE TABLE IF NOT EXISTS rekayasa (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            status TEXT NOT NULL DEFAULT '',
            team TEXT NOT NULL DEFAULT '',
            deadline TEXT,
            progress INTEGER NOT NULL DEFAULT 0
        );

        CREATE TABLE IF NOT EXISTS profile (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            email TEXT NOT NULL,
            address TEXT NOT NULL,
            phone_number TEXT NOT NULL,
            edu_degree TEXT,
            edu_university TEXT,
            edu_year TEXT,
            exp_position TEXT,
            exp_period TEXT
        );",
    )?;

    // Profile link was added after personnel records existed
    if !column_exists(conn, "personalia", "profile_id")? {
        conn.execute("ALTER TABLE personalia ADD COLUMN profile_id INTEGER", [])?;
    }

    conn.execute_batch(
        "CREATE INDEX IF NOT EXISTS idx_history_overhaul ON overhaul_history(overhaul_id);
         CREATE INDEX IF NOT EXISTS idx_qc_department ON quality_control(department);",
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migrations_are_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        run_migrations(&conn).unwrap();
        assert!(column_exists(&conn, "personalia", "profile_id").unwrap());
        assert!(!column_exists(&conn, "personalia", "missing").unwrap());
    }
}
