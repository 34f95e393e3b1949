// src/db/connection.rs

use rusqlite::Connection;
use std::cell::RefCell;
use std::error::Error;
use std::fmt;
use std::fs;

/// Failures of the operational journal.
#[derive(Debug)]
pub enum StoreError {
    Open(String),
    Schema(String),
    Query(String),
    Internal,
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Open(msg) => write!(f, "Open DB failed: {msg}"),
            StoreError::Schema(msg) => write!(f, "Schema error: {msg}"),
            StoreError::Query(msg) => write!(f, "Query error: {msg}"),
            StoreError::Internal => write!(f, "Internal store error"),
        }
    }
}

impl Error for StoreError {}

// Thread-local connection slot: the handle is a cheap path clone, each
// thread opens its connection lazily on first use.
thread_local! {
    static DB_CONN: RefCell<Option<Connection>> = RefCell::new(None);
}

#[derive(Clone)]
pub struct Database {
    path: String,
}

impl Database {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    /// Provides the thread's connection to the closure, opening it first if
    /// needed.
    pub fn with_conn<F, T>(&self, f: F) -> Result<T, StoreError>
    where
        F: FnOnce(&mut Connection) -> Result<T, StoreError>,
    {
        DB_CONN
            .try_with(|cell| {
                let mut slot = cell.borrow_mut();
                if slot.is_none() {
                    let conn = Connection::open(&self.path)
                        .map_err(|e| StoreError::Open(e.to_string()))?;
                    *slot = Some(conn);
                }
                match slot.as_mut() {
                    Some(conn) => f(conn),
                    None => Err(StoreError::Internal),
                }
            })
            .map_err(|_| StoreError::Internal)?
    }
}

/// Applies the SQL schema file to the database.
pub fn init_db(db: &Database, schema_path: &str) -> Result<(), StoreError> {
    let schema_sql = fs::read_to_string(schema_path)
        .map_err(|e| StoreError::Schema(format!("failed to read schema file: {e}")))?;

    db.with_conn(|conn| {
        conn.execute_batch(&schema_sql)
            .map_err(|e| StoreError::Schema(format!("failed to apply schema: {e}")))
    })
}
