//! SQLite-backed row source for tests and examples.
//!
//! This module is gated behind the `testing` feature. It wraps a
//! [`rusqlite::Connection`] so the whole pipeline can run against a real
//! in-memory database; declared column types come from the table definition
//! (`decl_type`), which is what the encoding strategies are selected from.

use rusqlite::Connection;
use rusqlite::types::ValueRef;

use crate::source::{ResultColumn, ResultRows, RowSource, SourceError, Value};

/// Row source over a SQLite connection.
#[derive(Debug)]
pub struct SqliteRowSource {
    connection: Connection,
}

impl SqliteRowSource {
    /// Wrap an open SQLite connection.
    #[must_use]
    pub fn new(connection: Connection) -> Self {
        Self { connection }
    }

    /// Open an in-memory database.
    ///
    /// # Errors
    ///
    /// Propagates the underlying SQLite open failure.
    pub fn open_in_memory() -> Result<Self, SourceError> {
        Ok(Self::new(Connection::open_in_memory()?))
    }

    /// Execute a batch of setup statements (DDL and inserts).
    ///
    /// # Errors
    ///
    /// Propagates the underlying SQLite execution failure.
    pub fn execute_batch(&self, sql: &str) -> Result<(), SourceError> {
        self.connection.execute_batch(sql)?;
        Ok(())
    }
}

impl RowSource for SqliteRowSource {
    fn query(&mut self, sql: &str) -> Result<Box<dyn ResultRows + '_>, SourceError> {
        let mut statement = self.connection.prepare(sql)?;

        let columns: Vec<ResultColumn> = statement
            .columns()
            .iter()
            .map(|column| ResultColumn::new(column.name(), column.decl_type().unwrap_or_default()))
            .collect();

        // Buffer the rows so the returned stream does not borrow the
        // statement; the pipeline still consumes them strictly in order.
        let mut buffered = Vec::new();
        let mut rows = statement.query([])?;

        while let Some(row) = rows.next()? {
            let mut values = Vec::with_capacity(columns.len());

            for index in 0..columns.len() {
                values.push(match row.get_ref(index)? {
                    ValueRef::Null => Value::Null,
                    ValueRef::Integer(value) => Value::Text(value.to_string()),
                    ValueRef::Real(value) => Value::Text(value.to_string()),
                    ValueRef::Text(text) => Value::Text(String::from_utf8_lossy(text).into_owned()),
                    ValueRef::Blob(blob) => Value::Bytes(blob.to_vec()),
                });
            }

            buffered.push(values);
        }

        Ok(Box::new(BufferedRows {
            columns,
            rows: buffered.into_iter(),
        }))
    }
}

/// Fully-buffered result rows of one statement.
struct BufferedRows {
    columns: Vec<ResultColumn>,
    rows: std::vec::IntoIter<Vec<Value>>,
}

impl ResultRows for BufferedRows {
    fn columns(&self) -> &[ResultColumn] {
        &self.columns
    }

    fn next_row(&mut self) -> Result<Option<Vec<Value>>, SourceError> {
        Ok(self.rows.next())
    }
}
