//! Row source contract between the dataset pipeline and a database driver.
//!
//! The pipeline never talks to a database directly. The caller supplies a
//! [`RowSource`]; the pipeline feeds it one SQL statement at a time and fully
//! consumes the produced rows before executing the next statement. One row
//! source (one logical connection or session) serves a whole pipeline run.

use std::borrow::Cow;

/// Opaque error produced by a row source implementation.
///
/// The pipeline never inspects it; it is wrapped into
/// [`Error::Source`](crate::Error::Source) and aborts the run.
pub type SourceError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A single column value produced by a row source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// SQL NULL.
    Null,
    /// Character data.
    Text(String),
    /// Binary data.
    Bytes(Vec<u8>),
}

impl Value {
    /// Returns `true` for [`Value::Null`].
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Character view of the value: text as-is, binary data decoded as UTF-8
    /// (lossily), `None` for SQL NULL.
    #[must_use]
    pub fn as_text(&self) -> Option<Cow<'_, str>> {
        match self {
            Value::Null => None,
            Value::Text(text) => Some(Cow::Borrowed(text)),
            Value::Bytes(bytes) => Some(String::from_utf8_lossy(bytes)),
        }
    }

    /// Binary view of the value: binary data as-is, text as its UTF-8 bytes,
    /// `None` for SQL NULL.
    #[must_use]
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Null => None,
            Value::Text(text) => Some(text.as_bytes()),
            Value::Bytes(bytes) => Some(bytes),
        }
    }
}

/// Result column metadata: the column name and the declared type name
/// reported by the driver (e.g. `VARCHAR`, `BLOB`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultColumn {
    /// Column name as reported by the result metadata.
    pub name: String,
    /// Declared type name, used to select an encoding strategy.
    pub type_name: String,
}

impl ResultColumn {
    /// Create column metadata from a name and a declared type name.
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
        }
    }
}

/// Streamed rows of a single executed statement.
///
/// Column order is determined once per statement from [`ResultRows::columns`]
/// and every row yields its values in that order.
pub trait ResultRows {
    /// Column metadata, in result order.
    fn columns(&self) -> &[ResultColumn];

    /// The next row of values, or `None` once the row stream is exhausted.
    ///
    /// # Errors
    ///
    /// Any driver-side failure while fetching the row.
    fn next_row(&mut self) -> Result<Option<Vec<Value>>, SourceError>;
}

/// External executor that runs one SQL statement and yields its rows.
pub trait RowSource {
    /// Execute `sql` and return its row stream.
    ///
    /// The returned stream borrows the source: it must be dropped before the
    /// next statement is executed, which is exactly how the pipeline drives
    /// it.
    ///
    /// # Errors
    ///
    /// Any driver-side failure while preparing or executing the statement.
    fn query(&mut self, sql: &str) -> Result<Box<dyn ResultRows + '_>, SourceError>;
}
