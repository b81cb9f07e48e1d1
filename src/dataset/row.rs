//! Single dataset row and its builder.

use core::fmt::Write;

/// One result row bound to a table, with encoded attribute values in column
/// order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    table_name: String,
    columns: Vec<(String, String)>,
}

impl TableRow {
    /// Table this row belongs to.
    #[must_use]
    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// Returns `true` when no column contributed a value, e.g. an all-NULL
    /// row or a zero-column result.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Serialize as a self-closing XML element with one attribute per
    /// column. Values must already be XML-escaped by the column mappers;
    /// they are emitted verbatim.
    #[must_use]
    pub fn to_xml(&self) -> String {
        let mut element = String::new();
        element.push('<');
        element.push_str(&self.table_name);

        for (name, value) in &self.columns {
            write!(element, " {name}=\"{value}\"").unwrap();
        }

        element.push_str(" />");
        element
    }
}

/// Accumulates encoded columns for one row.
#[derive(Debug)]
pub struct TableRowBuilder {
    table_name: String,
    columns: Vec<(String, String)>,
}

impl TableRowBuilder {
    /// New builder for a row of `table_name`.
    #[must_use]
    pub fn new(table_name: impl Into<String>) -> Self {
        Self {
            table_name: table_name.into(),
            columns: Vec::new(),
        }
    }

    /// Append one encoded column value.
    pub fn push(&mut self, column_name: impl Into<String>, value: impl Into<String>) {
        self.columns.push((column_name.into(), value.into()));
    }

    /// Finish the row.
    #[must_use]
    pub fn build(self) -> TableRow {
        TableRow {
            table_name: self.table_name,
            columns: self.columns,
        }
    }
}
