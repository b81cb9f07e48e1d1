//! Whole-dataset accumulation with per-table deduplication.

use indexmap::{IndexMap, IndexSet};

use super::row::TableRow;

/// Builder for the complete dataset document.
///
/// Tables appear in the order they are first registered, rows within a table
/// in first-seen order with exact duplicates collapsed. `build` can be
/// called at any point; the pipeline calls it once after the last statement.
#[derive(Debug, Default)]
pub struct DatasetBuilder {
    tables: IndexMap<String, IndexSet<String>>,
}

impl DatasetBuilder {
    /// Create an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a table so it appears in the output even with zero rows.
    pub fn ensure_table(&mut self, table_name: &str) {
        if !self.tables.contains_key(table_name) {
            self.tables.insert(table_name.to_string(), IndexSet::new());
        }
    }

    /// Add a row to its table. Empty rows and exact duplicates are ignored.
    pub fn push_row(&mut self, row: &TableRow) {
        if row.is_empty() {
            return;
        }

        self.tables
            .entry(row.table_name().to_string())
            .or_default()
            .insert(row.to_xml());
    }

    /// Serialize the accumulated dataset as an XML document.
    #[must_use]
    pub fn build(&self) -> String {
        let mut document = String::new();
        document.push_str("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n");
        document.push_str("<dataset>\n");

        for (index, (table_name, rows)) in self.tables.iter().enumerate() {
            if index > 0 {
                document.push('\n');
            }

            if rows.is_empty() {
                document.push_str("    <");
                document.push_str(table_name);
                document.push_str(" />\n");
            }

            for row in rows {
                document.push_str("    ");
                document.push_str(row);
                document.push('\n');
            }
        }

        document.push_str("</dataset>\n");
        document
    }
}
