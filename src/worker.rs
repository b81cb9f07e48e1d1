//! End-to-end dataset construction from annotated SQL text.

use crate::config::Config;
use crate::dataset::{DatasetBuilder, TableRowBuilder};
use crate::errors::Error;
use crate::filter::QueryFilter;
use crate::mapper::mappers_for_columns;
use crate::parse::parse_queries;
use crate::source::RowSource;

/// Run the whole pipeline: parse, filter and expand, execute, encode,
/// serialize.
///
/// Statements run strictly in order against `source`, and each statement's
/// row stream is fully consumed and dropped before the next statement is
/// executed, so one logical connection serves the whole run. A run either
/// produces one complete XML document or reports the first error; no partial
/// document is ever returned.
///
/// # Errors
///
/// [`Error::NoQueries`] when the input parses to zero statements,
/// [`Error::NoExecutableQueries`] when filtering leaves none, annotation and
/// template errors from the filter, and [`Error::Source`] when the row
/// source fails.
pub fn build_dataset(
    config: &Config,
    text: &str,
    source: &mut dyn RowSource,
) -> Result<String, Error> {
    let queries = parse_queries(text);
    tracing::debug!("Parsed {} queries from input text", queries.len());

    if queries.is_empty() {
        return Err(Error::NoQueries);
    }

    let filter = QueryFilter::new(
        config.no_table_mode,
        config.template_table_name.as_deref(),
        config.skip_table_prefix.as_deref(),
    );
    let queries = filter.filter(queries)?;
    tracing::debug!("{} executable queries after filtering", queries.len());

    if queries.is_empty() {
        return Err(Error::NoExecutableQueries);
    }

    let mut builder = DatasetBuilder::new();

    for query in &queries {
        // Filtering guarantees a table name on every executable query.
        let table_name = query.table_name.as_deref().unwrap_or_default();
        let table_name = config.apply_table_name_case(table_name);

        builder.ensure_table(&table_name);

        tracing::debug!("Executing query for table '{}'", table_name);
        let mut rows = source.query(&query.text).map_err(Error::Source)?;
        let columns = rows.columns().to_vec();
        let mappers = mappers_for_columns(&columns, &config.type_mappings);

        let mut row_count = 0_usize;

        while let Some(values) = rows.next_row().map_err(Error::Source)? {
            let mut row = TableRowBuilder::new(table_name.as_str());

            for ((column, mapper), value) in columns.iter().zip(&mappers).zip(&values) {
                if let Some(encoded) = mapper.map(value) {
                    row.push(column.name.as_str(), encoded);
                }
            }

            builder.push_row(&row.build());
            row_count += 1;
        }

        tracing::debug!("Collected {} rows for table '{}'", row_count, table_name);
    }

    Ok(builder.build())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{ResultColumn, ResultRows, SourceError, Value};

    /// Row source serving one canned result for every statement.
    struct StaticSource {
        columns: Vec<ResultColumn>,
        rows: Vec<Vec<Value>>,
        executed: Vec<String>,
    }

    struct StaticRows {
        columns: Vec<ResultColumn>,
        rows: std::vec::IntoIter<Vec<Value>>,
    }

    impl ResultRows for StaticRows {
        fn columns(&self) -> &[ResultColumn] {
            &self.columns
        }

        fn next_row(&mut self) -> Result<Option<Vec<Value>>, SourceError> {
            Ok(self.rows.next())
        }
    }

    impl RowSource for StaticSource {
        fn query(&mut self, sql: &str) -> Result<Box<dyn ResultRows + '_>, SourceError> {
            self.executed.push(sql.to_string());
            Ok(Box::new(StaticRows {
                columns: self.columns.clone(),
                rows: self.rows.clone().into_iter(),
            }))
        }
    }

    fn source(columns: Vec<ResultColumn>, rows: Vec<Vec<Value>>) -> StaticSource {
        StaticSource {
            columns,
            rows,
            executed: Vec::new(),
        }
    }

    #[test]
    fn test_empty_input_is_an_error() {
        let mut rows = source(Vec::new(), Vec::new());
        let result = build_dataset(&Config::default(), "", &mut rows);
        assert!(matches!(result, Err(Error::NoQueries)));
    }

    #[test]
    fn test_all_skipped_is_an_error() {
        let mut rows = source(Vec::new(), Vec::new());
        let config = Config {
            skip_table_prefix: Some("-".into()),
            ..Config::default()
        };
        let result = build_dataset(&config, "-- -t\nselect 1", &mut rows);
        assert!(matches!(result, Err(Error::NoExecutableQueries)));
    }

    #[test]
    fn test_single_statement_document() {
        let mut rows = source(
            vec![
                ResultColumn::new("id", "INTEGER"),
                ResultColumn::new("name", "TEXT"),
            ],
            vec![
                vec![Value::Text("1".into()), Value::Text("Alice".into())],
                vec![Value::Text("2".into()), Value::Null],
            ],
        );

        let document =
            build_dataset(&Config::default(), "-- users\nselect * from users", &mut rows).unwrap();

        assert_eq!(
            document,
            "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n\
             <dataset>\n\
             \x20   <users id=\"1\" name=\"Alice\" />\n\
             \x20   <users id=\"2\" />\n\
             </dataset>\n"
        );
        assert_eq!(rows.executed, vec!["select * from users"]);
    }

    #[test]
    fn test_table_name_case_applied_once_per_statement() {
        let mut rows = source(
            vec![ResultColumn::new("id", "INTEGER")],
            vec![vec![Value::Text("1".into())]],
        );
        let config = Config {
            table_name_case: Some(crate::config::TableNameCase::Upper),
            ..Config::default()
        };

        let document = build_dataset(&config, "-- users\nselect * from users", &mut rows).unwrap();
        assert!(document.contains("<USERS id=\"1\" />"));
    }

    #[test]
    fn test_execution_error_aborts_run() {
        struct FailingSource;

        impl RowSource for FailingSource {
            fn query(&mut self, _sql: &str) -> Result<Box<dyn ResultRows + '_>, SourceError> {
                Err("no such table".into())
            }
        }

        let result = build_dataset(
            &Config::default(),
            "-- t\nselect * from t",
            &mut FailingSource,
        );
        match result {
            Err(Error::Source(error)) => assert_eq!(error.to_string(), "no such table"),
            other => panic!("expected source error, got {other:?}"),
        }
    }
}
