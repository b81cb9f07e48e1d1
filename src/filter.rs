//! Statement classification: skip, template, invalid, or plain.

use crate::config::NoTableMode;
use crate::errors::Error;
use crate::parse::Query;
use crate::template;

/// Classifies parsed statements against the run configuration and produces
/// the executable statement list.
///
/// Classification precedence per statement: skipped, then template, then
/// invalid (no table name), then plain pass-through. A table name that both
/// carries the skip prefix and equals the template marker is skipped.
#[derive(Debug, Clone, Copy)]
pub struct QueryFilter<'a> {
    no_table_mode: NoTableMode,
    template_name: Option<&'a str>,
    skip_prefix: Option<&'a str>,
}

impl<'a> QueryFilter<'a> {
    /// Create a filter from the no-table policy, the template marker and the
    /// skip prefix.
    #[must_use]
    pub fn new(
        no_table_mode: NoTableMode,
        template_name: Option<&'a str>,
        skip_prefix: Option<&'a str>,
    ) -> Self {
        Self {
            no_table_mode,
            template_name,
            skip_prefix,
        }
    }

    /// Filter `queries` down to executable statements.
    ///
    /// Skipped statements are dropped, template statements are replaced by
    /// their expansion in place, plain statements pass through unchanged.
    /// Processing stops at the first error.
    ///
    /// # Errors
    ///
    /// [`Error::TableNotDefined`] for a statement without a table name that
    /// no mode resolves, or the [`TemplateError`](crate::TemplateError) of a
    /// failed expansion.
    pub fn filter(&self, queries: Vec<Query>) -> Result<Vec<Query>, Error> {
        let mut result = Vec::with_capacity(queries.len());

        for query in queries {
            if self.is_skipped(&query) {
                continue;
            } else if self.is_template(&query) {
                result.extend(template::expand(&query)?);
            } else if query.table_name.is_none() {
                return Err(Error::TableNotDefined { query: query.text });
            } else {
                result.push(query);
            }
        }

        Ok(result)
    }

    fn is_skipped(&self, query: &Query) -> bool {
        match (&query.table_name, self.skip_prefix) {
            (Some(table_name), Some(prefix)) => table_name.starts_with(prefix),
            _ => false,
        }
    }

    fn is_template(&self, query: &Query) -> bool {
        match &query.table_name {
            None => self.no_table_mode == NoTableMode::Template,
            Some(table_name) => self
                .template_name
                .is_some_and(|template_name| table_name == template_name),
        }
    }
}
