//! Submodule defining the errors used across the crate.

use crate::source::SourceError;
use crate::template::TemplateError;

/// Errors that can abort a dataset build.
///
/// A build either produces one complete document or exactly one of these;
/// there is no partial output and nothing is retried.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The input text contains no statements at all.
    #[error("Dataset must have at least one query.")]
    NoQueries,
    /// Filtering and expansion removed every statement.
    #[error("Dataset must have at least one executable query.")]
    NoExecutableQueries,
    /// A statement has no table-name comment and no configured mode resolves it.
    #[error(
        "Table for query not defined. Use single line comment (`-- schema.table`) to define table name. Query:\n{query}"
    )]
    TableNotDefined {
        /// Text of the offending statement.
        query: String,
    },
    /// A template statement could not be expanded.
    #[error(transparent)]
    Template(#[from] TemplateError),
    /// A statement failed while running against the row source.
    #[error("Query execution failed: {0}")]
    Source(#[source] SourceError),
}
