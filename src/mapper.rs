//! Column value encoding into XML attribute text.
//!
//! One [`ColumnMapper`] strategy is selected per result column from the
//! column's declared type name; each strategy turns a
//! [`Value`](crate::Value) into an XML-safe attribute string, or into
//! nothing at all for SQL NULL.

mod column;
mod xml;

pub use column::{ColumnMapper, mappers_for_columns};
