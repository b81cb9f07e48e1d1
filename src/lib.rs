#![doc = include_str!("../README.md")]
#![deny(clippy::mod_module_files)]

pub mod config;
pub mod dataset;
pub mod errors;
pub mod filter;
pub mod mapper;
pub mod parse;
pub mod source;
pub mod template;
#[cfg(feature = "testing")]
pub mod testing;
pub mod worker;

// Re-export main types
pub use config::{Config, ConfigError, NoTableMode, TableNameCase, TypeMapping};
pub use dataset::{DatasetBuilder, TableRow, TableRowBuilder};
pub use errors::Error;
pub use filter::QueryFilter;
pub use mapper::{ColumnMapper, mappers_for_columns};
pub use parse::{Query, Token, TokenKind, parse_queries, tokenize};
pub use source::{ResultColumn, ResultRows, RowSource, SourceError, Value};
pub use template::TemplateError;
pub use worker::build_dataset;
