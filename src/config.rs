//! Run configuration: annotation policies and type-to-encoding mappings.
//!
//! A [`Config`] is read-only for the duration of a build. It can be built in
//! code or loaded from a YAML file:
//!
//! ```yaml
//! no_table_mode: TEMPLATE
//! skip_table_prefix: "-"
//! table_name_case: UPPER
//! type_mappings:
//!   BLOB: BASE64
//!   NVARCHAR: ASCII
//! ```

use std::path::Path;

use hashbrown::HashMap;
use serde::Deserialize;

/// Behavior when a statement has no table-name comment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NoTableMode {
    /// Strict mode: reject the statement with a descriptive error.
    #[default]
    Error,
    /// Treat the statement as a wildcard template.
    Template,
}

/// Case transformation applied to table names before output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TableNameCase {
    /// Change table names to upper case.
    Upper,
    /// Change table names to lower case.
    Lower,
}

/// Encoding strategy names assignable to declared column types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TypeMapping {
    /// Encode as ASCII text, non-ASCII characters as numeric references.
    Ascii,
    /// Encode as UTF-8 text, control characters as numeric references.
    Utf8,
    /// Encode binary data as lowercase hex.
    Hex,
    /// Encode binary data as standard Base64.
    Base64,
    /// Encode binary data as Base64 with a `[BASE64]` prefix.
    Base64WithPrefix,
}

/// Configuration for one dataset build run.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Policy for statements without a table-name comment.
    pub no_table_mode: NoTableMode,
    /// Table name that marks a statement as a wildcard template.
    pub template_table_name: Option<String>,
    /// Table-name prefix that excludes a statement from the dataset.
    pub skip_table_prefix: Option<String>,
    /// Optional case transformation for output table names.
    pub table_name_case: Option<TableNameCase>,
    /// Declared column type name to encoding strategy.
    pub type_mappings: HashMap<String, TypeMapping>,
}

/// Errors raised while loading a configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("Failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),
    /// The YAML is malformed or contains unknown modes or mappings.
    #[error("Failed to parse configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl Config {
    /// Parse a configuration from YAML text.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Yaml`] when the text is not valid configuration YAML.
    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(text)?)
    }

    /// Load a configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Io`] when the file cannot be read,
    /// [`ConfigError::Yaml`] when its content does not parse.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// `table_name` after applying the configured case transformation.
    #[must_use]
    pub fn apply_table_name_case(&self, table_name: &str) -> String {
        match self.table_name_case {
            Some(TableNameCase::Upper) => table_name.to_uppercase(),
            Some(TableNameCase::Lower) => table_name.to_lowercase(),
            None => table_name.to_string(),
        }
    }
}
