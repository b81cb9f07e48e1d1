//! Per-column encoding strategies selected from declared type names.

use core::fmt::Write;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use hashbrown::HashMap;

use super::xml;
use crate::config::TypeMapping;
use crate::source::{ResultColumn, Value};

/// Encoding strategy applied to every value of one result column.
///
/// The set of strategies is closed: one per [`TypeMapping`] plus the
/// pass-through default used when a declared type has no mapping. Character
/// strategies applied to binary data use its lossy UTF-8 decoding; binary
/// strategies applied to character data use its UTF-8 bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnMapper {
    /// Pass text through with XML escaping only.
    Dummy,
    /// XML escaping plus numeric references for anything outside printable
    /// ASCII.
    Ascii,
    /// XML escaping plus numeric references for control characters only.
    Utf8,
    /// Lowercase hex encoding of the binary value.
    Hex,
    /// Standard Base64 encoding of the binary value.
    Base64,
    /// Standard Base64 with a literal `[BASE64]` prefix.
    Base64WithPrefix,
}

impl From<TypeMapping> for ColumnMapper {
    fn from(mapping: TypeMapping) -> Self {
        match mapping {
            TypeMapping::Ascii => ColumnMapper::Ascii,
            TypeMapping::Utf8 => ColumnMapper::Utf8,
            TypeMapping::Hex => ColumnMapper::Hex,
            TypeMapping::Base64 => ColumnMapper::Base64,
            TypeMapping::Base64WithPrefix => ColumnMapper::Base64WithPrefix,
        }
    }
}

impl ColumnMapper {
    /// Strategy for a declared type name; unmapped types pass through.
    #[must_use]
    pub fn for_type(type_name: &str, type_mappings: &HashMap<String, TypeMapping>) -> Self {
        type_mappings
            .get(type_name)
            .copied()
            .map_or(ColumnMapper::Dummy, Into::into)
    }

    /// Encode one value as XML attribute text, or `None` for SQL NULL so the
    /// column contributes no attribute at all.
    #[must_use]
    pub fn map(&self, value: &Value) -> Option<String> {
        match self {
            ColumnMapper::Dummy => value.as_text().map(|text| xml::escape(&text)),
            ColumnMapper::Ascii => value.as_text().map(|text| escape_non_ascii(&text)),
            ColumnMapper::Utf8 => value.as_text().map(|text| escape_control(&text)),
            ColumnMapper::Hex => value.as_bytes().map(hex::encode),
            ColumnMapper::Base64 => value.as_bytes().map(|bytes| STANDARD.encode(bytes)),
            ColumnMapper::Base64WithPrefix => value
                .as_bytes()
                .map(|bytes| format!("[BASE64]{}", STANDARD.encode(bytes))),
        }
    }
}

/// One strategy per result column, from the declared-type mapping table.
#[must_use]
pub fn mappers_for_columns(
    columns: &[ResultColumn],
    type_mappings: &HashMap<String, TypeMapping>,
) -> Vec<ColumnMapper> {
    columns
        .iter()
        .map(|column| ColumnMapper::for_type(&column.type_name, type_mappings))
        .collect()
}

/// Escape XML specials and replace every character outside printable ASCII
/// (code 32 through 127) with a numeric character reference: two lowercase
/// hex digits below 0x100, four from 0x100 up.
fn escape_non_ascii(value: &str) -> String {
    let mut result = String::with_capacity(value.len());

    for ch in value.chars() {
        let code = u32::from(ch);

        if !(32..=127).contains(&code) {
            if code < 0x100 {
                write!(result, "&#x{code:02x};").unwrap();
            } else {
                write!(result, "&#x{code:04x};").unwrap();
            }
        } else if let Some(entity) = xml::escape_char(ch) {
            result.push_str(entity);
        } else {
            result.push(ch);
        }
    }

    result
}

/// Escape XML specials and replace control characters (code below 32) with
/// two-digit numeric character references; everything else passes through.
fn escape_control(value: &str) -> String {
    let mut result = String::with_capacity(value.len());

    for ch in value.chars() {
        let code = u32::from(ch);

        if code < 32 {
            write!(result, "&#x{code:02x};").unwrap();
        } else if let Some(entity) = xml::escape_char(ch) {
            result.push_str(entity);
        } else {
            result.push(ch);
        }
    }

    result
}
