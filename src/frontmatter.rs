//! YAML frontmatter parsing for skill files.

use serde_yaml::{Mapping, Value};
use thiserror::Error;

/// Marker line opening and closing the frontmatter block.
pub const DELIMITER: &str = "---";

/// Decoded frontmatter mapping from a skill file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frontmatter {
    /// Raw key-value pairs as decoded from YAML.
    fields: Mapping,
}

impl Frontmatter {
    /// Look up a value by string key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Whether a string key is present, regardless of its value.
    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Keys rendered as text. Non-string keys use their YAML scalar form.
    pub fn keys(&self) -> impl Iterator<Item = String> + '_ {
        self.fields.keys().map(key_label)
    }

    /// Number of top-level keys.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the block declared no keys at all.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Errors that can occur when parsing frontmatter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FrontmatterError {
    /// The document does not start with the delimiter.
    #[error("No YAML frontmatter found")]
    MissingDelimiter,
    /// The opening or closing delimiter line is malformed or absent.
    #[error("Invalid frontmatter format")]
    MalformedBlock,
    /// The block is not valid YAML.
    #[error("Invalid YAML in frontmatter: {message}")]
    InvalidEncoding {
        /// Decoder error message.
        message: String,
    },
    /// The block decoded to something other than a mapping.
    #[error("Frontmatter must be a YAML dictionary")]
    NotAMapping,
}

/// Parse the frontmatter from a skill file.
pub fn parse_frontmatter(contents: &str) -> Result<Frontmatter, FrontmatterError> {
    if !contents.starts_with(DELIMITER) {
        return Err(FrontmatterError::MissingDelimiter);
    }
    let bounds = frontmatter_bounds(contents).ok_or(FrontmatterError::MalformedBlock)?;
    let block = &contents[bounds.start..bounds.end];
    if block.trim().is_empty() {
        return Ok(Frontmatter::default());
    }

    let value: Value =
        serde_yaml::from_str(block).map_err(|error| FrontmatterError::InvalidEncoding {
            message: error.to_string(),
        })?;

    match value {
        Value::Mapping(fields) => Ok(Frontmatter { fields }),
        Value::Null => Ok(Frontmatter::default()),
        _ => Err(FrontmatterError::NotAMapping),
    }
}

/// Return the document body following the closing delimiter line.
///
/// Returns `None` when the document has no complete frontmatter block.
pub fn split_body(contents: &str) -> Option<&str> {
    frontmatter_bounds(contents).map(|bounds| &contents[bounds.body..])
}

/// Byte range bounds for frontmatter in a document.
#[derive(Debug, Clone, Copy)]
struct FrontmatterBounds {
    /// Start byte index of the YAML payload.
    start: usize,
    /// End byte index of the YAML payload.
    end: usize,
    /// Start byte index of the body after the closing delimiter line.
    body: usize,
}

/// Locate the byte range containing frontmatter in a document.
fn frontmatter_bounds(contents: &str) -> Option<FrontmatterBounds> {
    let mut offset = 0;
    let mut lines = contents.split_inclusive('\n');
    let first = lines.next()?;
    if trim_line_endings(first) != DELIMITER || !first.ends_with('\n') {
        return None;
    }
    offset += first.len();
    let start = offset;

    for line in lines {
        if trim_line_endings(line) == DELIMITER {
            return Some(FrontmatterBounds {
                start,
                end: offset,
                body: offset + line.len(),
            });
        }
        offset += line.len();
    }

    None
}

/// Trim CRLF and LF suffixes from a line fragment.
fn trim_line_endings(line: &str) -> &str {
    line.trim_end_matches(['\r', '\n'])
}

/// Render a mapping key for messages.
fn key_label(key: &Value) -> String {
    match key {
        Value::String(text) => text.clone(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => number.to_string(),
        Value::Null => "null".to_string(),
        other => serde_yaml::to_string(other)
            .map(|text| text.trim_end().to_string())
            .unwrap_or_else(|_| format!("{other:?}")),
    }
}

/// Name the YAML kind of a value for type mismatch messages.
pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(number) if number.is_f64() => "float",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Sequence(_) => "sequence",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged value",
    }
}
