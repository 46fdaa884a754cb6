//! Recognized frontmatter fields and resource directory names.

use std::collections::BTreeSet;

/// Frontmatter key holding the skill name.
pub const NAME_FIELD: &str = "name";

/// Frontmatter key holding the skill description.
pub const DESCRIPTION_FIELD: &str = "description";

/// Frontmatter keys accepted by default.
///
/// The last three are provenance fields written by asset generators.
pub const DEFAULT_ALLOWED_FIELDS: &[&str] = &[
    NAME_FIELD,
    DESCRIPTION_FIELD,
    "allowed-tools",
    "argument-hint",
    "disable-model-invocation",
    "user-invocable",
    "model",
    "context",
    "agent",
    "hooks",
    "domains",
    "generated_by",
    "generated_at",
];

/// Resource directories a skill body may reference by relative path.
pub const DEFAULT_RESOURCE_DIRS: &[&str] = &["scripts", "references", "assets"];

/// Maximum length of a skill name, in characters.
pub const MAX_NAME_LENGTH: usize = 64;

/// Maximum length of a skill description, in characters.
pub const MAX_DESCRIPTION_LENGTH: usize = 1024;

/// The field schema and resource prefixes a validation run checks against.
///
/// Both sets are ordered so that error messages list them alphabetically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rules {
    /// Keys permitted in frontmatter.
    allowed_fields: BTreeSet<String>,
    /// Directory names recognized as resource prefixes.
    resource_dirs: BTreeSet<String>,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            allowed_fields: DEFAULT_ALLOWED_FIELDS.iter().map(|f| f.to_string()).collect(),
            resource_dirs: DEFAULT_RESOURCE_DIRS.iter().map(|d| d.to_string()).collect(),
        }
    }
}

impl Rules {
    /// Accept additional frontmatter keys on top of the current set.
    pub fn with_extra_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_fields.extend(fields.into_iter().map(Into::into));
        self
    }

    /// Replace the recognized resource directory names.
    pub fn with_resource_dirs<I, S>(mut self, dirs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.resource_dirs = dirs.into_iter().map(Into::into).collect();
        self
    }

    /// Whether a frontmatter key is part of the schema.
    pub fn is_allowed(&self, field: &str) -> bool {
        self.allowed_fields.contains(field)
    }

    /// Allowed frontmatter keys in alphabetical order.
    pub fn allowed_fields(&self) -> impl Iterator<Item = &str> {
        self.allowed_fields.iter().map(String::as_str)
    }

    /// Recognized resource directory names in alphabetical order.
    pub fn resource_dirs(&self) -> impl Iterator<Item = &str> {
        self.resource_dirs.iter().map(String::as_str)
    }
}
