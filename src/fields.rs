//! Field-level rules for skill frontmatter.

use std::sync::LazyLock;

use regex::Regex;
use serde_yaml::Value;
use thiserror::Error;

use crate::{
    frontmatter::{Frontmatter, type_name},
    rules::{DESCRIPTION_FIELD, MAX_DESCRIPTION_LENGTH, MAX_NAME_LENGTH, NAME_FIELD, Rules},
};

/// Lowercase letters, digits and hyphens only.
static HYPHEN_CASE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z0-9-]+$").expect("hyphen-case pattern is valid")
});

/// A frontmatter field that breaks a schema or format rule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    /// Keys outside the recognized set were declared.
    #[error(
        "Unexpected key(s) in SKILL.md frontmatter: {}. Allowed properties are: {}",
        .keys.join(", "),
        .allowed.join(", ")
    )]
    UnexpectedKeys {
        /// Offending keys, sorted.
        keys: Vec<String>,
        /// Every allowed key, sorted.
        allowed: Vec<String>,
    },
    /// The `name` key is absent.
    #[error("Missing 'name' in frontmatter")]
    MissingName,
    /// The `description` key is absent.
    #[error("Missing 'description' in frontmatter")]
    MissingDescription,
    /// The name is not a YAML string.
    #[error("Name must be a string, got {found}")]
    NameNotString {
        /// Kind of value found instead.
        found: &'static str,
    },
    /// The name uses characters outside `[a-z0-9-]`.
    #[error("Name '{name}' should be hyphen-case (lowercase letters, digits, and hyphens only)")]
    NameNotHyphenCase {
        /// Trimmed name.
        name: String,
    },
    /// The name starts or ends with a hyphen.
    #[error("Name '{name}' cannot start/end with hyphen")]
    NameEdgeHyphen {
        /// Trimmed name.
        name: String,
    },
    /// The name contains `--`.
    #[error("Name '{name}' cannot contain consecutive hyphens")]
    NameConsecutiveHyphens {
        /// Trimmed name.
        name: String,
    },
    /// The name exceeds the length limit.
    #[error("Name is too long ({length} characters). Maximum is {max} characters.")]
    NameTooLong {
        /// Length of the trimmed name.
        length: usize,
        /// Permitted maximum.
        max: usize,
    },
    /// The description is not a YAML string.
    #[error("Description must be a string, got {found}")]
    DescriptionNotString {
        /// Kind of value found instead.
        found: &'static str,
    },
    /// The description contains `<` or `>`.
    #[error("Description cannot contain angle brackets (< or >)")]
    DescriptionAngleBrackets,
    /// The description exceeds the length limit.
    #[error("Description is too long ({length} characters). Maximum is {max} characters.")]
    DescriptionTooLong {
        /// Length of the trimmed description.
        length: usize,
        /// Permitted maximum.
        max: usize,
    },
}

/// Reject keys that are not part of the schema.
pub fn check_schema(frontmatter: &Frontmatter, rules: &Rules) -> Result<(), FieldError> {
    let mut keys: Vec<String> = frontmatter.keys().filter(|key| !rules.is_allowed(key)).collect();
    if keys.is_empty() {
        return Ok(());
    }
    keys.sort();
    keys.dedup();
    Err(FieldError::UnexpectedKeys {
        keys,
        allowed: rules.allowed_fields().map(str::to_string).collect(),
    })
}

/// Require the `name` and `description` keys, in that order.
pub fn check_required(frontmatter: &Frontmatter) -> Result<(), FieldError> {
    if !frontmatter.contains_key(NAME_FIELD) {
        return Err(FieldError::MissingName);
    }
    if !frontmatter.contains_key(DESCRIPTION_FIELD) {
        return Err(FieldError::MissingDescription);
    }
    Ok(())
}

/// Validate the format of a skill name. An empty name passes.
pub fn validate_name(value: &Value) -> Result<(), FieldError> {
    let Value::String(raw) = value else {
        return Err(FieldError::NameNotString {
            found: type_name(value),
        });
    };
    let name = raw.trim();
    if name.is_empty() {
        return Ok(());
    }

    if !HYPHEN_CASE.is_match(name) {
        return Err(FieldError::NameNotHyphenCase {
            name: name.to_string(),
        });
    }
    if name.starts_with('-') || name.ends_with('-') {
        return Err(FieldError::NameEdgeHyphen {
            name: name.to_string(),
        });
    }
    if name.contains("--") {
        return Err(FieldError::NameConsecutiveHyphens {
            name: name.to_string(),
        });
    }
    let length = name.chars().count();
    if length > MAX_NAME_LENGTH {
        return Err(FieldError::NameTooLong {
            length,
            max: MAX_NAME_LENGTH,
        });
    }
    Ok(())
}

/// Validate the format of a skill description. An empty description passes.
pub fn validate_description(value: &Value) -> Result<(), FieldError> {
    let Value::String(raw) = value else {
        return Err(FieldError::DescriptionNotString {
            found: type_name(value),
        });
    };
    let description = raw.trim();
    if description.is_empty() {
        return Ok(());
    }

    if description.contains(['<', '>']) {
        return Err(FieldError::DescriptionAngleBrackets);
    }
    let length = description.chars().count();
    if length > MAX_DESCRIPTION_LENGTH {
        return Err(FieldError::DescriptionTooLong {
            length,
            max: MAX_DESCRIPTION_LENGTH,
        });
    }
    Ok(())
}
