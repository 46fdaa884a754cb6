//! Validation of a skill package directory.

use std::{fs, io, path::Path};

use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::{
    fields::{FieldError, check_required, check_schema, validate_description, validate_name},
    frontmatter::{FrontmatterError, parse_frontmatter},
    resources::{MissingResources, check_resources},
    rules::{DESCRIPTION_FIELD, NAME_FIELD, Rules},
};

/// The expected skill file name within a skill directory.
pub const SKILL_FILE_NAME: &str = "SKILL.md";

/// Message reported for a package that passes every check.
pub const VALID_MESSAGE: &str = "Skill is valid!";

/// The first problem found in a skill package.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// No skill file at the package root.
    #[error("SKILL.md not found")]
    MissingSkillFile,
    /// The skill file exists but could not be read as UTF-8 text.
    #[error("Failed to read SKILL.md: {source}")]
    SkillRead {
        /// Underlying IO error.
        source: io::Error,
    },
    /// The frontmatter block is missing or undecodable.
    #[error(transparent)]
    Frontmatter(#[from] FrontmatterError),
    /// A frontmatter field breaks a schema or format rule.
    #[error(transparent)]
    Field(#[from] FieldError),
    /// The body references resource directories that do not exist.
    #[error(transparent)]
    Resources(#[from] MissingResources),
}

/// Pass/fail outcome of validating one skill package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Verdict {
    /// Whether the package passed every check.
    valid: bool,
    /// Success message, or the first failure.
    message: String,
}

impl Verdict {
    /// Build the passing verdict.
    fn pass() -> Self {
        Self {
            valid: true,
            message: VALID_MESSAGE.to_string(),
        }
    }

    /// Build a failing verdict from the first error found.
    fn fail(error: &ValidationError) -> Self {
        Self {
            valid: false,
            message: error.to_string(),
        }
    }

    /// Whether the package passed.
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// The verdict message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<Result<(), ValidationError>> for Verdict {
    fn from(result: Result<(), ValidationError>) -> Self {
        match result {
            Ok(()) => Self::pass(),
            Err(error) => Self::fail(&error),
        }
    }
}

/// Validate a skill package, reducing any failure to a verdict message.
pub fn validate_skill(skill_dir: &Path, rules: &Rules) -> Verdict {
    Verdict::from(check_skill(skill_dir, rules))
}

/// Run every check on a skill package, stopping at the first failure.
pub fn check_skill(skill_dir: &Path, rules: &Rules) -> Result<(), ValidationError> {
    let skill_path = skill_dir.join(SKILL_FILE_NAME);
    if !skill_path.is_file() {
        return Err(ValidationError::MissingSkillFile);
    }
    let contents =
        fs::read_to_string(&skill_path).map_err(|source| ValidationError::SkillRead { source })?;

    let frontmatter = parse_frontmatter(&contents)?;
    debug!(keys = frontmatter.len(), "parsed frontmatter");

    check_schema(&frontmatter, rules)?;
    check_required(&frontmatter)?;

    // An absent key counts as an empty string, which passes.
    if let Some(name) = frontmatter.get(NAME_FIELD) {
        validate_name(name)?;
    }
    if let Some(description) = frontmatter.get(DESCRIPTION_FIELD) {
        validate_description(description)?;
    }
    debug!("frontmatter fields valid");

    check_resources(skill_dir, &contents, rules)?;
    Ok(())
}
