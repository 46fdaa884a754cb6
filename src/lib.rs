#![warn(missing_docs)]
//! Validation of agent skill packages.
//!
//! A skill package is a directory holding a `SKILL.md` whose YAML
//! frontmatter declares the skill and whose body may reference sibling
//! `scripts/`, `references/` and `assets/` directories. [`validate_skill`]
//! checks one package and reduces the outcome to a [`Verdict`].

/// Command-line interface wiring and dispatch.
mod cli;
/// Command implementations.
mod commands;
/// Configuration loading and validation.
mod config;
/// Error handling for the crate.
mod error;
/// Field-level frontmatter rules.
mod fields;
/// YAML frontmatter parsing for skills.
mod frontmatter;
/// Color palette and styling for CLI output.
mod palette;
/// Path normalization and display utilities.
mod paths;
/// Resource directory reference scanning.
mod resources;
/// Recognized fields and resource directories.
mod rules;
/// Skill package validation.
mod skill;
/// Test fixtures for skill packages.
#[cfg(test)]
mod testutil;

use std::process::ExitCode;

pub use crate::{
    error::{Error, Result},
    fields::{FieldError, check_required, check_schema, validate_description, validate_name},
    frontmatter::{Frontmatter, FrontmatterError, parse_frontmatter, split_body},
    resources::{
        MissingResources, check_resources, referenced_dirs, strip_code_fences, strip_link_labels,
        strip_link_targets, strip_markup,
    },
    rules::{
        DEFAULT_ALLOWED_FIELDS, DEFAULT_RESOURCE_DIRS, MAX_DESCRIPTION_LENGTH, MAX_NAME_LENGTH,
        Rules,
    },
    skill::{SKILL_FILE_NAME, VALID_MESSAGE, ValidationError, Verdict, check_skill, validate_skill},
};

/// Run the CLI, returning the process exit code or a structured error.
pub fn run() -> Result<ExitCode> {
    cli::run()
}
