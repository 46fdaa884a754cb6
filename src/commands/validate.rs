//! Implementation of the `skill-check` validation command.

use std::path::Path;

use tracing::{debug, info};

use crate::{
    commands::ColorChoice,
    config::Config,
    error::{Error, Result},
    palette, paths,
    skill::{Verdict, validate_skill},
};

/// How the verdict is written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// The bare verdict message.
    Text,
    /// A JSON object with `valid` and `message`.
    Json,
}

/// Execute the validate command, returning whether the skill is valid.
pub fn run(
    color: ColorChoice,
    format: OutputFormat,
    config_path: Option<&Path>,
    skill_path: &Path,
) -> Result<bool> {
    let config = Config::load(config_path)?;
    if let Some(path) = config.path() {
        debug!(config = %paths::display_path(path), "using config");
    }

    let skill_dir = paths::normalize_path(skill_path);
    info!(skill = %paths::display_path(&skill_dir), "validating skill");

    let verdict = validate_skill(&skill_dir, config.rules());
    debug!(valid = verdict.is_valid(), "validation finished");
    println!("{}", render(&verdict, format, color.enabled())?);
    Ok(verdict.is_valid())
}

/// Render a verdict for stdout.
fn render(verdict: &Verdict, format: OutputFormat, use_color: bool) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(palette::fmt_verdict(
            verdict.message(),
            verdict.is_valid(),
            use_color,
        )),
        OutputFormat::Json => {
            serde_json::to_string(verdict).map_err(|source| Error::VerdictEncode { source })
        }
    }
}
