//! CLI parsing and command dispatch.

use std::{io, path::PathBuf, process::ExitCode};

use clap::{CommandFactory, Parser, ValueEnum, error::ErrorKind};
use tracing_subscriber::EnvFilter;

use crate::{
    commands::{self, validate::OutputFormat},
    error::Result,
};

/// Parsed command line arguments.
#[derive(Debug, Parser)]
#[command(
    name = "skill-check",
    version,
    about = "Validate an agent skill package before it enters a catalog"
)]
struct Cli {
    /// Control colored output.
    #[arg(long, value_enum, default_value = "auto")]
    color: ColorMode,
    /// Enable verbose output.
    #[arg(long)]
    verbose: bool,
    /// Print the verdict as JSON.
    #[arg(long)]
    json: bool,
    /// Read validation rules from this TOML file.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Skill directory containing SKILL.md.
    skill_dir: PathBuf,
}

/// Supported color output modes.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum ColorMode {
    /// Only colorize when stdout is a TTY.
    Auto,
    /// Always colorize output.
    Always,
    /// Never colorize output.
    Never,
}

/// Run the CLI and return the process exit code.
pub fn run() -> Result<ExitCode> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(error) => return Ok(usage(&error)),
    };
    init_logging(cli.verbose);

    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    };
    let valid = commands::validate::run(
        cli.color.into_choice(),
        format,
        cli.config.as_deref(),
        &cli.skill_dir,
    )?;

    Ok(if valid {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}

/// Handle an argument error: help and version succeed, anything else prints usage.
fn usage(error: &clap::Error) -> ExitCode {
    match error.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
            if let Err(io_error) = error.print() {
                eprintln!("{io_error}");
            }
            ExitCode::SUCCESS
        }
        _ => {
            println!("{}", Cli::command().render_usage());
            ExitCode::from(1)
        }
    }
}

/// Install the stderr log subscriber. `RUST_LOG` takes precedence over `--verbose`.
fn init_logging(verbose: bool) {
    let default = if verbose { "skill_check=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .compact()
        .init();
}

impl ColorMode {
    /// Convert a CLI color mode into a color choice.
    fn into_choice(self) -> commands::ColorChoice {
        match self {
            Self::Auto => commands::ColorChoice::Auto,
            Self::Always => commands::ColorChoice::Always,
            Self::Never => commands::ColorChoice::Never,
        }
    }
}
