//! CLI entry point for skill-check.

use std::process::ExitCode;

use skill_check::run;

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(error) => {
            eprintln!("{error}");
            error.exit_code()
        }
    }
}
