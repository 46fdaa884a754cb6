//! Developer workflow tasks for the skill-check workspace.

use std::{
    env,
    path::Path,
    process::{Command, ExitCode, Stdio},
};

fn main() -> ExitCode {
    match parse_command() {
        Some(Task::Tidy) => run_tidy(),
        Some(Task::Check) => run_check(),
        None => {
            eprintln!("Usage: cargo xtask <tidy|check>");
            ExitCode::from(2)
        }
    }
}

enum Task {
    /// Format and apply clippy fixes in place.
    Tidy,
    /// Verify formatting, lints and tests without modifying files.
    Check,
}

fn parse_command() -> Option<Task> {
    let mut args = env::args().skip(1);
    let task = match args.next().as_deref() {
        Some("tidy") => Task::Tidy,
        Some("check") => Task::Check,
        _ => return None,
    };
    args.next().is_none().then_some(task)
}

fn run_tidy() -> ExitCode {
    let ok = run_fmt(false)
        && run_command(
            "cargo",
            &[
                "clippy",
                "-q",
                "--fix",
                "--all",
                "--all-targets",
                "--all-features",
                "--allow-dirty",
            ],
        );
    exit_code(ok)
}

fn run_check() -> ExitCode {
    let ok = run_fmt(true)
        && run_command(
            "cargo",
            &["clippy", "-q", "--all", "--all-targets", "--", "-D", "warnings"],
        )
        && run_command("cargo", &["test", "-q", "--all"]);
    exit_code(ok)
}

fn run_fmt(check: bool) -> bool {
    let mut args = vec!["+nightly", "fmt", "--all"];
    if check || Path::new("rustfmt-nightly.toml").exists() {
        args.push("--");
    }
    if check {
        args.push("--check");
    }
    if Path::new("rustfmt-nightly.toml").exists() {
        args.extend(["--config-path", "./rustfmt-nightly.toml"]);
    }
    run_command("cargo", &args)
}

fn exit_code(ok: bool) -> ExitCode {
    if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    }
}

fn run_command(program: &str, args: &[&str]) -> bool {
    match Command::new(program)
        .args(args)
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
    {
        Ok(status) if status.success() => true,
        Ok(status) => {
            eprintln!("Command `{program}` failed with status {status}");
            false
        }
        Err(err) => {
            eprintln!("Failed to run `{program}`: {err}");
            false
        }
    }
}
