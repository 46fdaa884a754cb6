//! Color palette and styling for CLI output.

use owo_colors::{OwoColorize, Style};

/// Style for a passing verdict.
pub fn valid() -> Style {
    Style::new().green().bold()
}

/// Style for a failing verdict.
pub fn invalid() -> Style {
    Style::new().red()
}

/// Format a verdict message with styling matching its outcome.
pub fn fmt_verdict(message: &str, is_valid: bool, use_color: bool) -> String {
    if !use_color {
        return message.to_string();
    }
    let style = if is_valid { valid() } else { invalid() };
    message.style(style).to_string()
}
