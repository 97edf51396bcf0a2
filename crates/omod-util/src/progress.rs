use std::io::Write;
use std::time::Duration;

use console::Style;
use indicatif::{ProgressBar, ProgressStyle};

/// Print a right-aligned status line to stderr: `   Resolving coreapps 2.1.0`
///
/// The `label` is padded to 12 characters and printed in bold green.
pub fn status(label: &str, message: &str) {
    write_status(Style::new().green().bold(), label, message);
}

/// Print a warning-style status line (bold yellow label).
pub fn status_warn(label: &str, message: &str) {
    write_status(Style::new().yellow().bold(), label, message);
}

fn write_status(style: Style, label: &str, message: &str) {
    let _ = writeln!(std::io::stderr(), "{:>12} {message}", style.apply_to(label));
}

/// Create an animated spinner for indeterminate progress.
///
/// Finish it with [`ProgressBar::finish_and_clear`].
pub fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}
