//! CLI output: error mapping, report presentation, and the interactive menu.

use crate::error::IntegrityError;
use crate::verify::{FindingKind, VerifyReport};
use owo_colors::OwoColorize;
use std::fmt::Write;

pub const BANNER: &str = r"+-----------------------------------+
|  integrity - file hash check      |
+-----------------------------------+";

/// Map domain errors to a string for CLI output.
pub fn map_error(e: &IntegrityError) -> String {
    e.to_string()
}

/// Interactive mode selection shown when no subcommand was given.
pub fn prompt_command() -> Result<crate::cli::Commands, IntegrityError> {
    let choice = dialoguer::Select::new()
        .with_prompt("Select mode")
        .items(&["Verify installation", "Build manifest"])
        .default(0)
        .interact()
        .map_err(|e| IntegrityError::Config(format!("Menu selection failed: {}", e)))?;

    Ok(match choice {
        1 => crate::cli::Commands::Build,
        _ => crate::cli::Commands::Verify,
    })
}

/// Render per-file failure lines and the final pass/fail summary.
pub fn format_report(report: &VerifyReport) -> String {
    let mut out = String::new();

    for finding in &report.findings {
        let line = match finding.kind {
            FindingKind::MissingFile => format!("Missing file: {}", finding.key),
            FindingKind::ContentMismatch => format!("Invalid file: {}", finding.key),
        };
        let _ = writeln!(out, "{}", line.red());
    }

    let _ = writeln!(
        out,
        "Checked {} files ({} SDK-only skipped, {} unreadable), SDK {}",
        report.checked,
        report.skipped,
        report.unreadable,
        if report.sdk_active { "active" } else { "inactive" }
    );

    if report.passed() {
        let _ = write!(
            out,
            "{}",
            "File integrity check complete, no damaged or missing files found".green()
        );
    } else {
        let _ = write!(
            out,
            "{}",
            format!(
                "File integrity check failed, {} damaged or missing files found",
                report.findings.len()
            )
            .red()
        );
    }

    out
}
