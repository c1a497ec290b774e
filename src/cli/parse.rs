//! CLI parse: clap types for integrity. No behavior; definitions only.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Integrity CLI - manifest-based file verification for game installations
#[derive(Parser)]
#[command(name = "integrity")]
#[command(about = "Verify game installation files against a trusted manifest")]
pub struct Cli {
    /// Without a subcommand an interactive build/verify menu is shown.
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Installation root directory
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    /// Enable verbose logging (default: off)
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,
}

#[derive(Subcommand, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Hash a known-good installation and write the reference manifest
    Build,
    /// Verify the installation against the reference manifest
    Verify,
}
