//! Error types for manifest building and verification.
//!
//! Only unrecoverable setup conditions live here. Per-file verification
//! findings (missing, mismatched, unreadable) accumulate in
//! [`crate::verify::VerifyReport`] and never abort a run.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IntegrityError {
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Expected base file not found: {0:?}. Run this tool from the installation root.")]
    BaseFileMissing(PathBuf),

    #[error("No local manifest and remote fetch failed: {0}")]
    ManifestUnavailable(String),

    #[error("Malformed manifest: {0}")]
    ManifestFormat(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
