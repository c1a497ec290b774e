//! Integrity: manifest-based file verification for game installations
//!
//! Builds a trusted manifest by hashing an installation's file tree, and
//! verifies a live installation against it. A single manifest serves both
//! vanilla and SDK-patched installs: entries whose content legitimately
//! depends on the SDK carry per-variant fingerprints, and a sentinel file
//! selects which baseline applies at verification time.

pub mod build;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod manifest;
pub mod remote;
pub mod tree;
pub mod verify;
