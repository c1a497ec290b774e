//! Filesystem side of the tool
//!
//! Candidate enumeration, streaming digests, and normalization of absolute
//! paths into manifest keys.

pub mod digest;
pub mod path;
pub mod walker;
