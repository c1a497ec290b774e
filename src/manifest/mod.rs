//! Manifest data model
//!
//! A manifest maps path keys to expected file content. Entries are either a
//! single fingerprint or a small set of named variants, so one manifest can
//! serve both vanilla and SDK-patched installations.

pub mod entry;
pub mod store;

pub use entry::{Fingerprint, ManifestEntry, VariantName};
pub use store::ManifestStore;
