//! Path-keyed manifest store with variant-aware merge-insert

use crate::error::IntegrityError;
use crate::manifest::entry::{Fingerprint, ManifestEntry, VariantName};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

/// In-memory manifest: path key to entry.
///
/// Keys are unique; a BTreeMap keeps serialization order stable so rebuilding
/// an unchanged tree produces a byte-identical manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ManifestStore {
    entries: BTreeMap<String, ManifestEntry>,
}

impl ManifestStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&ManifestEntry> {
        self.entries.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &ManifestEntry)> {
        self.entries.iter()
    }

    /// Merge a fingerprint into the store under the given install context.
    ///
    /// A key first seen from the base context yields a scalar entry; one first
    /// seen from the SDK context yields a variant entry holding only `SDK`.
    /// Hashing a key from the SDK context when a scalar already exists
    /// promotes the entry to a variant, carrying the scalar value forward
    /// under `Default`. Promotion is one-way. Re-inserting the same context
    /// overwrites that context's fingerprint and touches nothing else.
    pub fn insert(&mut self, key: String, fingerprint: Fingerprint, context: VariantName) {
        let merged = match self.entries.remove(&key) {
            None => match context {
                VariantName::Default => ManifestEntry::Scalar(fingerprint),
                VariantName::Sdk => {
                    ManifestEntry::Variant(BTreeMap::from([(VariantName::Sdk, fingerprint)]))
                }
            },
            Some(ManifestEntry::Scalar(existing)) => match context {
                VariantName::Default => ManifestEntry::Scalar(fingerprint),
                VariantName::Sdk => ManifestEntry::Variant(BTreeMap::from([
                    (VariantName::Default, existing),
                    (VariantName::Sdk, fingerprint),
                ])),
            },
            Some(ManifestEntry::Variant(mut variants)) => {
                variants.insert(context, fingerprint);
                ManifestEntry::Variant(variants)
            }
        };
        self.entries.insert(key, merged);
    }

    /// Parse a manifest from its JSON byte form.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, IntegrityError> {
        let store: ManifestStore = serde_json::from_slice(bytes)?;
        debug!(entries = store.len(), "Parsed manifest");
        Ok(store)
    }

    /// Serialize to the JSON byte form written to disk.
    pub fn to_bytes(&self) -> Result<Vec<u8>, IntegrityError> {
        Ok(serde_json::to_vec_pretty(self)?)
    }

    pub fn load(path: &Path) -> Result<Self, IntegrityError> {
        let bytes = std::fs::read(path)?;
        Self::from_bytes(&bytes)
    }

    pub fn save(&self, path: &Path) -> Result<(), IntegrityError> {
        std::fs::write(path, self.to_bytes()?)?;
        debug!(path = %path.display(), entries = self.len(), "Wrote manifest");
        Ok(())
    }
}
