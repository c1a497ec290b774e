//! Manifest entries: fingerprints, variant names, and the scalar/variant union

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Hex-encoded content digest of a file's bytes at one point in time.
///
/// Opaque and comparable by equality only; the manifest never interprets the
/// digest beyond that.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fingerprint(String);

impl Fingerprint {
    pub fn from_hash(hash: &blake3::Hash) -> Self {
        Fingerprint(hash.to_hex().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for Fingerprint {
    fn from(s: String) -> Self {
        Fingerprint(s)
    }
}

impl From<&str> for Fingerprint {
    fn from(s: &str) -> Self {
        Fingerprint(s.to_string())
    }
}

/// Install context a fingerprint was produced under.
///
/// `Sdk` serializes as `"SDK"` to match the manifest wire format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum VariantName {
    Default,
    #[serde(rename = "SDK")]
    Sdk,
}

impl fmt::Display for VariantName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VariantName::Default => f.write_str("Default"),
            VariantName::Sdk => f.write_str("SDK"),
        }
    }
}

/// One manifest entry.
///
/// Serialized untagged: a scalar entry is a bare digest string, a variant
/// entry is an object with keys among `{"Default", "SDK"}`. An entry starts
/// scalar and is promoted to variant the first time a second install context
/// hashes the same key; it never reverts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ManifestEntry {
    Scalar(Fingerprint),
    Variant(BTreeMap<VariantName, Fingerprint>),
}

impl ManifestEntry {
    /// Expected fingerprint for the given context, if the entry defines one.
    pub fn fingerprint(&self, variant: VariantName) -> Option<&Fingerprint> {
        match self {
            ManifestEntry::Scalar(fp) => Some(fp),
            ManifestEntry::Variant(variants) => variants.get(&variant),
        }
    }

    /// True for variant entries that only exist under the SDK.
    pub fn is_sdk_exclusive(&self) -> bool {
        match self {
            ManifestEntry::Scalar(_) => false,
            ManifestEntry::Variant(variants) => !variants.contains_key(&VariantName::Default),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_entry_serializes_as_bare_string() {
        let entry = ManifestEntry::Scalar(Fingerprint::from("abcd"));
        let json = serde_json::to_string(&entry).unwrap();
        assert_eq!(json, "\"abcd\"");
    }

    #[test]
    fn variant_entry_serializes_as_object() {
        let mut variants = BTreeMap::new();
        variants.insert(VariantName::Default, Fingerprint::from("aa"));
        variants.insert(VariantName::Sdk, Fingerprint::from("bb"));
        let entry = ManifestEntry::Variant(variants);
        let json = serde_json::to_string(&entry).unwrap();
        assert_eq!(json, "{\"Default\":\"aa\",\"SDK\":\"bb\"}");
    }

    #[test]
    fn untagged_deserialization_picks_the_right_shape() {
        let scalar: ManifestEntry = serde_json::from_str("\"abcd\"").unwrap();
        assert_eq!(scalar, ManifestEntry::Scalar(Fingerprint::from("abcd")));

        let variant: ManifestEntry = serde_json::from_str("{\"SDK\":\"cc\"}").unwrap();
        assert_eq!(variant.fingerprint(VariantName::Sdk).unwrap().as_str(), "cc");
        assert!(variant.fingerprint(VariantName::Default).is_none());
    }

    #[test]
    fn sdk_exclusive_detection() {
        let mut sdk_only = BTreeMap::new();
        sdk_only.insert(VariantName::Sdk, Fingerprint::from("cc"));
        assert!(ManifestEntry::Variant(sdk_only).is_sdk_exclusive());

        let mut both = BTreeMap::new();
        both.insert(VariantName::Default, Fingerprint::from("aa"));
        both.insert(VariantName::Sdk, Fingerprint::from("bb"));
        assert!(!ManifestEntry::Variant(both).is_sdk_exclusive());

        assert!(!ManifestEntry::Scalar(Fingerprint::from("aa")).is_sdk_exclusive());
    }

    #[test]
    fn scalar_fingerprint_ignores_requested_variant() {
        let entry = ManifestEntry::Scalar(Fingerprint::from("aa"));
        assert_eq!(entry.fingerprint(VariantName::Sdk).unwrap().as_str(), "aa");
        assert_eq!(
            entry.fingerprint(VariantName::Default).unwrap().as_str(),
            "aa"
        );
    }
}
