//! Verify mode: observed-store scan, sentinel detection, and reconciliation

use crate::config::Layout;
use crate::error::IntegrityError;
use crate::manifest::{ManifestEntry, ManifestStore, VariantName};
use crate::remote;
use crate::tree::digest;
use crate::tree::path::path_key;
use crate::tree::walker::Scanner;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, instrument, warn};

/// Per-file verification outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FindingKind {
    /// The manifest expects the file but no observed fingerprint exists.
    MissingFile,
    /// Observed fingerprint differs from the applicable expected one.
    ContentMismatch,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub key: String,
    pub kind: FindingKind,
}

/// Accumulated outcome of a verification run.
#[derive(Debug, Clone, Default)]
pub struct VerifyReport {
    pub findings: Vec<Finding>,
    /// Reference entries actually checked.
    pub checked: usize,
    /// SDK-exclusive entries skipped because the SDK is inactive.
    pub skipped: usize,
    /// Candidate files that could not be opened for reading. Logged during
    /// the scan; such files produce no observed fingerprint.
    pub unreadable: usize,
    /// Whether the SDK overlay was detected as active.
    pub sdk_active: bool,
}

impl VerifyReport {
    pub fn passed(&self) -> bool {
        self.findings.is_empty()
    }
}

/// Resolve each reference entry against the observed store.
///
/// The active variant is selected once from `sdk_active`: scalar entries
/// always apply; variant entries are checked against their `SDK` side when
/// the SDK is active and their `Default` side otherwise. An SDK-exclusive
/// entry is skipped while the SDK is inactive. The inverse gap, a variant
/// entry with no `SDK` side while the SDK is active, is unreachable under the
/// builder's merge rules but reported as missing rather than silently passed.
/// Observed keys absent from the reference are never reported.
pub fn reconcile(
    reference: &ManifestStore,
    observed: &ManifestStore,
    sdk_active: bool,
) -> VerifyReport {
    let wanted = if sdk_active {
        VariantName::Sdk
    } else {
        VariantName::Default
    };

    let mut report = VerifyReport {
        sdk_active,
        ..VerifyReport::default()
    };

    for (key, entry) in reference.iter() {
        let expected = match entry.fingerprint(wanted) {
            Some(fp) => fp,
            None => {
                if !sdk_active && entry.is_sdk_exclusive() {
                    debug!(key = %key, "SDK-exclusive entry skipped, SDK inactive");
                    report.skipped += 1;
                    continue;
                }
                report.checked += 1;
                report.findings.push(Finding {
                    key: key.clone(),
                    kind: FindingKind::MissingFile,
                });
                continue;
            }
        };

        report.checked += 1;
        match observed
            .get(key)
            .and_then(|e| e.fingerprint(VariantName::Default))
        {
            None => report.findings.push(Finding {
                key: key.clone(),
                kind: FindingKind::MissingFile,
            }),
            Some(actual) if actual == expected => {}
            Some(actual) => {
                debug!(key = %key, expected = %expected, actual = %actual, "Fingerprint mismatch");
                report.findings.push(Finding {
                    key: key.clone(),
                    kind: FindingKind::ContentMismatch,
                });
            }
        }
    }

    report
}

/// Load the reference store: the local manifest when present, the remote one
/// otherwise. Remote failure is fatal; verification cannot run without a
/// trusted baseline.
pub fn resolve_reference(root: &Path, layout: &Layout) -> Result<ManifestStore, IntegrityError> {
    let path = layout.manifest_path(root);
    if path.is_file() {
        info!(path = %path.display(), "Using local manifest");
        return ManifestStore::load(&path);
    }
    info!(url = %layout.manifest_url, "No local manifest, fetching");
    let bytes = remote::fetch_manifest(&layout.manifest_url)?;
    ManifestStore::from_bytes(&bytes)
}

/// Verifies a live installation against a reference manifest.
pub struct Verifier<'a> {
    root: &'a Path,
    layout: &'a Layout,
}

impl<'a> Verifier<'a> {
    pub fn new(root: &'a Path, layout: &'a Layout) -> Self {
        Self { root, layout }
    }

    /// True when the SDK sentinel file exists in the installation root.
    pub fn sdk_active(&self) -> bool {
        self.layout.sentinel_path(self.root).is_file()
    }

    /// Hash the live base tree into an observed store.
    ///
    /// Base context only; the SDK overlay directory is not rescanned, since
    /// an active SDK places its files over the base tree. Returns the store
    /// and the count of unreadable candidates.
    #[instrument(skip(self), fields(root = %self.root.display()))]
    pub fn observe(&self) -> Result<(ManifestStore, usize), IntegrityError> {
        let mut store = ManifestStore::new();
        let mut unreadable = 0usize;
        let scanner = Scanner::new(&self.layout.excluded_files);

        let mut candidates = Vec::new();
        for file in &self.layout.files {
            let path = Layout::join(self.root, file);
            if path.is_file() {
                candidates.push(path);
            }
        }
        for dir in &self.layout.paths {
            let dir_path = Layout::join(self.root, dir);
            println!("Verifying: {}", dir_path.display());
            candidates.extend(scanner.scan_dir(&dir_path));
        }

        for path in candidates {
            match digest::fingerprint_file(&path) {
                Ok(fingerprint) => {
                    let key = path_key(self.root, &path, None)?;
                    store.insert(key, fingerprint, VariantName::Default);
                }
                Err(e) => {
                    warn!(path = %path.display(), "Could not read file: {}", e);
                    unreadable += 1;
                }
            }
        }

        Ok((store, unreadable))
    }

    /// Full verification: sanity-check the root, scan, detect the SDK, and
    /// reconcile against `reference`.
    pub fn run(&self, reference: &ManifestStore) -> Result<VerifyReport, IntegrityError> {
        if let Some(base_file) = self.layout.base_file_path(self.root) {
            if !base_file.is_file() {
                return Err(IntegrityError::BaseFileMissing(base_file));
            }
        }

        let start = Instant::now();
        let (observed, unreadable) = self.observe()?;
        let sdk_active = self.sdk_active();
        info!(
            observed = observed.len(),
            sdk_active, "Observed store built, reconciling"
        );

        let mut report = reconcile(reference, &observed, sdk_active);
        report.unreadable = unreadable;

        info!(
            checked = report.checked,
            findings = report.findings.len(),
            skipped = report.skipped,
            duration_ms = start.elapsed().as_millis(),
            "Verification completed"
        );
        Ok(report)
    }
}
