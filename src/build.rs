//! Build mode: hash a known-good installation into a reference manifest

use crate::config::Layout;
use crate::error::IntegrityError;
use crate::manifest::{ManifestStore, VariantName};
use crate::tree::digest;
use crate::tree::path::path_key;
use crate::tree::walker::Scanner;
use std::path::Path;
use std::time::Instant;
use tracing::{info, instrument, warn};

/// Builds the reference manifest from a live installation.
pub struct Builder<'a> {
    root: &'a Path,
    layout: &'a Layout,
}

impl<'a> Builder<'a> {
    pub fn new(root: &'a Path, layout: &'a Layout) -> Self {
        Self { root, layout }
    }

    /// Hash the configured tree into a fresh manifest store.
    ///
    /// The SDK overlay is processed first so that shared files are promoted
    /// to variant entries when the base copy is hashed afterwards. Then the
    /// individual base files, then the directory roots recursively.
    #[instrument(skip(self), fields(root = %self.root.display()))]
    pub fn build(&self) -> Result<ManifestStore, IntegrityError> {
        let start = Instant::now();
        let mut store = ManifestStore::new();
        let scanner = Scanner::new(&self.layout.excluded_files);

        if let Some(sdk_dir) = self.layout.sdk_dir.as_deref() {
            let sdk_root = Layout::join(self.root, sdk_dir);
            for path in scanner.scan_dir(&sdk_root) {
                self.hash_into(&mut store, &path, VariantName::Sdk, Some(sdk_dir))?;
            }
        }

        for file in &self.layout.files {
            let path = Layout::join(self.root, file);
            if path.is_file() {
                self.hash_into(&mut store, &path, VariantName::Default, None)?;
            } else {
                warn!(path = %path.display(), "Configured file missing, not added to manifest");
            }
        }

        for dir in &self.layout.paths {
            for path in scanner.scan_dir(&Layout::join(self.root, dir)) {
                self.hash_into(&mut store, &path, VariantName::Default, None)?;
            }
        }

        info!(
            entries = store.len(),
            duration_ms = start.elapsed().as_millis(),
            "Manifest build completed"
        );
        Ok(store)
    }

    /// Build and persist the manifest to the installation root.
    pub fn run(&self) -> Result<ManifestStore, IntegrityError> {
        let store = self.build()?;
        store.save(&self.layout.manifest_path(self.root))?;
        Ok(store)
    }

    fn hash_into(
        &self,
        store: &mut ManifestStore,
        path: &Path,
        context: VariantName,
        sdk_dir: Option<&str>,
    ) -> Result<(), IntegrityError> {
        println!("Hashing: {}", path.display());
        let fingerprint = match digest::fingerprint_file(path) {
            Ok(fp) => fp,
            Err(e) => {
                // A known-good install should not have unreadable files, but
                // one bad handle must not kill the whole build.
                warn!(path = %path.display(), "Unreadable file skipped: {}", e);
                return Ok(());
            }
        };
        let key = path_key(self.root, path, sdk_dir)?;
        info!(key = %key, hash = %fingerprint, context = %context, "Hashed file");
        store.insert(key, fingerprint, context);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::ManifestEntry;
    use crate::tree::digest::fingerprint_bytes;
    use std::fs;
    use tempfile::TempDir;

    fn layout_for_test() -> Layout {
        Layout {
            paths: vec!["bin".into()],
            files: vec!["r5apexdata.bin".into()],
            excluded_files: vec!["skip.vpk".into()],
            sdk_dir: Some("sdk".into()),
            ..Layout::default()
        }
    }

    #[test]
    fn build_hashes_files_and_directories() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::write(root.join("r5apexdata.bin"), "base data").unwrap();
        fs::create_dir(root.join("bin")).unwrap();
        fs::write(root.join("bin").join("a.dll"), "library").unwrap();

        let layout = layout_for_test();
        let store = Builder::new(root, &layout).build().unwrap();

        assert_eq!(store.len(), 2);
        assert_eq!(
            store.get("\\bin\\a.dll"),
            Some(&ManifestEntry::Scalar(fingerprint_bytes(b"library")))
        );
        assert_eq!(
            store.get("\\r5apexdata.bin"),
            Some(&ManifestEntry::Scalar(fingerprint_bytes(b"base data")))
        );
    }

    #[test]
    fn sdk_overlay_promotes_shared_files_to_variants() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::create_dir(root.join("bin")).unwrap();
        fs::write(root.join("bin").join("x.dll"), "vanilla").unwrap();
        fs::create_dir_all(root.join("sdk").join("bin")).unwrap();
        fs::write(root.join("sdk").join("bin").join("x.dll"), "patched").unwrap();
        fs::write(root.join("sdk").join("bin").join("only.dll"), "sdk only").unwrap();

        let mut layout = layout_for_test();
        layout.files.clear();
        let store = Builder::new(root, &layout).build().unwrap();

        let shared = store.get("\\bin\\x.dll").unwrap();
        assert_eq!(
            shared.fingerprint(VariantName::Default),
            Some(&fingerprint_bytes(b"vanilla"))
        );
        assert_eq!(
            shared.fingerprint(VariantName::Sdk),
            Some(&fingerprint_bytes(b"patched"))
        );

        let exclusive = store.get("\\bin\\only.dll").unwrap();
        assert!(exclusive.is_sdk_exclusive());
    }

    #[test]
    fn excluded_files_never_enter_the_manifest() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::create_dir(root.join("bin")).unwrap();
        fs::write(root.join("bin").join("keep.dll"), "k").unwrap();
        fs::write(root.join("bin").join("skip.vpk"), "s").unwrap();

        let mut layout = layout_for_test();
        layout.files.clear();
        let store = Builder::new(root, &layout).build().unwrap();

        assert!(store.get("\\bin\\keep.dll").is_some());
        assert!(store.get("\\bin\\skip.vpk").is_none());
    }

    #[test]
    fn run_persists_the_manifest() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::create_dir(root.join("bin")).unwrap();
        fs::write(root.join("bin").join("a.dll"), "library").unwrap();

        let mut layout = layout_for_test();
        layout.files.clear();
        let store = Builder::new(root, &layout).run().unwrap();

        let reloaded = ManifestStore::load(&layout.manifest_path(root)).unwrap();
        assert_eq!(store, reloaded);
    }

    #[test]
    fn missing_configured_file_is_skipped() {
        let temp_dir = TempDir::new().unwrap();
        let layout = layout_for_test();
        let store = Builder::new(temp_dir.path(), &layout).build().unwrap();
        assert!(store.is_empty());
    }
}
