//! Candidate enumeration for configured scan roots

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::warn;
use walkdir::WalkDir;

/// Recursive scanner over the configured directory roots.
///
/// A candidate is a regular file that has both a file name and an extension
/// and whose name is not in the excluded set. Extension-less files under the
/// scan roots are launcher artifacts and lock files, never shipped content.
pub struct Scanner {
    excluded: HashSet<String>,
}

impl Scanner {
    pub fn new(excluded_files: &[String]) -> Self {
        Self {
            excluded: excluded_files.iter().cloned().collect(),
        }
    }

    /// Collect candidate files under `dir`, sorted by path for deterministic
    /// processing order.
    ///
    /// Unreadable entries and a missing `dir` are logged and skipped; the
    /// scan never aborts over a single bad subtree.
    pub fn scan_dir(&self, dir: &Path) -> Vec<PathBuf> {
        if !dir.is_dir() {
            warn!(dir = %dir.display(), "Scan root missing, skipping");
            return Vec::new();
        }

        let mut candidates = Vec::new();
        for entry in WalkDir::new(dir).follow_links(false) {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    warn!("Unreadable entry skipped: {}", e);
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            if self.is_candidate(entry.path()) {
                candidates.push(entry.path().to_path_buf());
            }
        }

        candidates.sort();
        candidates
    }

    /// Apply the name/extension/exclusion filter to a single path.
    pub fn is_candidate(&self, path: &Path) -> bool {
        let name = match path.file_name() {
            Some(n) => n.to_string_lossy(),
            None => return false,
        };
        if path.extension().is_none() {
            return false;
        }
        !self.excluded.contains(name.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn scanner(excluded: &[&str]) -> Scanner {
        let excluded: Vec<String> = excluded.iter().map(|s| s.to_string()).collect();
        Scanner::new(&excluded)
    }

    #[test]
    fn collects_files_recursively_and_sorted() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::create_dir(root.join("sub")).unwrap();
        fs::write(root.join("z.vpk"), "z").unwrap();
        fs::write(root.join("a.vpk"), "a").unwrap();
        fs::write(root.join("sub").join("m.rpak"), "m").unwrap();

        let candidates = scanner(&[]).scan_dir(root);
        assert_eq!(candidates.len(), 3);
        let mut sorted = candidates.clone();
        sorted.sort();
        assert_eq!(candidates, sorted);
    }

    #[test]
    fn excluded_names_are_skipped() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::write(root.join("keep.vpk"), "k").unwrap();
        fs::write(root.join("skip.vpk"), "s").unwrap();

        let candidates = scanner(&["skip.vpk"]).scan_dir(root);
        assert_eq!(candidates.len(), 1);
        assert!(candidates[0].ends_with("keep.vpk"));
    }

    #[test]
    fn extensionless_files_are_not_candidates() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::write(root.join("README"), "r").unwrap();
        fs::write(root.join("data.bin"), "d").unwrap();

        let candidates = scanner(&[]).scan_dir(root);
        assert_eq!(candidates.len(), 1);
        assert!(candidates[0].ends_with("data.bin"));
    }

    #[test]
    fn missing_root_yields_no_candidates() {
        let temp_dir = TempDir::new().unwrap();
        let candidates = scanner(&[]).scan_dir(&temp_dir.path().join("absent"));
        assert!(candidates.is_empty());
    }
}
