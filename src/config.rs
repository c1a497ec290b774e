//! Installation layout configuration
//!
//! Which directories and files get hashed, what never gets hashed, where the
//! manifest lives, and how the SDK overlay is detected. Defaults describe the
//! stock game layout; an optional `integrity.toml` in the installation root
//! overrides any field.

use crate::error::IntegrityError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Name of the optional override file read from the installation root.
pub const CONFIG_FILE: &str = "integrity.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Layout {
    /// Directory roots scanned recursively, relative to the installation
    /// root. Forward slashes; converted to native paths when joined.
    #[serde(default = "default_paths")]
    pub paths: Vec<String>,

    /// Individual files hashed in addition to the directory roots. The first
    /// entry doubles as the base-install sanity check during verification.
    #[serde(default = "default_files")]
    pub files: Vec<String>,

    /// File names never hashed in any directory.
    #[serde(default = "default_excluded_files")]
    pub excluded_files: Vec<String>,

    /// Manifest file name in the installation root.
    #[serde(default = "default_manifest_file")]
    pub manifest_file: String,

    /// SDK overlay directory, relative to the installation root. `None`
    /// disables variant-aware building.
    #[serde(default = "default_sdk_dir")]
    pub sdk_dir: Option<String>,

    /// File whose presence in the installation root marks the SDK active.
    #[serde(default = "default_sentinel")]
    pub sentinel: String,

    /// Remote manifest location used when no local manifest exists.
    #[serde(default = "default_manifest_url")]
    pub manifest_url: String,
}

fn default_paths() -> Vec<String> {
    [
        "paks",
        "vpk",
        "media",
        "audio",
        "stbsp",
        "cfg",
        "bin",
        "materials",
        "platform/shaders",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_files() -> Vec<String> {
    [
        "r5apexdata.bin",
        "amd_ags_x64.dll",
        "bink2w64.dll",
        "binkawin64.dll",
        "mileswin64.dll",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_excluded_files() -> Vec<String> {
    [
        "client_frontend.bsp.pak000_000.vpk",
        "englishclient_frontend.bsp.pak000_dir.vpk",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_manifest_file() -> String {
    "hashes.json".to_string()
}

fn default_sdk_dir() -> Option<String> {
    Some("sdk".to_string())
}

fn default_sentinel() -> String {
    "gamesdk.dll".to_string()
}

fn default_manifest_url() -> String {
    "https://cdn.r5reloaded.com/verify/hashes.json".to_string()
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            paths: default_paths(),
            files: default_files(),
            excluded_files: default_excluded_files(),
            manifest_file: default_manifest_file(),
            sdk_dir: default_sdk_dir(),
            sentinel: default_sentinel(),
            manifest_url: default_manifest_url(),
        }
    }
}

impl Layout {
    /// Load the layout for an installation root: `integrity.toml` when
    /// present, stock defaults otherwise.
    pub fn load(root: &Path) -> Result<Self, IntegrityError> {
        let path = root.join(CONFIG_FILE);
        if !path.is_file() {
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(&path)?;
        let layout: Layout =
            toml::from_str(&text).map_err(|e| IntegrityError::Config(e.to_string()))?;
        debug!(path = %path.display(), "Loaded layout overrides");
        Ok(layout)
    }

    /// Join a layout-relative entry onto the installation root using native
    /// separators.
    pub fn join(root: &Path, relative: &str) -> PathBuf {
        let mut path = root.to_path_buf();
        for part in relative.split('/').filter(|p| !p.is_empty()) {
            path.push(part);
        }
        path
    }

    pub fn manifest_path(&self, root: &Path) -> PathBuf {
        root.join(&self.manifest_file)
    }

    pub fn sentinel_path(&self, root: &Path) -> PathBuf {
        root.join(&self.sentinel)
    }

    /// Path that must exist for `root` to look like a real installation.
    pub fn base_file_path(&self, root: &Path) -> Option<PathBuf> {
        self.files.first().map(|f| Self::join(root, f))
    }
}
