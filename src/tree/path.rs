//! Path key normalization
//!
//! Maps an absolute candidate path to its canonical manifest key: the
//! root-relative path, backslash-separated with a leading backslash, so
//! manifests built on any platform agree with the `hashes.json` format
//! (`\bin\a.dll`). When a path comes from the SDK overlay, the SDK directory
//! prefix is stripped too, so the SDK copy of a file shares a key with the
//! base copy.

use crate::error::IntegrityError;
use std::path::Path;
use unicode_normalization::UnicodeNormalization;

/// Compute the manifest key for `path` under `root`.
///
/// `sdk_dir` names the SDK overlay directory when the path was produced by an
/// SDK-context scan; its prefix must then be present. Fails if the path is
/// not under the expected prefix, which does not occur for scanner-produced
/// candidates.
pub fn path_key(
    root: &Path,
    path: &Path,
    sdk_dir: Option<&str>,
) -> Result<String, IntegrityError> {
    let relative = path.strip_prefix(root).map_err(|_| {
        IntegrityError::InvalidPath(format!(
            "{} is not under installation root {}",
            path.display(),
            root.display()
        ))
    })?;

    let relative = match sdk_dir {
        Some(dir) => relative.strip_prefix(dir).map_err(|_| {
            IntegrityError::InvalidPath(format!(
                "{} is not under SDK directory {}",
                path.display(),
                dir
            ))
        })?,
        None => relative,
    };

    let mut key = String::new();
    for component in relative.components() {
        key.push('\\');
        // NFC so the same file name always produces the same key bytes.
        let name: String = component.as_os_str().to_string_lossy().nfc().collect();
        key.push_str(&name);
    }

    if key.is_empty() {
        return Err(IntegrityError::InvalidPath(format!(
            "{} resolves to an empty key",
            path.display()
        )));
    }

    Ok(key)
}
