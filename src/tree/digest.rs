//! Streaming content digests using BLAKE3

use crate::error::IntegrityError;
use crate::manifest::Fingerprint;
use blake3::Hasher;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Read-buffer size for streaming digests. Keeps memory flat regardless of
/// file size; pak files run to gigabytes.
const CHUNK_SIZE: usize = 64 * 1024;

/// Digest a file's content incrementally.
///
/// The file handle is dropped on every exit path, including early read
/// errors.
pub fn fingerprint_file(path: &Path) -> Result<Fingerprint, IntegrityError> {
    let mut file = File::open(path)?;
    let mut hasher = Hasher::new();
    let mut buf = vec![0u8; CHUNK_SIZE];
    loop {
        let read = file.read(&mut buf)?;
        if read == 0 {
            break;
        }
        hasher.update(&buf[..read]);
    }
    Ok(Fingerprint::from_hash(&hasher.finalize()))
}

/// Digest an in-memory byte slice.
pub fn fingerprint_bytes(content: &[u8]) -> Fingerprint {
    let mut hasher = Hasher::new();
    hasher.update(content);
    Fingerprint::from_hash(&hasher.finalize())
}
