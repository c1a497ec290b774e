//! Remote manifest fetch

use crate::error::IntegrityError;
use reqwest::blocking::Client;
use std::io::Read;
use std::time::Duration;
use tracing::{debug, info};

const HTTP_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const HTTP_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Receive-buffer size; the body buffer grows chunk by chunk.
const FETCH_CHUNK: usize = 16 * 1024;

fn build_http_client() -> Result<Client, IntegrityError> {
    Client::builder()
        .connect_timeout(HTTP_CONNECT_TIMEOUT)
        .timeout(HTTP_REQUEST_TIMEOUT)
        .build()
        .map_err(|e| {
            IntegrityError::ManifestUnavailable(format!("Failed to create HTTP client: {}", e))
        })
}

/// Fetch manifest bytes from `url` into a growing buffer.
///
/// Any transport failure or non-success status is fatal: verification cannot
/// proceed without a trusted reference. The buffer is bounded by the total
/// manifest size.
pub fn fetch_manifest(url: &str) -> Result<Vec<u8>, IntegrityError> {
    let client = build_http_client()?;
    let mut response = client
        .get(url)
        .send()
        .map_err(|e| IntegrityError::ManifestUnavailable(format!("GET {} failed: {}", url, e)))?;

    let status = response.status();
    if !status.is_success() {
        return Err(IntegrityError::ManifestUnavailable(format!(
            "GET {} returned status {}",
            url, status
        )));
    }

    let mut body = Vec::new();
    let mut chunk = [0u8; FETCH_CHUNK];
    loop {
        let read = response.read(&mut chunk).map_err(|e| {
            IntegrityError::ManifestUnavailable(format!("Transfer from {} failed: {}", url, e))
        })?;
        if read == 0 {
            break;
        }
        body.extend_from_slice(&chunk[..read]);
        debug!(received = body.len(), "Manifest transfer progress");
    }

    info!(url = %url, bytes = body.len(), "Fetched remote manifest");
    Ok(body)
}
