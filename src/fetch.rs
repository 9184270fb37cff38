//! Download of the holiday CSV into the local cache.

use crate::error::{Error, Result};
use encoding_rs::SHIFT_JIS;
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::{info, warn};

/// How the downloaded data ended up in the cache
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Decoded from Shift_JIS and stored as UTF-8
    Converted,
    /// Not valid Shift_JIS, stored as received
    Raw,
}

/// Download `url` and store it at `cache_path` as UTF-8.
///
/// The body is expected in Shift_JIS. If it does not decode cleanly the
/// downloaded bytes are written untouched and [`FetchOutcome::Raw`] is returned.
pub fn fetch_holidays(url: &str, cache_path: &Path, timeout: Duration) -> Result<FetchOutcome> {
    info!(url, "downloading holidays");
    let client = reqwest::blocking::Client::builder()
        .timeout(timeout)
        .build()?;
    let response = client.get(url).send()?;
    let status = response.status();
    if !status.is_success() {
        return Err(Error::HttpStatus(status.as_u16()));
    }
    let body = response.bytes()?;

    let (decoded, _, had_errors) = SHIFT_JIS.decode(&body);
    let outcome = if had_errors {
        warn!(url, "holiday data is not valid Shift_JIS, caching it unconverted");
        atomic_write(cache_path, &body)?;
        FetchOutcome::Raw
    } else {
        atomic_write(cache_path, decoded.as_bytes())?;
        FetchOutcome::Converted
    };
    info!(path = %cache_path.display(), bytes = body.len(), ?outcome, "cached holidays");
    Ok(outcome)
}

/// Atomic write: write a `.tmp` sibling, then rename it over `path`
pub fn atomic_write<P: AsRef<Path>, C: AsRef<[u8]>>(path: P, contents: C) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }
    let tmp_path = path.with_extension("tmp");
    fs::write(&tmp_path, contents)?;
    fs::rename(tmp_path, path)?;
    Ok(())
}
