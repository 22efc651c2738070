// Fetchers — move one archive from the cloud cache onto local disk
//
// The download gate in `cache` only knows about opaque tokens. A `Fetcher`
// turns a token into bytes on disk. `GoogleDriveFetcher` is the real one;
// tests plug in their own.

use std::fs::File;
use std::io;
use std::path::Path;
use std::time::Duration;

use genbench_core::{Error, Result};

/// Downloads the archive identified by `token` into `dest`.
pub trait Fetcher: Send + Sync {
    /// Write the archive for `token` to `dest`, replacing any existing file.
    ///
    /// Blocks until the transfer completes. Failures are returned as
    /// `Error::Transport` (network) or `Error::Io` (local disk).
    fn fetch(&self, token: &str, dest: &Path) -> Result<()>;
}

/// Direct-download endpoint for files shared from Google Drive.
pub const GOOGLE_DRIVE_URL: &str = "https://drive.usercontent.google.com/download";

/// Fetches archives shared on Google Drive by file id.
///
/// Uses the direct-download endpoint with `confirm=t`, which skips the
/// virus-scan interstitial page Drive serves for larger files.
#[derive(Debug, Clone)]
pub struct GoogleDriveFetcher {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl GoogleDriveFetcher {
    pub fn new() -> Result<Self> {
        Self::with_base_url(GOOGLE_DRIVE_URL)
    }

    /// Point the fetcher at a different endpoint (mirrors, local servers).
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("genbench/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(Duration::from_secs(30))
            .timeout(None::<Duration>)
            .build()
            .map_err(|e| Error::transport("<client>", e))?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// Full URL requested for `token`.
    pub fn url_for(&self, token: &str) -> String {
        format!("{}?id={}&export=download&confirm=t", self.base_url, token)
    }
}

impl Fetcher for GoogleDriveFetcher {
    fn fetch(&self, token: &str, dest: &Path) -> Result<()> {
        let url = self.url_for(token);
        log::info!("downloading {} -> {}", url, dest.display());

        let mut response = self
            .client
            .get(&url)
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|e| Error::transport(token, e))?;

        let mut out = File::create(dest)?;
        let bytes = io::copy(&mut response, &mut out).map_err(|e| {
            // A read error mid-body is a transport failure, not a disk one.
            if e.get_ref().is_some_and(|inner| inner.is::<reqwest::Error>()) {
                Error::transport(token, e)
            } else {
                Error::Io(e)
            }
        })?;

        log::info!("downloaded {} bytes for '{}'", bytes, token);
        Ok(())
    }
}
