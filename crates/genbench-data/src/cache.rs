// Cache downloader — download-once gate in front of the cloud cache
//
// Layout on disk:
//
//   <root>/
//     <name>.zip        (only while a download is in flight)
//     <name>/
//       train/<label>/<example_file>
//       test/<label>/<example_file>
//
// `ensure_local` returns immediately when `<root>/<name>` is already populated.
// Otherwise it resolves the registry entry, fetches `<root>/<name>.zip`,
// unpacks it into `<root>` and deletes the archive. With `force_download` the
// existing `<root>/<name>` subtree is removed first.
//
// Nothing here takes a lock: two processes populating the same root at once
// race on delete/fetch/unpack. A failed unpack may leave a partial directory,
// which `is_downloaded` will then report as present; pass `force_download` to
// recover.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use genbench_core::{CloudCache, DatasetKey, Error, Result};

use crate::archive::unpack_zip;
use crate::fetch::{Fetcher, GoogleDriveFetcher};

/// Whether `<root>/<name>` exists as a non-empty directory.
pub fn is_downloaded(name: &str, root: &Path) -> bool {
    fs::read_dir(root.join(name))
        .map(|mut rd| rd.next().is_some())
        .unwrap_or(false)
}

/// `<dest>.zip`, next to the dataset directory.
fn archive_path(dest: &Path) -> PathBuf {
    let mut s: OsString = dest.as_os_str().to_owned();
    s.push(".zip");
    PathBuf::from(s)
}

/// Populates a local cache root from a [`CloudCache`] registry.
///
/// Cheap to clone; the fetcher is shared.
#[derive(Clone)]
pub struct CloudCacheDownloader {
    registry: CloudCache,
    fetcher: Arc<dyn Fetcher>,
}

impl std::fmt::Debug for CloudCacheDownloader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloudCacheDownloader")
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}

impl CloudCacheDownloader {
    pub fn new(registry: CloudCache, fetcher: Arc<dyn Fetcher>) -> Self {
        Self { registry, fetcher }
    }

    /// The published registry, fetched from Google Drive.
    pub fn remote() -> Result<Self> {
        Ok(Self::new(
            CloudCache::default(),
            Arc::new(GoogleDriveFetcher::new()?),
        ))
    }

    pub fn registry(&self) -> &CloudCache {
        &self.registry
    }

    /// Pick the version to use: the requested one, or the latest registered.
    pub fn resolve_version(&self, name: &str, version: Option<u32>) -> Result<u32> {
        match version {
            Some(v) => Ok(v),
            None => self
                .registry
                .latest_version(name)
                .ok_or_else(|| Error::UnknownDataset(name.to_string())),
        }
    }

    /// Make sure `<root>/<name>` is populated and return its path.
    ///
    /// No network access happens when the directory is already present and
    /// `force_download` is false.
    pub fn ensure_local(
        &self,
        name: &str,
        version: Option<u32>,
        root: &Path,
        force_download: bool,
    ) -> Result<PathBuf> {
        self.ensure_available(name, version, root, force_download, true)
    }

    /// Like [`ensure_local`](Self::ensure_local), but fails with
    /// `Error::CloudCacheDisabled` instead of downloading when
    /// `use_cloud_cache` is false.
    pub fn ensure_available(
        &self,
        name: &str,
        version: Option<u32>,
        root: &Path,
        force_download: bool,
        use_cloud_cache: bool,
    ) -> Result<PathBuf> {
        if !force_download && is_downloaded(name, root) {
            log::debug!("'{}' already cached under {}", name, root.display());
            return Ok(root.join(name));
        }
        self.download_dataset(name, version, root, force_download, use_cloud_cache)
    }

    /// Download `name` into `root` unconditionally (subject to the registry).
    pub fn download_dataset(
        &self,
        name: &str,
        version: Option<u32>,
        root: &Path,
        force_download: bool,
        use_cloud_cache: bool,
    ) -> Result<PathBuf> {
        if !use_cloud_cache {
            return Err(Error::CloudCacheDisabled(name.to_string()));
        }
        let version = self.resolve_version(name, version)?;
        let key = DatasetKey::new(name, version);
        self.download_from_cloud_cache(&key, &root.join(name), force_download)
    }

    /// Fetch the archive for `key` and unpack it so that `dest` is populated.
    ///
    /// `dest` is the dataset directory itself; the archive is unpacked into its
    /// parent. Fails with `Error::NotInCloudCache` before touching the network
    /// or the filesystem if `key` is not registered.
    pub fn download_from_cloud_cache(
        &self,
        key: &DatasetKey,
        dest: &Path,
        force_download: bool,
    ) -> Result<PathBuf> {
        let token = self
            .registry
            .lookup(&key.name, key.version)
            .ok_or_else(|| Error::NotInCloudCache {
                name: key.name.clone(),
                version: key.version,
            })?;

        if force_download && dest.exists() {
            log::warn!("removing {} before re-download", dest.display());
            fs::remove_dir_all(dest)?;
        }

        let parent = match dest.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&parent)?;

        let archive = archive_path(dest);
        log::info!("fetching {} from the cloud cache", key);
        self.fetcher.fetch(token, &archive)?;

        log::info!("unpacking {} into {}", archive.display(), parent.display());
        unpack_zip(&archive, &parent)?;
        fs::remove_file(&archive)?;

        if !dest.is_dir() {
            log::warn!(
                "archive for {} did not create {}",
                key,
                dest.display()
            );
        }
        Ok(dest.to_path_buf())
    }
}
