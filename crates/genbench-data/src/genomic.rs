// GenomicClfDataset — directory-based sequence classification dataset
//
// Reads a cached benchmark laid out as:
//
//   <root>/<name>/
//     train/
//       class_a/
//         0.txt        (one sequence per file)
//         1.txt
//       class_b/
//         ...
//     test/
//       ...
//
// Class labels are assigned as sorted indices of the subdirectory names, so
// ids are identical on every platform. Files inside a class are also visited in
// sorted order. Sequences are read from disk on every `get` unless the
// content cache is switched on.
//
// USAGE:
//
//   let ds = GenomicClfDataset::builder("demo_human_or_worm", Split::Train)
//       .version(0)
//       .build()?;
//   let (seq, label) = ds.get(0)?;

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::OnceLock;

use genbench_core::{default_cache_root, Error, Result};

use crate::cache::{is_downloaded, CloudCacheDownloader};
use crate::dataset::{check_index, Dataset};

/// Top-level partition of a benchmark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Split {
    Train,
    Test,
}

impl Split {
    pub const ALL: [Split; 2] = [Split::Train, Split::Test];

    /// Directory name of the split.
    pub fn as_str(&self) -> &'static str {
        match self {
            Split::Train => "train",
            Split::Test => "test",
        }
    }
}

impl FromStr for Split {
    type Err = Error;

    /// Accepts exactly `"train"` or `"test"`.
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "train" => Ok(Split::Train),
            "test" => Ok(Split::Test),
            other => Err(Error::InvalidSplit(other.to_string())),
        }
    }
}

impl fmt::Display for Split {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Builder

/// Builder for [`GenomicClfDataset`].
#[derive(Debug, Clone)]
pub struct GenomicClfDatasetBuilder {
    name: String,
    split: Split,
    root: Option<PathBuf>,
    force_download: bool,
    version: Option<u32>,
    use_cloud_cache: bool,
    cache_contents: bool,
    downloader: Option<CloudCacheDownloader>,
}

impl GenomicClfDatasetBuilder {
    pub fn new(name: impl Into<String>, split: Split) -> Self {
        GenomicClfDatasetBuilder {
            name: name.into(),
            split,
            root: None,
            force_download: false,
            version: None,
            use_cloud_cache: true,
            cache_contents: false,
            downloader: None,
        }
    }

    /// Cache root holding `<name>/` (default: [`default_cache_root`]).
    pub fn cache_root<P: AsRef<Path>>(mut self, root: P) -> Self {
        self.root = Some(root.as_ref().to_path_buf());
        self
    }

    /// Discard any cached copy and download again.
    pub fn force_download(mut self, yes: bool) -> Self {
        self.force_download = yes;
        self
    }

    /// Dataset version to download (default: latest registered).
    pub fn version(mut self, version: u32) -> Self {
        self.version = Some(version);
        self
    }

    /// Allow downloading from the cloud cache when not cached locally.
    pub fn use_cloud_cache(mut self, yes: bool) -> Self {
        self.use_cloud_cache = yes;
        self
    }

    /// Keep each sequence in memory after its first read.
    pub fn cache_contents(mut self, yes: bool) -> Self {
        self.cache_contents = yes;
        self
    }

    /// Use a specific downloader instead of the published Google Drive one.
    pub fn downloader(mut self, downloader: CloudCacheDownloader) -> Self {
        self.downloader = Some(downloader);
        self
    }

    /// Make sure the data is cached locally, then scan the split directory.
    pub fn build(self) -> Result<GenomicClfDataset> {
        let root = self.root.unwrap_or_else(default_cache_root);

        // A cache hit needs no downloader (and no HTTP client).
        let base = if !self.force_download && is_downloaded(&self.name, &root) {
            root.join(&self.name)
        } else if !self.use_cloud_cache {
            return Err(Error::CloudCacheDisabled(self.name));
        } else {
            let downloader = match self.downloader {
                Some(d) => d,
                None => CloudCacheDownloader::remote()?,
            };
            downloader.ensure_available(
                &self.name,
                self.version,
                &root,
                self.force_download,
                self.use_cloud_cache,
            )?
        };

        GenomicClfDataset::scan(self.name, self.split, base, self.cache_contents)
    }
}

// GenomicClfDataset

/// An indexed view of one split of a cached benchmark.
///
/// `get` returns `(sequence, label)` pairs.
#[derive(Debug)]
pub struct GenomicClfDataset {
    name: String,
    split: Split,
    /// `<root>/<name>/<split>`
    split_dir: PathBuf,
    /// Sorted class names (subdirectory names).
    class_names: Vec<String>,
    /// Per-sample metadata: (path, class_index).
    entries: Vec<(PathBuf, usize)>,
    /// One slot per entry when the content cache is on, empty otherwise.
    contents: Vec<OnceLock<String>>,
}

impl GenomicClfDataset {
    /// Convenience entry-point returning a builder.
    pub fn builder(name: impl Into<String>, split: Split) -> GenomicClfDatasetBuilder {
        GenomicClfDatasetBuilder::new(name, split)
    }

    /// Index an already-populated dataset directory (`<root>/<name>`) without
    /// going through the downloader.
    pub fn from_dir<P: AsRef<Path>>(dataset_dir: P, split: Split) -> Result<Self> {
        let dir = dataset_dir.as_ref().to_path_buf();
        let name = dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self::scan(name, split, dir, false)
    }

    fn scan(name: String, split: Split, base: PathBuf, cache_contents: bool) -> Result<Self> {
        let split_dir = base.join(split.as_str());

        let mut class_dirs: Vec<(String, PathBuf)> = Vec::new();
        for entry in fs::read_dir(&split_dir)? {
            let path = entry?.path();
            if path.is_dir() {
                if let Some(label) = path.file_name() {
                    class_dirs.push((label.to_string_lossy().into_owned(), path));
                }
            }
        }
        class_dirs.sort_by(|a, b| a.0.cmp(&b.0));

        let mut entries: Vec<(PathBuf, usize)> = Vec::new();
        for (class_idx, (_label, dir)) in class_dirs.iter().enumerate() {
            let mut files: Vec<PathBuf> = Vec::new();
            for entry in fs::read_dir(dir)? {
                let path = entry?.path();
                if path.is_file() {
                    files.push(path);
                }
            }
            files.sort();
            entries.extend(files.into_iter().map(|p| (p, class_idx)));
        }

        let class_names: Vec<String> = class_dirs.into_iter().map(|(n, _)| n).collect();
        log::info!(
            "indexed {} {} examples in {} classes for '{}'",
            entries.len(),
            split,
            class_names.len(),
            name
        );

        let contents = if cache_contents {
            entries.iter().map(|_| OnceLock::new()).collect()
        } else {
            Vec::new()
        };

        Ok(GenomicClfDataset {
            name,
            split,
            split_dir,
            class_names,
            entries,
            contents,
        })
    }

    /// Which split this dataset represents.
    pub fn split(&self) -> Split {
        self.split
    }

    /// The `<root>/<name>/<split>` directory that was scanned.
    pub fn root(&self) -> &Path {
        &self.split_dir
    }

    /// Class names in label-id order.
    pub fn class_names(&self) -> &[String] {
        &self.class_names
    }

    pub fn num_classes(&self) -> usize {
        self.class_names.len()
    }

    /// Number of examples per label id.
    pub fn class_counts(&self) -> Vec<usize> {
        let mut counts = vec![0; self.class_names.len()];
        for &(_, label) in &self.entries {
            counts[label] += 1;
        }
        counts
    }

    /// Label id of the i-th example.
    pub fn label_of(&self, index: usize) -> Result<usize> {
        check_index(index, self.entries.len())?;
        Ok(self.entries[index].1)
    }

    /// File path of the i-th example.
    pub fn path_of(&self, index: usize) -> Result<&Path> {
        check_index(index, self.entries.len())?;
        Ok(&self.entries[index].0)
    }

    fn read_sequence(&self, index: usize) -> Result<String> {
        let path = &self.entries[index].0;
        match self.contents.get(index) {
            Some(slot) => {
                if let Some(text) = slot.get() {
                    return Ok(text.clone());
                }
                let text = fs::read_to_string(path)?;
                Ok(slot.get_or_init(|| text).clone())
            }
            None => Ok(fs::read_to_string(path)?),
        }
    }
}

impl Dataset for GenomicClfDataset {
    type Item = (String, usize);

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn get(&self, index: usize) -> Result<(String, usize)> {
        check_index(index, self.entries.len())?;
        let sequence = self.read_sequence(index)?;
        Ok((sequence, self.entries[index].1))
    }

    fn name(&self) -> &str {
        &self.name
    }
}
