// Tests for genbench-data: download gate, dataset view, named builders, loader

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use genbench_core::{CloudCache, DatasetKey, Error, Result};
use genbench_data::named::{demo_human_or_worm, get_dataset};
use genbench_data::{
    is_downloaded, train_test_split, CloudCacheDownloader, DataLoader, DataLoaderConfig, Dataset,
    Fetcher, GenomicClfDataset, SequenceBatch, Split,
};
use zip::write::SimpleFileOptions;

// Fetcher that serves an in-memory archive and records every call

struct ZipFetcher {
    files: Vec<(String, String)>,
    calls: AtomicUsize,
    tokens: Mutex<Vec<String>>,
}

impl ZipFetcher {
    fn new(files: &[(&str, &str)]) -> Arc<Self> {
        Arc::new(Self {
            files: files
                .iter()
                .map(|(n, b)| (n.to_string(), b.to_string()))
                .collect(),
            calls: AtomicUsize::new(0),
            tokens: Mutex::new(Vec::new()),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Fetcher for ZipFetcher {
    fn fetch(&self, token: &str, dest: &Path) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.tokens.lock().unwrap().push(token.to_string());

        let mut zw = zip::ZipWriter::new(File::create(dest)?);
        for (name, body) in &self.files {
            zw.start_file(name.as_str(), SimpleFileOptions::default())
                .map_err(|e| Error::msg(e.to_string()))?;
            zw.write_all(body.as_bytes())?;
        }
        zw.finish().map_err(|e| Error::msg(e.to_string()))?;
        Ok(())
    }
}

/// Two classes in train (2 + 3 files), one class in test.
const HUMAN_OR_WORM: &[(&str, &str)] = &[
    ("demo_human_or_worm/train/worm/0.txt", "TTAGGC"),
    ("demo_human_or_worm/train/worm/1.txt", "TTAGGCTTAGGC"),
    ("demo_human_or_worm/train/worm/2.txt", "GCTTAG"),
    ("demo_human_or_worm/train/human/0.txt", "TTAGGG"),
    ("demo_human_or_worm/train/human/1.txt", "CCCTAA"),
    ("demo_human_or_worm/test/human/0.txt", "ACGTACGT"),
];

fn registry() -> CloudCache {
    CloudCache::new().with_entry("demo_human_or_worm", 0, "token123")
}

fn downloader(fetcher: &Arc<ZipFetcher>) -> CloudCacheDownloader {
    CloudCacheDownloader::new(registry(), fetcher.clone())
}

fn tree(root: &Path) -> Vec<PathBuf> {
    let mut out = Vec::new();
    if let Ok(rd) = fs::read_dir(root) {
        for entry in rd.flatten() {
            let path = entry.path();
            if path.is_dir() {
                out.extend(tree(&path));
            }
            out.push(path);
        }
    }
    out
}

// Cache downloader

#[test]
fn test_first_download_fetches_unpacks_and_cleans_up() {
    let tmp = tempfile::tempdir().unwrap();
    let fetcher = ZipFetcher::new(HUMAN_OR_WORM);
    let dl = downloader(&fetcher);

    let path = dl
        .ensure_local("demo_human_or_worm", Some(0), tmp.path(), false)
        .unwrap();

    assert_eq!(path, tmp.path().join("demo_human_or_worm"));
    assert_eq!(fetcher.calls(), 1);
    assert_eq!(*fetcher.tokens.lock().unwrap(), vec!["token123".to_string()]);
    assert!(path.join("train/human").is_dir());
    assert!(path.join("train/worm").is_dir());
    assert!(!tmp.path().join("demo_human_or_worm.zip").exists());
    assert!(is_downloaded("demo_human_or_worm", tmp.path()));
}

#[test]
fn test_second_call_does_not_fetch() {
    let tmp = tempfile::tempdir().unwrap();
    let fetcher = ZipFetcher::new(HUMAN_OR_WORM);
    let dl = downloader(&fetcher);

    dl.ensure_local("demo_human_or_worm", None, tmp.path(), false)
        .unwrap();
    dl.ensure_local("demo_human_or_worm", None, tmp.path(), false)
        .unwrap();
    assert_eq!(fetcher.calls(), 1);
}

#[test]
fn test_unregistered_key_fails_without_fetch() {
    let tmp = tempfile::tempdir().unwrap();
    let fetcher = ZipFetcher::new(HUMAN_OR_WORM);
    let dl = downloader(&fetcher);

    let err = dl
        .ensure_local("demo_human_or_worm", Some(7), tmp.path(), false)
        .unwrap_err();
    assert!(matches!(err, Error::NotInCloudCache { ref name, version: 7 } if name == "demo_human_or_worm"));
    assert!(err.is_configuration());
    assert_eq!(fetcher.calls(), 0);
    assert!(tree(tmp.path()).is_empty());
}

#[test]
fn test_force_download_replaces_stale_files() {
    let tmp = tempfile::tempdir().unwrap();
    let stale = tmp.path().join("demo_human_or_worm/train/old_class/x.txt");
    fs::create_dir_all(stale.parent().unwrap()).unwrap();
    fs::write(&stale, "stale").unwrap();

    let fetcher = ZipFetcher::new(HUMAN_OR_WORM);
    let dl = downloader(&fetcher);

    // Present and not forced: left alone.
    dl.ensure_local("demo_human_or_worm", None, tmp.path(), false)
        .unwrap();
    assert_eq!(fetcher.calls(), 0);
    assert!(stale.exists());

    dl.ensure_local("demo_human_or_worm", None, tmp.path(), true)
        .unwrap();
    assert_eq!(fetcher.calls(), 1);
    assert!(!stale.exists());
    assert!(tmp.path().join("demo_human_or_worm/train/worm/2.txt").exists());
}

#[test]
fn test_download_from_cloud_cache_creates_missing_root() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path().join("nested/cache");
    let fetcher = ZipFetcher::new(HUMAN_OR_WORM);
    let dl = downloader(&fetcher);

    let dest = root.join("demo_human_or_worm");
    let out = dl
        .download_from_cloud_cache(&DatasetKey::new("demo_human_or_worm", 0), &dest, false)
        .unwrap();
    assert_eq!(out, dest);
    assert!(dest.join("test/human/0.txt").is_file());
}

// Dataset view

#[test]
fn test_length_is_sum_of_class_files() {
    let tmp = tempfile::tempdir().unwrap();
    let fetcher = ZipFetcher::new(HUMAN_OR_WORM);

    let train = demo_human_or_worm(Split::Train)
        .cache_root(tmp.path())
        .downloader(downloader(&fetcher))
        .build()
        .unwrap();
    let test = demo_human_or_worm(Split::Test)
        .cache_root(tmp.path())
        .downloader(downloader(&fetcher))
        .build()
        .unwrap();

    assert_eq!(train.len(), 5);
    assert_eq!(train.class_counts(), vec![2, 3]);
    assert_eq!(test.len(), 1);
    assert_eq!(fetcher.calls(), 1);
}

#[test]
fn test_get_matches_disk_and_label_range() {
    let tmp = tempfile::tempdir().unwrap();
    let fetcher = ZipFetcher::new(HUMAN_OR_WORM);
    let ds = GenomicClfDataset::builder("demo_human_or_worm", Split::Train)
        .cache_root(tmp.path())
        .version(0)
        .downloader(downloader(&fetcher))
        .build()
        .unwrap();

    for i in 0..ds.len() {
        let (seq, label) = ds.get(i).unwrap();
        assert!(label < ds.num_classes());
        assert_eq!(seq, fs::read_to_string(ds.path_of(i).unwrap()).unwrap());
        assert_eq!(label, ds.label_of(i).unwrap());
        let class_dir = ds.path_of(i).unwrap().parent().unwrap();
        assert_eq!(
            class_dir.file_name().unwrap().to_str().unwrap(),
            ds.class_names()[label]
        );
    }
    assert_eq!(ds.class_names(), &["human".to_string(), "worm".to_string()]);
}

#[test]
fn test_get_past_end_is_index_error() {
    let tmp = tempfile::tempdir().unwrap();
    let fetcher = ZipFetcher::new(HUMAN_OR_WORM);
    let ds = demo_human_or_worm(Split::Train)
        .cache_root(tmp.path())
        .downloader(downloader(&fetcher))
        .build()
        .unwrap();

    let err = ds.get(ds.len()).unwrap_err();
    assert!(matches!(err, Error::IndexOutOfRange { index: 5, len: 5 }));
}

#[test]
fn test_invalid_split_has_no_side_effects() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path().join("cache");

    let err = get_dataset("demo_human_or_worm", "validation").unwrap_err();
    assert!(matches!(err, Error::InvalidSplit(ref s) if s == "validation"));
    assert!(err.is_configuration());
    assert!(!root.exists());
    assert!(tree(tmp.path()).is_empty());
}

#[test]
fn test_get_dataset_string_split() {
    let tmp = tempfile::tempdir().unwrap();
    let fetcher = ZipFetcher::new(HUMAN_OR_WORM);
    let ds = get_dataset("demo_human_or_worm", "test")
        .unwrap()
        .cache_root(tmp.path())
        .downloader(downloader(&fetcher))
        .build()
        .unwrap();
    assert_eq!(ds.split(), Split::Test);
    assert_eq!(ds.get(0).unwrap(), ("ACGTACGT".to_string(), 0));
}

#[test]
fn test_cloud_cache_disabled_and_absent() {
    let tmp = tempfile::tempdir().unwrap();
    let fetcher = ZipFetcher::new(HUMAN_OR_WORM);
    let err = demo_human_or_worm(Split::Train)
        .cache_root(tmp.path())
        .use_cloud_cache(false)
        .downloader(downloader(&fetcher))
        .build()
        .unwrap_err();
    assert!(matches!(err, Error::CloudCacheDisabled(_)));
    assert_eq!(fetcher.calls(), 0);
}

#[test]
fn test_builder_force_download_refetches() {
    let tmp = tempfile::tempdir().unwrap();
    let fetcher = ZipFetcher::new(HUMAN_OR_WORM);
    for _ in 0..2 {
        demo_human_or_worm(Split::Train)
            .cache_root(tmp.path())
            .force_download(true)
            .downloader(downloader(&fetcher))
            .build()
            .unwrap();
    }
    assert_eq!(fetcher.calls(), 2);
}

// Combinators and loader over a real dataset

#[test]
fn test_validation_split_from_train() {
    let tmp = tempfile::tempdir().unwrap();
    let fetcher = ZipFetcher::new(HUMAN_OR_WORM);
    let ds = demo_human_or_worm(Split::Train)
        .cache_root(tmp.path())
        .downloader(downloader(&fetcher))
        .build()
        .unwrap();

    let splits = train_test_split(&ds, &[0.6, 0.4], 1).unwrap();
    assert_eq!(splits[0].len(), 3);
    assert_eq!(splits[1].len(), 2);
    assert!(splits[1].get(0).is_ok());
}

#[test]
fn test_loader_collates_sequence_batches() {
    let tmp = tempfile::tempdir().unwrap();
    let fetcher = ZipFetcher::new(HUMAN_OR_WORM);
    let ds = demo_human_or_worm(Split::Train)
        .cache_root(tmp.path())
        .cache_contents(true)
        .downloader(downloader(&fetcher))
        .build()
        .unwrap();

    let config = DataLoaderConfig::default()
        .batch_size(2)
        .shuffle(false)
        .num_workers(2);
    let mut loader = DataLoader::new(&ds, config);
    assert_eq!(loader.num_batches(), 3);

    let batches: Vec<SequenceBatch> = loader
        .iter_batches()
        .map(|b| b.map(|items| items.into_iter().collect::<SequenceBatch>()))
        .collect::<Result<_>>()
        .unwrap();
    assert_eq!(batches[0].labels, vec![0, 0]);
    assert_eq!(batches[0].sequences, vec!["TTAGGG", "CCCTAA"]);
    assert_eq!(batches[2].len(), 1);
}
