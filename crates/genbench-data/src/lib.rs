//! # genbench-data
//!
//! Cached download and indexed access for genomic sequence classification
//! benchmarks.
//!
//! This crate provides:
//! - [`Dataset`] trait — unified interface for any indexed data source
//! - [`CloudCacheDownloader`] — download-once gate in front of the cloud cache
//! - [`GenomicClfDataset`] — `(sequence, label)` view over one cached split
//! - [`named`] — one constructor per published benchmark
//! - [`DataLoader`] — batching, shuffling, parallel iteration over a Dataset
//   - Dataset combinators — SubsetDataset, ConcatDataset, MapDataset
//   - Train/validation splitting with reproducible seeding
//   - Zip archive unpacking and the Google Drive fetcher

pub mod archive;
pub mod cache;
pub mod combinators;
pub mod dataset;
pub mod fetch;
pub mod genomic;
pub mod loader;
pub mod named;

pub use cache::{is_downloaded, CloudCacheDownloader};
pub use combinators::{train_test_split, ConcatDataset, MapDataset, SubsetDataset};
pub use dataset::Dataset;
pub use fetch::{Fetcher, GoogleDriveFetcher};
pub use genomic::{GenomicClfDataset, GenomicClfDatasetBuilder, Split};
pub use loader::{DataLoader, DataLoaderConfig, SequenceBatch};
pub use named::get_dataset;
