// DataLoader — batching, shuffling, iteration

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{thread_rng, SeedableRng};

use rayon::prelude::*;

use genbench_core::Result;

use crate::dataset::Dataset;

/// Configuration for the DataLoader.
#[derive(Debug, Clone)]
pub struct DataLoaderConfig {
    /// Number of items per batch.
    pub batch_size: usize,
    /// Whether to shuffle indices each epoch.
    pub shuffle: bool,
    /// Whether to drop the last incomplete batch.
    pub drop_last: bool,
    /// Number of parallel workers for item fetching (0 = sequential).
    pub num_workers: usize,
    /// Optional random seed for reproducible shuffling.
    pub seed: Option<u64>,
}

impl Default for DataLoaderConfig {
    fn default() -> Self {
        Self {
            batch_size: 32,
            shuffle: true,
            drop_last: false,
            num_workers: 0,
            seed: None,
        }
    }
}

impl DataLoaderConfig {
    pub fn batch_size(mut self, bs: usize) -> Self {
        self.batch_size = bs.max(1);
        self
    }

    pub fn shuffle(mut self, s: bool) -> Self {
        self.shuffle = s;
        self
    }

    pub fn drop_last(mut self, d: bool) -> Self {
        self.drop_last = d;
        self
    }

    pub fn num_workers(mut self, n: usize) -> Self {
        self.num_workers = n;
        self
    }

    pub fn seed(mut self, s: u64) -> Self {
        self.seed = Some(s);
        self
    }
}

/// A `(String, usize)` batch split into parallel vectors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SequenceBatch {
    pub sequences: Vec<String>,
    pub labels: Vec<usize>,
}

impl SequenceBatch {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

impl FromIterator<(String, usize)> for SequenceBatch {
    fn from_iter<I: IntoIterator<Item = (String, usize)>>(iter: I) -> Self {
        let (sequences, labels) = iter.into_iter().unzip();
        SequenceBatch { sequences, labels }
    }
}

/// A DataLoader wraps a Dataset and produces batches of items.
///
/// With a seed, every call to `reshuffle` draws a new permutation from the
/// same seeded generator, so a run is reproducible epoch by epoch.
pub struct DataLoader<'a, D: Dataset> {
    dataset: &'a D,
    config: DataLoaderConfig,
    indices: Vec<usize>,
    rng: Option<StdRng>,
}

impl<'a, D> DataLoader<'a, D>
where
    D: Dataset,
    D::Item: Send,
{
    /// Create a new DataLoader over a dataset.
    pub fn new(dataset: &'a D, config: DataLoaderConfig) -> Self {
        let indices: Vec<usize> = (0..dataset.len()).collect();
        let rng = config.seed.map(StdRng::seed_from_u64);
        Self {
            dataset,
            config,
            indices,
            rng,
        }
    }

    /// The number of batches per epoch.
    pub fn num_batches(&self) -> usize {
        let bs = self.config.batch_size.max(1);
        if self.config.drop_last {
            self.dataset.len() / bs
        } else {
            self.dataset.len().div_ceil(bs)
        }
    }

    /// Total number of items.
    pub fn len(&self) -> usize {
        self.dataset.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.dataset.is_empty()
    }

    /// Reshuffle indices (called at the start of each epoch).
    pub fn reshuffle(&mut self) {
        if !self.config.shuffle {
            return;
        }
        match self.rng.as_mut() {
            Some(rng) => self.indices.shuffle(rng),
            None => self.indices.shuffle(&mut thread_rng()),
        }
    }

    /// Fetch a slice of items, optionally in parallel via rayon.
    fn fetch_items(&self, indices: &[usize]) -> Result<Vec<D::Item>> {
        let dataset = self.dataset;
        if self.config.num_workers > 0 && indices.len() > 1 {
            indices.par_iter().map(|&i| dataset.get(i)).collect()
        } else {
            indices.iter().map(|&i| dataset.get(i)).collect()
        }
    }

    /// Produce all batches for one epoch.
    pub fn epoch_batches(&mut self) -> Result<Vec<Vec<D::Item>>> {
        self.iter_batches().collect()
    }

    /// Iterate over batches one at a time (lower memory than `epoch_batches`).
    pub fn iter_batches(&mut self) -> BatchIterator<'_, 'a, D> {
        self.reshuffle();
        BatchIterator {
            loader: self,
            batch_idx: 0,
        }
    }
}

/// Iterator that yields one batch at a time.
pub struct BatchIterator<'l, 'a, D: Dataset> {
    loader: &'l DataLoader<'a, D>,
    batch_idx: usize,
}

impl<'l, 'a, D> Iterator for BatchIterator<'l, 'a, D>
where
    D: Dataset,
    D::Item: Send,
{
    type Item = Result<Vec<D::Item>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.batch_idx >= self.loader.num_batches() {
            return None;
        }
        let bs = self.loader.config.batch_size.max(1);
        let n = self.loader.dataset.len();
        let start = self.batch_idx * bs;
        let end = (start + bs).min(n);
        self.batch_idx += 1;

        Some(self.loader.fetch_items(&self.loader.indices[start..end]))
    }
}
