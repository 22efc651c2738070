// Dataset combinators — subset, concatenate, map, split

use genbench_core::{Error, Result};

use crate::dataset::{check_index, Dataset};

// SubsetDataset — view of selected indices

/// A dataset that exposes only the items at the given indices.
///
/// This is how a validation split is carved out of `train`.
pub struct SubsetDataset<D: Dataset> {
    inner: D,
    indices: Vec<usize>,
}

impl<D: Dataset> SubsetDataset<D> {
    /// Create a subset of `inner` containing only the items at `indices`.
    ///
    /// Out-of-range indices surface as `IndexOutOfRange` from `get`.
    pub fn new(inner: D, indices: Vec<usize>) -> Self {
        Self { inner, indices }
    }

    /// Indices into the inner dataset, in subset order.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }
}

impl<D: Dataset> Dataset for SubsetDataset<D> {
    type Item = D::Item;

    fn len(&self) -> usize {
        self.indices.len()
    }

    fn get(&self, index: usize) -> Result<D::Item> {
        check_index(index, self.indices.len())?;
        self.inner.get(self.indices[index])
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}

// ConcatDataset — concatenate multiple datasets

/// Concatenate datasets end-to-end, e.g. `train` followed by `test`.
pub struct ConcatDataset<T> {
    datasets: Vec<Box<dyn Dataset<Item = T>>>,
    cumulative_sizes: Vec<usize>,
}

impl<T> ConcatDataset<T> {
    pub fn new(datasets: Vec<Box<dyn Dataset<Item = T>>>) -> Self {
        let mut cumulative_sizes = Vec::with_capacity(datasets.len());
        let mut total = 0;
        for ds in &datasets {
            total += ds.len();
            cumulative_sizes.push(total);
        }
        Self {
            datasets,
            cumulative_sizes,
        }
    }

    /// Locate which dataset and local index a global index maps to.
    fn locate(&self, index: usize) -> Option<(usize, usize)> {
        let ds_idx = self.cumulative_sizes.partition_point(|&cum| cum <= index);
        if ds_idx == self.datasets.len() {
            return None;
        }
        let offset = if ds_idx == 0 {
            0
        } else {
            self.cumulative_sizes[ds_idx - 1]
        };
        Some((ds_idx, index - offset))
    }
}

impl<T> Dataset for ConcatDataset<T> {
    type Item = T;

    fn len(&self) -> usize {
        self.cumulative_sizes.last().copied().unwrap_or(0)
    }

    fn get(&self, index: usize) -> Result<T> {
        let (ds_idx, local_idx) = self.locate(index).ok_or(Error::IndexOutOfRange {
            index,
            len: self.len(),
        })?;
        self.datasets[ds_idx].get(local_idx)
    }

    fn name(&self) -> &str {
        "concat"
    }
}

// MapDataset — apply a function lazily

/// Wraps a dataset and applies `f` to each item on `get()`.
pub struct MapDataset<D, F> {
    inner: D,
    f: F,
}

impl<D, F, U> MapDataset<D, F>
where
    D: Dataset,
    F: Fn(D::Item) -> U + Send + Sync,
{
    pub fn new(inner: D, f: F) -> Self {
        Self { inner, f }
    }
}

impl<D, F, U> Dataset for MapDataset<D, F>
where
    D: Dataset,
    F: Fn(D::Item) -> U + Send + Sync,
{
    type Item = U;

    fn len(&self) -> usize {
        self.inner.len()
    }

    fn get(&self, index: usize) -> Result<U> {
        self.inner.get(index).map(&self.f)
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}

// Train / Validation / Test Split

/// Split a dataset into (train, val) or (train, val, test) subsets.
///
/// Returns `SubsetDataset` views over the original dataset.
///
/// # Arguments
/// * `dataset` — the source dataset
/// * `ratios` — slice of 2 or 3 floats that sum to 1.0, e.g. `[0.8, 0.2]`
///   or `[0.7, 0.15, 0.15]`
/// * `seed` — random seed for reproducible shuffling of indices
pub fn train_test_split<D>(dataset: D, ratios: &[f64], seed: u64) -> Result<Vec<SubsetDataset<D>>>
where
    D: Dataset + Clone,
{
    use rand::rngs::StdRng;
    use rand::seq::SliceRandom;
    use rand::SeedableRng;

    if !(2..=3).contains(&ratios.len()) {
        genbench_core::bail!("train_test_split: ratios must have 2 or 3 elements");
    }
    let sum: f64 = ratios.iter().sum();
    if (sum - 1.0).abs() > 1e-6 || ratios.iter().any(|r| *r < 0.0) {
        genbench_core::bail!(
            "train_test_split: ratios must be non-negative and sum to 1.0, got {}",
            sum
        );
    }

    let n = dataset.len();
    let mut indices: Vec<usize> = (0..n).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let mut splits = Vec::new();
    let mut offset = 0;
    for (i, &ratio) in ratios.iter().enumerate() {
        let count = if i == ratios.len() - 1 {
            n - offset // give remainder to last split
        } else {
            (n as f64 * ratio).round() as usize
        };
        let end = (offset + count).min(n);
        splits.push(SubsetDataset::new(
            dataset.clone(),
            indices[offset..end].to_vec(),
        ));
        offset = end;
    }

    Ok(splits)
}

// Tests
