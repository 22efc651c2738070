// Dataset trait — unified interface for indexed data sources

use genbench_core::Result;

/// A dataset is an indexed collection of items.
///
/// Implementations must be `Send + Sync` so a [`DataLoader`](crate::DataLoader)
/// can read from multiple threads when parallel fetching is enabled.
pub trait Dataset: Send + Sync {
    /// What `get` returns, e.g. `(String, usize)` for a sequence and its label.
    type Item;

    /// Total number of items in the dataset.
    fn len(&self) -> usize;

    /// Whether the dataset is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Retrieve the item at position `index`.
    ///
    /// # Errors
    /// `Error::IndexOutOfRange` if `index >= self.len()`, or whatever the
    /// underlying storage reports while reading the item.
    fn get(&self, index: usize) -> Result<Self::Item>;

    /// Optional human-readable name.
    fn name(&self) -> &str {
        "dataset"
    }
}

impl<D: Dataset + ?Sized> Dataset for &D {
    type Item = D::Item;

    fn len(&self) -> usize {
        (**self).len()
    }

    fn get(&self, index: usize) -> Result<Self::Item> {
        (**self).get(index)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// Bounds check shared by dataset implementations.
pub(crate) fn check_index(index: usize, len: usize) -> Result<()> {
    if index < len {
        Ok(())
    } else {
        Err(genbench_core::Error::IndexOutOfRange { index, len })
    }
}
