// Cloud cache registry — (dataset name, version) -> archive download token
//
// The registry is a plain immutable value. Build one with `CloudCache::new()`
// and `with_entry`, or start from `CloudCache::default()` which holds the
// published genomic benchmark archives.

use std::collections::BTreeMap;
use std::fmt;

/// Identifies one archive in the registry: dataset name plus version.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DatasetKey {
    pub name: String,
    pub version: u32,
}

impl DatasetKey {
    pub fn new(name: impl Into<String>, version: u32) -> Self {
        Self {
            name: name.into(),
            version,
        }
    }
}

impl fmt::Display for DatasetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} v{}", self.name, self.version)
    }
}

/// Archives published to the cloud cache (Google Drive file ids).
const PUBLISHED: &[(&str, u32, &str)] = &[
    ("human_nontata_promoters", 0, "1VdUg0Zu8yfLS6QesBXwGz1PIQrTW3Ze4"),
    ("demo_coding_vs_intergenomic_seqs", 0, "1cpXg0ULuTGF7h1_HTYvc6p8M-ee43t-v"),
    ("demo_human_or_worm", 0, "1Vuc44bXRISqRDXNrxt5lGYLpLsJbrSg8"),
    ("dummy_mouse_enhancers_ensembl", 0, "1dz7dwvyM1TVUsCyuxxxn1ZMMFV381sl2"),
    ("human_enhancers_cohn", 0, "176563cDPQ5Y094WyoSBF02QjoVQhWuCh"),
    ("human_enhancers_ensembl", 0, "1gZBEV_RGxJE8EON5OObdrp5Tp8JL0Fxb"),
    ("human_ensembl_regulatory", 0, "1y_LInRF2aRXysigpwv_oU3Q67VVxfk18"),
];

/// Read-only mapping from [`DatasetKey`] to an opaque download token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloudCache {
    entries: BTreeMap<DatasetKey, String>,
}

impl CloudCache {
    /// An empty registry.
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Return a registry with one more entry (replacing an existing key).
    pub fn with_entry(mut self, name: &str, version: u32, token: &str) -> Self {
        self.entries
            .insert(DatasetKey::new(name, version), token.to_string());
        self
    }

    /// Download token for `(name, version)`, if registered.
    pub fn lookup(&self, name: &str, version: u32) -> Option<&str> {
        self.entries
            .get(&DatasetKey::new(name, version))
            .map(String::as_str)
    }

    pub fn contains(&self, name: &str, version: u32) -> bool {
        self.lookup(name, version).is_some()
    }

    /// Highest version registered for `name`.
    pub fn latest_version(&self, name: &str) -> Option<u32> {
        self.entries
            .keys()
            .filter(|k| k.name == name)
            .map(|k| k.version)
            .max()
    }

    /// Distinct dataset names, sorted.
    pub fn dataset_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(|k| k.name.as_str()).collect();
        names.dedup();
        names
    }

    /// Iterate over all `(key, token)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&DatasetKey, &str)> {
        self.entries.iter().map(|(k, v)| (k, v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for CloudCache {
    fn default() -> Self {
        PUBLISHED
            .iter()
            .fold(CloudCache::new(), |cache, &(name, version, token)| {
                cache.with_entry(name, version, token)
            })
    }
}
