// Cache location
//
// Datasets live under a single cache root:
//
//   <root>/<dataset_name>/<split>/<label>/<example_file>
//
// The root comes from `GENOMIC_BENCHMARKS_CACHE` when set, otherwise
// `~/.genomic_benchmarks`.

use std::env;
use std::path::{Path, PathBuf};

/// Environment variable overriding the cache root.
pub const CACHE_ENV_VAR: &str = "GENOMIC_BENCHMARKS_CACHE";

/// Directory name used under the user's home.
pub const CACHE_DIR_NAME: &str = ".genomic_benchmarks";

/// The default cache root for downloaded datasets.
pub fn default_cache_root() -> PathBuf {
    resolve_cache_root(
        env::var_os(CACHE_ENV_VAR).map(PathBuf::from),
        dirs::home_dir(),
    )
}

fn resolve_cache_root(overridden: Option<PathBuf>, home: Option<PathBuf>) -> PathBuf {
    match (overridden, home) {
        (Some(root), _) if !root.as_os_str().is_empty() => root,
        (_, Some(home)) => home.join(CACHE_DIR_NAME),
        _ => Path::new(CACHE_DIR_NAME).to_path_buf(),
    }
}
