use std::path::PathBuf;

/// Boxed error from an underlying transport or decoder, kept as the `source`.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// All errors that can occur while fetching or reading a dataset.
///
/// Configuration problems (bad split, unknown registry key) fail before any
/// filesystem or network side effect. Transport, archive and I/O errors carry
/// the underlying error unmodified as their source.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Split was not exactly `"train"` or `"test"`.
    #[error("invalid split '{0}': expected 'train' or 'test'")]
    InvalidSplit(String),

    /// The `(name, version)` pair has no entry in the cloud cache registry.
    #[error("dataset '{name}' version {version} not found in the cloud cache")]
    NotInCloudCache { name: String, version: u32 },

    /// No version at all is registered for this dataset name.
    #[error("unknown dataset '{0}': no version is registered in the cloud cache")]
    UnknownDataset(String),

    /// A download was needed but the cloud cache was disabled by the caller.
    #[error("dataset '{0}' is not cached locally and the cloud cache is disabled")]
    CloudCacheDisabled(String),

    /// Network failure (or non-success HTTP status) while fetching an archive.
    #[error("failed to download '{token}': {source}")]
    Transport {
        token: String,
        #[source]
        source: BoxError,
    },

    /// The downloaded archive could not be read.
    #[error("failed to unpack {}: {source}", .path.display())]
    Archive {
        path: PathBuf,
        #[source]
        source: BoxError,
    },

    /// Filesystem error during delete, unpack or read.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Dataset index outside `[0, len)`.
    #[error("index {index} out of range for dataset of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// Generic message for cases not covered above.
    #[error("{0}")]
    Msg(String),
}

impl Error {
    /// Create an error from any string message.
    pub fn msg(s: impl Into<String>) -> Self {
        Error::Msg(s.into())
    }

    /// Wrap a transport-level failure for the given download token.
    pub fn transport(token: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Error::Transport {
            token: token.into(),
            source: source.into(),
        }
    }

    /// Whether this error stems from bad caller input rather than I/O.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Error::InvalidSplit(_)
                | Error::NotInCloudCache { .. }
                | Error::UnknownDataset(_)
                | Error::CloudCacheDisabled(_)
        )
    }
}

/// Convenience Result type used throughout genbench.
pub type Result<T> = std::result::Result<T, Error>;

/// Macro for early return with a formatted error message.
/// Usage: `bail!("something went wrong: {}", detail)`
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::Error::Msg(format!($($arg)*)))
    };
}
