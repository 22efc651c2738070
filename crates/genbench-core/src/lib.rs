//! # genbench-core
//!
//! Shared types for the genbench dataset loaders.
//!
//! This crate provides:
//! - [`Error`] / [`Result`] — the single error type used across the workspace
//! - [`CloudCache`] / [`DatasetKey`] — the immutable registry mapping a dataset
//!   name and version to the token of its archive in the cloud cache
//! - [`config`] — where datasets are cached on disk

pub mod config;
pub mod error;
pub mod registry;

pub use config::{default_cache_root, CACHE_ENV_VAR};
pub use error::{Error, Result};
pub use registry::{CloudCache, DatasetKey};
