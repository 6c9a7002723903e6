//! Process-wide read-through cache of loaded datasets.
//!
//! The cache is created once at startup and handed to callers explicitly.
//! Entries are keyed by canonical file path and never invalidated: the
//! source file is assumed not to change during a session.

use crate::dataset::Dataset;
use crate::error::{ReportingError, Result};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// Shared, thread-safe dataset cache.
#[derive(Debug, Default)]
pub struct DatasetCache {
    entries: RwLock<HashMap<PathBuf, Arc<Dataset>>>,
}

impl DatasetCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached dataset for `path`, loading it on first access.
    pub fn get_or_load(&self, path: impl AsRef<Path>) -> Result<Arc<Dataset>> {
        let key = Self::cache_key(path.as_ref())?;

        if let Some(dataset) = self.entries.read().get(&key) {
            debug!("Dataset cache hit: {}", key.display());
            return Ok(Arc::clone(dataset));
        }

        debug!("Dataset cache miss: {}", key.display());
        let loaded = Arc::new(Dataset::load(&key)?);

        // Another caller may have loaded the same file meanwhile; keep the first.
        let mut entries = self.entries.write();
        let dataset = entries.entry(key).or_insert(loaded);
        Ok(Arc::clone(dataset))
    }

    /// Whether `path` has already been loaded.
    pub fn contains(&self, path: impl AsRef<Path>) -> bool {
        Self::cache_key(path.as_ref())
            .map(|key| self.entries.read().contains_key(&key))
            .unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    fn cache_key(path: &Path) -> Result<PathBuf> {
        std::fs::canonicalize(path).map_err(|e| {
            ReportingError::DatasetLoad(format!("cannot resolve {}: {e}", path.display()))
        })
    }
}

// The cache is shared between threads behind an `Arc`.
static_assertions::assert_impl_all!(DatasetCache: Send, Sync);
static_assertions::assert_impl_all!(Dataset: Send, Sync);
