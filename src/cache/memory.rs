//! In-memory load cache using `DashMap`.
//!
//! Entries live for the lifetime of the process or until invalidated.

use super::{CachedLog, LoadCache};
use dashmap::DashMap;
use std::path::{Path, PathBuf};

/// In-memory load cache using a lock-free concurrent hashmap.
///
/// Thread-safe, so one cache can serve every rendering context.
#[derive(Debug, Default)]
pub struct MemoryLoadCache {
    entries: DashMap<PathBuf, CachedLog>,
}

impl MemoryLoadCache {
    /// Create a new empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// Number of cached logs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the cache is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl LoadCache for MemoryLoadCache {
    fn get(&self, path: &Path) -> Option<CachedLog> {
        self.entries.get(path).map(|entry| entry.value().clone())
    }

    fn insert(&self, path: PathBuf, entry: CachedLog) {
        self.entries.insert(path, entry);
    }

    fn invalidate(&self, path: &Path) {
        self.entries.remove(path);
    }

    fn clear(&self) {
        self.entries.clear();
    }
}
