//! Load cache for training logs
//!
//! Loading is the only expensive step; the engine itself never caches.
//! Entries are keyed by path and carry a [`FileStamp`]. A changed stamp means
//! the file was edited and the entry is reloaded.
//!
//! # Example
//!
//! ```rust,no_run
//! use training_charts::cache::CachedLoader;
//! use training_charts::Engine;
//!
//! # fn example() -> training_charts::Result<()> {
//! let loader = CachedLoader::in_memory();
//! let engine = Engine::builder().build()?;
//!
//! // First call reads the file, later calls reuse it until it changes
//! let log = loader.load("data/training-data.csv")?;
//! let series = engine.assemble(log.batches())?;
//! # Ok(())
//! # }
//! ```

mod memory;

pub use memory::MemoryLoadCache;

use crate::loader::TrainingLog;
use crate::Result;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;
use tracing::debug;

/// Modification time and size of a file when it was loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileStamp {
    modified: SystemTime,
    len: u64,
}

impl FileStamp {
    /// Read the current stamp of `path`.
    ///
    /// # Errors
    /// Returns error if the file metadata cannot be read
    pub fn of(path: &Path) -> Result<Self> {
        let meta = std::fs::metadata(path)?;
        Ok(Self {
            modified: meta.modified()?,
            len: meta.len(),
        })
    }
}

/// A cached log with the stamp it was loaded at.
#[derive(Debug, Clone)]
pub struct CachedLog {
    /// File stamp at load time
    pub stamp: FileStamp,
    /// Shared loaded log
    pub log: Arc<TrainingLog>,
}

/// Cache of loaded training logs.
///
/// Implementations must be shareable across rendering contexts.
pub trait LoadCache: Send + Sync {
    /// Get the cached entry for a path.
    fn get(&self, path: &Path) -> Option<CachedLog>;

    /// Store an entry, replacing any previous one.
    fn insert(&self, path: PathBuf, entry: CachedLog);

    /// Drop the entry for a path. No-op if absent.
    fn invalidate(&self, path: &Path);

    /// Drop every entry.
    fn clear(&self);
}

/// Loader that reuses cached logs until the file changes.
#[derive(Debug, Default)]
pub struct CachedLoader<C = MemoryLoadCache> {
    cache: C,
}

impl CachedLoader<MemoryLoadCache> {
    /// Loader backed by an in-memory cache.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(MemoryLoadCache::new())
    }
}

impl<C: LoadCache> CachedLoader<C> {
    /// Loader backed by `cache`.
    #[must_use]
    pub const fn new(cache: C) -> Self {
        Self { cache }
    }

    /// The underlying cache.
    #[must_use]
    pub const fn cache(&self) -> &C {
        &self.cache
    }

    /// Load `path`, reading the file only if it changed since the last load.
    ///
    /// # Errors
    /// Returns error if the file metadata or contents cannot be read
    pub fn load<P: AsRef<Path>>(&self, path: P) -> Result<Arc<TrainingLog>> {
        let path = path.as_ref();
        let stamp = FileStamp::of(path)?;

        if let Some(entry) = self.cache.get(path) {
            if entry.stamp == stamp {
                debug!(path = %path.display(), "training log cache hit");
                return Ok(entry.log);
            }
            debug!(path = %path.display(), "training log changed on disk, reloading");
        }

        let log = Arc::new(TrainingLog::load(path)?);
        self.cache.insert(
            path.to_path_buf(),
            CachedLog {
                stamp,
                log: Arc::clone(&log),
            },
        );
        Ok(log)
    }

    /// Forget the cached entry for `path`.
    pub fn invalidate<P: AsRef<Path>>(&self, path: P) {
        self.cache.invalidate(path.as_ref());
    }
}

#[cfg(feature = "tokio")]
impl<C: LoadCache + 'static> CachedLoader<C> {
    /// Load on the blocking thread pool.
    ///
    /// # Errors
    /// Returns error if the load fails or the blocking task panics
    pub async fn load_async(self: Arc<Self>, path: PathBuf) -> Result<Arc<TrainingLog>> {
        tokio::task::spawn_blocking(move || self.load(path))
            .await
            .map_err(|e| crate::Error::Other(format!("Load task failed: {e}")))?
    }
}
