//! Parsed-LUT cache keyed by file path.
//!
//! A LUT is parsed once per distinct file and the resulting table is
//! published as an `Arc` shared by every frame and worker thread that
//! needs it. An entry goes stale when the file's modification time
//! changes, so edited grades reload without restarting the process.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use std::time::SystemTime;

use framefx_lut::{Lut, cube};
use tracing::{debug, trace};

use crate::OpsResult;

/// A cached table together with the mtime it was parsed at.
struct Entry {
    lut: Arc<Lut>,
    mtime: Option<SystemTime>,
}

/// Cache counters.
#[derive(Debug, Clone, Copy, Default)]
pub struct CacheStats {
    /// Lookups served from the cache.
    pub hits: u64,
    /// Lookups that parsed a file for the first time.
    pub misses: u64,
    /// Reparses forced by a changed modification time.
    pub reloads: u64,
}

/// Thread-safe cache of parsed LUTs.
///
/// Construction is serialized behind the map's write lock, so a file is
/// parsed once no matter how many frames ask for it concurrently.
/// Lookups against the published tables need no locking at all; a
/// [`Lut`] is immutable once built.
///
/// # Example
///
/// ```rust,ignore
/// use framefx_ops::cache::LutCache;
///
/// let cache = LutCache::new();
/// let lut = cache.get_or_load("grade.cube")?;
/// let again = cache.get_or_load("grade.cube")?; // same Arc, no reparse
/// ```
#[derive(Default)]
pub struct LutCache {
    entries: RwLock<HashMap<PathBuf, Entry>>,
    stats: RwLock<CacheStats>,
}

impl LutCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the LUT for `path`, parsing the file on first use.
    ///
    /// A failed parse surfaces as a typed error and caches nothing;
    /// callers that prefer pass-through over failure can degrade to
    /// [`Lut::identity`] on a `Format` error.
    pub fn get_or_load(&self, path: impl AsRef<Path>) -> OpsResult<Arc<Lut>> {
        let path = path.as_ref();
        let mtime = std::fs::metadata(path).ok().and_then(|m| m.modified().ok());

        if let Some(entry) = self.entries.read().unwrap().get(path) {
            if entry.mtime == mtime {
                self.stats.write().unwrap().hits += 1;
                trace!(path = %path.display(), "LUT cache hit");
                return Ok(entry.lut.clone());
            }
        }

        // Stale or missing: take the write lock, re-check (another
        // thread may have parsed meanwhile), then parse under the lock.
        let mut entries = self.entries.write().unwrap();
        if let Some(entry) = entries.get(path) {
            if entry.mtime == mtime {
                self.stats.write().unwrap().hits += 1;
                return Ok(entry.lut.clone());
            }
        }

        let reload = entries.contains_key(path);
        let lut = Arc::new(cube::read(path)?);
        debug!(path = %path.display(), reload, "parsed LUT file");
        {
            let mut stats = self.stats.write().unwrap();
            if reload {
                stats.reloads += 1;
            } else {
                stats.misses += 1;
            }
        }
        entries.insert(
            path.to_path_buf(),
            Entry {
                lut: lut.clone(),
                mtime,
            },
        );
        Ok(lut)
    }

    /// Drops the entry for `path`, forcing the next load to reparse.
    pub fn invalidate(&self, path: impl AsRef<Path>) {
        self.entries.write().unwrap().remove(path.as_ref());
    }

    /// Drops every cached entry.
    pub fn clear(&self) {
        self.entries.write().unwrap().clear();
    }

    /// Number of cached LUTs.
    pub fn len(&self) -> usize {
        self.entries.read().unwrap().len()
    }

    /// Returns `true` if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.entries.read().unwrap().is_empty()
    }

    /// Snapshot of the hit/miss counters.
    pub fn stats(&self) -> CacheStats {
        *self.stats.read().unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::OpsError;
    use framefx_lut::{LutError, Rgb};
    use std::fs;
    use std::time::Duration;

    const RAMP: &str = "LUT_1D_SIZE 2\n0.0 0.0 0.0\n1.0 1.0 1.0\n";
    const INVERTED: &str = "LUT_1D_SIZE 2\n1.0 1.0 1.0\n0.0 0.0 0.0\n";

    #[test]
    fn second_load_shares_the_same_table() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ramp.cube");
        fs::write(&path, RAMP).unwrap();

        let cache = LutCache::new();
        let first = cache.get_or_load(&path).unwrap();
        let second = cache.get_or_load(&path).unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        let stats = cache.stats();
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.hits, 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn changed_mtime_triggers_a_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grade.cube");
        fs::write(&path, RAMP).unwrap();

        let cache = LutCache::new();
        let first = cache.get_or_load(&path).unwrap();
        assert_eq!(first.lookup(Rgb::new(0, 0, 0)), Rgb::new(0, 0, 0));

        // Rewrite and push the mtime forward so the change is visible
        // even on coarse-granularity filesystems.
        fs::write(&path, INVERTED).unwrap();
        let file = fs::OpenOptions::new().write(true).open(&path).unwrap();
        file.set_modified(SystemTime::now() + Duration::from_secs(5))
            .unwrap();

        let second = cache.get_or_load(&path).unwrap();
        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(second.lookup(Rgb::new(0, 0, 0)), Rgb::new(255, 255, 255));
        assert_eq!(cache.stats().reloads, 1);
    }

    #[test]
    fn invalidate_forces_a_reparse() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ramp.cube");
        fs::write(&path, RAMP).unwrap();

        let cache = LutCache::new();
        let first = cache.get_or_load(&path).unwrap();
        cache.invalidate(&path);
        assert!(cache.is_empty());

        let second = cache.get_or_load(&path).unwrap();
        assert!(!Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn missing_file_surfaces_an_io_error_and_caches_nothing() {
        let cache = LutCache::new();
        let err = cache.get_or_load("/nonexistent/grade.cube").unwrap_err();
        assert!(matches!(err, OpsError::Lut(LutError::Io(_))));
        assert!(cache.is_empty());
    }

    #[test]
    fn malformed_file_surfaces_a_format_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.cube");
        fs::write(&path, "LUT_1D_SIZE 4\n0.0 0.0 0.0\n").unwrap();

        let cache = LutCache::new();
        let err = cache.get_or_load(&path).unwrap_err();
        assert!(matches!(err, OpsError::Lut(LutError::Format { .. })));
        // The documented fallback stays available to the caller.
        let fallback = Lut::identity();
        assert_eq!(fallback.lookup(Rgb::new(42, 7, 99)), Rgb::new(42, 7, 99));
    }

    #[test]
    fn concurrent_loads_of_one_path_parse_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ramp.cube");
        fs::write(&path, RAMP).unwrap();

        let cache = LutCache::new();
        std::thread::scope(|s| {
            for _ in 0..4 {
                s.spawn(|| cache.get_or_load(&path).unwrap());
            }
        });
        assert_eq!(cache.stats().misses, 1);
        assert_eq!(cache.stats().hits + cache.stats().misses, 4);
    }
}
