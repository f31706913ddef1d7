use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, OnceLock};

use super::error::DataError;
use super::model::PreparedData;

// ---------------------------------------------------------------------------
// DatasetCache – load + prepare each path at most once
// ---------------------------------------------------------------------------

/// Memoizes [`super::load_and_prepare`] by path.
///
/// Entries are never invalidated. Failed loads are not stored, so the next
/// call for the same path tries again.
#[derive(Default)]
pub struct DatasetCache {
    entries: Mutex<HashMap<PathBuf, Arc<PreparedData>>>,
    loads: AtomicUsize,
}

impl DatasetCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide cache used by the dashboard.
    pub fn global() -> &'static DatasetCache {
        static GLOBAL: OnceLock<DatasetCache> = OnceLock::new();
        GLOBAL.get_or_init(DatasetCache::new)
    }

    /// Return the prepared tables for `path`, reading the file only on the
    /// first successful call.
    pub fn get_or_load(&self, path: &Path) -> Result<Arc<PreparedData>, DataError> {
        self.get_or_load_with(path, super::load_and_prepare)
    }

    /// Same as [`Self::get_or_load`] with an injected loader.
    pub fn get_or_load_with<F>(&self, path: &Path, load: F) -> Result<Arc<PreparedData>, DataError>
    where
        F: FnOnce(&Path) -> Result<PreparedData, DataError>,
    {
        // The lock is held across the load so concurrent callers never read
        // the same file twice.
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(hit) = entries.get(path) {
            log::debug!("Cache hit for {}", path.display());
            return Ok(Arc::clone(hit));
        }

        log::info!("Cache miss for {}, loading", path.display());
        self.loads.fetch_add(1, Ordering::Relaxed);
        let prepared = Arc::new(load(path)?);
        entries.insert(path.to_path_buf(), Arc::clone(&prepared));
        Ok(prepared)
    }

    /// Number of times a loader actually ran.
    pub fn loads(&self) -> usize {
        self.loads.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fake_load(_: &Path) -> Result<PreparedData, DataError> {
        Ok(PreparedData {
            source_rows: 3,
            ..Default::default()
        })
    }

    #[test]
    fn same_path_loads_once() {
        let cache = DatasetCache::new();
        let path = Path::new("data/a.csv");

        let first = cache.get_or_load_with(path, fake_load).unwrap();
        let second = cache.get_or_load_with(path, |_| panic!("loader must not run again")).unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.loads(), 1);
    }

    #[test]
    fn different_paths_load_separately() {
        let cache = DatasetCache::new();
        cache.get_or_load_with(Path::new("a.csv"), fake_load).unwrap();
        cache.get_or_load_with(Path::new("b.csv"), fake_load).unwrap();
        assert_eq!(cache.loads(), 2);
    }

    #[test]
    fn failures_are_not_cached() {
        let cache = DatasetCache::new();
        let path = Path::new("flaky.csv");

        let err = cache
            .get_or_load_with(path, |_| Err(DataError::MissingColumn("YEAR".into())))
            .unwrap_err();
        assert!(matches!(err, DataError::MissingColumn(_)));

        let ok = cache.get_or_load_with(path, fake_load).unwrap();
        assert_eq!(ok.source_rows, 3);
        assert_eq!(cache.loads(), 2);
    }

    #[test]
    fn real_loader_reads_file_once() {
        use std::io::Write;

        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(
            file,
            "YEAR,MONTH,REGION,MM_TOTAL_PRECIP,GEOGRAPHIC_ZONE,ANNUAL_EMISSIONS_CHILE,LATITUDE"
        )
        .unwrap();
        writeln!(file, "2000,1,R1,4.0,Centro,100,-33").unwrap();
        file.flush().unwrap();

        let cache = DatasetCache::new();
        let first = cache.get_or_load(file.path()).unwrap();

        // Rewriting the file must not change what the cache hands out.
        writeln!(file, "2001,1,R1,9.0,Centro,110,-33").unwrap();
        file.flush().unwrap();
        let second = cache.get_or_load(file.path()).unwrap();

        assert_eq!(first.source_rows, 1);
        assert!(Arc::ptr_eq(&first, &second));
    }
}
