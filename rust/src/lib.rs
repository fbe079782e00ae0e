//! Rust implementation of the path cache used by the build pipeline.
//!
//! This module provides a string cache that assigns dense integer ids to
//! file paths, plus the Python bindings the pipeline loads it through.

// Allow clippy warning triggered by PyO3 macro expansion
#![allow(clippy::useless_conversion)]

use pyo3::exceptions::{PyIndexError, PyValueError};
use pyo3::prelude::*;

pub mod logging;

mod config;
mod models;
pub mod string_cache;

pub use config::{ConfigError, StringCacheConfig};
pub use models::{CacheEntries, CacheEntry, StringId};
pub use string_cache::{KeyOrder, StringCache, StringCacheError, DEFAULT_CAPACITY};

/// Convert a Python-side id, which may be negative, into a cache id.
fn to_string_id(id: i64, len: usize) -> Result<StringId, StringCacheError> {
    StringId::try_from(id).map_err(|_| StringCacheError::OutOfRange { id, len })
}

fn cache_error_to_py(err: StringCacheError) -> PyErr {
    match err {
        StringCacheError::OutOfRange { .. } => PyIndexError::new_err(err.to_string()),
        StringCacheError::DuplicateId(_) | StringCacheError::DuplicateValue { .. } => {
            PyValueError::new_err(err.to_string())
        }
    }
}

/// String cache (PyO3 wrapper).
///
/// Not thread-safe on the Rust side; PyO3 serializes access through the
/// object's borrow flag.
#[pyclass(name = "StringCache")]
#[derive(Clone, Debug)]
pub struct PyStringCache {
    inner: StringCache,
}

#[pymethods]
impl PyStringCache {
    #[new]
    #[pyo3(signature = (config=None))]
    fn new(config: Option<StringCacheConfig>) -> PyResult<Self> {
        let config = config.unwrap_or_default();
        match StringCache::from_config(&config) {
            Ok(inner) => Ok(Self { inner }),
            Err(e) => Err(PyValueError::new_err(e.to_string())),
        }
    }

    /// Id for `string`, inserting it if it has not been seen.
    fn id(&mut self, string: &str) -> StringId {
        self.inner.id(string)
    }

    /// Ids for a list of strings, positionally.
    fn ids(&mut self, strings: Vec<String>) -> Vec<StringId> {
        self.inner.ids(&strings)
    }

    /// Id for `string` if present, else None. Never inserts.
    fn lookup(&self, string: &str) -> Option<StringId> {
        self.inner.lookup(string)
    }

    /// String for `id`.
    ///
    /// # Raises
    /// * IndexError if `id` is negative or not below the cache size
    fn string(&self, id: i64) -> PyResult<String> {
        let id = to_string_id(id, self.inner.len()).map_err(cache_error_to_py)?;
        self.inner
            .string(id)
            .map(str::to_string)
            .map_err(cache_error_to_py)
    }

    /// Strings for a list of ids, positionally.
    ///
    /// # Raises
    /// * IndexError if any id is invalid
    fn strings(&self, ids: Vec<i64>) -> PyResult<Vec<String>> {
        ids.into_iter()
            .map(|id| self.string(id))
            .collect()
    }

    fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    fn __len__(&self) -> usize {
        self.inner.len()
    }

    /// Replace the contents with a validated snapshot.
    ///
    /// # Raises
    /// * ValueError on duplicate ids or duplicate strings
    /// * IndexError if the ids are not exactly 0..len(entries)
    fn populate(&mut self, entries: Vec<CacheEntry>) -> PyResult<()> {
        self.inner.populate(entries).map_err(cache_error_to_py)
    }

    /// Replace the contents with a snapshot WITHOUT validation.
    ///
    /// Only for trusted snapshots such as the output of `snapshot()`. A
    /// malformed snapshot raises nothing and makes later lookups wrong.
    fn unchecked_populate(&mut self, entries: Vec<CacheEntry>) {
        self.inner.unchecked_populate(entries);
    }

    /// All entries in id order.
    fn snapshot(&self) -> Vec<CacheEntry> {
        self.inner.snapshot()
    }

    fn __repr__(&self) -> String {
        format!(
            "StringCache(len={}, order={:?})",
            self.inner.len(),
            self.inner.order().as_str()
        )
    }
}

/// Build a cache from a snapshot in one call.
///
/// # Arguments
/// * `entries` - Snapshot entries (string, id)
/// * `config` - Optional cache configuration
///
/// # Raises
/// * ValueError on an invalid config, duplicate ids or duplicate strings
/// * IndexError if the ids are not exactly 0..len(entries)
#[pyfunction]
#[pyo3(signature = (entries, config=None))]
fn cache_from_snapshot(
    entries: Vec<CacheEntry>,
    config: Option<StringCacheConfig>,
) -> PyResult<PyStringCache> {
    let mut cache = PyStringCache::new(config)?;
    cache.populate(entries)?;
    Ok(cache)
}

/// The pathcache.rust Python module.
#[pymodule]
fn rust(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Core data types
    m.add_class::<CacheEntry>()?;
    m.add_class::<PyStringCache>()?;

    // Config types
    m.add_class::<StringCacheConfig>()?;

    m.add_function(wrap_pyfunction!(cache_from_snapshot, m)?)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_id_is_out_of_range() {
        assert_eq!(
            to_string_id(-1, 3),
            Err(StringCacheError::OutOfRange { id: -1, len: 3 })
        );
    }

    #[test]
    fn test_non_negative_id_converts() {
        assert_eq!(to_string_id(2, 3), Ok(2));
        // Range against the cache size is checked by the lookup itself
        assert_eq!(to_string_id(7, 3), Ok(7));
    }

    #[test]
    fn test_id_above_u32_is_out_of_range() {
        let id = i64::from(u32::MAX) + 1;
        assert!(matches!(
            to_string_id(id, 0),
            Err(StringCacheError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_wrapper_round_trip() {
        let mut cache = PyStringCache::new(None).unwrap();
        let ids = cache.ids(vec!["/a.c".to_string(), "/b.c".to_string(), "/a.c".to_string()]);
        assert_eq!(ids, vec![0, 1, 0]);
        assert_eq!(cache.__len__(), 2);
        assert_eq!(cache.lookup("/b.c"), Some(1));
        assert_eq!(cache.snapshot().len(), 2);
        assert!(!cache.is_empty());
    }
}
