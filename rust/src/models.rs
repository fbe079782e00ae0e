//! Core data types shared by the cache and its Python surface.

use pyo3::prelude::*;

/// Dense string id (u32 for compact storage, as in the lookup index).
pub type StringId = u32;

/// A (string, id) pair, as stored in the cache or supplied in a snapshot.
#[pyclass]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CacheEntry {
    #[pyo3(get, set)]
    pub string: String,
    #[pyo3(get, set)]
    pub id: StringId,
}

#[pymethods]
impl CacheEntry {
    #[new]
    pub fn new(string: String, id: StringId) -> Self {
        Self { string, id }
    }

    fn __repr__(&self) -> String {
        format!("CacheEntry(string={:?}, id={})", self.string, self.id)
    }
}

/// A snapshot: entries used to bulk-initialize or replace cache contents.
pub type CacheEntries = Vec<CacheEntry>;

impl<S: Into<String>> From<(S, StringId)> for CacheEntry {
    fn from((string, id): (S, StringId)) -> Self {
        Self::new(string.into(), id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_from_tuple() {
        let entry: CacheEntry = ("/file/pathOne", 3).into();
        assert_eq!(entry.string, "/file/pathOne");
        assert_eq!(entry.id, 3);
    }
}
