//! Snapshot validation and table construction for bulk loads.

use rustc_hash::FxHashSet;

use crate::models::{CacheEntries, CacheEntry, StringId};

use super::error::StringCacheError;
use super::index::SortedIndex;
use super::order::KeyOrder;

/// Storage table and lookup index built from a snapshot, not yet installed.
pub(super) struct Tables {
    pub(super) strings: Vec<String>,
    pub(super) index: SortedIndex,
}

/// Check that snapshot ids are unique and form exactly `0..entries.len()`.
///
/// Duplicates are reported before gaps: a snapshot with a repeated id
/// necessarily also leaves a gap.
pub(super) fn check_ids(entries: &[CacheEntry]) -> Result<(), StringCacheError> {
    let mut seen: FxHashSet<StringId> =
        FxHashSet::with_capacity_and_hasher(entries.len(), Default::default());
    for entry in entries {
        if !seen.insert(entry.id) {
            return Err(StringCacheError::DuplicateId(entry.id));
        }
    }

    // Unique ids whose maximum is count - 1 cover 0..count exactly
    match entries.iter().map(|entry| entry.id).max() {
        Some(max_id) if max_id as usize != entries.len() - 1 => Err(StringCacheError::OutOfRange {
            id: i64::from(max_id),
            len: entries.len(),
        }),
        _ => Ok(()),
    }
}

/// Lay the snapshot out by id and sort the lookup index.
///
/// Entries are placed by their rank in id order, which is their id when the
/// snapshot is dense. Nothing is checked here.
pub(super) fn build(mut entries: CacheEntries, order: KeyOrder) -> Tables {
    entries.sort_unstable_by_key(|entry| entry.id);
    let strings: Vec<String> = entries.into_iter().map(|entry| entry.string).collect();
    let index = SortedIndex::build(&strings, order);
    Tables { strings, index }
}

/// Validate a snapshot and build its tables.
pub(super) fn build_checked(
    entries: CacheEntries,
    order: KeyOrder,
) -> Result<Tables, StringCacheError> {
    check_ids(&entries)?;
    let tables = build(entries, order);
    check_values(&tables, order)?;
    Ok(tables)
}

/// Check that no two ids in freshly built tables denote the same value.
pub(super) fn check_values(tables: &Tables, order: KeyOrder) -> Result<(), StringCacheError> {
    match tables.index.first_duplicate(&tables.strings, order) {
        Some((first, second)) => Err(StringCacheError::DuplicateValue {
            value: tables.strings[first as usize].clone(),
            first,
            second,
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(pairs: &[(&str, StringId)]) -> CacheEntries {
        pairs.iter().map(|&pair| CacheEntry::from(pair)).collect()
    }

    #[test]
    fn test_check_ids_accepts_shuffled_dense_range() {
        let snapshot = entries(&[("/c", 2), ("/a", 0), ("/d", 3), ("/b", 1)]);
        assert_eq!(check_ids(&snapshot), Ok(()));
    }

    #[test]
    fn test_check_ids_accepts_empty_snapshot() {
        assert_eq!(check_ids(&[]), Ok(()));
    }

    #[test]
    fn test_duplicate_reported_before_gap() {
        let snapshot = entries(&[("/a", 0), ("/b", 1), ("/c", 2), ("/d", 2)]);
        assert_eq!(check_ids(&snapshot), Err(StringCacheError::DuplicateId(2)));
    }

    #[test]
    fn test_gap_is_out_of_range() {
        let snapshot = entries(&[("/a", 0), ("/b", 1), ("/c", 2), ("/d", 4)]);
        assert_eq!(
            check_ids(&snapshot),
            Err(StringCacheError::OutOfRange { id: 4, len: 4 })
        );
    }

    #[test]
    fn test_build_places_entries_by_id() {
        let tables = build(entries(&[("/b", 1), ("/c", 2), ("/a", 0)]), KeyOrder::Lexical);
        assert_eq!(tables.strings, vec!["/a", "/b", "/c"]);
        assert_eq!(tables.index.len(), 3);
    }

    #[test]
    fn test_check_values_reports_both_ids() {
        let tables = build(
            entries(&[("/a", 0), ("/a", 1), ("/c", 2), ("/d", 3)]),
            KeyOrder::Lexical,
        );
        assert_eq!(
            check_values(&tables, KeyOrder::Lexical),
            Err(StringCacheError::DuplicateValue {
                value: "/a".to_string(),
                first: 0,
                second: 1,
            })
        );
    }
}
