//! The string cache: dense ids for path-like strings.
//!
//! A dense table holds each value at the slot named by its id, and a sorted
//! index of ids answers value lookups by binary search. Lookup by id is
//! O(1), lookup by value O(log n), and minting a new id costs O(n) for the
//! shift in the index. Path tables are loaded in bulk and then mostly read,
//! which is the workload this layout favours.

use crate::config::{ConfigError, StringCacheConfig};
use crate::models::{CacheEntries, CacheEntry, StringId};
use crate::{log_changes, log_checks, log_debug};

use super::error::StringCacheError;
use super::index::SortedIndex;
use super::order::KeyOrder;
use super::snapshot::{self, Tables};

/// Default number of entries reserved by a new cache.
pub const DEFAULT_CAPACITY: usize = 1024;

/// Bidirectional mapping between strings and dense ids.
///
/// Ids are handed out as `0, 1, 2, ...` in order of first insertion and never
/// change afterwards. The cache is single-owner; callers that share it
/// across threads must serialize access themselves.
#[derive(Debug, Clone)]
pub struct StringCache {
    /// Storage table, indexed by id.
    strings: Vec<String>,
    /// Ids sorted by the value they denote.
    index: SortedIndex,
    order: KeyOrder,
    verbosity: u8,
}

impl StringCache {
    /// Create an empty cache with lexical ordering and default capacity.
    pub fn new() -> Self {
        Self::with_order(KeyOrder::Lexical)
    }

    /// Create an empty cache keeping its index sorted by `order`.
    pub fn with_order(order: KeyOrder) -> Self {
        Self::with_capacity_and_order(DEFAULT_CAPACITY, order)
    }

    /// Create an empty cache tuned for file paths ([`KeyOrder::ReversePath`]).
    pub fn for_file_paths() -> Self {
        Self::with_order(KeyOrder::ReversePath)
    }

    pub fn with_capacity_and_order(capacity: usize, order: KeyOrder) -> Self {
        Self {
            strings: Vec::with_capacity(capacity),
            index: SortedIndex::with_capacity(capacity),
            order,
            verbosity: 0,
        }
    }

    /// Create an empty cache from a configuration.
    pub fn from_config(config: &StringCacheConfig) -> Result<Self, ConfigError> {
        let mut cache = Self::with_capacity_and_order(config.initial_capacity, config.key_order()?);
        cache.verbosity = config.verbosity;
        Ok(cache)
    }

    /// Create a cache from a snapshot, validated as by [`populate`](Self::populate).
    pub fn from_snapshot(entries: CacheEntries) -> Result<Self, StringCacheError> {
        let mut cache = Self::new();
        cache.populate(entries)?;
        Ok(cache)
    }

    /// Set the logging verbosity (see [`crate::logging`]).
    pub fn set_verbosity(&mut self, verbosity: u8) {
        self.verbosity = verbosity;
    }

    pub fn order(&self) -> KeyOrder {
        self.order
    }

    /// Return the id for `value`, minting the next free id if it is new.
    pub fn id(&mut self, value: &str) -> StringId {
        match self.index.search(&self.strings, self.order, value) {
            Ok(id) => id,
            Err(position) => {
                let id = self.strings.len() as StringId;
                self.strings.push(value.to_string());
                self.index.insert(position, id);
                debug_assert_eq!(self.index.len(), self.strings.len());

                log_changes!(self.verbosity, "String cache: new id {} for {:?}", id, value);
                log_debug!(self.verbosity, "  index position {}", position);
                id
            }
        }
    }

    /// Ids for every value in `values`, positionally.
    ///
    /// Repeats within the batch resolve to the id minted by their first
    /// occurrence.
    pub fn ids<I, S>(&mut self, values: I) -> Vec<StringId>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let values = values.into_iter();
        let mut ids = Vec::with_capacity(values.size_hint().0);
        for value in values {
            ids.push(self.id(value.as_ref()));
        }
        log_debug!(self.verbosity, "String cache: resolved batch of {}", ids.len());
        ids
    }

    /// Id for `value` if it has been inserted, without inserting it.
    pub fn lookup(&self, value: &str) -> Option<StringId> {
        self.index.search(&self.strings, self.order, value).ok()
    }

    /// The string denoted by `id`.
    ///
    /// The borrow is valid until the next mutating call.
    pub fn string(&self, id: StringId) -> Result<&str, StringCacheError> {
        match self.strings.get(id as usize) {
            Some(value) => Ok(value.as_str()),
            None => {
                log_checks!(
                    self.verbosity,
                    "String cache: id {} out of range ({} entries)",
                    id,
                    self.strings.len()
                );
                Err(StringCacheError::OutOfRange {
                    id: i64::from(id),
                    len: self.strings.len(),
                })
            }
        }
    }

    /// The strings denoted by `ids`, positionally. Fails on the first bad id.
    pub fn strings(&self, ids: &[StringId]) -> Result<Vec<&str>, StringCacheError> {
        ids.iter().map(|&id| self.string(id)).collect()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }

    /// All entries in id order.
    ///
    /// The result is a valid snapshot and can be handed back to
    /// [`unchecked_populate`](Self::unchecked_populate).
    pub fn snapshot(&self) -> CacheEntries {
        self.strings
            .iter()
            .enumerate()
            .map(|(id, value)| CacheEntry::new(value.clone(), id as StringId))
            .collect()
    }

    /// Replace the contents with a validated snapshot.
    ///
    /// Fails with [`StringCacheError::DuplicateId`] if two entries share an
    /// id, [`StringCacheError::OutOfRange`] if the ids are not exactly
    /// `0..entries.len()`, and [`StringCacheError::DuplicateValue`] if two
    /// ids denote the same string. On failure the cache is left untouched.
    pub fn populate(&mut self, entries: CacheEntries) -> Result<(), StringCacheError> {
        match snapshot::build_checked(entries, self.order) {
            Ok(tables) => {
                self.install(tables);
                Ok(())
            }
            Err(err) => {
                log_checks!(self.verbosity, "String cache: snapshot rejected: {}", err);
                Err(err)
            }
        }
    }

    /// Replace the contents with a snapshot, skipping all validation.
    ///
    /// # Contract
    ///
    /// Only for snapshots already known to be good, such as the output of
    /// [`snapshot`](Self::snapshot) on another cache. The ids must be unique
    /// and form exactly `0..entries.len()`, and the strings must be pairwise
    /// distinct. A snapshot breaking this contract does not raise an error:
    /// later lookups return wrong ids or wrong strings instead. Untrusted
    /// input goes through [`populate`](Self::populate).
    pub fn unchecked_populate(&mut self, entries: CacheEntries) {
        let tables = snapshot::build(entries, self.order);
        self.install(tables);
    }

    fn install(&mut self, tables: Tables) {
        self.strings = tables.strings;
        self.index = tables.index;
        log_changes!(
            self.verbosity,
            "String cache: installed snapshot of {} entries",
            self.strings.len()
        );
    }
}

impl Default for StringCache {
    fn default() -> Self {
        Self::new()
    }
}
