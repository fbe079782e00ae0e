//! Sorted lookup index over the storage table.
//!
//! The index stores ids only; the values they denote live in the table, so
//! every search borrows the table alongside the index.

use crate::models::StringId;

use super::order::KeyOrder;

/// Ids sorted by the value they denote, under a [`KeyOrder`].
#[derive(Debug, Clone, Default)]
pub(super) struct SortedIndex {
    ids: Vec<StringId>,
}

impl SortedIndex {
    pub(super) fn with_capacity(capacity: usize) -> Self {
        Self {
            ids: Vec::with_capacity(capacity),
        }
    }

    /// Build the index for a whole table at once.
    pub(super) fn build(table: &[String], order: KeyOrder) -> Self {
        let mut ids: Vec<StringId> = (0..table.len() as StringId).collect();
        ids.sort_unstable_by(|&a, &b| order.compare(&table[a as usize], &table[b as usize]));
        Self { ids }
    }

    /// Binary search for `value`.
    ///
    /// `Ok` carries the id found, `Err` the position where an id for `value`
    /// has to be inserted to keep the index sorted.
    #[inline]
    pub(super) fn search(
        &self,
        table: &[String],
        order: KeyOrder,
        value: &str,
    ) -> Result<StringId, usize> {
        self.ids
            .binary_search_by(|&id| order.compare(&table[id as usize], value))
            .map(|pos| self.ids[pos])
    }

    /// Insert `id` at `position`, shifting every later id by one slot.
    pub(super) fn insert(&mut self, position: usize, id: StringId) {
        self.ids.insert(position, id);
    }

    /// First pair of neighbouring ids that denote equal values, if any.
    ///
    /// Equal values are adjacent once sorted, so one pass over the
    /// neighbours finds every duplicate.
    pub(super) fn first_duplicate(
        &self,
        table: &[String],
        order: KeyOrder,
    ) -> Option<(StringId, StringId)> {
        self.ids
            .windows(2)
            .find(|pair| order.compare(&table[pair[0] as usize], &table[pair[1] as usize]).is_eq())
            .map(|pair| (pair[0].min(pair[1]), pair[0].max(pair[1])))
    }

    pub(super) fn len(&self) -> usize {
        self.ids.len()
    }

    #[cfg(test)]
    pub(super) fn ids(&self) -> &[StringId] {
        &self.ids
    }
}
