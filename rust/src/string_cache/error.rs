use thiserror::Error;

use crate::models::StringId;

/// Errors raised by string cache lookups and validated snapshot loads.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StringCacheError {
    /// An id outside `[0, len)`, or a snapshot whose ids are not `0..count`.
    #[error("String id {id} is out of range (cache holds {len} entries)")]
    OutOfRange { id: i64, len: usize },
    #[error("Snapshot assigns id {0} to more than one entry")]
    DuplicateId(StringId),
    #[error("Snapshot maps ids {first} and {second} to the same string {value:?}")]
    DuplicateValue {
        value: String,
        first: StringId,
        second: StringId,
    },
}
