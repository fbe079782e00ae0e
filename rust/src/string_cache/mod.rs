//! Dense-id string cache.
//!
//! Maps path-like strings to small stable integers and back. Values are
//! stored once, in a table indexed by id; a sorted index of ids serves
//! lookups by value.

mod cache;
mod error;
mod index;
mod order;
mod snapshot;

pub use cache::{StringCache, DEFAULT_CAPACITY};
pub use error::StringCacheError;
pub use order::KeyOrder;
