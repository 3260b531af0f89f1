//! Key-value persistence contract used by the group membership core.
//!
//! The [`KeyValueStore`] trait covers the handful of collection shapes the
//! groups layer reads: scored (ordered) sets, plain sets and field hashes.
//! [`MemoryStore`] is the in-process implementation used by tests and by
//! embedders that do not need durability.

mod error;
mod memory;

use std::collections::HashMap;

use async_trait::async_trait;

pub use error::StoreError;
pub use memory::MemoryStore;

/// A hash object as stored under a single key.
pub type Object = HashMap<String, String>;

/// Ordered-set, set and hash operations over string keys.
///
/// Reads of missing keys are not errors: they yield an empty range, an empty
/// set, `false` or `None`. Reading a key through an operation of a different
/// collection type fails with [`StoreError::WrongType`].
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Add `value` to the sorted set at `key`, or update its score.
    async fn sorted_set_add(&self, key: &str, score: f64, value: &str) -> Result<(), StoreError>;

    async fn sorted_set_remove(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Values by ascending score. `start`/`stop` are inclusive and negative
    /// indices count from the end, so `(0, -1)` is the full range.
    async fn sorted_set_range(
        &self,
        key: &str,
        start: isize,
        stop: isize,
    ) -> Result<Vec<String>, StoreError>;

    /// Values by descending score, same index semantics as
    /// [`KeyValueStore::sorted_set_range`].
    async fn sorted_set_rev_range(
        &self,
        key: &str,
        start: isize,
        stop: isize,
    ) -> Result<Vec<String>, StoreError>;

    async fn set_add(&self, key: &str, value: &str) -> Result<(), StoreError>;

    async fn set_remove(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// All members of the set at `key`, in lexical order.
    async fn set_members(&self, key: &str) -> Result<Vec<String>, StoreError>;

    async fn is_set_member(&self, key: &str, value: &str) -> Result<bool, StoreError>;

    /// Test `value` against many sets in one round trip. The result is
    /// index-aligned to `keys`.
    async fn is_member_of_sets(&self, keys: &[String], value: &str)
        -> Result<Vec<bool>, StoreError>;

    /// Merge `fields` into the hash at `key`.
    async fn set_object(&self, key: &str, fields: Object) -> Result<(), StoreError>;

    async fn get_object(&self, key: &str) -> Result<Option<Object>, StoreError>;

    /// Bulk hash read, index-aligned to `keys`.
    async fn get_objects(&self, keys: &[String]) -> Result<Vec<Option<Object>>, StoreError>;
}

/// Resolve Redis-style inclusive `start..=stop` indices against a collection
/// of `len` items. Returns `None` when the range selects nothing.
pub fn normalize_range(len: usize, start: isize, stop: isize) -> Option<(usize, usize)> {
    if len == 0 {
        return None;
    }
    let len = len as isize;
    let start = if start < 0 { (start + len).max(0) } else { start };
    let stop = if stop < 0 { stop + len } else { stop.min(len - 1) };
    if start > stop || start >= len {
        return None;
    }
    Some((start as usize, stop as usize))
}

#[cfg(test)]
mod tests {
    use super::normalize_range;

    #[test]
    fn full_range() {
        assert_eq!(normalize_range(3, 0, -1), Some((0, 2)));
    }

    #[test]
    fn clamps_stop_past_end() {
        assert_eq!(normalize_range(3, 1, 10), Some((1, 2)));
    }

    #[test]
    fn negative_start() {
        assert_eq!(normalize_range(5, -2, -1), Some((3, 4)));
        assert_eq!(normalize_range(5, -10, 1), Some((0, 1)));
    }

    #[test]
    fn empty_selections() {
        assert_eq!(normalize_range(0, 0, -1), None);
        assert_eq!(normalize_range(3, 2, 1), None);
        assert_eq!(normalize_range(3, 3, 5), None);
        assert_eq!(normalize_range(3, 0, -4), None);
    }
}
