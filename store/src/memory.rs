//! In-memory [`KeyValueStore`].

use std::cmp::Ordering as CmpOrdering;
use std::collections::{BTreeSet, HashMap};
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{normalize_range, KeyValueStore, Object, StoreError};

#[derive(Debug, Clone)]
enum Entry {
    SortedSet(HashMap<String, f64>),
    Set(BTreeSet<String>),
    Hash(Object),
}

/// Process-local store backed by a single `RwLock`ed map.
///
/// Every read operation bumps a counter so callers can assert how many round
/// trips a higher-level operation cost.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, Entry>>,
    reads: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of read operations served so far.
    pub fn read_calls(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    pub fn reset_read_calls(&self) {
        self.reads.store(0, Ordering::SeqCst);
    }

    fn count_read(&self) {
        self.reads.fetch_add(1, Ordering::SeqCst);
    }

    async fn sorted(&self, key: &str, descending: bool) -> Result<Vec<String>, StoreError> {
        let entries = self.entries.read().await;
        let members = match entries.get(key) {
            None => return Ok(Vec::new()),
            Some(Entry::SortedSet(members)) => members,
            Some(_) => return Err(wrong_type(key)),
        };
        let mut scored: Vec<(&String, f64)> = members.iter().map(|(v, s)| (v, *s)).collect();
        scored.sort_by(|(va, sa), (vb, sb)| {
            sa.partial_cmp(sb)
                .unwrap_or(CmpOrdering::Equal)
                .then_with(|| va.cmp(vb))
        });
        if descending {
            scored.reverse();
        }
        Ok(scored.into_iter().map(|(v, _)| v.clone()).collect())
    }
}

fn wrong_type(key: &str) -> StoreError {
    StoreError::WrongType {
        key: key.to_string(),
    }
}

fn slice_range(values: Vec<String>, start: isize, stop: isize) -> Vec<String> {
    match normalize_range(values.len(), start, stop) {
        Some((from, to)) => values.into_iter().skip(from).take(to - from + 1).collect(),
        None => Vec::new(),
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn sorted_set_add(&self, key: &str, score: f64, value: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.write().await;
        match entries
            .entry(key.to_string())
            .or_insert_with(|| Entry::SortedSet(HashMap::new()))
        {
            Entry::SortedSet(members) => {
                members.insert(value.to_string(), score);
                Ok(())
            }
            _ => Err(wrong_type(key)),
        }
    }

    async fn sorted_set_remove(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.write().await;
        match entries.get_mut(key) {
            None => Ok(()),
            Some(Entry::SortedSet(members)) => {
                members.remove(value);
                Ok(())
            }
            Some(_) => Err(wrong_type(key)),
        }
    }

    async fn sorted_set_range(
        &self,
        key: &str,
        start: isize,
        stop: isize,
    ) -> Result<Vec<String>, StoreError> {
        self.count_read();
        let values = self.sorted(key, false).await?;
        Ok(slice_range(values, start, stop))
    }

    async fn sorted_set_rev_range(
        &self,
        key: &str,
        start: isize,
        stop: isize,
    ) -> Result<Vec<String>, StoreError> {
        self.count_read();
        let values = self.sorted(key, true).await?;
        Ok(slice_range(values, start, stop))
    }

    async fn set_add(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.write().await;
        match entries
            .entry(key.to_string())
            .or_insert_with(|| Entry::Set(BTreeSet::new()))
        {
            Entry::Set(members) => {
                members.insert(value.to_string());
                Ok(())
            }
            _ => Err(wrong_type(key)),
        }
    }

    async fn set_remove(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.write().await;
        match entries.get_mut(key) {
            None => Ok(()),
            Some(Entry::Set(members)) => {
                members.remove(value);
                Ok(())
            }
            Some(_) => Err(wrong_type(key)),
        }
    }

    async fn set_members(&self, key: &str) -> Result<Vec<String>, StoreError> {
        self.count_read();
        let entries = self.entries.read().await;
        match entries.get(key) {
            None => Ok(Vec::new()),
            Some(Entry::Set(members)) => Ok(members.iter().cloned().collect()),
            Some(_) => Err(wrong_type(key)),
        }
    }

    async fn is_set_member(&self, key: &str, value: &str) -> Result<bool, StoreError> {
        self.count_read();
        let entries = self.entries.read().await;
        match entries.get(key) {
            None => Ok(false),
            Some(Entry::Set(members)) => Ok(members.contains(value)),
            Some(_) => Err(wrong_type(key)),
        }
    }

    async fn is_member_of_sets(
        &self,
        keys: &[String],
        value: &str,
    ) -> Result<Vec<bool>, StoreError> {
        self.count_read();
        let entries = self.entries.read().await;
        keys.iter()
            .map(|key| match entries.get(key) {
                None => Ok(false),
                Some(Entry::Set(members)) => Ok(members.contains(value)),
                Some(_) => Err(wrong_type(key)),
            })
            .collect()
    }

    async fn set_object(&self, key: &str, fields: Object) -> Result<(), StoreError> {
        let mut entries = self.entries.write().await;
        match entries
            .entry(key.to_string())
            .or_insert_with(|| Entry::Hash(Object::new()))
        {
            Entry::Hash(existing) => {
                existing.extend(fields);
                Ok(())
            }
            _ => Err(wrong_type(key)),
        }
    }

    async fn get_object(&self, key: &str) -> Result<Option<Object>, StoreError> {
        self.count_read();
        let entries = self.entries.read().await;
        match entries.get(key) {
            None => Ok(None),
            Some(Entry::Hash(fields)) => Ok(Some(fields.clone())),
            Some(_) => Err(wrong_type(key)),
        }
    }

    async fn get_objects(&self, keys: &[String]) -> Result<Vec<Option<Object>>, StoreError> {
        self.count_read();
        let entries = self.entries.read().await;
        keys.iter()
            .map(|key| match entries.get(key) {
                None => Ok(None),
                Some(Entry::Hash(fields)) => Ok(Some(fields.clone())),
                Some(_) => Err(wrong_type(key)),
            })
            .collect()
    }
}
