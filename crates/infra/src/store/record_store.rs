use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use itemhub_core::RecordId;

/// Keyed record storage with store-assigned identifiers.
///
/// Identifiers are positive, strictly increasing in insertion order and never
/// reused, even after the record they named is removed.
pub trait RecordStore<V>: Send + Sync {
    /// Persist a new record and return its freshly assigned identifier.
    fn insert(&self, value: V) -> RecordId;
    fn get(&self, id: RecordId) -> Option<V>;
    /// All records, ascending by identifier.
    fn list(&self) -> Vec<(RecordId, V)>;
    /// Mutate a record in place; returns the new value, or `None` if absent.
    fn modify(&self, id: RecordId, f: &mut dyn FnMut(&mut V)) -> Option<V>;
    fn remove(&self, id: RecordId) -> Option<V>;
    fn count(&self) -> usize;
}

impl<V, S> RecordStore<V> for Arc<S>
where
    S: RecordStore<V> + ?Sized,
{
    fn insert(&self, value: V) -> RecordId {
        (**self).insert(value)
    }

    fn get(&self, id: RecordId) -> Option<V> {
        (**self).get(id)
    }

    fn list(&self) -> Vec<(RecordId, V)> {
        (**self).list()
    }

    fn modify(&self, id: RecordId, f: &mut dyn FnMut(&mut V)) -> Option<V> {
        (**self).modify(id, f)
    }

    fn remove(&self, id: RecordId) -> Option<V> {
        (**self).remove(id)
    }

    fn count(&self) -> usize {
        (**self).count()
    }
}

/// In-memory record store for tests/dev.
#[derive(Debug)]
pub struct InMemoryRecordStore<V> {
    inner: RwLock<BTreeMap<RecordId, V>>,
    next_id: AtomicU64,
}

impl<V> InMemoryRecordStore<V> {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(BTreeMap::new()),
            next_id: AtomicU64::new(RecordId::FIRST.get()),
        }
    }
}

impl<V> Default for InMemoryRecordStore<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> RecordStore<V> for InMemoryRecordStore<V>
where
    V: Clone + Send + Sync + 'static,
{
    fn insert(&self, value: V) -> RecordId {
        let mut map = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        let raw = self.next_id.fetch_add(1, Ordering::Relaxed);
        // The counter starts at 1 and only grows.
        let id = RecordId::new(raw).unwrap_or(RecordId::FIRST);
        map.insert(id, value);
        tracing::debug!(record_id = %id, "record inserted");
        id
    }

    fn get(&self, id: RecordId) -> Option<V> {
        let map = self.inner.read().ok()?;
        map.get(&id).cloned()
    }

    fn list(&self) -> Vec<(RecordId, V)> {
        let map = match self.inner.read() {
            Ok(m) => m,
            Err(_) => return vec![],
        };

        map.iter().map(|(id, v)| (*id, v.clone())).collect()
    }

    fn modify(&self, id: RecordId, f: &mut dyn FnMut(&mut V)) -> Option<V> {
        let mut map = self.inner.write().ok()?;
        let value = map.get_mut(&id)?;
        f(value);
        Some(value.clone())
    }

    fn remove(&self, id: RecordId) -> Option<V> {
        let mut map = self.inner.write().ok()?;
        let removed = map.remove(&id);
        if removed.is_some() {
            tracing::debug!(record_id = %id, "record removed");
        }
        removed
    }

    fn count(&self) -> usize {
        self.inner.read().map(|m| m.len()).unwrap_or(0)
    }
}
