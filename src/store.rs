// Copyright 2025 hotcache Project Authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::sync::Arc;

use ordered_hash_map::OrderedHashMap;

use crate::{
    code::{Key, ManagedObject},
    metrics::Metrics,
};

/// The un-synchronized hot cache store: an insertion-order-preserving map from
/// key to managed object, plus the usage counter.
///
/// [`Store`] performs no locking itself. Mutating methods take `&mut self`, so
/// exclusive access is a static precondition; [`HotCache`](crate::HotCache)
/// provides it by wrapping the store in a single [`parking_lot::Mutex`]. The
/// map and the counter live in one struct on purpose: guarding them with
/// separate locks would reintroduce the accounting race that batching
/// eliminates.
///
/// The counter is not touched by [`Store::emplace`]; deltas are returned to
/// the caller and applied with [`Store::commit`], so a batch of emplaces costs
/// a single counter update.
pub struct Store<K, O>
where
    K: Key,
    O: ManagedObject,
{
    entries: OrderedHashMap<K, Arc<O>>,
    usage: usize,

    metrics: Arc<Metrics>,
}

impl<K, O> std::fmt::Debug for Store<K, O>
where
    K: Key,
    O: ManagedObject,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("len", &self.entries.len())
            .field("usage", &self.usage)
            .finish()
    }
}

impl<K, O> Store<K, O>
where
    K: Key,
    O: ManagedObject,
{
    /// Create an empty store.
    pub fn new(metrics: Arc<Metrics>) -> Self {
        Self {
            entries: OrderedHashMap::new(),
            usage: 0,
            metrics,
        }
    }

    /// Associate `key` with `object`, evicting the prior value for the key if
    /// any, and return the net size delta.
    ///
    /// The prior object's store reference is released and its size counts
    /// negatively; the new object receives one reference and its size counts
    /// positively. The usage counter is *not* updated here — the caller
    /// accumulates deltas and applies them with [`Store::commit`].
    pub fn emplace(&mut self, key: K, object: Arc<O>) -> isize {
        let mut delta = 0isize;

        if let Some(old) = self.entries.remove(&key) {
            old.ref_count_down();
            delta -= old.size() as isize;
            self.metrics.replace.increase(1);
        } else {
            self.metrics.insert.increase(1);
        }

        object.ref_count_up();
        delta += object.size() as isize;
        self.entries.insert(key, object);

        tracing::trace!("[store]: emplace, delta: {}", delta);

        delta
    }

    /// Apply an accumulated size delta to the usage counter.
    ///
    /// The counter stays non-negative at every quiescent point; a negative
    /// result means a bookkeeping bug upstream.
    pub fn commit(&mut self, delta: isize) {
        let usage = self.usage.checked_add_signed(delta);
        debug_assert!(usage.is_some(), "usage counter underflow: delta {delta}");
        self.usage = usage.unwrap_or(0);

        match delta.cmp(&0) {
            std::cmp::Ordering::Greater => self.metrics.usage.increase(delta as u64),
            std::cmp::Ordering::Less => self.metrics.usage.decrease(delta.unsigned_abs() as u64),
            std::cmp::Ordering::Equal => {}
        }
    }

    /// Remove the entry for `key`, releasing the store's reference and
    /// subtracting its size from the usage counter.
    ///
    /// The returned handle carries no logical reference; it only keeps the
    /// object observable while the caller holds it.
    pub fn remove(&mut self, key: &K) -> Option<Arc<O>> {
        let object = self.entries.remove(key)?;
        object.ref_count_down();
        self.commit(-(object.size() as isize));
        self.metrics.remove.increase(1);
        Some(object)
    }

    /// Get the object for `key`, acquiring one reference on behalf of the new
    /// holder.
    pub fn get(&self, key: &K) -> Option<Arc<O>> {
        match self.entries.get(key) {
            Some(object) => {
                self.metrics.hit.increase(1);
                object.ref_count_up();
                Some(object.clone())
            }
            None => {
                self.metrics.miss.increase(1);
                None
            }
        }
    }

    /// Check whether `key` is resident without touching reference counts.
    pub fn contains(&self, key: &K) -> bool {
        self.entries.get(key).is_some()
    }

    /// Drain all entries, releasing one reference each and resetting the usage
    /// counter to zero. Returns the drained keys in insertion order.
    pub fn clear(&mut self) -> Vec<K>
    where
        K: Clone,
    {
        let mut keys = Vec::with_capacity(self.entries.len());
        let mut delta = 0isize;
        for (key, object) in self.entries.iter() {
            object.ref_count_down();
            delta -= object.size() as isize;
            keys.push(key.clone());
        }
        self.entries.clear();
        self.metrics.remove.increase(keys.len() as u64);
        self.commit(delta);
        keys
    }

    /// Aggregate resident size of the store.
    pub fn usage(&self) -> usize {
        self.usage
    }

    /// Count of resident entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate resident entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &Arc<O>)> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestObject;

    fn store() -> Store<u64, TestObject> {
        Store::new(Arc::new(Metrics::noop()))
    }

    #[test]
    fn test_emplace_returns_delta_without_committing() {
        let mut store = store();

        let a = Arc::new(TestObject::new(10));
        let b = Arc::new(TestObject::new(4));

        assert_eq!(store.emplace(1, a.clone()), 10);
        // `emplace` never touches the counter.
        assert_eq!(store.usage(), 0);

        // Overwrite: delta is the difference, the old reference is released.
        assert_eq!(store.emplace(1, b.clone()), -6);
        assert_eq!(a.refs(), 0);
        assert_eq!(b.refs(), 1);
        assert_eq!(store.len(), 1);

        store.commit(4);
        assert_eq!(store.usage(), 4);
    }

    #[test]
    fn test_remove_releases_and_accounts() {
        let mut store = store();

        let a = Arc::new(TestObject::new(7));
        let delta = store.emplace(1, a.clone());
        store.commit(delta);
        assert_eq!(store.usage(), 7);

        let removed = store.remove(&1).unwrap();
        assert_eq!(removed.refs(), 0);
        assert_eq!(store.usage(), 0);
        assert!(store.is_empty());
        assert!(store.remove(&1).is_none());
    }

    #[test]
    fn test_get_acquires_holder_reference() {
        let mut store = store();

        let a = Arc::new(TestObject::new(3));
        let delta = store.emplace(1, a.clone());
        store.commit(delta);

        let held = store.get(&1).unwrap();
        assert_eq!(held.refs(), 2);
        assert!(store.get(&2).is_none());
        assert!(store.contains(&1));
        assert!(!store.contains(&2));
    }

    #[test]
    fn test_clear_drains_in_insertion_order() {
        let mut store = store();

        let objects: Vec<_> = (0..4).map(|i| Arc::new(TestObject::new(i + 1))).collect();
        let mut delta = 0;
        for (i, object) in objects.iter().enumerate() {
            delta += store.emplace(i as u64, object.clone());
        }
        store.commit(delta);
        assert_eq!(store.usage(), 1 + 2 + 3 + 4);

        let keys = store.clear();
        assert_eq!(keys, vec![0, 1, 2, 3]);
        assert_eq!(store.usage(), 0);
        assert!(store.is_empty());
        for object in &objects {
            assert_eq!(object.refs(), 0);
        }
    }
}
