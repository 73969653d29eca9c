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

use std::{borrow::Cow, marker::PhantomData, sync::Arc};

use itertools::Itertools;
use mixtrics::{metrics::BoxedRegistry, registry::noop::NoopMetricsRegistry};
use parking_lot::Mutex;

use crate::{
    code::{Key, ManagedObject},
    error::{Error, Result},
    event::{Backpressure, Event, Notifier},
    metrics::Metrics,
    stats::{NoopStatsSink, StatsSink},
    store::Store,
};

/// Default capacity of the notification event buffer.
pub const DEFAULT_EVENT_BUFFER: usize = 4096;

/// Hot cache builder.
pub struct HotCacheBuilder<K, O>
where
    K: Key + Clone,
    O: ManagedObject,
{
    name: Cow<'static, str>,
    stats: Arc<dyn StatsSink>,
    event_buffer: usize,
    backpressure: Backpressure,
    registry: BoxedRegistry,

    _marker: PhantomData<(K, O)>,
}

impl<K, O> Default for HotCacheBuilder<K, O>
where
    K: Key + Clone,
    O: ManagedObject,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, O> HotCacheBuilder<K, O>
where
    K: Key + Clone,
    O: ManagedObject,
{
    /// Create a hot cache builder with defaults: noop stats sink, noop metrics
    /// registry, a bounded event buffer and blocking backpressure.
    pub fn new() -> Self {
        Self {
            name: "hotcache".into(),
            stats: Arc::new(NoopStatsSink),
            event_buffer: DEFAULT_EVENT_BUFFER,
            backpressure: Backpressure::default(),
            registry: Box::new(NoopMetricsRegistry),
            _marker: PhantomData,
        }
    }

    /// Set the name of the hot cache for metric labels.
    pub fn with_name(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the external stats sink.
    pub fn with_stats_sink(mut self, stats: Arc<dyn StatsSink>) -> Self {
        self.stats = stats;
        self
    }

    /// Set the capacity of the notification event buffer.
    pub fn with_event_buffer(mut self, event_buffer: usize) -> Self {
        self.event_buffer = event_buffer;
        self
    }

    /// Set the backpressure policy of the notification hand-off.
    pub fn with_backpressure(mut self, backpressure: Backpressure) -> Self {
        self.backpressure = backpressure;
        self
    }

    /// Set the metrics registry.
    pub fn with_metrics_registry(mut self, registry: BoxedRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Build the hot cache.
    pub fn build(self) -> HotCache<K, O> {
        let metrics = Arc::new(Metrics::new(self.name, &self.registry));
        let (notifier, events) = Notifier::new(self.event_buffer, self.backpressure, metrics.clone());
        HotCache {
            store: Mutex::new(Store::new(metrics)),
            stats: self.stats,
            notifier,
            events,
        }
    }
}

/// Concurrent, size-tracked, reference-counted in-memory object cache: the
/// local tier of a tiered caching/storage pipeline.
///
/// The store and its usage counter are guarded by a single mutex; the lock's
/// acquisition order totally orders all mutations. [`HotCache::put_batch`]
/// amortizes the lock acquisition and the counter update over a whole batch,
/// which is where the throughput over per-item insertion comes from.
///
/// Post-release side effects (the stats push and the per-key notifications)
/// are never performed under the lock, so a slow sink or worker cannot
/// serialize unrelated callers. Within one call the counter update always
/// precedes that call's own notifications; across calls the post-release
/// effects may interleave freely.
pub struct HotCache<K, O>
where
    K: Key + Clone,
    O: ManagedObject,
{
    store: Mutex<Store<K, O>>,
    stats: Arc<dyn StatsSink>,
    notifier: Notifier<K>,
    events: flume::Receiver<Event<K>>,
}

impl<K, O> std::fmt::Debug for HotCache<K, O>
where
    K: Key + Clone,
    O: ManagedObject,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HotCache")
            .field("store", &*self.store.lock())
            .field("notifier", &self.notifier)
            .finish()
    }
}

impl<K, O> HotCache<K, O>
where
    K: Key + Clone,
    O: ManagedObject,
{
    /// Insert `object` under `key`, replacing the prior entry for the key if
    /// any.
    ///
    /// Degenerate single-item case of [`HotCache::put_batch`]; both routes go
    /// through the same store primitive.
    pub fn put(&self, key: K, object: Arc<O>) {
        let usage = {
            let mut store = self.store.lock();
            let delta = store.emplace(key.clone(), object);
            store.commit(delta);
            store.usage()
        };
        self.stats.update_usage(usage);
        self.notifier.notify(Event::Admit(key));
    }

    /// Insert a batch of positionally paired keys and objects under a single
    /// lock acquisition.
    ///
    /// Pairs are applied in input order, so duplicate keys within one batch
    /// evict their earlier occurrences and the accumulated delta reflects the
    /// net effect. The usage counter is updated once for the whole batch; the
    /// stats sink sees one update and the worker one event per key, in input
    /// order, after the lock is released.
    ///
    /// An empty batch is a complete no-op. Mismatched sequence lengths fail
    /// before the lock is acquired; no partial mutation occurs.
    pub fn put_batch(&self, keys: Vec<K>, objects: Vec<Arc<O>>) -> Result<()> {
        if keys.len() != objects.len() {
            return Err(Error::BatchLengthMismatch {
                keys: keys.len(),
                objects: objects.len(),
            });
        }
        if keys.is_empty() {
            return Ok(());
        }

        let usage = {
            let mut store = self.store.lock();
            let mut total = 0isize;
            for (key, object) in keys.iter().cloned().zip_eq(objects) {
                total += store.emplace(key, object);
            }
            store.commit(total);
            store.usage()
        };

        self.stats.update_usage(usage);
        for key in keys {
            self.notifier.notify(Event::Admit(key));
        }

        Ok(())
    }

    /// Remove the entry for `key`, releasing the store's reference.
    ///
    /// The returned handle carries no logical reference.
    pub fn remove(&self, key: &K) -> Option<Arc<O>> {
        let (object, usage) = {
            let mut store = self.store.lock();
            let object = store.remove(key);
            (object, store.usage())
        };
        let object = object?;
        self.stats.update_usage(usage);
        self.notifier.notify(Event::Evict(key.clone()));
        Some(object)
    }

    /// Drain the store, releasing one reference per entry.
    pub fn clear(&self) {
        let (keys, usage) = {
            let mut store = self.store.lock();
            (store.clear(), store.usage())
        };
        if keys.is_empty() {
            return;
        }
        self.stats.update_usage(usage);
        for key in keys {
            self.notifier.notify(Event::Evict(key));
        }
    }

    /// Get the object for `key`, acquiring one reference on behalf of the
    /// caller.
    pub fn get(&self, key: &K) -> Option<Arc<O>> {
        self.store.lock().get(key)
    }

    /// Check whether `key` is resident without touching reference counts.
    pub fn contains(&self, key: &K) -> bool {
        self.store.lock().contains(key)
    }

    /// Aggregate resident size of the store.
    pub fn usage(&self) -> usize {
        self.store.lock().usage()
    }

    /// Count of resident entries.
    pub fn len(&self) -> usize {
        self.store.lock().len()
    }

    /// Check whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.store.lock().is_empty()
    }

    /// Get the mutation event stream consumed by the notification worker.
    ///
    /// The channel is mpmc; the receiver can be cloned to share the stream.
    pub fn events(&self) -> flume::Receiver<Event<K>> {
        self.events.clone()
    }
}
