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

use serde::{Deserialize, Serialize};

use crate::metrics::Metrics;

/// Mutation event delivered to the notification worker.
///
/// Events are emitted strictly after the store lock has been released; the
/// mutation they describe is already committed and visible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event<K> {
    /// The key was inserted or replaced.
    Admit(K),
    /// The key was removed from the store.
    Evict(K),
}

impl<K> Event<K> {
    /// Get the key the event refers to.
    pub fn key(&self) -> &K {
        match self {
            Event::Admit(key) => key,
            Event::Evict(key) => key,
        }
    }
}

/// Backpressure policy for the notification hand-off.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Backpressure {
    /// Block the emitting caller until the worker drains the queue.
    ///
    /// The store lock is never held while blocking; only the caller waits.
    #[default]
    Block,
    /// Drop the event when the queue is full.
    ///
    /// Drops are counted by the `notify_drop` metric.
    Drop,
}

/// Hand-off of mutation events to the external notification worker.
///
/// A slow or failing worker can never block the locked mutation path: emission
/// happens after the lock is released, and a disconnected receiver is traced
/// and ignored.
pub struct Notifier<K> {
    tx: flume::Sender<Event<K>>,
    backpressure: Backpressure,
    metrics: Arc<Metrics>,
}

impl<K> std::fmt::Debug for Notifier<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Notifier")
            .field("backpressure", &self.backpressure)
            .field("len", &self.tx.len())
            .finish()
    }
}

impl<K> Notifier<K> {
    /// Create a notifier with a bounded event buffer.
    ///
    /// Returns the notifier and the event stream consumed by the notification
    /// worker. The channel is mpmc; the receiver can be cloned to share the
    /// stream across workers.
    pub fn new(
        buffer: usize,
        backpressure: Backpressure,
        metrics: Arc<Metrics>,
    ) -> (Self, flume::Receiver<Event<K>>) {
        let (tx, rx) = flume::bounded(buffer);
        (
            Self {
                tx,
                backpressure,
                metrics,
            },
            rx,
        )
    }

    /// Emit one event according to the configured backpressure policy.
    pub fn notify(&self, event: Event<K>) {
        match self.backpressure {
            Backpressure::Block => {
                if self.tx.send(event).is_err() {
                    tracing::trace!("[notifier]: worker disconnected, event discarded");
                }
            }
            Backpressure::Drop => match self.tx.try_send(event) {
                Ok(()) => {}
                Err(flume::TrySendError::Full(_)) => {
                    self.metrics.notify_drop.increase(1);
                    tracing::warn!("[notifier]: event buffer full, event dropped");
                }
                Err(flume::TrySendError::Disconnected(_)) => {
                    tracing::trace!("[notifier]: worker disconnected, event discarded");
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notify_order() {
        let (notifier, rx) = Notifier::new(16, Backpressure::Block, Arc::new(Metrics::noop()));
        for i in 0..4 {
            notifier.notify(Event::Admit(i));
        }
        let events: Vec<_> = rx.try_iter().collect();
        assert_eq!(
            events,
            vec![
                Event::Admit(0),
                Event::Admit(1),
                Event::Admit(2),
                Event::Admit(3)
            ]
        );
    }

    #[test]
    fn test_notify_drop_on_full() {
        let (notifier, rx) = Notifier::new(2, Backpressure::Drop, Arc::new(Metrics::noop()));
        for i in 0..5 {
            notifier.notify(Event::Admit(i));
        }
        // The two oldest events survive; the rest were dropped without blocking.
        let events: Vec<_> = rx.try_iter().collect();
        assert_eq!(events, vec![Event::Admit(0), Event::Admit(1)]);
    }

    #[test]
    fn test_notify_after_worker_disconnect() {
        let (notifier, rx) = Notifier::new(2, Backpressure::Block, Arc::new(Metrics::noop()));
        drop(rx);
        // Must neither block nor panic.
        notifier.notify(Event::Evict(1u64));
    }
}
