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

use std::{borrow::Cow, fmt::Debug};

use mixtrics::{
    metrics::{BoxedCounter, BoxedGauge, BoxedRegistry},
    registry::noop::NoopMetricsRegistry,
};

/// Hot cache metrics.
pub struct Metrics {
    /// Insertions of keys that were not present.
    pub insert: BoxedCounter,
    /// Insertions that replaced an existing entry.
    pub replace: BoxedCounter,
    /// Successful removes.
    pub remove: BoxedCounter,
    /// Lookup hits.
    pub hit: BoxedCounter,
    /// Lookup misses.
    pub miss: BoxedCounter,
    /// Notifications dropped by the lossy backpressure policy.
    pub notify_drop: BoxedCounter,

    /// Aggregate resident size of the store.
    pub usage: BoxedGauge,
}

impl Debug for Metrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Metrics").finish()
    }
}

impl Metrics {
    /// Register hot cache metrics with the given name to the registry.
    pub fn new(name: impl Into<Cow<'static, str>>, registry: &BoxedRegistry) -> Self {
        let name = name.into();

        let hotcache_op_total = registry.register_counter_vec(
            "hotcache_op_total".into(),
            "hot cache operations".into(),
            &["name", "op"],
        );
        let hotcache_usage = registry.register_gauge_vec(
            "hotcache_usage".into(),
            "hot cache aggregate resident size".into(),
            &["name"],
        );

        let insert = hotcache_op_total.counter(&[name.clone(), "insert".into()]);
        let replace = hotcache_op_total.counter(&[name.clone(), "replace".into()]);
        let remove = hotcache_op_total.counter(&[name.clone(), "remove".into()]);
        let hit = hotcache_op_total.counter(&[name.clone(), "hit".into()]);
        let miss = hotcache_op_total.counter(&[name.clone(), "miss".into()]);
        let notify_drop = hotcache_op_total.counter(&[name.clone(), "notify_drop".into()]);

        let usage = hotcache_usage.gauge(&[name.clone()]);

        Self {
            insert,
            replace,
            remove,
            hit,
            miss,
            notify_drop,
            usage,
        }
    }

    /// Create a noop metrics for test.
    pub fn noop() -> Self {
        Self::new("test", &(Box::new(NoopMetricsRegistry) as BoxedRegistry))
    }
}
