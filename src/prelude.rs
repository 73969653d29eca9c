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

//! Re-exports of the crate's public types.

pub use crate::{
    cache::{HotCache, HotCacheBuilder, DEFAULT_EVENT_BUFFER},
    code::{ChunkKey, Key, ManagedObject},
    error::{Error, Result},
    event::{Backpressure, Event, Notifier},
    metrics::Metrics,
    record::Record,
    stats::{NoopStatsSink, StatsSink},
    store::Store,
};
