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

//! A concurrent, size-tracked, reference-counted in-memory object cache: the
//! hot tier of a tiered caching/storage pipeline.
//!
//! Entries are identified by composite keys and wrap reference-counted
//! payloads. Every mutation keeps a shared usage counter consistent with the
//! store contents under a single lock, then reports the new usage to an
//! external stats sink and hands one event per affected key to an external
//! notification worker — both strictly after the lock is released.
//!
//! The batched insertion path ([`HotCache::put_batch`]) applies a whole batch
//! under one lock acquisition and one counter update, with the same visible
//! effects as the equivalent sequence of single-item insertions.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use hotcache::{ChunkKey, Event, HotCacheBuilder, Record};
//!
//! let cache = HotCacheBuilder::new().build();
//! let events = cache.events();
//!
//! let key = ChunkKey::new(0, 42);
//! cache.put(key, Arc::new(Record::new(vec![0u8; 4096], 4096)));
//!
//! assert_eq!(cache.usage(), 4096);
//! assert_eq!(events.recv().unwrap(), Event::Admit(key));
//! ```

mod cache;
mod code;
mod error;
mod event;
mod metrics;
mod record;
mod stats;
mod store;

#[cfg(any(test, feature = "test_utils"))]
pub mod test_utils;

mod prelude;
pub use prelude::*;
