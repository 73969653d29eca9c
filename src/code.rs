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

use std::hash::Hash;

use serde::{Deserialize, Serialize};

/// Key trait for the hot cache.
pub trait Key: Send + Sync + 'static + Hash + Eq {}
impl<T: Send + Sync + 'static + Hash + Eq> Key for T {}

/// A reference-counted payload whose lifetime is shared by the cache and any
/// external holders.
///
/// The cache owns exactly one logical reference per key it currently maps.
/// It calls [`ManagedObject::ref_count_up`] when it begins holding a reference
/// and [`ManagedObject::ref_count_down`] when it relinquishes one (overwrite,
/// removal or clear). The object is destroyed by whoever releases the last
/// reference; the cache never destroys objects directly.
pub trait ManagedObject: Send + Sync + 'static {
    /// Acquire one logical reference.
    fn ref_count_up(&self);

    /// Release one logical reference.
    fn ref_count_down(&self);

    /// Size of the object in bytes.
    ///
    /// Must be stable for the object's lifetime as observed by the cache.
    fn size(&self) -> usize;
}

/// The pipeline's standard composite cache key: owning worker id plus content
/// chunk hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChunkKey {
    /// Id of the worker that owns the chunk.
    pub worker: u32,
    /// Content hash of the chunk.
    pub chunk: u64,
}

impl ChunkKey {
    /// Create a composite key from a worker id and a chunk hash.
    pub fn new(worker: u32, chunk: u64) -> Self {
        Self { worker, chunk }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunk_key_identity() {
        let a = ChunkKey::new(1, 42);
        let b = ChunkKey::new(1, 42);
        let c = ChunkKey::new(2, 42);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
