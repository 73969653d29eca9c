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

use std::{
    fmt::Debug,
    sync::atomic::{AtomicUsize, Ordering},
};

use crate::code::ManagedObject;

/// [`Record`] wraps a payload with a logical reference count and a fixed size.
///
/// It is the provided [`ManagedObject`] implementation for callers that do not
/// bring their own. Memory lifetime is managed by the surrounding
/// [`Arc`](std::sync::Arc); the logical reference count tracks ownership
/// across the cache and external holders.
pub struct Record<T> {
    data: T,
    size: usize,
    refs: AtomicUsize,
}

impl<T> Debug for Record<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Record")
            .field("size", &self.size)
            .field("refs", &self.refs())
            .finish()
    }
}

impl<T> Record<T> {
    /// Create a record over `data` accounting for `size` bytes.
    pub fn new(data: T, size: usize) -> Self {
        Self {
            data,
            size,
            refs: AtomicUsize::new(0),
        }
    }

    /// Get the immutable reference of the record payload.
    pub fn data(&self) -> &T {
        &self.data
    }

    /// Get the atomic reference count.
    pub fn refs(&self) -> usize {
        self.refs.load(Ordering::Acquire)
    }

    /// Increase the atomic reference count.
    ///
    /// This function returns the new reference count after the op.
    pub fn inc_refs(&self, val: usize) -> usize {
        let old = self.refs.fetch_add(val, Ordering::SeqCst);
        tracing::trace!("[record]: inc record refs: {} => {}", old, old + val);
        old + val
    }

    /// Decrease the atomic reference count.
    ///
    /// This function returns the new reference count after the op.
    pub fn dec_refs(&self, val: usize) -> usize {
        let old = self.refs.fetch_sub(val, Ordering::SeqCst);
        debug_assert!(old > 0, "record ref count underflow");
        tracing::trace!("[record]: dec record refs: {} => {}", old, old - val);
        old - val
    }
}

impl<T> ManagedObject for Record<T>
where
    T: Send + Sync + 'static,
{
    fn ref_count_up(&self) {
        self.inc_refs(1);
    }

    fn ref_count_down(&self) {
        self.dec_refs(1);
    }

    fn size(&self) -> usize {
        self.size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_refs() {
        let r = Record::new(vec![0u8; 16], 16);
        assert_eq!(r.refs(), 0);
        r.ref_count_up();
        r.ref_count_up();
        assert_eq!(r.refs(), 2);
        r.ref_count_down();
        assert_eq!(r.refs(), 1);
        assert_eq!(r.size(), 16);
        assert_eq!(r.data().len(), 16);
    }
}
