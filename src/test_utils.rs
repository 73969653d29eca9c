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

//! Test utilities.

use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;

use crate::{code::ManagedObject, stats::StatsSink};

/// A managed object that records every reference count transition, for
/// asserting reference conservation.
#[derive(Debug)]
pub struct TestObject {
    size: usize,
    ups: AtomicUsize,
    downs: AtomicUsize,
}

impl TestObject {
    /// Create a test object accounting for `size` bytes.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            ups: AtomicUsize::new(0),
            downs: AtomicUsize::new(0),
        }
    }

    /// Total `ref_count_up` calls observed.
    pub fn ups(&self) -> usize {
        self.ups.load(Ordering::SeqCst)
    }

    /// Total `ref_count_down` calls observed.
    pub fn downs(&self) -> usize {
        self.downs.load(Ordering::SeqCst)
    }

    /// Net outstanding references (ups minus downs).
    pub fn refs(&self) -> isize {
        self.ups() as isize - self.downs() as isize
    }
}

impl ManagedObject for TestObject {
    fn ref_count_up(&self) {
        self.ups.fetch_add(1, Ordering::SeqCst);
    }

    fn ref_count_down(&self) {
        self.downs.fetch_add(1, Ordering::SeqCst);
    }

    fn size(&self) -> usize {
        self.size
    }
}

/// A stats sink that records every reported usage value in order.
#[derive(Debug, Default)]
pub struct RecordingStats {
    updates: Mutex<Vec<usize>>,
}

impl RecordingStats {
    /// All usage values reported so far, in report order.
    pub fn updates(&self) -> Vec<usize> {
        self.updates.lock().clone()
    }
}

impl StatsSink for RecordingStats {
    fn update_usage(&self, usage: usize) {
        self.updates.lock().push(usage);
    }
}
