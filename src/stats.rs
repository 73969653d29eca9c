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

use std::fmt::Debug;

/// External statistics sink for the hot cache.
///
/// [`StatsSink::update_usage`] is called once per mutation call (not per item)
/// with the post-mutation aggregate resident size, strictly after the store
/// lock has been released. The call is fire-and-forget; implementations must
/// not panic on the mutation path.
pub trait StatsSink: Send + Sync + 'static + Debug {
    /// Report the new aggregate resident size of the store.
    fn update_usage(&self, usage: usize);
}

/// Default sink that discards usage reports.
#[derive(Debug, Default)]
pub struct NoopStatsSink;

impl StatsSink for NoopStatsSink {
    fn update_usage(&self, _usage: usize) {}
}
