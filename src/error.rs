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

/// Hot cache error.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// A batch was submitted with mismatched key and object sequence lengths.
    ///
    /// Raised before the store lock is acquired; no mutation has occurred.
    #[error("batch length mismatch: {keys} keys, {objects} objects")]
    BatchLengthMismatch {
        /// Length of the key sequence.
        keys: usize,
        /// Length of the object sequence.
        objects: usize,
    },
}

/// Hot cache result.
pub type Result<T> = std::result::Result<T, Error>;
