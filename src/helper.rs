// Copyright 2025 Fernando Borretti
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

use mnemo_core::Fallible;
use mnemo_core::Timestamp;
use tempfile::TempDir;
use tempfile::tempdir;

pub fn at(s: &str) -> Timestamp {
    Timestamp::try_from(s.to_string()).unwrap()
}

/// An empty collection directory. The directory is deleted when the
/// returned guard is dropped.
pub fn create_tmp_collection() -> Fallible<(TempDir, String)> {
    let dir = tempdir()?;
    let path = dir.path().canonicalize()?.display().to_string();
    Ok((dir, path))
}
