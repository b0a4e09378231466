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

use std::fs::write;

use mnemo_core::Fallible;

use crate::collection::Collection;

/// Exports every item and its state as JSON, to `output` or to stdout.
pub fn export_collection(directory: Option<String>, output: Option<String>) -> Fallible<()> {
    let collection = Collection::new(directory)?;
    let items = collection.db.all_items()?;
    let json = serde_json::to_string_pretty(&items)?;
    match output {
        Some(path) => {
            write(&path, json)?;
            log::debug!("exported {} items to {path}", items.len());
        }
        None => println!("{json}"),
    }
    Ok(())
}
