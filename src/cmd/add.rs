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
use mnemo_core::ItemId;
use mnemo_core::ReviewState;
use mnemo_core::Timestamp;
use mnemo_core::fail;

use crate::collection::Collection;

/// Adds an item to the collection. The item is due immediately. Returns the
/// item's id and whether it was newly added.
pub fn add_item(
    directory: Option<String>,
    front: &str,
    back: &str,
    now: Timestamp,
) -> Fallible<(ItemId, bool)> {
    if front.trim().is_empty() {
        return fail("front must not be empty.");
    }
    if back.trim().is_empty() {
        return fail("back must not be empty.");
    }
    let collection = Collection::new(directory)?;
    let id = ItemId::from_content(front, back);
    let added = collection
        .db
        .insert_item(id, front, back, &ReviewState::new(now))?;
    if added {
        log::debug!("added item {id} to {}", collection.directory.display());
    } else {
        log::debug!("item {id} already exists");
    }
    Ok((id, added))
}

pub fn print_add(directory: Option<String>, front: &str, back: &str, now: Timestamp) -> Fallible<()> {
    let (id, added) = add_item(directory, front, back, now)?;
    if added {
        println!("{id}");
    } else {
        println!("{id} (already present)");
    }
    Ok(())
}
