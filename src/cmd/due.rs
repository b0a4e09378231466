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
use mnemo_core::select_due_items;

use crate::collection::Collection;
use crate::db::Item;

/// The items due at `now`, in presentation order. The limit falls back to
/// the collection's configured queue limit.
pub fn due_items(directory: Option<String>, limit: Option<usize>, now: Timestamp) -> Fallible<Vec<Item>> {
    let collection = Collection::new(directory)?;
    let limit: usize = limit.or(collection.config.queue.limit).unwrap_or(usize::MAX);
    let mut items: Vec<Option<Item>> = collection.db.all_items()?.into_iter().map(Some).collect();
    let order: Vec<usize> = select_due_items(
        items
            .iter()
            .enumerate()
            .filter_map(|(i, item)| item.as_ref().map(|item| (i, &item.state))),
        now,
    )
    .take(limit)
    .collect();
    Ok(order.into_iter().filter_map(|i| items[i].take()).collect())
}

pub fn print_due(directory: Option<String>, limit: Option<usize>, now: Timestamp) -> Fallible<()> {
    let items = due_items(directory, limit, now)?;
    if items.is_empty() {
        println!("No items due.");
        return Ok(());
    }
    let today = now.date();
    for item in items {
        let overdue = item.state.due_at.days_until(today);
        println!("{}\t{}\t+{overdue}d\t{}", item.id, item.state.due_at, item.front);
    }
    Ok(())
}
