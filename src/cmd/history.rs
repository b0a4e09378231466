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
use mnemo_core::fail;

use crate::collection::Collection;
use crate::db::ReviewRecord;

/// The reviews of an item, oldest first.
pub fn item_history(directory: Option<String>, id: &str) -> Fallible<Vec<ReviewRecord>> {
    let id = ItemId::from_hex(id)?;
    let collection = Collection::new(directory)?;
    if collection.db.item(id)?.is_none() {
        return fail(format!("no such item: {id}"));
    }
    collection.db.reviews(id)
}

pub fn print_history(directory: Option<String>, id: &str) -> Fallible<()> {
    let records = item_history(directory, id)?;
    if records.is_empty() {
        println!("Never reviewed.");
        return Ok(());
    }
    for r in records {
        println!(
            "{}\t{} ({})\tinterval {}\tease {:.2}\tdue {}",
            r.reviewed_at,
            r.quality,
            r.quality.label(),
            r.interval,
            r.ease_factor,
            r.due_at
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cmd::add::add_item;
    use crate::cmd::review::grade_item;
    use crate::helper::at;
    use crate::helper::create_tmp_collection;

    #[test]
    fn test_history() -> Fallible<()> {
        let (_guard, dir) = create_tmp_collection()?;
        let (id, _) = add_item(Some(dir.clone()), "layl", "night", at("2024-01-01T08:00:00.000"))?;
        let id = id.to_hex();
        assert!(item_history(Some(dir.clone()), &id)?.is_empty());
        grade_item(Some(dir.clone()), &id, "4", at("2024-01-01T09:00:00.000"))?;
        grade_item(Some(dir.clone()), &id, "2", at("2024-01-02T09:00:00.000"))?;
        let records = item_history(Some(dir), &id)?;
        let grades: Vec<&str> = records.iter().map(|r| r.quality.label()).collect();
        assert_eq!(grades, vec!["hesitant", "incorrect-familiar"]);
        assert_eq!(records[1].reviewed_at, at("2024-01-02T09:00:00.000"));
        Ok(())
    }

    #[test]
    fn test_history_unknown_item() -> Fallible<()> {
        let (_guard, dir) = create_tmp_collection()?;
        let id = mnemo_core::ItemId::from_content("no", "item").to_hex();
        assert!(item_history(Some(dir), &id).is_err());
        Ok(())
    }
}
