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
use crate::db::Item;

pub fn show_item(directory: Option<String>, id: &str) -> Fallible<Item> {
    let id = ItemId::from_hex(id)?;
    let collection = Collection::new(directory)?;
    match collection.db.item(id)? {
        Some(item) => Ok(item),
        None => fail(format!("no such item: {id}")),
    }
}

pub fn print_item(directory: Option<String>, id: &str) -> Fallible<()> {
    let Item {
        id,
        front,
        back,
        state,
    } = show_item(directory, id)?;
    println!("id:          {id}");
    println!("front:       {front}");
    println!("back:        {back}");
    println!("interval:    {}", state.interval);
    println!("ease:        {:.2}", state.ease_factor);
    println!("repetitions: {}", state.repetitions);
    println!("due:         {}", state.due_at);
    match state.last_reviewed_at {
        Some(ts) => println!("reviewed:    {ts}"),
        None => println!("reviewed:    never"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cmd::add::add_item;
    use crate::helper::at;
    use crate::helper::create_tmp_collection;

    #[test]
    fn test_show() -> Fallible<()> {
        let (_guard, dir) = create_tmp_collection()?;
        let (id, _) = add_item(Some(dir.clone()), "jamal", "camel", at("2024-01-01T08:00:00.000"))?;
        let item = show_item(Some(dir), &id.to_hex())?;
        assert_eq!(item.front, "jamal");
        assert!(item.state.is_new());
        Ok(())
    }

    #[test]
    fn test_show_bad_id() -> Fallible<()> {
        let (_guard, dir) = create_tmp_collection()?;
        let err = show_item(Some(dir), "abc").unwrap_err();
        assert_eq!(err.to_string(), "error: invalid item id: 'abc'");
        Ok(())
    }
}
