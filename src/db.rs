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

use std::path::Path;

use mnemo_core::Date;
use mnemo_core::ErrorReport;
use mnemo_core::Fallible;
use mnemo_core::ItemId;
use mnemo_core::Quality;
use mnemo_core::ReviewState;
use mnemo_core::ReviewStore;
use mnemo_core::Timestamp;
use mnemo_core::fail;
use rusqlite::Connection;
use rusqlite::OptionalExtension;
use rusqlite::Row;
use rusqlite::TransactionBehavior;
use rusqlite::params;
use serde::Serialize;

const SCHEMA: &str = "
create table if not exists items (
    id text primary key,
    front text not null,
    back text not null,
    interval integer not null,
    ease_factor real not null,
    repetitions integer not null,
    due_at text not null,
    last_reviewed_at text
) strict;

create table if not exists reviews (
    review_id integer primary key,
    item_id text not null references items (id),
    reviewed_at text not null,
    quality integer not null,
    interval integer not null,
    ease_factor real not null,
    due_at text not null
) strict;
";

/// An item with its content and scheduling state.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Item {
    pub id: ItemId,
    pub front: String,
    pub back: String,
    pub state: ReviewState,
}

/// One entry of the review log.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ReviewRecord {
    pub reviewed_at: Timestamp,
    pub quality: Quality,
    pub interval: u32,
    pub ease_factor: f64,
    pub due_at: Date,
}

pub struct Database {
    conn: Connection,
}

pub(crate) fn db_error(e: rusqlite::Error) -> ErrorReport {
    ErrorReport::new(format!("database error: {e}"))
}

/// Columns of `items` as stored, before parsing.
struct RawState {
    interval: i64,
    ease_factor: f64,
    repetitions: i64,
    due_at: String,
    last_reviewed_at: Option<String>,
}

impl RawState {
    const COLUMNS: &'static str = "interval, ease_factor, repetitions, due_at, last_reviewed_at";

    /// Reads the state columns starting at `offset`.
    fn from_row(row: &Row, offset: usize) -> rusqlite::Result<Self> {
        Ok(RawState {
            interval: row.get(offset)?,
            ease_factor: row.get(offset + 1)?,
            repetitions: row.get(offset + 2)?,
            due_at: row.get(offset + 3)?,
            last_reviewed_at: row.get(offset + 4)?,
        })
    }

    fn parse(self) -> Fallible<ReviewState> {
        let interval = u32::try_from(self.interval)
            .map_err(|_| ErrorReport::new(format!("invalid interval: {}", self.interval)))?;
        let repetitions = u32::try_from(self.repetitions)
            .map_err(|_| ErrorReport::new(format!("invalid repetitions: {}", self.repetitions)))?;
        let due_at = Date::try_from(self.due_at)?;
        let last_reviewed_at = self.last_reviewed_at.map(Timestamp::try_from).transpose()?;
        Ok(ReviewState {
            interval,
            ease_factor: self.ease_factor,
            repetitions,
            due_at,
            last_reviewed_at,
        })
    }
}

fn read_state(conn: &Connection, id: ItemId) -> Fallible<Option<ReviewState>> {
    let sql = format!("select {} from items where id = ?1", RawState::COLUMNS);
    let raw = conn
        .query_row(&sql, params![id.to_hex()], |row| RawState::from_row(row, 0))
        .optional()
        .map_err(db_error)?;
    raw.map(RawState::parse).transpose()
}

fn write_state(conn: &Connection, id: ItemId, state: &ReviewState) -> Fallible<()> {
    let changed = conn
        .execute(
            "update items
             set interval = ?2, ease_factor = ?3, repetitions = ?4, due_at = ?5, last_reviewed_at = ?6
             where id = ?1",
            params![
                id.to_hex(),
                state.interval,
                state.ease_factor,
                state.repetitions,
                state.due_at.to_string(),
                state.last_reviewed_at.map(|ts| ts.to_string()),
            ],
        )
        .map_err(db_error)?;
    if changed == 0 {
        return fail(format!("no such item: {id}"));
    }
    Ok(())
}

fn insert_review(conn: &Connection, id: ItemId, quality: Quality, state: &ReviewState) -> Fallible<()> {
    let Some(reviewed_at) = state.last_reviewed_at else {
        return fail(format!("item {id} has not been reviewed"));
    };
    conn.execute(
        "insert into reviews (item_id, reviewed_at, quality, interval, ease_factor, due_at)
         values (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            id.to_hex(),
            reviewed_at.to_string(),
            quality.value(),
            state.interval,
            state.ease_factor,
            state.due_at.to_string(),
        ],
    )
    .map_err(db_error)?;
    Ok(())
}

impl Database {
    pub fn new(path: &Path) -> Fallible<Self> {
        let conn = Connection::open(path).map_err(db_error)?;
        Self::init(conn)
    }

    #[cfg(test)]
    pub fn in_memory() -> Fallible<Self> {
        let conn = Connection::open_in_memory().map_err(db_error)?;
        Self::init(conn)
    }

    fn init(conn: Connection) -> Fallible<Self> {
        conn.execute_batch(SCHEMA).map_err(db_error)?;
        log::debug!("database schema ready");
        Ok(Self { conn })
    }

    /// Inserts a new item. Returns false if an item with this id already
    /// exists, in which case nothing is written.
    pub fn insert_item(&self, id: ItemId, front: &str, back: &str, state: &ReviewState) -> Fallible<bool> {
        let inserted = self
            .conn
            .execute(
                "insert or ignore into items
                 (id, front, back, interval, ease_factor, repetitions, due_at, last_reviewed_at)
                 values (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                params![
                    id.to_hex(),
                    front,
                    back,
                    state.interval,
                    state.ease_factor,
                    state.repetitions,
                    state.due_at.to_string(),
                    state.last_reviewed_at.map(|ts| ts.to_string()),
                ],
            )
            .map_err(db_error)?;
        Ok(inserted == 1)
    }

    pub fn item(&self, id: ItemId) -> Fallible<Option<Item>> {
        let sql = format!("select front, back, {} from items where id = ?1", RawState::COLUMNS);
        let row = self
            .conn
            .query_row(&sql, params![id.to_hex()], |row| {
                let front: String = row.get(0)?;
                let back: String = row.get(1)?;
                Ok((front, back, RawState::from_row(row, 2)?))
            })
            .optional()
            .map_err(db_error)?;
        match row {
            Some((front, back, raw)) => Ok(Some(Item {
                id,
                front,
                back,
                state: raw.parse()?,
            })),
            None => Ok(None),
        }
    }

    /// All items, ordered by id.
    pub fn all_items(&self) -> Fallible<Vec<Item>> {
        let sql = format!("select id, front, back, {} from items order by id", RawState::COLUMNS);
        let mut stmt = self.conn.prepare(&sql).map_err(db_error)?;
        let rows = stmt
            .query_map([], |row| {
                let id: String = row.get(0)?;
                let front: String = row.get(1)?;
                let back: String = row.get(2)?;
                Ok((id, front, back, RawState::from_row(row, 3)?))
            })
            .map_err(db_error)?;
        let mut items = Vec::new();
        for row in rows {
            let (id, front, back, raw) = row.map_err(db_error)?;
            items.push(Item {
                id: ItemId::from_hex(&id)?,
                front,
                back,
                state: raw.parse()?,
            });
        }
        Ok(items)
    }

    /// The review log of an item, oldest first.
    pub fn reviews(&self, id: ItemId) -> Fallible<Vec<ReviewRecord>> {
        let mut stmt = self
            .conn
            .prepare(
                "select reviewed_at, quality, interval, ease_factor, due_at
                 from reviews where item_id = ?1 order by review_id",
            )
            .map_err(db_error)?;
        let rows = stmt
            .query_map(params![id.to_hex()], |row| {
                let reviewed_at: String = row.get(0)?;
                let quality: i64 = row.get(1)?;
                let interval: u32 = row.get(2)?;
                let ease_factor: f64 = row.get(3)?;
                let due_at: String = row.get(4)?;
                Ok((reviewed_at, quality, interval, ease_factor, due_at))
            })
            .map_err(db_error)?;
        let mut records = Vec::new();
        for row in rows {
            let (reviewed_at, quality, interval, ease_factor, due_at) = row.map_err(db_error)?;
            records.push(ReviewRecord {
                reviewed_at: Timestamp::try_from(reviewed_at)?,
                quality: Quality::try_from(quality)?,
                interval,
                ease_factor,
                due_at: Date::try_from(due_at)?,
            });
        }
        Ok(records)
    }
}

impl ReviewStore for Database {
    fn get(&self, id: ItemId) -> Fallible<Option<ReviewState>> {
        read_state(&self.conn, id)
    }

    fn put(&mut self, id: ItemId, state: ReviewState) -> Fallible<()> {
        write_state(&self.conn, id, &state)
    }

    fn items(&self) -> Fallible<Vec<(ItemId, ReviewState)>> {
        Ok(self
            .all_items()?
            .into_iter()
            .map(|item| (item.id, item.state))
            .collect())
    }

    fn update(
        &mut self,
        id: ItemId,
        f: &mut dyn FnMut(ReviewState) -> ReviewState,
    ) -> Fallible<Option<ReviewState>> {
        // Immediate, so a concurrent writer cannot slip in between the read
        // and the write.
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(db_error)?;
        let Some(state) = read_state(&tx, id)? else {
            return Ok(None);
        };
        let next = f(state);
        write_state(&tx, id, &next)?;
        tx.commit().map_err(db_error)?;
        Ok(Some(next))
    }

    fn record_review(
        &mut self,
        id: ItemId,
        quality: Quality,
        now: Timestamp,
    ) -> Fallible<Option<ReviewState>> {
        // The state and its log entry commit together. Any error drops the
        // transaction, which rolls both back.
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(db_error)?;
        let Some(state) = read_state(&tx, id)? else {
            return Ok(None);
        };
        let next = state.review(quality, now);
        write_state(&tx, id, &next)?;
        insert_review(&tx, id, quality, &next)?;
        tx.commit().map_err(db_error)?;
        Ok(Some(next))
    }
}

#[cfg(test)]
mod tests {
    use mnemo_core::GradeMapping;
    use mnemo_core::Reviewer;

    use super::*;
    use crate::helper::at;

    fn q(v: u8) -> Quality {
        Quality::try_from(v).unwrap()
    }

    #[test]
    fn test_insert_and_get() -> Fallible<()> {
        let db = Database::in_memory()?;
        let id = ItemId::from_content("kalb", "dog");
        let state = ReviewState::new(at("2024-01-01T08:00:00.000"));
        assert!(db.insert_item(id, "kalb", "dog", &state)?);
        assert!(!db.insert_item(id, "kalb", "dog", &state)?);
        let item = db.item(id)?.unwrap();
        assert_eq!(item.front, "kalb");
        assert_eq!(item.back, "dog");
        assert_eq!(item.state, state);
        assert_eq!(db.get(id)?, Some(state));
        Ok(())
    }

    #[test]
    fn test_missing_item() -> Fallible<()> {
        let mut db = Database::in_memory()?;
        let id = ItemId::from_content("missing", "item");
        assert_eq!(db.item(id)?, None);
        assert_eq!(db.get(id)?, None);
        let state = ReviewState::new(at("2024-01-01T08:00:00.000"));
        assert!(db.put(id, state).is_err());
        assert_eq!(db.update(id, &mut |s: ReviewState| s)?, None);
        Ok(())
    }

    #[test]
    fn test_update_roundtrips_all_fields() -> Fallible<()> {
        let mut db = Database::in_memory()?;
        let id = ItemId::from_content("bab", "door");
        let t = at("2024-01-01T08:00:00.000");
        db.insert_item(id, "bab", "door", &ReviewState::new(t))?;
        let reviewed_at = at("2024-01-01T08:30:15.250");
        let updated = db
            .update(id, &mut |s: ReviewState| s.review(q(3), reviewed_at))?
            .unwrap();
        let stored = db.get(id)?.unwrap();
        assert_eq!(stored, updated);
        assert_eq!(stored.ease_factor, 2.36);
        assert_eq!(stored.last_reviewed_at, Some(reviewed_at));
        Ok(())
    }

    #[test]
    fn test_items_ordered() -> Fallible<()> {
        let db = Database::in_memory()?;
        let t = at("2024-01-01T08:00:00.000");
        let mut ids = Vec::new();
        for word in ["a", "b", "c", "d"] {
            let id = ItemId::from_content(word, word);
            db.insert_item(id, word, word, &ReviewState::new(t))?;
            ids.push(id);
        }
        ids.sort();
        let stored: Vec<ItemId> = db.items()?.into_iter().map(|(id, _)| id).collect();
        assert_eq!(stored, ids);
        Ok(())
    }

    #[test]
    fn test_review_log() -> Fallible<()> {
        let mut db = Database::in_memory()?;
        let id = ItemId::from_content("yad", "hand");
        let t = at("2024-01-01T08:00:00.000");
        db.insert_item(id, "yad", "hand", &ReviewState::new(t))?;
        assert!(db.reviews(id)?.is_empty());
        db.record_review(id, q(5), t)?;
        db.record_review(id, q(1), at("2024-01-02T08:00:00.000"))?;
        let log = db.reviews(id)?;
        assert_eq!(log.len(), 2);
        assert_eq!(log[0].quality, q(5));
        assert_eq!(log[0].interval, 1);
        assert_eq!(log[0].reviewed_at, t);
        assert_eq!(log[1].quality, q(1));
        assert_eq!(log[1].due_at.to_string(), "2024-01-03");
        Ok(())
    }

    #[test]
    fn test_record_review_unknown_item() -> Fallible<()> {
        let mut db = Database::in_memory()?;
        let id = ItemId::from_content("missing", "item");
        assert_eq!(db.record_review(id, q(4), at("2024-01-01T08:00:00.000"))?, None);
        Ok(())
    }

    #[test]
    fn test_failed_log_write_leaves_state_unchanged() -> Fallible<()> {
        let mut db = Database::in_memory()?;
        let id = ItemId::from_content("ayn", "eye");
        let t = at("2024-01-01T08:00:00.000");
        let state = ReviewState::new(t);
        db.insert_item(id, "ayn", "eye", &state)?;
        db.conn.execute_batch("drop table reviews").map_err(db_error)?;
        let result = Reviewer::new(&mut db, GradeMapping::default()).grade(id, q(5), t);
        assert!(result.is_err());
        assert_eq!(db.get(id)?, Some(state));
        Ok(())
    }
}
