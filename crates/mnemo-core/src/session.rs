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

//! The boundary between the scheduler and the code that persists its
//! results. Persistence is injected through `ReviewStore`; the scheduler
//! itself holds nothing between calls.

use std::collections::BTreeMap;

use crate::error::Fallible;
use crate::error::fail;
use crate::grade::Answer;
use crate::grade::GradeMapping;
use crate::grade::Quality;
use crate::queue::select_due_items;
use crate::state::ReviewState;
use crate::types::item_id::ItemId;
use crate::types::timestamp::Timestamp;

/// Persistent storage for review states.
pub trait ReviewStore {
    fn get(&self, id: ItemId) -> Fallible<Option<ReviewState>>;

    fn put(&mut self, id: ItemId, state: ReviewState) -> Fallible<()>;

    /// Every stored item, in a stable order.
    fn items(&self) -> Fallible<Vec<(ItemId, ReviewState)>>;

    /// Reads, transforms, and writes back one item's state as a single
    /// step. Returns `None` if the item is not stored. Stores shared
    /// between processes should override this to run inside a transaction.
    fn update(
        &mut self,
        id: ItemId,
        f: &mut dyn FnMut(ReviewState) -> ReviewState,
    ) -> Fallible<Option<ReviewState>> {
        match self.get(id)? {
            Some(state) => {
                let next = f(state);
                self.put(id, next)?;
                Ok(Some(next))
            }
            None => Ok(None),
        }
    }

    /// Grades one item and stores the result. Returns `None` if the item is
    /// not stored. Stores that keep a review log should override this so the
    /// state and the log entry are written together or not at all.
    fn record_review(
        &mut self,
        id: ItemId,
        quality: Quality,
        now: Timestamp,
    ) -> Fallible<Option<ReviewState>> {
        self.update(id, &mut |state: ReviewState| state.review(quality, now))
    }
}

/// An in-memory store.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    states: BTreeMap<ItemId, ReviewState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

impl ReviewStore for MemoryStore {
    fn get(&self, id: ItemId) -> Fallible<Option<ReviewState>> {
        Ok(self.states.get(&id).copied())
    }

    fn put(&mut self, id: ItemId, state: ReviewState) -> Fallible<()> {
        self.states.insert(id, state);
        Ok(())
    }

    fn items(&self) -> Fallible<Vec<(ItemId, ReviewState)>> {
        Ok(self.states.iter().map(|(id, state)| (*id, *state)).collect())
    }
}

/// Applies grades to stored items. Holding the store mutably means there is
/// one writer per store handle for as long as the reviewer lives.
pub struct Reviewer<'a, S: ReviewStore> {
    store: &'a mut S,
    mapping: GradeMapping,
}

impl<'a, S: ReviewStore> Reviewer<'a, S> {
    pub fn new(store: &'a mut S, mapping: GradeMapping) -> Self {
        Self { store, mapping }
    }

    pub fn mapping(&self) -> GradeMapping {
        self.mapping
    }

    /// Starts tracking an item. Enrolling an item twice keeps its existing
    /// state.
    pub fn enroll(&mut self, id: ItemId, now: Timestamp) -> Fallible<ReviewState> {
        if let Some(existing) = self.store.get(id)? {
            log::debug!("item {id} already enrolled");
            return Ok(existing);
        }
        let state = ReviewState::new(now);
        self.store.put(id, state)?;
        log::debug!("enrolled item {id}, due {}", state.due_at);
        Ok(state)
    }

    /// Grades an item and persists the new state.
    pub fn grade(&mut self, id: ItemId, quality: Quality, now: Timestamp) -> Fallible<ReviewState> {
        let updated = self.store.record_review(id, quality, now)?;
        match updated {
            Some(state) => {
                log::debug!(
                    "graded item {id} as {quality}: interval {}, due {}",
                    state.interval,
                    state.due_at
                );
                Ok(state)
            }
            None => fail(format!("no such item: {id}")),
        }
    }

    /// Grades an item from a binary answer, through the grade mapping.
    pub fn answer(&mut self, id: ItemId, answer: Answer, now: Timestamp) -> Fallible<ReviewState> {
        let quality = self.mapping.quality(answer);
        self.grade(id, quality, now)
    }

    /// The items due at `now`, in presentation order.
    pub fn due(&self, now: Timestamp) -> Fallible<Vec<ItemId>> {
        let items = self.store.items()?;
        let due = select_due_items(items.iter().map(|(id, state)| (*id, state)), now);
        Ok(due.collect())
    }
}
