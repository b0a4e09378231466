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

//! Selects and orders the items due for review.

use std::iter::FusedIterator;
use std::vec::IntoIter;

use crate::state::ReviewState;
use crate::types::timestamp::Timestamp;

/// Due items, most overdue first.
#[derive(Debug)]
pub struct DueItems<K> {
    inner: IntoIter<K>,
}

impl<K> Iterator for DueItems<K> {
    type Item = K;

    fn next(&mut self) -> Option<K> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K> ExactSizeIterator for DueItems<K> {}

impl<K> FusedIterator for DueItems<K> {}

/// Selects the items that are due at `now` and orders them by due date,
/// then by interval, so that among equally overdue items the more fragile
/// ones come first. The sort is stable: items with equal keys keep their
/// input order.
pub fn select_due_items<'a, K, I>(records: I, now: Timestamp) -> DueItems<K>
where
    I: IntoIterator<Item = (K, &'a ReviewState)>,
{
    let today = now.date();
    let mut due: Vec<(K, &ReviewState)> = records
        .into_iter()
        .filter(|(_, state)| state.due_at <= today)
        .collect();
    due.sort_by_key(|(_, state)| (state.due_at, state.interval));
    log::debug!("{} items due on {today}", due.len());
    let keys: Vec<K> = due.into_iter().map(|(key, _)| key).collect();
    DueItems {
        inner: keys.into_iter(),
    }
}
