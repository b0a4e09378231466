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

use mnemo_core::Answer;
use mnemo_core::Fallible;
use mnemo_core::ItemId;
use mnemo_core::Quality;
use mnemo_core::ReviewState;
use mnemo_core::Reviewer;
use mnemo_core::Timestamp;

use crate::collection::Collection;

/// Grades an item on the 0 to 5 scale. The grade and id are validated before
/// the collection is opened.
pub fn grade_item(
    directory: Option<String>,
    id: &str,
    quality: &str,
    now: Timestamp,
) -> Fallible<ReviewState> {
    let quality = Quality::try_from(quality.to_string())?;
    let id = ItemId::from_hex(id)?;
    let mut collection = Collection::new(directory)?;
    let mapping = collection.config.grading;
    Reviewer::new(&mut collection.db, mapping).grade(id, quality, now)
}

/// Grades an item from a correct/incorrect answer, using the collection's
/// grade mapping.
pub fn answer_item(
    directory: Option<String>,
    id: &str,
    answer: &str,
    now: Timestamp,
) -> Fallible<ReviewState> {
    let answer = Answer::try_from(answer.to_string())?;
    let id = ItemId::from_hex(id)?;
    let mut collection = Collection::new(directory)?;
    let mapping = collection.config.grading;
    Reviewer::new(&mut collection.db, mapping).answer(id, answer, now)
}

pub fn print_next(state: &ReviewState) {
    println!(
        "next review in {} day(s), on {} (ease {:.2}, streak {})",
        state.interval, state.due_at, state.ease_factor, state.repetitions
    );
}
