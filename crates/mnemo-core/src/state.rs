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

use serde::Deserialize;
use serde::Serialize;

use crate::grade::Quality;
use crate::scheduler::Ease;
use crate::scheduler::INITIAL_EASE;
use crate::scheduler::NextReview;
use crate::scheduler::schedule;
use crate::types::date::Date;
use crate::types::timestamp::Timestamp;

/// Scheduling state for one learnable item.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReviewState {
    /// Days between the last review and the next one. Zero only for an item
    /// that has never been graded.
    pub interval: u32,
    /// Governs how fast the interval grows. Never below 1.3.
    pub ease_factor: Ease,
    /// Length of the current streak of successful recalls.
    pub repetitions: u32,
    /// The date the item is next due.
    pub due_at: Date,
    /// When the item was last graded, if ever.
    pub last_reviewed_at: Option<Timestamp>,
}

impl ReviewState {
    /// The state of an item entering study. It is due immediately.
    pub fn new(enrolled_at: Timestamp) -> Self {
        Self {
            interval: 0,
            ease_factor: INITIAL_EASE,
            repetitions: 0,
            due_at: enrolled_at.date(),
            last_reviewed_at: None,
        }
    }

    pub fn is_new(&self) -> bool {
        self.last_reviewed_at.is_none()
    }

    pub fn is_due(&self, now: Timestamp) -> bool {
        self.due_at <= now.date()
    }

    /// The state after grading this item at `now`.
    pub fn review(&self, quality: Quality, now: Timestamp) -> ReviewState {
        let NextReview {
            next_interval,
            next_ease,
            due_date,
        } = schedule(quality, self.interval, self.ease_factor, now);
        let repetitions = if quality.is_pass() {
            self.repetitions.saturating_add(1)
        } else {
            0
        };
        ReviewState {
            interval: next_interval,
            ease_factor: next_ease,
            repetitions,
            due_at: due_date,
            last_reviewed_at: Some(now),
        }
    }
}
