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

//! The SM-2 transition function.
//!
//! Given a grade and an item's prior interval and ease, computes the next
//! interval, the next ease, and the due date. The function is pure: the
//! evaluation moment is an explicit argument and nothing else is read.
//!
//! Rounding: intervals use `f64::round`, which rounds half away from zero
//! (12.5 days becomes 13). The stored ease is rounded to two decimals with
//! the same rule, after the floor has been applied to the unrounded value.

use serde::Deserialize;
use serde::Serialize;

use crate::grade::InvalidGrade;
use crate::grade::Quality;
use crate::types::date::Date;
use crate::types::timestamp::Timestamp;

/// The ease factor of an item that has never been graded.
pub const INITIAL_EASE: f64 = 2.5;

/// The minimum ease factor.
pub const MIN_EASE: f64 = 1.3;

/// Interval multiplier for a perfect grade on a mature item.
pub const PERFECT_BONUS: f64 = 1.3;

/// The interval after a failed recall, in days.
pub const FAILED_INTERVAL: u32 = 1;

/// The interval after the first successful recall, in days.
pub const FIRST_INTERVAL: u32 = 1;

/// The interval after the second successful recall, in days.
pub const SECOND_INTERVAL: u32 = 6;

pub type Ease = f64;

/// The outcome of grading an item once.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct NextReview {
    /// Days until the next review. Always at least one.
    pub next_interval: u32,
    /// The updated ease factor, rounded to two decimals.
    pub next_ease: Ease,
    /// The date the item is next due.
    pub due_date: Date,
}

/// Validates `quality` and schedules the next review.
///
/// Fails with `InvalidGrade` if `quality` is outside [0, 5]; the check
/// happens before either branch runs.
pub fn compute_next_review(
    quality: i64,
    current_interval: u32,
    current_ease: Ease,
    now: Timestamp,
) -> Result<NextReview, InvalidGrade> {
    let quality = Quality::try_from(quality)?;
    Ok(schedule(quality, current_interval, current_ease, now))
}

/// Schedules the next review for an already validated grade.
pub fn schedule(
    quality: Quality,
    current_interval: u32,
    current_ease: Ease,
    now: Timestamp,
) -> NextReview {
    let today: Date = now.date();
    if !quality.is_pass() {
        // A lapse restarts the growth trajectory but leaves the ease alone.
        let next_ease = floor_ease(current_ease);
        log::debug!("grade {quality} failed: interval reset to {FAILED_INTERVAL}");
        return NextReview {
            next_interval: FAILED_INTERVAL,
            next_ease,
            due_date: today.add_days(FAILED_INTERVAL),
        };
    }
    let new_ease: Ease = floor_ease(current_ease + ease_delta(quality));
    let next_interval: u32 = match current_interval {
        0 => FIRST_INTERVAL,
        1 => SECOND_INTERVAL,
        prior => {
            let bonus = if quality.is_perfect() {
                PERFECT_BONUS
            } else {
                1.0
            };
            round_interval(f64::from(prior) * new_ease * bonus)
        }
    };
    let next_ease = round_ease(new_ease);
    log::debug!(
        "grade {quality} passed: interval {current_interval} -> {next_interval}, ease {current_ease} -> {next_ease}"
    );
    NextReview {
        next_interval,
        next_ease,
        due_date: today.add_days(next_interval),
    }
}

/// The SM-2 ease adjustment: +0.10 for a 5, 0.00 for a 4, -0.14 for a 3.
pub fn ease_delta(quality: Quality) -> f64 {
    let q = f64::from(quality.value());
    0.1 - (5.0 - q) * (0.08 + (5.0 - q) * 0.02)
}

/// Clamps an ease factor to the minimum. A non-finite ease becomes the
/// minimum.
fn floor_ease(ease: Ease) -> Ease {
    if !ease.is_finite() {
        return MIN_EASE;
    }
    ease.max(MIN_EASE)
}

fn round_ease(ease: Ease) -> Ease {
    (ease * 100.0).round() / 100.0
}

/// Rounds a raw interval to whole days. Never returns less than one day.
fn round_interval(raw: f64) -> u32 {
    // Float-to-int casts saturate, so huge intervals stop at u32::MAX.
    let days = raw.round() as u32;
    days.max(FIRST_INTERVAL)
}
