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

//! mnemo-core: Core library for the mnemo spaced repetition scheduler.
//!
//! This library is pure and never performs I/O. It provides:
//! - The SM-2 transition function that schedules an item after a grade
//! - The review queue selector that orders due items
//! - The review state record and its lifecycle
//! - A persistence seam (`ReviewStore`) and the `Reviewer` that drives it

pub mod error;
pub mod grade;
pub mod queue;
pub mod scheduler;
pub mod session;
pub mod state;
pub mod types;

#[cfg(test)]
mod helper;

// Re-exports for convenience
pub use error::{ErrorReport, Fallible, fail};
pub use grade::{Answer, GradeMapping, InvalidGrade, Quality};
pub use queue::{DueItems, select_due_items};
pub use scheduler::{NextReview, compute_next_review, schedule};
pub use session::{MemoryStore, ReviewStore, Reviewer};
pub use state::ReviewState;
pub use types::date::Date;
pub use types::item_id::ItemId;
pub use types::timestamp::Timestamp;
