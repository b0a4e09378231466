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

use clap::Parser;
use mnemo_core::Fallible;
use mnemo_core::Timestamp;

use crate::cmd::add::print_add;
use crate::cmd::due::print_due;
use crate::cmd::export::export_collection;
use crate::cmd::history::print_history;
use crate::cmd::review::answer_item;
use crate::cmd::review::grade_item;
use crate::cmd::review::print_next;
use crate::cmd::show::print_item;

#[derive(Parser)]
#[command(version, about, long_about = None)]
enum Command {
    /// Add an item to the collection. Prints the item's id.
    Add {
        /// The prompt side of the item.
        front: String,
        /// The answer side of the item.
        back: String,
        /// Path to the collection directory. By default, the current working directory is used.
        #[arg(long)]
        directory: Option<String>,
    },
    /// List the items due for review, most overdue first.
    Due {
        /// Path to the collection directory. By default, the current working directory is used.
        #[arg(long)]
        directory: Option<String>,
        /// Maximum number of items to list. Overrides the configured limit.
        #[arg(long)]
        limit: Option<usize>,
        /// Evaluate at this timestamp (YYYY-MM-DDTHH:MM:SS.mmm) instead of now.
        #[arg(long)]
        now: Option<String>,
    },
    /// Grade an item on the 0 to 5 scale.
    Grade {
        /// The item's id.
        id: String,
        /// The grade: 0 to 2 for a failed recall, 3 to 5 for a successful one.
        #[arg(allow_hyphen_values = true)]
        quality: String,
        /// Path to the collection directory. By default, the current working directory is used.
        #[arg(long)]
        directory: Option<String>,
        /// Record the review at this timestamp instead of now.
        #[arg(long)]
        now: Option<String>,
    },
    /// Grade an item as correct or incorrect, using the configured grade mapping.
    Answer {
        /// The item's id.
        id: String,
        /// Either "correct" or "incorrect".
        answer: String,
        /// Path to the collection directory. By default, the current working directory is used.
        #[arg(long)]
        directory: Option<String>,
        /// Record the review at this timestamp instead of now.
        #[arg(long)]
        now: Option<String>,
    },
    /// Print an item and its scheduling state.
    Show {
        /// The item's id.
        id: String,
        /// Path to the collection directory. By default, the current working directory is used.
        #[arg(long)]
        directory: Option<String>,
    },
    /// Print the review log of an item.
    History {
        /// The item's id.
        id: String,
        /// Path to the collection directory. By default, the current working directory is used.
        #[arg(long)]
        directory: Option<String>,
    },
    /// Export a collection as JSON.
    Export {
        /// Path to the collection directory. By default, the current working directory is used.
        #[arg(long)]
        directory: Option<String>,
        /// Optional path to the output file. By default, the output is printed to stdout.
        #[arg(long)]
        output: Option<String>,
    },
}

/// Every command evaluates against a single timestamp, read once.
fn resolve_now(now: Option<String>) -> Fallible<Timestamp> {
    match now {
        Some(s) => Timestamp::try_from(s),
        None => Ok(Timestamp::now()),
    }
}

pub fn entrypoint() -> Fallible<()> {
    let cli: Command = Command::parse();
    match cli {
        Command::Add {
            front,
            back,
            directory,
        } => print_add(directory, &front, &back, Timestamp::now()),
        Command::Due {
            directory,
            limit,
            now,
        } => print_due(directory, limit, resolve_now(now)?),
        Command::Grade {
            id,
            quality,
            directory,
            now,
        } => {
            let state = grade_item(directory, &id, &quality, resolve_now(now)?)?;
            print_next(&state);
            Ok(())
        }
        Command::Answer {
            id,
            answer,
            directory,
            now,
        } => {
            let state = answer_item(directory, &id, &answer, resolve_now(now)?)?;
            print_next(&state);
            Ok(())
        }
        Command::Show { id, directory } => print_item(directory, &id),
        Command::History { id, directory } => print_history(directory, &id),
        Command::Export { directory, output } => export_collection(directory, output),
    }
}
