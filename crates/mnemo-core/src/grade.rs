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

use std::error::Error;
use std::fmt::Display;
use std::fmt::Formatter;

use serde::Deserialize;
use serde::Serialize;

use crate::error::ErrorReport;
use crate::error::fail;

/// The lowest grade that counts as a successful recall.
pub const PASSING_GRADE: u8 = 3;

/// The highest grade.
pub const MAX_GRADE: u8 = 5;

/// A grade outside the closed range [0, 5]. This is a programming error in
/// the caller: every legitimate input surface produces in-range grades.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InvalidGrade(pub i64);

impl Display for InvalidGrade {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid grade {}: must be between 0 and {MAX_GRADE}", self.0)
    }
}

impl Error for InvalidGrade {}

/// A recall quality grade in the closed range [0, 5]. Grades 0 to 2 are
/// failed recalls; 3 to 5 are successful recalls of increasing confidence.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Quality(u8);

impl Quality {
    pub const BLACKOUT: Quality = Quality(0);
    pub const INCORRECT: Quality = Quality(1);
    pub const PERFECT: Quality = Quality(5);

    pub fn value(self) -> u8 {
        self.0
    }

    /// Whether this grade counts as a successful recall.
    pub fn is_pass(self) -> bool {
        self.0 >= PASSING_GRADE
    }

    pub fn is_perfect(self) -> bool {
        self.0 == MAX_GRADE
    }

    /// The conventional SuperMemo name of this grade.
    pub fn label(self) -> &'static str {
        match self.0 {
            0 => "blackout",
            1 => "incorrect",
            2 => "incorrect-familiar",
            3 => "difficult",
            4 => "hesitant",
            _ => "perfect",
        }
    }
}

impl TryFrom<i64> for Quality {
    type Error = InvalidGrade;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match u8::try_from(value) {
            Ok(v) if v <= MAX_GRADE => Ok(Quality(v)),
            _ => Err(InvalidGrade(value)),
        }
    }
}

impl TryFrom<u8> for Quality {
    type Error = InvalidGrade;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Quality::try_from(i64::from(value))
    }
}

impl TryFrom<String> for Quality {
    type Error = ErrorReport;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let n: i64 = match value.trim().parse() {
            Ok(n) => n,
            Err(_) => return fail(format!("invalid grade string: '{value}'")),
        };
        Ok(Quality::try_from(n)?)
    }
}

impl From<Quality> for u8 {
    fn from(q: Quality) -> u8 {
        q.0
    }
}

impl Display for Quality {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The binary signal produced by a correct/incorrect answer surface.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Answer {
    Correct,
    Incorrect,
}

impl Answer {
    pub fn as_str(&self) -> &str {
        match self {
            Answer::Correct => "correct",
            Answer::Incorrect => "incorrect",
        }
    }
}

impl TryFrom<String> for Answer {
    type Error = ErrorReport;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "correct" => Ok(Answer::Correct),
            "incorrect" => Ok(Answer::Incorrect),
            _ => fail(format!("invalid answer string: '{value}'")),
        }
    }
}

/// Maps a binary answer onto the 0 to 5 grade scale.
///
/// Kept apart from the scheduler so a richer answer surface can replace it.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GradeMapping {
    pub correct: Quality,
    pub incorrect: Quality,
}

impl GradeMapping {
    pub fn quality(&self, answer: Answer) -> Quality {
        match answer {
            Answer::Correct => self.correct,
            Answer::Incorrect => self.incorrect,
        }
    }
}

impl Default for GradeMapping {
    fn default() -> Self {
        Self {
            correct: Quality::PERFECT,
            incorrect: Quality::INCORRECT,
        }
    }
}
