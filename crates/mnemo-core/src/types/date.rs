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

use std::fmt::Display;
use std::fmt::Formatter;

use chrono::Days;
use chrono::NaiveDate;
use serde::Deserialize;
use serde::Serialize;

use crate::error::ErrorReport;

/// A calendar date. Due dates are tracked at this granularity.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Date(NaiveDate);

impl Date {
    pub fn new(naive_date: NaiveDate) -> Self {
        Self(naive_date)
    }

    #[cfg(feature = "clock")]
    pub fn today() -> Self {
        Self(chrono::Local::now().naive_local().date())
    }

    pub fn into_inner(self) -> NaiveDate {
        self.0
    }

    /// Adds whole days to this date. Saturates at the last representable
    /// date instead of overflowing.
    pub fn add_days(self, days: u32) -> Self {
        let date = self
            .0
            .checked_add_days(Days::new(u64::from(days)))
            .unwrap_or(NaiveDate::MAX);
        Self(date)
    }

    /// Signed number of days from this date to `other`.
    pub fn days_until(self, other: Date) -> i64 {
        (other.0 - self.0).num_days()
    }
}

impl Display for Date {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl TryFrom<String> for Date {
    type Error = ErrorReport;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let date = NaiveDate::parse_from_str(&value, "%Y-%m-%d")
            .map_err(|_| ErrorReport::new(format!("invalid date: {}", value)))?;
        Ok(Date(date))
    }
}

impl From<Date> for String {
    fn from(date: Date) -> String {
        date.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Fallible;

    fn ymd(y: i32, m: u32, d: u32) -> Date {
        Date::new(NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    #[test]
    fn test_serialize() -> Fallible<()> {
        let serialized = serde_json::to_string(&ymd(2024, 1, 2))?;
        assert_eq!(serialized, "\"2024-01-02\"");
        Ok(())
    }

    #[test]
    fn test_deserialize() -> Fallible<()> {
        let date: Date = serde_json::from_str("\"2024-01-02\"")?;
        assert_eq!(date, ymd(2024, 1, 2));
        Ok(())
    }

    #[test]
    fn test_invalid_date() {
        assert!(Date::try_from("2024-13-01".to_string()).is_err());
        assert!(Date::try_from("yesterday".to_string()).is_err());
    }

    #[test]
    fn test_add_days_crosses_month_and_leap_day() {
        assert_eq!(ymd(2024, 1, 31).add_days(1), ymd(2024, 2, 1));
        assert_eq!(ymd(2024, 2, 28).add_days(1), ymd(2024, 2, 29));
        assert_eq!(ymd(2023, 2, 28).add_days(1), ymd(2023, 3, 1));
        assert_eq!(ymd(2024, 12, 26).add_days(6), ymd(2025, 1, 1));
    }

    #[test]
    fn test_add_zero_days() {
        assert_eq!(ymd(2024, 5, 5).add_days(0), ymd(2024, 5, 5));
    }

    #[test]
    fn test_add_days_saturates() {
        assert_eq!(ymd(2024, 1, 1).add_days(u32::MAX), Date::new(NaiveDate::MAX));
    }

    #[test]
    fn test_days_until() {
        assert_eq!(ymd(2024, 1, 1).days_until(ymd(2024, 1, 23)), 22);
        assert_eq!(ymd(2024, 1, 23).days_until(ymd(2024, 1, 1)), -22);
    }
}
