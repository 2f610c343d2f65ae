use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Months, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// A calendar month, stored as the first day of that month.
///
/// The wire form is `"{year}-{zero_based_month}"`, so March 2025 is `"2025-2"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey(NaiveDate);

impl MonthKey {
    /// ## Summary
    /// Builds a month key from a year and a one-based month.
    ///
    /// ## Errors
    /// Returns `CoreError::InvalidMonthKey` if the month is outside 1..=12 or the
    /// year is outside the supported calendar range.
    pub fn new(year: i32, month: u32) -> CoreResult<Self> {
        NaiveDate::from_ymd_opt(year, month, 1)
            .map(Self)
            .ok_or_else(|| CoreError::InvalidMonthKey(format!("{year}/{month}")))
    }

    /// The month containing `date`.
    #[must_use]
    pub fn of(date: NaiveDate) -> Self {
        Self(date.with_day(1).unwrap_or(date))
    }

    #[must_use]
    pub fn year(self) -> i32 {
        self.0.year()
    }

    /// One-based month number.
    #[must_use]
    pub fn month(self) -> u32 {
        self.0.month()
    }

    /// Weekday of the first day of the month.
    #[must_use]
    pub fn first_weekday(self) -> Weekday {
        self.0.weekday()
    }

    #[must_use]
    pub fn days_in_month(self) -> u32 {
        let next = self.0.checked_add_months(Months::new(1));
        next.and_then(|next| u32::try_from(next.signed_duration_since(self.0).num_days()).ok())
            .unwrap_or(31)
    }

    /// The date of `day` within this month, if that day exists.
    #[must_use]
    pub fn date(self, day: u32) -> Option<NaiveDate> {
        self.0.with_day(day)
    }

    #[must_use]
    pub fn contains_day(self, day: u32) -> bool {
        (1..=self.days_in_month()).contains(&day)
    }

    /// The following month; saturates at the end of the supported range.
    #[must_use]
    pub fn next(self) -> Self {
        self.0.checked_add_months(Months::new(1)).map_or(self, Self)
    }

    /// The preceding month; saturates at the start of the supported range.
    #[must_use]
    pub fn previous(self) -> Self {
        self.0.checked_sub_months(Months::new(1)).map_or(self, Self)
    }

    /// Human-readable label such as `March 2025`.
    #[must_use]
    pub fn label(self) -> String {
        self.0.format("%B %Y").to_string()
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.year(), self.month() - 1)
    }
}

impl FromStr for MonthKey {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        let invalid = || CoreError::InvalidMonthKey(s.to_string());

        // A leading '-' belongs to a negative year
        let split_at = s
            .char_indices()
            .skip(1)
            .find(|&(_, c)| c == '-')
            .map(|(idx, _)| idx)
            .ok_or_else(invalid)?;
        let (year, month) = (&s[..split_at], &s[split_at + 1..]);

        let year = year.trim().parse::<i32>().map_err(|_err| invalid())?;
        let zero_based = month.trim().parse::<u32>().map_err(|_err| invalid())?;
        if zero_based > 11 {
            return Err(invalid());
        }
        Self::new(year, zero_based + 1).map_err(|_err| invalid())
    }
}

impl Serialize for MonthKey {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MonthKey {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Identifying name of an agent as shown in a schedule.
///
/// Always non-empty and trimmed; an empty slot side is `None`, never an empty name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AgentName(String);

impl AgentName {
    /// Returns `None` for blank input.
    #[must_use]
    pub fn new(name: &str) -> Option<Self> {
        let trimmed = name.trim();
        (!trimmed.is_empty()).then(|| Self(trimmed.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for AgentName {
    type Error = CoreError;

    fn try_from(value: String) -> CoreResult<Self> {
        Self::new(&value).ok_or_else(|| CoreError::InvalidInput("empty agent name".to_string()))
    }
}

impl From<AgentName> for String {
    fn from(value: AgentName) -> Self {
        value.0
    }
}

impl fmt::Display for AgentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
