use std::collections::{BTreeMap, BTreeSet};

use chrono::{Datelike, NaiveDate};
use tandem_core::types::MonthKey;

/// Dated exceptions to the weekly pattern, grouped by month.
///
/// Sparse: a month without exceptions has no entry, and every stored day
/// exists in its month.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExceptionCalendar(BTreeMap<MonthKey, BTreeSet<u32>>);

impl ExceptionCalendar {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Flips `day` within `month`, dropping the month entry once it is empty.
    ///
    /// Returns whether the day is now an exception. Days that do not exist in
    /// the month are ignored.
    pub fn toggle(&mut self, month: MonthKey, day: u32) -> bool {
        if !month.contains_day(day) {
            tracing::warn!(%month, day, "Ignoring exception toggle for a day outside the month");
            return false;
        }

        let days = self.0.entry(month).or_default();
        let now_set = if days.remove(&day) {
            false
        } else {
            days.insert(day);
            true
        };
        if days.is_empty() {
            self.0.remove(&month);
        }
        now_set
    }

    /// Marks `day` as an exception; returns `false` if the day does not exist
    /// in the month.
    pub fn insert(&mut self, month: MonthKey, day: u32) -> bool {
        if !month.contains_day(day) {
            return false;
        }
        self.0.entry(month).or_default().insert(day);
        true
    }

    #[must_use]
    pub fn contains(&self, month: MonthKey, day: u32) -> bool {
        self.0.get(&month).is_some_and(|days| days.contains(&day))
    }

    /// Whether `date` is an exception.
    #[must_use]
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.contains(MonthKey::of(date), date.day())
    }

    /// Exception days of one month, ascending.
    #[must_use]
    pub fn days(&self, month: MonthKey) -> Option<&BTreeSet<u32>> {
        self.0.get(&month)
    }

    /// Months holding at least one exception, with their days.
    pub fn iter(&self) -> impl Iterator<Item = (MonthKey, &BTreeSet<u32>)> {
        self.0.iter().map(|(month, days)| (*month, days))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of months with exceptions.
    #[must_use]
    pub fn month_count(&self) -> usize {
        self.0.len()
    }
}
