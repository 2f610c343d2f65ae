use chrono::{Datelike, NaiveDate, Weekday};
use tandem_core::types::MonthKey;

use super::calendar::GridEvent;
use super::exceptions::ExceptionCalendar;
use super::weekdays::WeekdaySet;

/// Both availability layers of one agent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AvailabilitySnapshot {
    pub weekdays: WeekdaySet,
    pub exceptions: ExceptionCalendar,
}

impl AvailabilitySnapshot {
    /// ## Summary
    /// Whether the agent is available on `date`.
    ///
    /// The weekly pattern decides, unless `date` is an exception, in which
    /// case the pattern's answer is inverted.
    #[must_use]
    pub fn resolve(&self, date: NaiveDate) -> bool {
        let base = self.weekdays.contains(date.weekday());
        base ^ self.exceptions.covers(date)
    }
}

/// Editable availability of the agent currently open in the agent form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AvailabilityModel {
    snapshot: AvailabilitySnapshot,
}

impl AvailabilityModel {
    /// Empty pattern, no exceptions.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starting point for a brand-new agent: Monday through Friday.
    #[must_use]
    pub fn for_new_agent() -> Self {
        Self::from_snapshot(AvailabilitySnapshot {
            weekdays: WeekdaySet::workweek(),
            exceptions: ExceptionCalendar::new(),
        })
    }

    #[must_use]
    pub const fn from_snapshot(snapshot: AvailabilitySnapshot) -> Self {
        Self { snapshot }
    }

    #[must_use]
    pub const fn snapshot(&self) -> &AvailabilitySnapshot {
        &self.snapshot
    }

    pub fn toggle_weekday(&mut self, day: Weekday) {
        let now_set = self.snapshot.weekdays.toggle(day);
        tracing::trace!(weekday = %day, available = now_set, "Weekday toggled");
    }

    pub fn toggle_exception(&mut self, month: MonthKey, day: u32) {
        let now_set = self.snapshot.exceptions.toggle(month, day);
        tracing::trace!(%month, day, exception = now_set, "Exception toggled");
    }

    /// Applies a click reported by the calendar grid.
    pub fn apply(&mut self, event: GridEvent) {
        match event {
            GridEvent::WeekdayToggled(day) => self.toggle_weekday(day),
            GridEvent::DayToggled { month, day } => self.toggle_exception(month, day),
        }
    }

    #[must_use]
    pub fn resolve(&self, date: NaiveDate) -> bool {
        self.snapshot.resolve(date)
    }

    /// Resolved availability of every day of `month`, index 0 being the 1st.
    #[must_use]
    pub fn resolve_month(&self, month: MonthKey) -> Vec<bool> {
        (1..=month.days_in_month())
            .filter_map(|day| month.date(day))
            .map(|date| self.resolve(date))
            .collect()
    }
}
