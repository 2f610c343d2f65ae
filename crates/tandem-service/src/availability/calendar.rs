//! Month grid the availability calendar is drawn from.
//!
//! The grid knows nothing about availability. It lays out a month in
//! Sunday-first rows and turns clicks on real cells into [`GridEvent`]s.

use chrono::{NaiveDate, Weekday};
use tandem_core::types::MonthKey;

use super::weekdays::weekday_from_index;

/// Column headers, Sunday first.
pub const HEADER_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// A click on the grid, as understood by the availability model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridEvent {
    /// A weekday column header was clicked.
    WeekdayToggled(Weekday),
    /// A day cell was clicked.
    DayToggled { month: MonthKey, day: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridCell {
    Blank,
    Day(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarGrid {
    month: MonthKey,
}

impl CalendarGrid {
    #[must_use]
    pub const fn new(month: MonthKey) -> Self {
        Self { month }
    }

    /// Grid showing the month that contains `date`.
    #[must_use]
    pub fn containing(date: NaiveDate) -> Self {
        Self::new(MonthKey::of(date))
    }

    #[must_use]
    pub const fn month(&self) -> MonthKey {
        self.month
    }

    pub fn next_month(&mut self) {
        self.month = self.month.next();
    }

    pub fn previous_month(&mut self) {
        self.month = self.month.previous();
    }

    /// Blank cells before the 1st in the first row.
    #[must_use]
    pub fn leading_blanks(&self) -> u32 {
        self.month.first_weekday().num_days_from_sunday()
    }

    /// Rows of seven cells covering the whole month.
    #[must_use]
    pub fn layout(&self) -> Vec<[GridCell; 7]> {
        let cells: Vec<GridCell> = (0..self.leading_blanks())
            .map(|_| GridCell::Blank)
            .chain((1..=self.month.days_in_month()).map(GridCell::Day))
            .collect();

        cells
            .chunks(7)
            .map(|chunk| {
                let mut row = [GridCell::Blank; 7];
                row[..chunk.len()].copy_from_slice(chunk);
                row
            })
            .collect()
    }

    /// Event for a click on day cell `day`; `None` if no such cell exists.
    #[must_use]
    pub fn click_day(&self, day: u32) -> Option<GridEvent> {
        self.month.contains_day(day).then_some(GridEvent::DayToggled {
            month: self.month,
            day,
        })
    }

    /// Event for a click on header column `column` (0 is Sunday).
    #[must_use]
    pub fn click_header(&self, column: usize) -> Option<GridEvent> {
        let column = i64::try_from(column).ok()?;
        weekday_from_index(column).map(GridEvent::WeekdayToggled)
    }
}
