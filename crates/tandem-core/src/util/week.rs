//! Week arithmetic. Weeks run Monday through Sunday.

use chrono::{Datelike, Days, NaiveDate};

/// The Monday of the week containing `date`. A Sunday belongs to the week
/// that started six days earlier.
#[must_use]
pub fn monday_of(date: NaiveDate) -> NaiveDate {
    let offset = u64::from(date.weekday().num_days_from_monday());
    date.checked_sub_days(Days::new(offset)).unwrap_or(date)
}

/// The Monday `weeks` weeks away from the week containing `date`.
#[must_use]
pub fn shift_weeks(date: NaiveDate, weeks: i64) -> NaiveDate {
    let monday = monday_of(date);
    let days = Days::new(weeks.unsigned_abs().saturating_mul(7));
    let shifted = if weeks >= 0 {
        monday.checked_add_days(days)
    } else {
        monday.checked_sub_days(days)
    };
    shifted.unwrap_or(monday)
}
