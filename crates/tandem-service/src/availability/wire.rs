//! Conversion between [`AvailabilitySnapshot`] and the wire payload.
//!
//! Sets travel as ascending lists. Reading is forgiving: unknown month keys,
//! out-of-range weekdays and days that do not exist in their month are
//! dropped one by one rather than failing the whole payload.

use std::collections::BTreeMap;

use tandem_client::wire::{AvailabilityPayload, WeeklyAvailability, WireInt};
use tandem_core::types::MonthKey;

use super::exceptions::ExceptionCalendar;
use super::model::AvailabilitySnapshot;
use super::weekdays::{WeekdaySet, weekday_from_index, weekday_index};

/// ## Summary
/// Builds the in-memory snapshot from a fetched availability payload.
///
/// Absent layers become empty; malformed entries are skipped with a warning.
#[must_use]
pub fn hydrate(payload: &AvailabilityPayload) -> AvailabilitySnapshot {
    let weekdays: WeekdaySet = payload
        .weekly_availability
        .as_ref()
        .map(WeeklyAvailability::entries)
        .unwrap_or_default()
        .iter()
        .filter_map(|entry| {
            let day = entry.value().and_then(weekday_from_index);
            if day.is_none() {
                tracing::warn!(?entry, "Dropping malformed weekday");
            }
            day
        })
        .collect();

    let mut exceptions = ExceptionCalendar::new();
    for (raw_key, days) in payload.specific_dates.iter().flatten() {
        let month = match raw_key.parse::<MonthKey>() {
            Ok(month) => month,
            Err(err) => {
                tracing::warn!(key = %raw_key, error = %err, "Dropping exceptions for malformed month key");
                continue;
            }
        };

        for entry in days {
            let accepted = entry
                .value()
                .and_then(|day| u32::try_from(day).ok())
                .is_some_and(|day| exceptions.insert(month, day));
            if !accepted {
                tracing::warn!(%month, ?entry, "Dropping exception day outside the month");
            }
        }
    }

    AvailabilitySnapshot {
        weekdays,
        exceptions,
    }
}

/// ## Summary
/// Builds the payload saved for an agent from its snapshot.
///
/// The weekly pattern is written in its `{ "weekdays": [...] }` form.
#[must_use]
pub fn serialize(snapshot: &AvailabilitySnapshot) -> AvailabilityPayload {
    let weekdays = snapshot
        .weekdays
        .iter()
        .map(|day| WireInt::from(weekday_index(day)))
        .collect();

    let specific_dates: BTreeMap<String, Vec<WireInt>> = snapshot
        .exceptions
        .iter()
        .map(|(month, days)| {
            (
                month.to_string(),
                days.iter().copied().map(WireInt::from).collect(),
            )
        })
        .collect();

    AvailabilityPayload {
        weekly_availability: Some(WeeklyAvailability::Object {
            weekdays: Some(weekdays),
        }),
        specific_dates: Some(specific_dates),
    }
}
