//! Agent availability: a recurring weekly pattern plus dated exceptions.
//!
//! An exception flips whatever the weekly pattern says for that date, so a
//! single toggle on a calendar day always inverts its resolved availability.
//!
//! ## Module Organization
//!
//! - `weekdays`: the weekly pattern (`WeekdaySet`)
//! - `exceptions`: sparse per-month exception days (`ExceptionCalendar`)
//! - `model`: the snapshot, its resolution and the editable `AvailabilityModel`
//! - `calendar`: month grid turning clicks into `GridEvent`s
//! - `wire`: conversion to and from `AvailabilityPayload`

pub mod calendar;
pub mod exceptions;
pub mod model;
pub mod weekdays;
pub mod wire;

pub use calendar::{CalendarGrid, GridCell, GridEvent};
pub use exceptions::ExceptionCalendar;
pub use model::{AvailabilityModel, AvailabilitySnapshot};
pub use weekdays::WeekdaySet;
pub use wire::{hydrate, serialize};
