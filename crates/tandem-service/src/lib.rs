//! State and logic of the scheduling assistant client.
//!
//! ## Module Organization
//!
//! - `availability`: weekly pattern plus per-month exceptions, the calendar grid
//!   producing toggle events, and conversion to and from the wire payload
//! - `pairing`: the editable week schedule and its drag-and-drop editor
//! - `session`: week navigation, fetch/commit orchestration and the login flag
//! - `roster`: agent form validation and the add/edit agent flow

pub mod availability;
pub mod error;
pub mod pairing;
pub mod roster;
pub mod session;
