//! Client-side sessions.
//!
//! ## Module Organization
//!
//! - `login`: the logged-in flag and the views it gates
//! - `schedule`: week selection, schedule fetches and commits around a `PairingEditor`

pub mod login;
pub mod schedule;

pub use login::{SessionState, View};
pub use schedule::{FetchCompletion, FetchTicket, LoadState, ScheduleSession, SessionStatus};
