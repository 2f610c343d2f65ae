//! Payloads exchanged with the scheduling service.
//!
//! Decoding is deliberately lenient: absent fields fall back to their defaults
//! and values of an unexpected shape are kept as raw JSON so that the service
//! layer can drop them individually instead of failing the whole response.

pub mod agent;
pub mod availability;
pub mod schedule;

pub use agent::{Agent, AgentDetails, CreatedAgent, LoginRequest};
pub use availability::{AvailabilityPayload, WeeklyAvailability, WireInt};
pub use schedule::{PairRecord, SaveSchedulePayload, SchedulePayload, UnpairedRecord};

/// Deserializes `null` or a missing string as an empty string.
pub(crate) fn null_as_blank<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::Deserialize;

    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
