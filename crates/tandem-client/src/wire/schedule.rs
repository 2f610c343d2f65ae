use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One pair slot. An empty side is an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairRecord {
    #[serde(default, deserialize_with = "super::null_as_blank")]
    pub agent1_name: String,
    #[serde(default, deserialize_with = "super::null_as_blank")]
    pub agent2_name: String,
}

/// An agent left out of every pair for the week.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnpairedRecord {
    #[serde(default, deserialize_with = "super::null_as_blank")]
    pub agent_name: String,
}

/// A week's schedule as returned by the fetch endpoint.
///
/// `date` is the week's Monday when the service echoes it back.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulePayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default)]
    pub details: Vec<PairRecord>,
    #[serde(default)]
    pub unpaired: Vec<UnpairedRecord>,
}

impl SchedulePayload {
    /// The echoed week, if present and well-formed.
    #[must_use]
    pub fn echoed_week(&self) -> Option<NaiveDate> {
        self.date.as_deref().and_then(|raw| {
            NaiveDate::parse_from_str(raw.trim(), tandem_core::constants::WIRE_DATE_FORMAT).ok()
        })
    }
}

/// Body of the save endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveSchedulePayload {
    pub date: NaiveDate,
    pub details: Vec<PairRecord>,
    pub unpaired: Vec<UnpairedRecord>,
}
