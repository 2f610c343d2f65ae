use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// An integer that may arrive as a JSON number or a numeric string.
///
/// Anything else is kept verbatim in `Other` and rejected by [`WireInt::value`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WireInt {
    Int(i64),
    Text(String),
    Other(serde_json::Value),
}

impl WireInt {
    #[must_use]
    pub fn value(&self) -> Option<i64> {
        match self {
            Self::Int(value) => Some(*value),
            Self::Text(text) => text.trim().parse().ok(),
            Self::Other(_) => None,
        }
    }
}

impl From<u32> for WireInt {
    fn from(value: u32) -> Self {
        Self::Int(i64::from(value))
    }
}

/// The recurring weekly pattern. Saved either as a bare list or wrapped in
/// `{ "weekdays": [...] }`; both forms are accepted on read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WeeklyAvailability {
    List(Vec<WireInt>),
    Object {
        #[serde(default)]
        weekdays: Option<Vec<WireInt>>,
    },
    Other(serde_json::Value),
}

impl WeeklyAvailability {
    /// Raw weekday entries, empty when the shape is unrecognised.
    #[must_use]
    pub fn entries(&self) -> &[WireInt] {
        match self {
            Self::List(days) | Self::Object { weekdays: Some(days) } => days,
            Self::Object { weekdays: None } | Self::Other(_) => &[],
        }
    }
}

/// Availability of one agent as stored by the service.
///
/// `specific_dates` is keyed by the month key string (`"2025-2"` for March
/// 2025) and lists the exception days of that month.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AvailabilityPayload {
    #[serde(
        rename = "weeklyAvailability",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub weekly_availability: Option<WeeklyAvailability>,
    #[serde(rename = "specificDates", default)]
    pub specific_dates: Option<BTreeMap<String, Vec<WireInt>>>,
}
