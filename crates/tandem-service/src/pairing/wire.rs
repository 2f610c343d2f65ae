use chrono::NaiveDate;
use tandem_client::wire::{PairRecord, SaveSchedulePayload, SchedulePayload, UnpairedRecord};
use tandem_core::types::AgentName;

use super::draft::{PairSlot, ScheduleDraft};

impl ScheduleDraft {
    /// ## Summary
    /// Builds a draft from a fetched schedule.
    ///
    /// Blank slot sides become empty sides and blank pool entries are dropped.
    /// Names the service lists more than once are kept as received and logged.
    #[must_use]
    pub fn from_payload(payload: &SchedulePayload) -> Self {
        let slots = payload
            .details
            .iter()
            .map(|pair| {
                PairSlot::new(
                    AgentName::new(&pair.agent1_name),
                    AgentName::new(&pair.agent2_name),
                )
            })
            .collect();
        let unpaired = payload
            .unpaired
            .iter()
            .filter_map(|entry| AgentName::new(&entry.agent_name))
            .collect();

        let draft = Self::new(slots, unpaired);
        let duplicates = draft.duplicates();
        if !duplicates.is_empty() {
            tracing::warn!(?duplicates, "Schedule lists agents more than once");
        }
        draft
    }

    /// The save request for `week`, empty sides written as blank names.
    #[must_use]
    pub fn to_save_payload(&self, week: NaiveDate) -> SaveSchedulePayload {
        let blank_or = |agent: Option<&AgentName>| {
            agent.map(ToString::to_string).unwrap_or_default()
        };

        SaveSchedulePayload {
            date: week,
            details: self
                .slots()
                .iter()
                .map(|slot| PairRecord {
                    agent1_name: blank_or(slot.agent1.as_ref()),
                    agent2_name: blank_or(slot.agent2.as_ref()),
                })
                .collect(),
            unpaired: self
                .unpaired()
                .iter()
                .map(|agent| UnpairedRecord {
                    agent_name: agent.to_string(),
                })
                .collect(),
        }
    }
}
