//! In-process implementation of [`SchedulingApi`].
//!
//! Backs the offline mode of the client and the service-layer tests. It keeps
//! everything in a mutex-guarded store and mimics the service closely enough
//! for the client core: schedules are stored verbatim per week, and
//! regeneration places every active agent in the unpaired pool because the
//! pairing algorithm only exists on the real service.

use std::collections::{BTreeMap, HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::NaiveDate;

use tandem_core::constants::WIRE_DATE_FORMAT;

use crate::api::SchedulingApi;
use crate::error::{ClientError, ClientResult};
use crate::wire::{
    Agent, AgentDetails, AvailabilityPayload, LoginRequest, SaveSchedulePayload, SchedulePayload,
    UnpairedRecord,
};

/// Most recent request names kept by the request log.
pub const REQUEST_LOG_LIMIT: usize = 256;

#[derive(Debug, Default)]
struct MemoryStore {
    credentials: Option<(String, String)>,
    agents: BTreeMap<i64, Agent>,
    availability: HashMap<i64, AvailabilityPayload>,
    schedules: HashMap<NaiveDate, SchedulePayload>,
    next_agent_id: i64,
    offline: bool,
    requests: VecDeque<String>,
}

impl MemoryStore {
    fn begin(&mut self, request: &str) -> ClientResult<()> {
        if self.requests.len() == REQUEST_LOG_LIMIT {
            self.requests.pop_front();
        }
        self.requests.push_back(request.to_string());
        if self.offline {
            return Err(ClientError::Unavailable(format!(
                "memory backend is offline ({request})"
            )));
        }
        Ok(())
    }
}

/// Process-local scheduling service.
#[derive(Debug, Default)]
pub struct MemorySchedulingApi {
    store: Mutex<MemoryStore>,
}

impl MemorySchedulingApi {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Only these credentials will be accepted by `login`. Without them any
    /// non-empty pair is accepted.
    #[must_use]
    pub fn with_credentials(self, username: &str, password: &str) -> Self {
        self.lock().credentials = Some((username.to_string(), password.to_string()));
        self
    }

    /// Seeds the schedule stored for `week`.
    pub fn seed_schedule(&self, week: NaiveDate, schedule: SchedulePayload) {
        self.lock().schedules.insert(week, schedule);
    }

    /// Seeds an agent and returns its id.
    pub fn seed_agent(&self, details: &AgentDetails) -> i64 {
        let mut store = self.lock();
        insert_agent(&mut store, details)
    }

    /// While offline every request fails with `ClientError::Unavailable`.
    pub fn set_offline(&self, offline: bool) {
        self.lock().offline = offline;
    }

    /// The schedule currently stored for `week`.
    #[must_use]
    pub fn stored_schedule(&self, week: NaiveDate) -> Option<SchedulePayload> {
        self.lock().schedules.get(&week).cloned()
    }

    #[must_use]
    pub fn stored_availability(&self, agent_id: i64) -> Option<AvailabilityPayload> {
        self.lock().availability.get(&agent_id).cloned()
    }

    /// Names of the latest requests, oldest first, at most
    /// [`REQUEST_LOG_LIMIT`] of them.
    #[must_use]
    pub fn requests(&self) -> Vec<String> {
        self.lock().requests.iter().cloned().collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MemoryStore> {
        match self.store.lock() {
            Ok(guard) => guard,
            Err(poisoned) => {
                self.store.clear_poison();
                poisoned.into_inner()
            }
        }
    }
}

fn insert_agent(store: &mut MemoryStore, details: &AgentDetails) -> i64 {
    store.next_agent_id += 1;
    let agent_id = store.next_agent_id;
    store.agents.insert(
        agent_id,
        Agent {
            agent_id,
            first_name: details.first_name.clone(),
            last_name: details.last_name.clone(),
            email: details.email.clone(),
            phone_number: details.phone_number.clone(),
            active_status: details.active_status,
        },
    );
    agent_id
}

#[async_trait]
impl SchedulingApi for MemorySchedulingApi {
    async fn login(&self, credentials: &LoginRequest) -> ClientResult<()> {
        let mut store = self.lock();
        store.begin("login")?;

        let accepted = match &store.credentials {
            Some((username, password)) => {
                *username == credentials.username && *password == credentials.password
            }
            None => !credentials.username.is_empty() && !credentials.password.is_empty(),
        };
        if accepted {
            Ok(())
        } else {
            Err(ClientError::Unauthorized)
        }
    }

    async fn list_agents(&self, search: Option<&str>) -> ClientResult<Vec<Agent>> {
        let mut store = self.lock();
        store.begin("list_agents")?;

        let needle = search.map(str::to_lowercase).unwrap_or_default();
        Ok(store
            .agents
            .values()
            .filter(|agent| {
                needle.is_empty()
                    || agent.display_name().to_lowercase().contains(&needle)
                    || agent.email.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect())
    }

    async fn create_agent(&self, details: &AgentDetails) -> ClientResult<i64> {
        let mut store = self.lock();
        store.begin("create_agent")?;
        Ok(insert_agent(&mut store, details))
    }

    async fn update_agent(&self, agent_id: i64, details: &AgentDetails) -> ClientResult<()> {
        let mut store = self.lock();
        store.begin("update_agent")?;

        let agent = store
            .agents
            .get_mut(&agent_id)
            .ok_or_else(|| ClientError::NotFound(format!("agent {agent_id}")))?;
        agent.first_name.clone_from(&details.first_name);
        agent.last_name.clone_from(&details.last_name);
        agent.email.clone_from(&details.email);
        agent.phone_number.clone_from(&details.phone_number);
        agent.active_status = details.active_status;
        Ok(())
    }

    async fn delete_agent(&self, agent_id: i64) -> ClientResult<()> {
        let mut store = self.lock();
        store.begin("delete_agent")?;

        store
            .agents
            .remove(&agent_id)
            .ok_or_else(|| ClientError::NotFound(format!("agent {agent_id}")))?;
        store.availability.remove(&agent_id);
        Ok(())
    }

    async fn fetch_availability(&self, agent_id: i64) -> ClientResult<AvailabilityPayload> {
        let mut store = self.lock();
        store.begin("fetch_availability")?;

        if !store.agents.contains_key(&agent_id) {
            return Err(ClientError::NotFound(format!("agent {agent_id}")));
        }
        Ok(store
            .availability
            .get(&agent_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn save_availability(
        &self,
        agent_id: i64,
        availability: &AvailabilityPayload,
    ) -> ClientResult<()> {
        let mut store = self.lock();
        store.begin("save_availability")?;

        if !store.agents.contains_key(&agent_id) {
            return Err(ClientError::NotFound(format!("agent {agent_id}")));
        }
        store.availability.insert(agent_id, availability.clone());
        Ok(())
    }

    async fn fetch_schedule(&self, week: NaiveDate) -> ClientResult<SchedulePayload> {
        let mut store = self.lock();
        store.begin("fetch_schedule")?;

        let mut schedule = store.schedules.get(&week).cloned().unwrap_or_default();
        schedule.date = Some(week.format(WIRE_DATE_FORMAT).to_string());
        Ok(schedule)
    }

    async fn save_schedule(&self, schedule: &SaveSchedulePayload) -> ClientResult<()> {
        let mut store = self.lock();
        store.begin("save_schedule")?;

        store.schedules.insert(
            schedule.date,
            SchedulePayload {
                date: None,
                details: schedule.details.clone(),
                unpaired: schedule.unpaired.clone(),
            },
        );
        Ok(())
    }

    async fn regenerate_schedule(&self, week: NaiveDate) -> ClientResult<()> {
        let mut store = self.lock();
        store.begin("regenerate_schedule")?;

        let unpaired = store
            .agents
            .values()
            .filter(|agent| agent.active_status)
            .map(|agent| UnpairedRecord {
                agent_name: agent.display_name(),
            })
            .collect();
        store.schedules.insert(
            week,
            SchedulePayload {
                date: None,
                details: Vec::new(),
                unpaired,
            },
        );
        Ok(())
    }
}
