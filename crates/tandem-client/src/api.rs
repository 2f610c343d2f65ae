//! The request/response seam between the client core and the scheduling service.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::error::ClientResult;
use crate::wire::{
    Agent, AgentDetails, AvailabilityPayload, LoginRequest, SaveSchedulePayload, SchedulePayload,
};

/// Operations offered by the scheduling service.
///
/// Transport and serialization belong to the implementation; callers only see
/// typed payloads and [`crate::ClientError`].
///
/// # Thread Safety
/// Implementations must be `Send + Sync` so a single instance can be shared by
/// every view of the client.
#[async_trait]
pub trait SchedulingApi: Send + Sync {
    /// Opens an authenticated session.
    async fn login(&self, credentials: &LoginRequest) -> ClientResult<()>;

    /// Lists agents, optionally filtered by a search term.
    async fn list_agents(&self, search: Option<&str>) -> ClientResult<Vec<Agent>>;

    /// Creates an agent and returns its id.
    async fn create_agent(&self, details: &AgentDetails) -> ClientResult<i64>;

    async fn update_agent(&self, agent_id: i64, details: &AgentDetails) -> ClientResult<()>;

    async fn delete_agent(&self, agent_id: i64) -> ClientResult<()>;

    async fn fetch_availability(&self, agent_id: i64) -> ClientResult<AvailabilityPayload>;

    async fn save_availability(
        &self,
        agent_id: i64,
        availability: &AvailabilityPayload,
    ) -> ClientResult<()>;

    /// Fetches the schedule of the week starting on `week` (a Monday).
    async fn fetch_schedule(&self, week: NaiveDate) -> ClientResult<SchedulePayload>;

    async fn save_schedule(&self, schedule: &SaveSchedulePayload) -> ClientResult<()>;

    /// Asks the service to generate the schedule of `week` again.
    async fn regenerate_schedule(&self, week: NaiveDate) -> ClientResult<()>;
}

/// Shared handle to whichever backend the client is configured with.
pub type SharedApi = Arc<dyn SchedulingApi>;
