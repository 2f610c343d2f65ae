//! HTTP implementation of [`SchedulingApi`].

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use tandem_core::config::ApiConfig;
use tandem_core::constants::{
    AGENTS_AVAILABILITY_UPDATE_ROUTE, AGENTS_CREATE_ROUTE, AGENTS_DELETE_ROUTE, AGENTS_LIST_ROUTE,
    AGENTS_UPDATE_ROUTE, LOGIN_ROUTE, SCHEDULE_GENERATE_ROUTE, SCHEDULE_GET_ROUTE,
    SCHEDULE_SET_ROUTE, WIRE_DATE_FORMAT, agent_availability_path,
};

use crate::api::SchedulingApi;
use crate::error::{ClientError, ClientResult};
use crate::wire::{
    Agent, AgentDetails, AvailabilityPayload, CreatedAgent, LoginRequest, SaveSchedulePayload,
    SchedulePayload,
};

/// Scheduling service reached over HTTP.
///
/// Keeps a cookie store so the session opened by `login` is reused by every
/// later request.
#[derive(Debug, Clone)]
pub struct HttpSchedulingApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpSchedulingApi {
    /// ## Summary
    /// Builds a client for the service described by `config`.
    ///
    /// ## Errors
    /// Returns an error if the underlying HTTP client cannot be constructed.
    pub fn new(config: &ApiConfig) -> ClientResult<Self> {
        let client = reqwest::Client::builder()
            .cookie_store(true)
            .timeout(config.timeout())
            .build()?;

        Ok(Self {
            client,
            base_url: config.origin().to_string(),
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn wire_date(week: NaiveDate) -> String {
        week.format(WIRE_DATE_FORMAT).to_string()
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        let response = check_status(response).await?;
        response.json::<T>().await.map_err(|err| {
            tracing::warn!(error = %err, "Failed to decode response body");
            ClientError::InvalidResponse(err.to_string())
        })
    }
}

/// Maps non-success status codes to [`ClientError`].
async fn check_status(response: reqwest::Response) -> ClientResult<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let url = response.url().path().to_string();
    let body = response.text().await.unwrap_or_default();
    tracing::debug!(%status, path = %url, "Request rejected by service");

    Err(match status {
        StatusCode::UNAUTHORIZED => ClientError::Unauthorized,
        StatusCode::NOT_FOUND => ClientError::NotFound(url),
        _ => ClientError::Status {
            status: status.as_u16(),
            body,
        },
    })
}

#[async_trait]
impl SchedulingApi for HttpSchedulingApi {
    #[tracing::instrument(skip(self, credentials), fields(username = %credentials.username))]
    async fn login(&self, credentials: &LoginRequest) -> ClientResult<()> {
        let response = self
            .client
            .post(self.url(LOGIN_ROUTE))
            .json(credentials)
            .send()
            .await?;
        check_status(response).await?;
        tracing::debug!("Login accepted");
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn list_agents(&self, search: Option<&str>) -> ClientResult<Vec<Agent>> {
        let mut request = self.client.get(self.url(AGENTS_LIST_ROUTE));
        if let Some(term) = search.filter(|term| !term.is_empty()) {
            request = request.query(&[("search", term)]);
        }
        let agents: Vec<Agent> = Self::decode(request.send().await?).await?;
        tracing::debug!(count = agents.len(), "Agents listed");
        Ok(agents)
    }

    #[tracing::instrument(skip(self, details), fields(email = %details.email))]
    async fn create_agent(&self, details: &AgentDetails) -> ClientResult<i64> {
        let response = self
            .client
            .post(self.url(AGENTS_CREATE_ROUTE))
            .json(details)
            .send()
            .await?;
        let created: CreatedAgent = Self::decode(response).await?;
        tracing::debug!(agent_id = created.agent_id, "Agent created");
        Ok(created.agent_id)
    }

    #[tracing::instrument(skip(self, details))]
    async fn update_agent(&self, agent_id: i64, details: &AgentDetails) -> ClientResult<()> {
        let response = self
            .client
            .put(self.url(&format!("{AGENTS_UPDATE_ROUTE}/{agent_id}")))
            .json(details)
            .send()
            .await?;
        check_status(response).await?;
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn delete_agent(&self, agent_id: i64) -> ClientResult<()> {
        let response = self
            .client
            .delete(self.url(&format!("{AGENTS_DELETE_ROUTE}/{agent_id}")))
            .send()
            .await?;
        check_status(response).await?;
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn fetch_availability(&self, agent_id: i64) -> ClientResult<AvailabilityPayload> {
        let response = self
            .client
            .get(self.url(&agent_availability_path(agent_id)))
            .send()
            .await?;
        Self::decode(response).await
    }

    #[tracing::instrument(skip(self, availability))]
    async fn save_availability(
        &self,
        agent_id: i64,
        availability: &AvailabilityPayload,
    ) -> ClientResult<()> {
        let response = self
            .client
            .put(self.url(&format!("{AGENTS_AVAILABILITY_UPDATE_ROUTE}/{agent_id}")))
            .json(availability)
            .send()
            .await?;
        check_status(response).await?;
        Ok(())
    }

    #[tracing::instrument(skip(self), fields(week = %week))]
    async fn fetch_schedule(&self, week: NaiveDate) -> ClientResult<SchedulePayload> {
        let response = self
            .client
            .get(self.url(SCHEDULE_GET_ROUTE))
            .query(&[("date", Self::wire_date(week))])
            .send()
            .await?;
        let schedule: SchedulePayload = Self::decode(response).await?;
        tracing::debug!(
            slots = schedule.details.len(),
            unpaired = schedule.unpaired.len(),
            "Schedule fetched"
        );
        Ok(schedule)
    }

    #[tracing::instrument(skip(self, schedule), fields(week = %schedule.date))]
    async fn save_schedule(&self, schedule: &SaveSchedulePayload) -> ClientResult<()> {
        let response = self
            .client
            .post(self.url(SCHEDULE_SET_ROUTE))
            .json(schedule)
            .send()
            .await?;
        check_status(response).await?;
        Ok(())
    }

    #[tracing::instrument(skip(self), fields(week = %week))]
    async fn regenerate_schedule(&self, week: NaiveDate) -> ClientResult<()> {
        let response = self
            .client
            .post(self.url(SCHEDULE_GENERATE_ROUTE))
            .query(&[("date", Self::wire_date(week))])
            .send()
            .await?;
        check_status(response).await?;
        Ok(())
    }
}
