use chrono::NaiveDate;
use tandem_client::{SchedulingApi, wire::Agent};

use super::form::AgentForm;
use crate::availability::{AvailabilityModel, CalendarGrid, hydrate, serialize};
use crate::error::{ServiceError, ServiceResult};

/// The add/edit agent dialog: the form, the availability being edited and
/// the calendar month on display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentEditor {
    agent_id: Option<i64>,
    pub form: AgentForm,
    pub availability: AvailabilityModel,
    pub calendar: CalendarGrid,
    load_error: Option<String>,
}

impl AgentEditor {
    /// Dialog for a new agent, available Monday through Friday.
    #[must_use]
    pub fn open_new(today: NaiveDate) -> Self {
        tracing::debug!("Opening editor for a new agent");
        Self {
            agent_id: None,
            form: AgentForm::default(),
            availability: AvailabilityModel::for_new_agent(),
            calendar: CalendarGrid::containing(today),
            load_error: None,
        }
    }

    /// ## Summary
    /// Dialog for an existing agent, with its stored availability.
    ///
    /// When the availability cannot be fetched the dialog still opens, with
    /// empty availability and the failure kept in [`AgentEditor::load_error`].
    #[tracing::instrument(skip(api, agent), fields(agent_id = agent.agent_id))]
    pub async fn open_existing(api: &dyn SchedulingApi, agent: &Agent, today: NaiveDate) -> Self {
        let (availability, load_error) = match api.fetch_availability(agent.agent_id).await {
            Ok(payload) => (AvailabilityModel::from_snapshot(hydrate(&payload)), None),
            Err(err) => {
                tracing::error!(error = %err, "Failed to fetch availability");
                (AvailabilityModel::new(), Some(err.to_string()))
            }
        };

        Self {
            agent_id: Some(agent.agent_id),
            form: AgentForm::from(agent),
            availability,
            calendar: CalendarGrid::containing(today),
            load_error,
        }
    }

    /// `None` until the agent has been created.
    #[must_use]
    pub const fn agent_id(&self) -> Option<i64> {
        self.agent_id
    }

    #[must_use]
    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    /// Forwards a header click on the calendar to the availability model.
    pub fn click_header(&mut self, column: usize) -> bool {
        let Some(event) = self.calendar.click_header(column) else {
            return false;
        };
        self.availability.apply(event);
        true
    }

    /// Forwards a day click on the calendar to the availability model.
    pub fn click_day(&mut self, day: u32) -> bool {
        let Some(event) = self.calendar.click_day(day) else {
            return false;
        };
        self.availability.apply(event);
        true
    }

    /// ## Summary
    /// Validates the form, creates or updates the agent, then stores its
    /// availability. Returns the agent id.
    ///
    /// ## Errors
    /// Returns `ServiceError::Validation` without contacting the service when
    /// the form is invalid; otherwise the first failing request's error. A
    /// newly created agent keeps its id even if saving availability fails, so
    /// a retry updates instead of creating again.
    pub async fn submit(&mut self, api: &dyn SchedulingApi) -> ServiceResult<i64> {
        let errors = self.form.validate();
        if !errors.is_empty() {
            tracing::debug!(%errors, "Agent form rejected");
            return Err(ServiceError::Validation(errors));
        }

        let details = self.form.details();
        let agent_id = match self.agent_id {
            Some(agent_id) => {
                api.update_agent(agent_id, &details).await?;
                agent_id
            }
            None => {
                let agent_id = api.create_agent(&details).await?;
                tracing::info!(agent_id, "Agent created");
                self.agent_id = Some(agent_id);
                agent_id
            }
        };

        api.save_availability(agent_id, &serialize(self.availability.snapshot()))
            .await?;
        tracing::info!(agent_id, "Agent saved");
        Ok(agent_id)
    }

    /// Closes the dialog, dropping unsaved edits.
    pub fn close(self) {
        tracing::debug!(agent_id = ?self.agent_id, "Agent editor closed");
    }
}
