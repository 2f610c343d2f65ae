//! Agent roster: listing and deleting agents, plus the add/edit dialog.
//!
//! ## Module Organization
//!
//! - `form`: the agent form and its field validation
//! - `editor`: the add/edit agent dialog tying form, availability and calendar together

pub mod editor;
pub mod form;

pub use editor::AgentEditor;
pub use form::AgentForm;

use tandem_client::{SharedApi, wire::Agent};

use crate::error::ServiceResult;

/// The agent list shown in the roster view.
pub struct Roster {
    api: SharedApi,
    agents: Vec<Agent>,
    search: Option<String>,
}

impl Roster {
    #[must_use]
    pub const fn new(api: SharedApi) -> Self {
        Self {
            api,
            agents: Vec::new(),
            search: None,
        }
    }

    /// Agents from the last successful load.
    #[must_use]
    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    #[must_use]
    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    #[must_use]
    pub fn find(&self, agent_id: i64) -> Option<&Agent> {
        self.agents.iter().find(|agent| agent.agent_id == agent_id)
    }

    /// ## Summary
    /// Loads the agents matching `search`; an empty term lists everyone.
    ///
    /// ## Errors
    /// Returns the client error; the previous list is kept.
    pub async fn load(&mut self, search: Option<&str>) -> ServiceResult<&[Agent]> {
        let search = search
            .map(str::trim)
            .filter(|term| !term.is_empty())
            .map(ToString::to_string);

        let agents = self
            .api
            .list_agents(search.as_deref())
            .await
            .inspect_err(|err| tracing::error!(error = %err, "Failed to list agents"))?;
        tracing::debug!(count = agents.len(), search = ?search, "Roster loaded");

        self.agents = agents;
        self.search = search;
        Ok(&self.agents)
    }

    /// Reloads with the current search term.
    ///
    /// ## Errors
    /// Returns the client error; the previous list is kept.
    pub async fn reload(&mut self) -> ServiceResult<&[Agent]> {
        let search = self.search.clone();
        self.load(search.as_deref()).await
    }

    /// ## Summary
    /// Deletes an agent and reloads the list.
    ///
    /// ## Errors
    /// Returns the client error of the delete or of the reload.
    pub async fn delete(&mut self, agent_id: i64) -> ServiceResult<()> {
        self.api.delete_agent(agent_id).await?;
        tracing::info!(agent_id, "Agent deleted");
        self.reload().await?;
        Ok(())
    }
}
