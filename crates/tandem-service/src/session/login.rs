use tandem_client::{SchedulingApi, wire::LoginRequest};

use crate::error::{FieldErrors, ServiceError, ServiceResult};

/// Screens of the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Login,
    Agents,
    Schedule,
}

impl View {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::Agents => "agents",
            Self::Schedule => "schedule",
        }
    }
}

/// Whether this client has an authenticated session, and as whom.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    username: Option<String>,
}

impl SessionState {
    /// A logged-out session.
    #[must_use]
    pub const fn new() -> Self {
        Self { username: None }
    }

    #[must_use]
    pub const fn is_logged_in(&self) -> bool {
        self.username.is_some()
    }

    #[must_use]
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    /// ## Summary
    /// Logs in against the service.
    ///
    /// ## Errors
    /// Returns `ServiceError::Validation` without contacting the service when
    /// either field is empty, and the client error when the service refuses.
    #[tracing::instrument(skip(self, api, password))]
    pub async fn login(
        &mut self,
        api: &dyn SchedulingApi,
        username: &str,
        password: &str,
    ) -> ServiceResult<()> {
        let mut errors = FieldErrors::default();
        if username.trim().is_empty() {
            errors.insert("username", "Username is required".to_string());
        }
        if password.is_empty() {
            errors.insert("password", "Password is required".to_string());
        }
        if !errors.is_empty() {
            return Err(ServiceError::Validation(errors));
        }

        let credentials = LoginRequest {
            username: username.trim().to_string(),
            password: password.to_string(),
        };
        api.login(&credentials).await?;

        tracing::info!(username = %credentials.username, "Logged in");
        self.username = Some(credentials.username);
        Ok(())
    }

    pub fn logout(&mut self) {
        if let Some(username) = self.username.take() {
            tracing::info!(%username, "Logged out");
        }
    }

    /// The view actually shown when `requested` is asked for. Everything but
    /// the login view requires a session.
    #[must_use]
    pub const fn route(&self, requested: View) -> View {
        if self.is_logged_in() {
            requested
        } else {
            View::Login
        }
    }

    /// ## Errors
    /// Returns `ServiceError::NotLoggedIn` without a session.
    pub fn require_login(&self) -> ServiceResult<&str> {
        self.username().ok_or(ServiceError::NotLoggedIn)
    }
}
