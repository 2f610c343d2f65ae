use tandem_client::wire::{Agent, AgentDetails};
use tandem_core::util::field::{check_email, check_identifying};

use crate::error::{FieldErrors, ServiceError, ServiceResult};

/// Contents of the add/edit agent form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub active_status: bool,
}

impl Default for AgentForm {
    fn default() -> Self {
        Self {
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            phone_number: String::new(),
            active_status: true,
        }
    }
}

impl From<&Agent> for AgentForm {
    fn from(agent: &Agent) -> Self {
        Self {
            first_name: agent.first_name.clone(),
            last_name: agent.last_name.clone(),
            email: agent.email.clone(),
            phone_number: agent.phone_number.clone(),
            active_status: agent.active_status,
        }
    }
}

impl AgentForm {
    /// Field names accepted by [`AgentForm::set`].
    pub const FIELDS: [&'static str; 5] = [
        "first_name",
        "last_name",
        "email",
        "phone_number",
        "active_status",
    ];

    /// ## Summary
    /// Sets a field from text input. `active_status` accepts `true`/`false`,
    /// `yes`/`no` and `1`/`0`.
    ///
    /// ## Errors
    /// Returns `ServiceError::Validation` for an unknown field or an
    /// unreadable flag.
    pub fn set(&mut self, field: &str, value: &str) -> ServiceResult<()> {
        match field {
            "first_name" => self.first_name = value.to_string(),
            "last_name" => self.last_name = value.to_string(),
            "email" => self.email = value.to_string(),
            "phone_number" => self.phone_number = value.to_string(),
            "active_status" => {
                self.active_status = match value.trim().to_ascii_lowercase().as_str() {
                    "true" | "yes" | "1" => true,
                    "false" | "no" | "0" => false,
                    _ => {
                        let mut errors = FieldErrors::default();
                        errors.insert("active_status", format!("'{value}' is not yes or no"));
                        return Err(ServiceError::Validation(errors));
                    }
                };
            }
            _ => {
                let mut errors = FieldErrors::default();
                errors.insert("field", format!("Unknown field '{field}'"));
                return Err(ServiceError::Validation(errors));
            }
        }
        Ok(())
    }

    /// Field-level messages for every invalid field; empty when the form can
    /// be submitted.
    #[must_use]
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::default();
        let checks = [
            ("first_name", check_identifying(&self.first_name, true)),
            ("last_name", check_identifying(&self.last_name, true)),
            ("email", check_email(&self.email)),
            ("phone_number", check_identifying(&self.phone_number, false)),
        ];
        for (field, message) in checks {
            if let Some(message) = message {
                errors.insert(field, message);
            }
        }
        errors
    }

    /// The request body for create and update, with surrounding whitespace removed.
    #[must_use]
    pub fn details(&self) -> AgentDetails {
        AgentDetails {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone_number: self.phone_number.trim().to_string(),
            active_status: self.active_status,
        }
    }
}
