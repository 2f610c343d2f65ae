use std::collections::BTreeMap;
use std::fmt;

use thiserror::Error;

/// Service layer errors
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error(transparent)]
    ClientError(#[from] tandem_client::ClientError),

    #[error("Schedule is not being edited")]
    NotEditing,

    #[error("No schedule loaded")]
    NotLoaded,

    #[error("Not logged in")]
    NotLoggedIn,

    #[error("Invalid drag source: {0}")]
    InvalidDragSource(String),

    #[error("Invalid drop target: {0}")]
    InvalidDropTarget(String),

    #[error("Validation failed: {0}")]
    Validation(FieldErrors),
}

pub type ServiceResult<T> = std::result::Result<T, ServiceError>;

/// Field-level messages collected while validating a form, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<&'static str, String>);

impl FieldErrors {
    pub fn insert(&mut self, field: &'static str, message: String) {
        self.0.insert(field, message);
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in &self.0 {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}
