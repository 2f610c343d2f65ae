use thiserror::Error;

/// Core-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid month key: {0}")]
    InvalidMonthKey(String),
}

pub type CoreResult<T> = std::result::Result<T, CoreError>;
