use thiserror::Error;

/// Application-level errors (command surface)
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    ServiceError(#[from] tandem_service::error::ServiceError),

    #[error(transparent)]
    ClientError(#[from] tandem_client::ClientError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Usage(String),
}

pub type AppResult<T> = std::result::Result<T, AppError>;
