use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScheduleError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Viewer limit reached: {0}")]
    ViewerLimit(String),

    #[error("Storage unavailable: {0}")]
    StorageUnavailable(#[from] eyre::Report),

    #[error("Internal server error: {0}")]
    Internal(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl ScheduleError {
    pub fn slot_not_found(id: impl std::fmt::Display) -> Self {
        ScheduleError::NotFound(format!("Time slot with ID {} not found", id))
    }
}

pub type ScheduleResult<T> = Result<T, ScheduleError>;
