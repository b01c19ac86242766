use super::{AuthError, HardwareError};

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Authentication error: {0}")]
    AuthError(#[from] AuthError),

    #[error("Hardware error: {0}")]
    HardwareError(#[from] HardwareError),

    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    InternalError(#[from] anyhow::Error),
}

impl From<voltwatch_api::models::ReadingError> for ApiError {
    fn from(error: voltwatch_api::models::ReadingError) -> Self {
        ApiError::HardwareError(error.into())
    }
}
