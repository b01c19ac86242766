use axum::http::StatusCode;
use voltwatch_api::models::ReadingError;

#[derive(Debug, thiserror::Error)]
pub enum HardwareError {
    #[error("No facility configured for this API key")]
    FacilityNotFound,

    #[error("No recent data available")]
    NoRecentData,

    #[error("Invalid request body: {0}")]
    MalformedBody(String),

    #[error(transparent)]
    InvalidReading(#[from] ReadingError),
}

impl HardwareError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            HardwareError::FacilityNotFound => StatusCode::NOT_FOUND,
            HardwareError::NoRecentData => StatusCode::NOT_FOUND,
            HardwareError::MalformedBody(_) => StatusCode::BAD_REQUEST,
            HardwareError::InvalidReading(_) => StatusCode::BAD_REQUEST,
        }
    }
}
