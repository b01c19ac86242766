use axum::http::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Missing API key")]
    MissingApiKey,

    #[error("Invalid API key")]
    InvalidApiKey,
}

impl AuthError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::MissingApiKey => StatusCode::UNAUTHORIZED,
            AuthError::InvalidApiKey => StatusCode::UNAUTHORIZED,
        }
    }
}
