use std::iter;
use std::sync::Arc;

use axum::body::Body;
use axum::extract::State;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum_extra::headers::{self, Header, HeaderName, HeaderValue};

use crate::errors::{ApiError, AuthError, HardwareError};
use crate::repositories::ApiKeyRepository;
use crate::services::KeyService;

static X_API_KEY: HeaderName = HeaderName::from_static("x-api-key");

/// The `X-API-Key` request header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XApiKey(pub String);

impl Header for XApiKey {
    fn name() -> &'static HeaderName {
        &X_API_KEY
    }

    fn decode<'i, I>(values: &mut I) -> Result<Self, headers::Error>
    where
        I: Iterator<Item = &'i HeaderValue>,
    {
        let key = values
            .next()
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or_else(headers::Error::invalid)?;

        Ok(XApiKey(key.to_string()))
    }

    fn encode<E: Extend<HeaderValue>>(&self, values: &mut E) {
        if let Ok(value) = HeaderValue::from_str(&self.0) {
            values.extend(iter::once(value));
        }
    }
}

/// The authenticated device, inserted into request extensions.
#[derive(Debug, Clone)]
pub struct DeviceIdentity {
    pub key_id: i32,
    pub key_prefix: String,
    pub facility_id: Option<i32>,
}

impl DeviceIdentity {
    pub fn facility_id(&self) -> Result<i32, HardwareError> {
        self.facility_id.ok_or(HardwareError::FacilityNotFound)
    }
}

#[derive(Clone)]
pub struct KeyState {
    pub api_key_repository: Arc<ApiKeyRepository>,
    pub key_service: Arc<KeyService>,
}

pub async fn api_key_auth(
    State(state): State<KeyState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<impl IntoResponse, ApiError> {
    let XApiKey(key) = {
        let mut headers = req.headers().get_all(XApiKey::name()).iter();
        XApiKey::decode(&mut headers).map_err(|_| AuthError::MissingApiKey)?
    };

    let key_hash = state.key_service.hash(&key);

    let Some(api_key) = state.api_key_repository.find_by_hash(&key_hash).await? else {
        tracing::debug!(key_prefix = state.key_service.prefix(&key), "api key rejected");
        return Err(AuthError::InvalidApiKey.into());
    };

    req.extensions_mut().insert(DeviceIdentity {
        key_id: api_key.id,
        key_prefix: api_key.key_prefix,
        facility_id: api_key.facility_id,
    });

    Ok(next.run(req).await)
}
