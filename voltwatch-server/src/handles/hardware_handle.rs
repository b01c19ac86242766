use std::sync::Arc;
use std::time::Duration;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::{get, post};
use axum::{Extension, Json, Router, middleware};
use serde_json::Value;
use time::OffsetDateTime;
use voltwatch_api::models::*;

use crate::errors::{ApiError, HardwareError};
use crate::middlewares::{DeviceIdentity, KeyState, api_key_auth};
use crate::services::TelemetryService;

#[derive(Clone)]
pub struct HardwareState {
    pub telemetry_service: Arc<TelemetryService>,
    pub recent_window: Duration,
}

pub fn hardware_router(hardware_state: HardwareState, key_state: KeyState) -> Router {
    Router::new()
        .route("/api/hardware/data", post(receive_hardware_data))
        .route("/api/hardware/config", get(get_hardware_config))
        .route("/api/hardware/status", get(get_hardware_status))
        .route("/api/hardware/latest", get(get_latest_hardware_data))
        .route("/api/hardware/activity", get(check_hardware_activity))
        .route_layer(middleware::from_fn_with_state(key_state, api_key_auth))
        .with_state(hardware_state)
}

#[utoipa::path(
    post,
    path = "/api/hardware/data",
    tag = "hardware",
    request_body = SensorReading,
    security(
        ("api_key" = [])
    ),
    responses(
        (status = 200, description = "Reading stored, alert attached when detected", body = IngestReceipt),
        (status = 400, description = "Missing, non-numeric or out of range field", body = ErrorResponse),
        (status = 401, description = "Missing or invalid API key", body = ErrorResponse),
        (status = 404, description = "API key is not assigned to a facility", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn receive_hardware_data(
    Extension(identity): Extension<DeviceIdentity>,
    State(state): State<HardwareState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<IngestReceipt>, ApiError> {
    let facility_id = identity.facility_id()?;

    let Json(body) = body.map_err(|e| HardwareError::MalformedBody(e.body_text()))?;

    let reading = SensorReading::from_json(&body).inspect_err(|e| {
        tracing::debug!(key_id = identity.key_id, key_prefix = %identity.key_prefix, "rejected reading: {e}");
    })?;

    let receipt = state.telemetry_service.ingest(facility_id, &reading).await?;

    Ok(Json(receipt))
}

#[utoipa::path(
    get,
    path = "/api/hardware/config",
    tag = "hardware",
    security(
        ("api_key" = [])
    ),
    responses(
        (status = 200, description = "Device configuration of the key's facility", body = ConfigResponse),
        (status = 401, description = "Missing or invalid API key", body = ErrorResponse),
        (status = 404, description = "API key is not assigned to a facility", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn get_hardware_config(
    Extension(identity): Extension<DeviceIdentity>,
    State(state): State<HardwareState>,
) -> Result<Json<ConfigResponse>, ApiError> {
    let facility = state
        .telemetry_service
        .facility(identity.facility_id()?)
        .await?;

    Ok(Json(ConfigResponse {
        status: ResponseStatus::Success,
        config: facility.device_config(),
    }))
}

#[utoipa::path(
    get,
    path = "/api/hardware/status",
    tag = "hardware",
    security(
        ("api_key" = [])
    ),
    responses(
        (status = 200, description = "Server is online", body = StatusResponse),
        (status = 401, description = "Missing or invalid API key", body = ErrorResponse)
    )
)]
pub async fn get_hardware_status() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: ResponseStatus::Success,
        server_time: OffsetDateTime::now_utc(),
        message: String::from("System online and ready to receive data"),
    })
}

#[utoipa::path(
    get,
    path = "/api/hardware/latest",
    tag = "hardware",
    security(
        ("api_key" = [])
    ),
    responses(
        (status = 200, description = "Newest reading within the recent-data window", body = LatestReadingResponse),
        (status = 401, description = "Missing or invalid API key", body = ErrorResponse),
        (status = 404, description = "No facility or no recent data", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn get_latest_hardware_data(
    Extension(identity): Extension<DeviceIdentity>,
    State(state): State<HardwareState>,
) -> Result<Json<LatestReadingResponse>, ApiError> {
    let record = state
        .telemetry_service
        .latest(identity.facility_id()?, state.recent_window)
        .await?
        .ok_or(HardwareError::NoRecentData)?;

    Ok(Json(LatestReadingResponse {
        status: ResponseStatus::Success,
        data: record.into(),
    }))
}

#[utoipa::path(
    get,
    path = "/api/hardware/activity",
    tag = "hardware",
    security(
        ("api_key" = [])
    ),
    responses(
        (status = 200, description = "Whether the facility reported within the recent-data window", body = ActivityResponse),
        (status = 401, description = "Missing or invalid API key", body = ErrorResponse),
        (status = 404, description = "API key is not assigned to a facility", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn check_hardware_activity(
    Extension(identity): Extension<DeviceIdentity>,
    State(state): State<HardwareState>,
) -> Result<Json<ActivityResponse>, ApiError> {
    let record = state
        .telemetry_service
        .latest(identity.facility_id()?, state.recent_window)
        .await?;

    Ok(Json(ActivityResponse {
        status: ResponseStatus::Success,
        has_recent_data: record.is_some(),
        last_data_time: record.map(|record| record.timestamp),
    }))
}
