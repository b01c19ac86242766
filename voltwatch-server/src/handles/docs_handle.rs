use axum::Json;
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};
use voltwatch_api::API_KEY_HEADER;

#[derive(OpenApi)]
#[openapi(
    paths(
        super::hardware_handle::receive_hardware_data,
        super::hardware_handle::get_hardware_config,
        super::hardware_handle::get_hardware_status,
        super::hardware_handle::get_latest_hardware_data,
        super::hardware_handle::check_hardware_activity,
    ),
    modifiers(&ApiKeyAddon),
    tags(
        (name = "hardware", description = "Telemetry ingest and device configuration")
    )
)]
pub struct ApiDoc;

struct ApiKeyAddon;

impl Modify for ApiKeyAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "api_key",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new(API_KEY_HEADER))),
            );
        }
    }
}

pub async fn get_openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
