use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::routing::get;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::configs::{SchemaManager, Settings, Storage};
use crate::handles::*;
use crate::middlewares::KeyState;
use crate::repositories::{ApiKeyRepository, EnergyRecordRepository, FacilityRepository};
use crate::services::{KeyService, ProvisionService, TelemetryService};

pub async fn create_app(settings: &Arc<Settings>) -> anyhow::Result<Router> {
    let storage = Arc::new(
        Storage::new(settings.database.clone(), SchemaManager::default()).await?,
    );

    let facility_repository = Arc::new(FacilityRepository::new(storage.clone()));
    let api_key_repository = Arc::new(ApiKeyRepository::new(storage.clone()));
    let energy_record_repository = Arc::new(EnergyRecordRepository::new(storage.clone()));

    let key_service = Arc::new(KeyService::new());

    if let Some(bootstrap) = &settings.bootstrap {
        let provision_service = ProvisionService::new(
            facility_repository.clone(),
            api_key_repository.clone(),
            key_service.clone(),
        );
        provision_service.bootstrap(bootstrap).await?;
    }

    let telemetry_service = Arc::new(TelemetryService::new(
        facility_repository.clone(),
        energy_record_repository.clone(),
    ));

    let key_state = KeyState {
        api_key_repository: api_key_repository.clone(),
        key_service: key_service.clone(),
    };

    let hardware_state = HardwareState {
        telemetry_service,
        recent_window: Duration::from_secs(settings.hardware.recent_window_secs),
    };

    Ok(Router::new()
        .merge(hardware_router(hardware_state, key_state))
        .route("/api-docs/openapi.json", get(get_openapi))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()))
}
