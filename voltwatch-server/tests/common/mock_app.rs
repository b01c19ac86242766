use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, Response};
use serde_json::Value;
use voltwatch_api::models::FacilityElectricalConfig;
use voltwatch_server::configs::{Database, SchemaManager, Storage};
use voltwatch_server::handles::{HardwareState, hardware_router};
use voltwatch_server::middlewares::KeyState;
use voltwatch_server::models::Facility;
use voltwatch_server::repositories::{ApiKeyRepository, EnergyRecordRepository, FacilityRepository};
use voltwatch_server::services::{KeyService, TelemetryService};
use voltwatch_server::tests::{create_test_api_key, create_test_facility};

pub const TEST_API_KEY: &str = "test_hardware_key";

pub struct MockApp {
    pub router: Router,
    pub storage: Arc<Storage>,
    pub facility: Facility,
    pub api_key: String,
}

impl MockApp {
    pub async fn new() -> Self {
        Self::with_electrical_config(FacilityElectricalConfig::from_nominal(220.0)).await
    }

    pub async fn with_electrical_config(electrical: FacilityElectricalConfig) -> Self {
        let storage = Arc::new(
            Storage::new(
                Database {
                    migration_path: None,
                    clean_start: true,
                    url: String::from("sqlite::memory:"),
                },
                SchemaManager::default(),
            )
            .await
            .unwrap(),
        );

        let facility = create_test_facility(storage.clone(), "Test Facility", electrical).await;
        create_test_api_key(storage.clone(), TEST_API_KEY, Some(facility.id)).await;

        Self {
            router: Router::new(),
            storage,
            facility,
            api_key: TEST_API_KEY.to_string(),
        }
    }

    pub fn with_hardware_handle(self) -> Self {
        self.with_recent_window(Duration::from_secs(60))
    }

    pub fn with_recent_window(mut self, recent_window: Duration) -> Self {
        let telemetry_service = Arc::new(TelemetryService::new(
            Arc::new(FacilityRepository::new(self.storage.clone())),
            Arc::new(EnergyRecordRepository::new(self.storage.clone())),
        ));

        let key_state = KeyState {
            api_key_repository: Arc::new(ApiKeyRepository::new(self.storage.clone())),
            key_service: Arc::new(KeyService::new()),
        };

        self.router = hardware_router(
            HardwareState {
                telemetry_service,
                recent_window,
            },
            key_state,
        );

        self
    }

    pub fn energy_records(&self) -> EnergyRecordRepository {
        EnergyRecordRepository::new(self.storage.clone())
    }
}

pub fn get(uri: &str, api_key: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri).method(Method::GET);

    if let Some(api_key) = api_key {
        builder = builder.header("X-API-Key", api_key);
    }

    builder.body(Body::empty()).unwrap()
}

pub fn post_json(uri: &str, api_key: Option<&str>, body: impl Into<Body>) -> Request<Body> {
    let mut builder = Request::builder()
        .uri(uri)
        .method(Method::POST)
        .header("Content-Type", "application/json");

    if let Some(api_key) = api_key {
        builder = builder.header("X-API-Key", api_key);
    }

    builder.body(body.into()).unwrap()
}

pub async fn read_json(response: Response<Body>) -> Value {
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();

    serde_json::from_slice(&body).unwrap()
}
