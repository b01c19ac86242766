use std::sync::Arc;

use voltwatch_api::models::FacilityElectricalConfig;
use voltwatch_server::configs::{Bootstrap, Database, SchemaManager, Storage};
use voltwatch_server::repositories::{ApiKeyRepository, FacilityRepository};
use voltwatch_server::services::{KeyService, NewFacility, ProvisionError, ProvisionService};

async fn storage() -> Arc<Storage> {
    Arc::new(
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
    )
}

fn provision_service(storage: &Arc<Storage>) -> ProvisionService {
    ProvisionService::new(
        Arc::new(FacilityRepository::new(storage.clone())),
        Arc::new(ApiKeyRepository::new(storage.clone())),
        Arc::new(KeyService::new()),
    )
}

fn bootstrap() -> Bootstrap {
    Bootstrap {
        facility_name: String::from("Main Facility"),
        location: String::from("Unknown"),
        api_key: String::from("dev_hardware_key"),
        nominal_voltage: 220.0,
        reporting_interval: 300,
    }
}

#[tokio::test]
async fn test_create_facility_rejects_unordered_thresholds() {
    let storage = storage().await;
    let service = provision_service(&storage);

    let mut new = NewFacility::new("Plant", "North", 220.0);
    new.electrical = FacilityElectricalConfig {
        voltage_high_threshold: 260.0,
        ..FacilityElectricalConfig::from_nominal(220.0)
    };

    let result = service.create_facility(&new).await;
    assert!(matches!(result, Err(ProvisionError::InvalidThresholds(_))));

    let count = FacilityRepository::new(storage.clone()).count().await.unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
async fn test_create_facility_rejects_zero_interval() {
    let storage = storage().await;
    let service = provision_service(&storage);

    let mut new = NewFacility::new("Plant", "North", 220.0);
    new.reporting_interval = 0;

    let result = service.create_facility(&new).await;
    assert!(matches!(result, Err(ProvisionError::InvalidInterval)));
}

#[tokio::test]
async fn test_create_facility_stores_thresholds() {
    let storage = storage().await;
    let service = provision_service(&storage);

    let facility = service
        .create_facility(&NewFacility::new("Plant", "North", 110.0))
        .await
        .unwrap();

    let stored = FacilityRepository::new(storage.clone())
        .find_by_id(facility.id)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(stored.name, "Plant");
    assert_eq!(
        stored.electrical_config(),
        FacilityElectricalConfig::from_nominal(110.0)
    );
}

#[tokio::test]
async fn test_issue_key_stores_digest() {
    let storage = storage().await;
    let service = provision_service(&storage);
    let key_service = KeyService::new();

    let api_key = service.issue_key("meter_secret_key", None).await.unwrap();

    assert_ne!(api_key.key_hash, "meter_secret_key");
    assert_eq!(api_key.key_prefix, "meter_se");

    let found = ApiKeyRepository::new(storage.clone())
        .find_by_hash(&key_service.hash("meter_secret_key"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.id, api_key.id);
    assert_eq!(found.facility_id, None);

    let result = service.issue_key("  ", None).await;
    assert!(matches!(result, Err(ProvisionError::EmptyApiKey)));
}

#[tokio::test]
async fn test_bootstrap_runs_once() {
    let storage = storage().await;
    let service = provision_service(&storage);

    let facility = service.bootstrap(&bootstrap()).await.unwrap();
    assert!(facility.is_some());

    let again = service.bootstrap(&bootstrap()).await.unwrap();
    assert!(again.is_none());

    let count = FacilityRepository::new(storage.clone()).count().await.unwrap();
    assert_eq!(count, 1);

    let key_service = KeyService::new();
    let api_key = ApiKeyRepository::new(storage.clone())
        .find_by_hash(&key_service.hash("dev_hardware_key"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(api_key.facility_id, facility.map(|facility| facility.id));
}
