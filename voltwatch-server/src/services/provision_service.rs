use std::sync::Arc;

use sqlx::types::Json;
use time::OffsetDateTime;
use voltwatch_api::models::{FacilityElectricalConfig, ThresholdError, default_data_fields};

use crate::configs::Bootstrap;
use crate::models::{ApiKey, Facility};
use crate::repositories::{ApiKeyRepository, FacilityRepository};
use crate::services::KeyService;

#[derive(Debug, thiserror::Error)]
pub enum ProvisionError {
    #[error("Invalid electrical config: {0}")]
    InvalidThresholds(#[from] ThresholdError),

    #[error("Reporting interval must be greater than zero")]
    InvalidInterval,

    #[error("API key must not be empty")]
    EmptyApiKey,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[derive(Debug, Clone)]
pub struct NewFacility {
    pub name: String,
    pub location: String,
    pub reporting_interval: u32,
    pub power_save_mode: bool,
    pub data_fields: Vec<String>,
    pub electrical: FacilityElectricalConfig,
}

impl NewFacility {
    pub fn new(name: &str, location: &str, nominal_voltage: f64) -> Self {
        Self {
            name: name.to_string(),
            location: location.to_string(),
            reporting_interval: 300,
            power_save_mode: false,
            data_fields: default_data_fields(),
            electrical: FacilityElectricalConfig::from_nominal(nominal_voltage),
        }
    }
}

/// Registers facilities and their device keys.
#[derive(Clone)]
pub struct ProvisionService {
    facility_repository: Arc<FacilityRepository>,
    api_key_repository: Arc<ApiKeyRepository>,
    key_service: Arc<KeyService>,
}

impl ProvisionService {
    pub fn new(
        facility_repository: Arc<FacilityRepository>,
        api_key_repository: Arc<ApiKeyRepository>,
        key_service: Arc<KeyService>,
    ) -> Self {
        Self {
            facility_repository,
            api_key_repository,
            key_service,
        }
    }

    pub async fn create_facility(&self, new: &NewFacility) -> Result<Facility, ProvisionError> {
        new.electrical.validate()?;

        if new.reporting_interval == 0 {
            return Err(ProvisionError::InvalidInterval);
        }

        let mut facility = Facility {
            id: 0,
            name: new.name.clone(),
            location: new.location.clone(),
            reporting_interval: new.reporting_interval,
            power_save_mode: new.power_save_mode,
            data_fields: Json(new.data_fields.clone()),
            monitoring_enabled: true,
            voltage_monitoring: true,
            nominal_voltage: 0.0,
            voltage_high_threshold: 0.0,
            voltage_low_threshold: 0.0,
            voltage_critical_high: 0.0,
            voltage_critical_low: 0.0,
            created_at: OffsetDateTime::now_utc(),
        };
        facility.set_electrical_config(&new.electrical);

        let mut tx = self.facility_repository.get_pool().begin().await?;
        facility.id = self.facility_repository.create(&facility, &mut tx).await?;
        tx.commit().await?;

        tracing::info!(facility_id = facility.id, "registered facility {}", facility.name);

        Ok(facility)
    }

    /// Stores the digest of `key`, optionally bound to a facility.
    pub async fn issue_key(
        &self,
        key: &str,
        facility_id: Option<i32>,
    ) -> Result<ApiKey, ProvisionError> {
        if key.trim().is_empty() {
            return Err(ProvisionError::EmptyApiKey);
        }

        let mut api_key = ApiKey {
            id: 0,
            key_hash: self.key_service.hash(key),
            key_prefix: self.key_service.prefix(key).to_string(),
            facility_id,
            created_at: OffsetDateTime::now_utc(),
        };

        let mut tx = self.facility_repository.get_pool().begin().await?;
        api_key.id = self.api_key_repository.create(&api_key, &mut tx).await?;
        tx.commit().await?;

        tracing::info!(key_prefix = %api_key.key_prefix, ?facility_id, "issued api key");

        Ok(api_key)
    }

    /// Seeds the configured facility and key when no facility exists yet.
    pub async fn bootstrap(&self, bootstrap: &Bootstrap) -> Result<Option<Facility>, ProvisionError> {
        if self.facility_repository.count().await? > 0 {
            tracing::debug!("facilities present, skipping bootstrap");
            return Ok(None);
        }

        let mut new = NewFacility::new(
            &bootstrap.facility_name,
            &bootstrap.location,
            bootstrap.nominal_voltage,
        );
        new.reporting_interval = bootstrap.reporting_interval;

        let facility = self.create_facility(&new).await?;

        let key_hash = self.key_service.hash(&bootstrap.api_key);
        if self.api_key_repository.find_by_hash(&key_hash).await?.is_none() {
            self.issue_key(&bootstrap.api_key, Some(facility.id)).await?;
        } else {
            tracing::warn!("bootstrap api key already exists, leaving its facility unchanged");
        }

        Ok(Some(facility))
    }
}
