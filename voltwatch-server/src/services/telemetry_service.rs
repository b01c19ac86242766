use std::sync::Arc;
use std::time::Duration;

use time::OffsetDateTime;
use voltwatch_api::alert::{self, AlertLevel};
use voltwatch_api::models::{IngestReceipt, SensorReading};

use crate::errors::{ApiError, HardwareError};
use crate::models::{EnergyRecord, Facility};
use crate::repositories::{EnergyRecordRepository, FacilityRepository};

/// Accepts readings for a facility and serves back what was stored.
#[derive(Clone)]
pub struct TelemetryService {
    facility_repository: Arc<FacilityRepository>,
    energy_record_repository: Arc<EnergyRecordRepository>,
}

impl TelemetryService {
    pub fn new(
        facility_repository: Arc<FacilityRepository>,
        energy_record_repository: Arc<EnergyRecordRepository>,
    ) -> Self {
        Self {
            facility_repository,
            energy_record_repository,
        }
    }

    pub async fn facility(&self, facility_id: i32) -> Result<Facility, ApiError> {
        let facility = self
            .facility_repository
            .find_by_id(facility_id)
            .await?
            .ok_or(HardwareError::FacilityNotFound)?;

        Ok(facility)
    }

    /// Evaluates the voltage alert and stores the reading in one transaction.
    pub async fn ingest(
        &self,
        facility_id: i32,
        reading: &SensorReading,
    ) -> Result<IngestReceipt, ApiError> {
        let facility = self.facility(facility_id).await?;

        let alert = alert::evaluate(reading.voltage, &facility.electrical_config());

        match &alert {
            Some(alert) if alert.level == AlertLevel::Critical => {
                tracing::warn!(facility_id, "{}", alert.message)
            }
            Some(alert) => tracing::info!(facility_id, "{}", alert.message),
            None => {}
        }

        let record = EnergyRecord::new(
            facility.id,
            reading,
            alert.as_ref(),
            OffsetDateTime::now_utc(),
        );

        let mut tx = self.energy_record_repository.get_pool().begin().await?;
        let data_id = self.energy_record_repository.create(&record, &mut tx).await?;
        tx.commit().await?;

        tracing::info!(
            facility_id,
            data_id,
            "received hardware data: produced={}, consumed={}, voltage={:?}",
            reading.energy_produced,
            reading.energy_consumed,
            reading.voltage,
        );

        Ok(IngestReceipt::new(data_id, alert))
    }

    /// Newest record of the facility received within `window`.
    pub async fn latest(
        &self,
        facility_id: i32,
        window: Duration,
    ) -> Result<Option<EnergyRecord>, ApiError> {
        // Windows reaching past the representable range cover all records
        let since = time::Duration::try_from(window)
            .ok()
            .and_then(|window| OffsetDateTime::now_utc().checked_sub(window))
            .unwrap_or(OffsetDateTime::UNIX_EPOCH);

        let record = self
            .energy_record_repository
            .find_latest_by_facility_since(facility_id, since)
            .await?;

        Ok(record)
    }
}
