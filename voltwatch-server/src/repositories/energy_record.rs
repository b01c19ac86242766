use std::sync::Arc;

use sqlx::{Error, Pool, Sqlite, Transaction};
use time::OffsetDateTime;

use crate::configs::Storage;
use crate::models::EnergyRecord;

#[derive(Clone)]
pub struct EnergyRecordRepository {
    storage: Arc<Storage>,
}

impl EnergyRecordRepository {
    pub fn new(storage: Arc<Storage>) -> Self {
        Self { storage }
    }

    pub fn get_pool(&self) -> &Pool<Sqlite> {
        self.storage.get_pool()
    }
}

impl EnergyRecordRepository {
    pub async fn create(
        &self,
        item: &EnergyRecord,
        transaction: &mut Transaction<'_, Sqlite>,
    ) -> Result<i32, Error> {
        let id = sqlx::query(
            r#"
            INSERT INTO energy_records (
                facility_id, timestamp, energy_produced, energy_consumed, efficiency,
                current_load, voltage, "current", current1, current2, current3,
                frequency, power_factor, alert_message, alert_level
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            "#,
        )
        .bind(item.facility_id)
        .bind(item.timestamp)
        .bind(item.energy_produced)
        .bind(item.energy_consumed)
        .bind(item.efficiency)
        .bind(item.current_load)
        .bind(item.voltage)
        .bind(item.current)
        .bind(item.current1)
        .bind(item.current2)
        .bind(item.current3)
        .bind(item.frequency)
        .bind(item.power_factor)
        .bind(&item.alert_message)
        .bind(&item.alert_level)
        .execute(&mut **transaction)
        .await?
        .last_insert_rowid();

        Ok(id as i32)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<EnergyRecord>, Error> {
        let record: Option<EnergyRecord> =
            sqlx::query_as("SELECT * FROM energy_records WHERE id = $1")
                .bind(id)
                .fetch_optional(self.storage.get_pool())
                .await?;

        Ok(record)
    }

    // Timestamps are text with variable fractional digits, compare them as julian days
    pub async fn find_latest_by_facility_since(
        &self,
        facility_id: i32,
        since: OffsetDateTime,
    ) -> Result<Option<EnergyRecord>, Error> {
        let record: Option<EnergyRecord> = sqlx::query_as(
            r#"
            SELECT * FROM energy_records
            WHERE facility_id = $1 AND julianday(timestamp) >= julianday($2)
            ORDER BY julianday(timestamp) DESC, id DESC
            LIMIT 1
            "#,
        )
        .bind(facility_id)
        .bind(since)
        .fetch_optional(self.storage.get_pool())
        .await?;

        Ok(record)
    }

    pub async fn count_by_facility(&self, facility_id: i32) -> Result<i64, Error> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM energy_records WHERE facility_id = $1")
                .bind(facility_id)
                .fetch_one(self.storage.get_pool())
                .await?;

        Ok(count)
    }
}
