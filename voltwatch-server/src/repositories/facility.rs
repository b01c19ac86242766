use std::sync::Arc;

use sqlx::{Error, Pool, Sqlite, Transaction};

use crate::configs::Storage;
use crate::models::Facility;

#[derive(Clone)]
pub struct FacilityRepository {
    storage: Arc<Storage>,
}

impl FacilityRepository {
    pub fn new(storage: Arc<Storage>) -> Self {
        Self { storage }
    }

    pub fn get_pool(&self) -> &Pool<Sqlite> {
        self.storage.get_pool()
    }
}

impl FacilityRepository {
    pub async fn create(
        &self,
        item: &Facility,
        transaction: &mut Transaction<'_, Sqlite>,
    ) -> Result<i32, Error> {
        let id = sqlx::query(
            r#"
            INSERT INTO facilities (
                name, location, reporting_interval, power_save_mode, data_fields,
                monitoring_enabled, voltage_monitoring, nominal_voltage,
                voltage_high_threshold, voltage_low_threshold,
                voltage_critical_high, voltage_critical_low, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            "#,
        )
        .bind(&item.name)
        .bind(&item.location)
        .bind(item.reporting_interval)
        .bind(item.power_save_mode)
        .bind(&item.data_fields)
        .bind(item.monitoring_enabled)
        .bind(item.voltage_monitoring)
        .bind(item.nominal_voltage)
        .bind(item.voltage_high_threshold)
        .bind(item.voltage_low_threshold)
        .bind(item.voltage_critical_high)
        .bind(item.voltage_critical_low)
        .bind(item.created_at)
        .execute(&mut **transaction)
        .await?
        .last_insert_rowid();

        Ok(id as i32)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Facility>, Error> {
        let facility: Option<Facility> = sqlx::query_as("SELECT * FROM facilities WHERE id = $1")
            .bind(id)
            .fetch_optional(self.storage.get_pool())
            .await?;

        Ok(facility)
    }

    pub async fn count(&self) -> Result<i64, Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM facilities")
            .fetch_one(self.storage.get_pool())
            .await?;

        Ok(count)
    }

    pub async fn delete(
        &self,
        id: i32,
        transaction: &mut Transaction<'_, Sqlite>,
    ) -> Result<(), Error> {
        sqlx::query("DELETE FROM facilities WHERE id = $1")
            .bind(id)
            .execute(&mut **transaction)
            .await?;

        Ok(())
    }
}
