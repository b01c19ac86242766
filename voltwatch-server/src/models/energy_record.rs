use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use voltwatch_api::alert::{Alert, AlertLevel};
use voltwatch_api::models::{EnergyRecordResponse, SensorReading};

use super::Table;

#[derive(Clone, Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct EnergyRecord {
    pub id: i32,
    pub facility_id: i32,
    /// The time the reading was received
    pub timestamp: OffsetDateTime,
    /// Energy produced in kWh
    pub energy_produced: f64,
    /// Energy consumed in kWh
    pub energy_consumed: f64,
    /// Consumed over produced in percent
    pub efficiency: f64,
    /// Load in kW
    pub current_load: f64,
    pub voltage: Option<f64>,
    pub current: Option<f64>,
    pub current1: Option<f64>,
    pub current2: Option<f64>,
    pub current3: Option<f64>,
    pub frequency: Option<f64>,
    pub power_factor: Option<f64>,
    pub alert_message: Option<String>,
    pub alert_level: Option<String>,
}

impl EnergyRecord {
    pub fn new(
        facility_id: i32,
        reading: &SensorReading,
        alert: Option<&Alert>,
        timestamp: OffsetDateTime,
    ) -> Self {
        Self {
            id: 0,
            facility_id,
            timestamp,
            energy_produced: reading.energy_produced,
            energy_consumed: reading.energy_consumed,
            efficiency: reading.efficiency(),
            current_load: reading.current_load,
            voltage: reading.voltage,
            current: reading.current,
            current1: reading.current1,
            current2: reading.current2,
            current3: reading.current3,
            frequency: reading.frequency,
            power_factor: reading.power_factor,
            alert_message: alert.map(|alert| alert.message.clone()),
            alert_level: alert.map(|alert| alert.level.to_string()),
        }
    }
}

impl From<EnergyRecord> for EnergyRecordResponse {
    fn from(record: EnergyRecord) -> Self {
        let alert_level = record
            .alert_level
            .as_deref()
            .and_then(|level| AlertLevel::try_from(level).ok());

        Self {
            id: record.id,
            facility_id: record.facility_id,
            timestamp: record.timestamp,
            energy_produced: record.energy_produced,
            energy_consumed: record.energy_consumed,
            efficiency: record.efficiency,
            current_load: record.current_load,
            voltage: record.voltage,
            current: record.current,
            current1: record.current1,
            current2: record.current2,
            current3: record.current3,
            frequency: record.frequency,
            power_factor: record.power_factor,
            alert_message: record.alert_message,
            alert_level,
        }
    }
}

#[derive(Clone)]
pub struct EnergyRecordTable;

impl Table for EnergyRecordTable {
    fn name(&self) -> &'static str {
        "energy_records"
    }

    fn create(&self) -> String {
        String::from(
            r#"
            CREATE TABLE IF NOT EXISTS energy_records (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                facility_id INTEGER NOT NULL,
                timestamp TIMESTAMP NOT NULL,
                energy_produced REAL NOT NULL,
                energy_consumed REAL NOT NULL,
                efficiency REAL NOT NULL,
                current_load REAL NOT NULL,
                voltage REAL,
                "current" REAL,
                current1 REAL,
                current2 REAL,
                current3 REAL,
                frequency REAL,
                power_factor REAL,
                alert_message TEXT,
                alert_level VARCHAR(16),
                FOREIGN KEY (facility_id) REFERENCES facilities (id) ON DELETE CASCADE
            );
            CREATE INDEX IF NOT EXISTS idx_energy_records_facility_time
                ON energy_records (facility_id, timestamp);
            "#,
        )
    }

    fn dispose(&self) -> String {
        String::from("DROP TABLE IF EXISTS energy_records;")
    }

    fn dependencies(&self) -> Vec<&'static str> {
        vec!["facilities"]
    }
}
