use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use time::OffsetDateTime;
use voltwatch_api::models::{DeviceConfig, FacilityElectricalConfig};

use super::Table;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Facility {
    pub id: i32,
    pub name: String,
    pub location: String,
    /// Seconds between device reports
    pub reporting_interval: u32,
    pub power_save_mode: bool,
    pub data_fields: Json<Vec<String>>,
    pub monitoring_enabled: bool,
    pub voltage_monitoring: bool,
    pub nominal_voltage: f64,
    pub voltage_high_threshold: f64,
    pub voltage_low_threshold: f64,
    pub voltage_critical_high: f64,
    pub voltage_critical_low: f64,
    pub created_at: OffsetDateTime,
}

impl Facility {
    pub fn electrical_config(&self) -> FacilityElectricalConfig {
        FacilityElectricalConfig {
            enabled: self.monitoring_enabled,
            voltage_monitoring: self.voltage_monitoring,
            nominal_voltage: self.nominal_voltage,
            voltage_high_threshold: self.voltage_high_threshold,
            voltage_low_threshold: self.voltage_low_threshold,
            voltage_critical_high: self.voltage_critical_high,
            voltage_critical_low: self.voltage_critical_low,
        }
    }

    pub fn set_electrical_config(&mut self, config: &FacilityElectricalConfig) {
        self.monitoring_enabled = config.enabled;
        self.voltage_monitoring = config.voltage_monitoring;
        self.nominal_voltage = config.nominal_voltage;
        self.voltage_high_threshold = config.voltage_high_threshold;
        self.voltage_low_threshold = config.voltage_low_threshold;
        self.voltage_critical_high = config.voltage_critical_high;
        self.voltage_critical_low = config.voltage_critical_low;
    }

    pub fn device_config(&self) -> DeviceConfig {
        DeviceConfig {
            facility_id: self.id,
            reporting_interval: self.reporting_interval,
            power_save_mode: self.power_save_mode,
            data_fields: self.data_fields.0.clone(),
            electrical_monitoring: self.electrical_config(),
        }
    }
}

#[derive(Clone)]
pub struct FacilityTable;

impl Table for FacilityTable {
    fn name(&self) -> &'static str {
        "facilities"
    }

    fn create(&self) -> String {
        String::from(
            r#"
            CREATE TABLE IF NOT EXISTS facilities (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name VARCHAR(100) NOT NULL,
                location VARCHAR(200) NOT NULL,
                reporting_interval INTEGER NOT NULL CHECK (reporting_interval > 0),
                power_save_mode BOOLEAN NOT NULL DEFAULT FALSE,
                data_fields JSON NOT NULL,
                monitoring_enabled BOOLEAN NOT NULL DEFAULT TRUE,
                voltage_monitoring BOOLEAN NOT NULL DEFAULT TRUE,
                nominal_voltage REAL NOT NULL,
                voltage_high_threshold REAL NOT NULL,
                voltage_low_threshold REAL NOT NULL,
                voltage_critical_high REAL NOT NULL,
                voltage_critical_low REAL NOT NULL,
                created_at TIMESTAMP NOT NULL
            );
            "#,
        )
    }

    fn dispose(&self) -> String {
        String::from("DROP TABLE IF EXISTS facilities;")
    }

    fn dependencies(&self) -> Vec<&'static str> {
        vec![]
    }
}
