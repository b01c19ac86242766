use serde::{Deserialize, Serialize};

use super::Id;
use super::reading::REQUIRED_FIELDS;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ThresholdError {
    #[error("Voltage thresholds must satisfy critical_low < low < nominal < high < critical_high")]
    Unordered,

    #[error("Voltage thresholds must be finite numbers")]
    NotFinite,
}

/// Voltage monitoring parameters of a facility.
#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FacilityElectricalConfig {
    /// Electrical monitoring is active on the device
    pub enabled: bool,
    /// Voltage readings are checked against thresholds
    pub voltage_monitoring: bool,
    /// Nominal line voltage (V)
    pub nominal_voltage: f64,
    /// Warning above this voltage (V)
    pub voltage_high_threshold: f64,
    /// Warning below this voltage (V)
    pub voltage_low_threshold: f64,
    /// Critical above this voltage (V)
    pub voltage_critical_high: f64,
    /// Critical below this voltage (V)
    pub voltage_critical_low: f64,
}

impl FacilityElectricalConfig {
    /// Derives thresholds from a nominal voltage: ±10 % warning, ±15 % critical.
    pub fn from_nominal(nominal_voltage: f64) -> Self {
        let at = |factor: f64| (nominal_voltage * factor * 10.0).round() / 10.0;

        Self {
            enabled: true,
            voltage_monitoring: true,
            nominal_voltage,
            voltage_high_threshold: at(1.10),
            voltage_low_threshold: at(0.90),
            voltage_critical_high: at(1.15),
            voltage_critical_low: at(0.85),
        }
    }

    pub fn validate(&self) -> Result<(), ThresholdError> {
        let ordered = [
            self.voltage_critical_low,
            self.voltage_low_threshold,
            self.nominal_voltage,
            self.voltage_high_threshold,
            self.voltage_critical_high,
        ];

        if ordered.iter().any(|value| !value.is_finite()) {
            return Err(ThresholdError::NotFinite);
        }

        if ordered.windows(2).any(|pair| pair[0] >= pair[1]) {
            return Err(ThresholdError::Unordered);
        }

        Ok(())
    }
}

impl Default for FacilityElectricalConfig {
    fn default() -> Self {
        Self::from_nominal(220.0)
    }
}

/// Configuration snapshot served to devices.
#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceConfig {
    /// Facility the device reports for
    pub facility_id: Id,
    /// Seconds between data submissions
    pub reporting_interval: u32,
    /// Device should reduce its reporting frequency
    pub power_save_mode: bool,
    /// Fields the device is expected to report
    pub data_fields: Vec<String>,
    /// Voltage monitoring parameters
    pub electrical_monitoring: FacilityElectricalConfig,
}

/// Data fields requested from devices unless a facility overrides them.
pub fn default_data_fields() -> Vec<String> {
    REQUIRED_FIELDS.iter().map(|field| field.to_string()).collect()
}
