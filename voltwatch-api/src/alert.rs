//! Voltage alerting rule applied to every ingested reading.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::FacilityElectricalConfig;

#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertLevel {
    Warning,
    Critical,
}

impl fmt::Display for AlertLevel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AlertLevel::Warning => write!(f, "warning"),
            AlertLevel::Critical => write!(f, "critical"),
        }
    }
}

impl TryFrom<&str> for AlertLevel {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "warning" => Ok(AlertLevel::Warning),
            "critical" => Ok(AlertLevel::Critical),
            other => Err(format!("unknown alert level: {other}")),
        }
    }
}

#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    /// Human readable description including the measured voltage
    pub message: String,
    /// Severity of the condition
    pub level: AlertLevel,
}

/// Maps a voltage reading onto the facility thresholds.
///
/// Critical bounds are checked before the warning band, so a voltage beyond
/// both yields a single critical alert. Returns `None` when no voltage was
/// reported or monitoring is switched off.
pub fn evaluate(voltage: Option<f64>, config: &FacilityElectricalConfig) -> Option<Alert> {
    let voltage = voltage?;

    if !config.voltage_monitoring {
        return None;
    }

    if voltage >= config.voltage_critical_high || voltage <= config.voltage_critical_low {
        return Some(Alert {
            message: format!("Critical voltage condition: {voltage:.1}V"),
            level: AlertLevel::Critical,
        });
    }

    let direction = if voltage >= config.voltage_high_threshold {
        "High"
    } else if voltage <= config.voltage_low_threshold {
        "Low"
    } else {
        return None;
    };

    Some(Alert {
        message: format!("{direction} voltage condition: {voltage:.1}V"),
        level: AlertLevel::Warning,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> FacilityElectricalConfig {
        FacilityElectricalConfig {
            enabled: true,
            voltage_monitoring: true,
            nominal_voltage: 220.0,
            voltage_high_threshold: 242.0,
            voltage_low_threshold: 198.0,
            voltage_critical_high: 253.0,
            voltage_critical_low: 187.0,
        }
    }

    #[test]
    fn test_high_warning() {
        let alert = evaluate(Some(245.2), &config()).unwrap();

        assert_eq!(alert.level, AlertLevel::Warning);
        assert_eq!(alert.message, "High voltage condition: 245.2V");
    }

    #[test]
    fn test_low_warning() {
        let alert = evaluate(Some(190.0), &config()).unwrap();

        assert_eq!(alert.level, AlertLevel::Warning);
        assert_eq!(alert.message, "Low voltage condition: 190.0V");
    }

    #[test]
    fn test_critical_takes_precedence() {
        let alert = evaluate(Some(260.0), &config()).unwrap();

        assert_eq!(alert.level, AlertLevel::Critical);
        assert_eq!(alert.message, "Critical voltage condition: 260.0V");

        let alert = evaluate(Some(150.0), &config()).unwrap();
        assert_eq!(alert.level, AlertLevel::Critical);
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let config = config();

        assert_eq!(evaluate(Some(253.0), &config).unwrap().level, AlertLevel::Critical);
        assert_eq!(evaluate(Some(187.0), &config).unwrap().level, AlertLevel::Critical);
        assert_eq!(evaluate(Some(242.0), &config).unwrap().level, AlertLevel::Warning);
        assert_eq!(evaluate(Some(198.0), &config).unwrap().level, AlertLevel::Warning);
    }

    #[test]
    fn test_normal_band_has_no_alert() {
        let config = config();

        for voltage in [198.1, 210.0, 220.0, 241.9] {
            assert_eq!(evaluate(Some(voltage), &config), None, "voltage {voltage}");
        }
    }

    #[test]
    fn test_every_band() {
        let config = config();
        let mut voltage = 150.0;

        while voltage < 300.0 {
            let level = evaluate(Some(voltage), &config).map(|alert| alert.level);
            let expected = if voltage >= 253.0 || voltage <= 187.0 {
                Some(AlertLevel::Critical)
            } else if voltage >= 242.0 || voltage <= 198.0 {
                Some(AlertLevel::Warning)
            } else {
                None
            };

            assert_eq!(level, expected, "voltage {voltage}");
            voltage += 0.25;
        }
    }

    #[test]
    fn test_no_voltage_or_monitoring_off() {
        let mut config = config();

        assert_eq!(evaluate(None, &config), None);

        config.voltage_monitoring = false;
        assert_eq!(evaluate(Some(300.0), &config), None);
        assert_eq!(evaluate(Some(100.0), &config), None);
    }

    #[test]
    fn test_level_round_trips_through_str() {
        for level in [AlertLevel::Warning, AlertLevel::Critical] {
            assert_eq!(AlertLevel::try_from(level.to_string().as_str()), Ok(level));
        }
        assert!(AlertLevel::try_from("info").is_err());
    }
}
