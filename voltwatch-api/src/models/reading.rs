use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Fields every reading must carry.
pub const REQUIRED_FIELDS: [&str; 3] = ["energy_produced", "energy_consumed", "current_load"];

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ReadingError {
    #[error("No data provided")]
    NotAnObject,

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Field {0} must be a number")]
    NotNumeric(&'static str),

    #[error("Field {field} must be {range}")]
    OutOfRange { field: &'static str, range: Range },
}

/// Accepted value range of a reading field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Range {
    NonNegative,
    Positive,
    UnitInterval,
}

impl Range {
    fn contains(self, value: f64) -> bool {
        match self {
            Range::NonNegative => value >= 0.0,
            Range::Positive => value > 0.0,
            Range::UnitInterval => (0.0..=1.0).contains(&value),
        }
    }
}

impl std::fmt::Display for Range {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Range::NonNegative => write!(f, "a finite number >= 0"),
            Range::Positive => write!(f, "a finite number > 0"),
            Range::UnitInterval => write!(f, "a number between 0 and 1"),
        }
    }
}

/// A validated sensor reading as reported by a meter.
#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    /// Energy produced since the last report (kWh)
    pub energy_produced: f64,
    /// Energy consumed since the last report (kWh)
    pub energy_consumed: f64,
    /// Current load (kW)
    pub current_load: f64,
    /// Line voltage (V)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voltage: Option<f64>,
    /// Total current (A)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current: Option<f64>,
    /// Phase 1 current (A)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current1: Option<f64>,
    /// Phase 2 current (A)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current2: Option<f64>,
    /// Phase 3 current (A)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current3: Option<f64>,
    /// Grid frequency (Hz)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency: Option<f64>,
    /// Power factor, 0..=1
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub power_factor: Option<f64>,
}

impl SensorReading {
    /// Validates a raw JSON body field by field.
    ///
    /// `null` optional fields count as absent. When any phase current is
    /// positive, `current` becomes the sum of the phases.
    pub fn from_json(body: &Value) -> Result<Self, ReadingError> {
        let fields = body.as_object().ok_or(ReadingError::NotAnObject)?;

        let mut reading = SensorReading {
            energy_produced: required(fields, "energy_produced", Range::NonNegative)?,
            energy_consumed: required(fields, "energy_consumed", Range::NonNegative)?,
            current_load: required(fields, "current_load", Range::NonNegative)?,
            voltage: optional(fields, "voltage", Range::Positive)?,
            current: optional(fields, "current", Range::NonNegative)?,
            current1: optional(fields, "current1", Range::NonNegative)?,
            current2: optional(fields, "current2", Range::NonNegative)?,
            current3: optional(fields, "current3", Range::NonNegative)?,
            frequency: optional(fields, "frequency", Range::Positive)?,
            power_factor: optional(fields, "power_factor", Range::UnitInterval)?,
        };

        let phases = [reading.current1, reading.current2, reading.current3];
        if phases.iter().flatten().any(|phase| *phase > 0.0) {
            reading.current = Some(phases.iter().flatten().sum());
        }

        Ok(reading)
    }

    /// Share of produced energy that was consumed, in percent, capped at 100.
    pub fn efficiency(&self) -> f64 {
        if self.energy_produced > 0.0 {
            (self.energy_consumed / self.energy_produced * 100.0).min(100.0)
        } else {
            0.0
        }
    }
}

fn required(fields: &Map<String, Value>, field: &'static str, range: Range) -> Result<f64, ReadingError> {
    optional(fields, field, range)?.ok_or(ReadingError::MissingField(field))
}

fn optional(
    fields: &Map<String, Value>,
    field: &'static str,
    range: Range,
) -> Result<Option<f64>, ReadingError> {
    let value = match fields.get(field) {
        None | Some(Value::Null) => return Ok(None),
        Some(value) => value.as_f64().ok_or(ReadingError::NotNumeric(field))?,
    };

    if !value.is_finite() || !range.contains(value) {
        return Err(ReadingError::OutOfRange { field, range });
    }

    Ok(Some(value))
}
