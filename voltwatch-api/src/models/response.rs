use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::{DeviceConfig, Id, ResponseStatus};
use crate::alert::{Alert, AlertLevel};

/// Receipt returned for an accepted reading.
#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngestReceipt {
    pub status: ResponseStatus,
    pub message: String,
    /// Identifier assigned by the store
    pub data_id: Id,
    /// Present only when the reading triggered an alert
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alert: Option<Alert>,
}

impl IngestReceipt {
    pub fn new(data_id: Id, alert: Option<Alert>) -> Self {
        Self {
            status: ResponseStatus::Success,
            message: String::from("Data received successfully"),
            data_id,
            alert,
        }
    }
}

#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigResponse {
    pub status: ResponseStatus,
    pub config: DeviceConfig,
}

#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: ResponseStatus,
    /// Server clock in RFC 3339, UTC
    #[serde(with = "time::serde::rfc3339")]
    pub server_time: OffsetDateTime,
    pub message: String,
}

/// A stored reading with its derived values.
#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnergyRecordResponse {
    pub id: Id,
    pub facility_id: Id,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
    pub energy_produced: f64,
    pub energy_consumed: f64,
    /// Consumed over produced in percent, capped at 100
    pub efficiency: f64,
    pub current_load: f64,
    pub voltage: Option<f64>,
    pub current: Option<f64>,
    pub current1: Option<f64>,
    pub current2: Option<f64>,
    pub current3: Option<f64>,
    pub frequency: Option<f64>,
    pub power_factor: Option<f64>,
    pub alert_message: Option<String>,
    pub alert_level: Option<AlertLevel>,
}

#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatestReadingResponse {
    pub status: ResponseStatus,
    pub data: EnergyRecordResponse,
}

#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityResponse {
    pub status: ResponseStatus,
    /// A reading arrived within the recent-data window
    pub has_recent_data: bool,
    #[serde(with = "time::serde::rfc3339::option")]
    pub last_data_time: Option<OffsetDateTime>,
}

#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub status: ResponseStatus,
    pub message: String,
    /// Correlates a server error with the server log
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_id: Option<String>,
}
