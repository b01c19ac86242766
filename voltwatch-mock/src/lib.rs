use std::error::Error;
use std::sync::Arc;
use std::time::Duration;

use time::OffsetDateTime;
use voltwatch_api::alert::{Alert, AlertLevel};

use crate::client::HardwareClient;
use crate::settings::Settings;
use crate::simulate::simulated_reading;

pub mod client;
pub mod settings;
pub mod simulate;

pub async fn run(settings: &Arc<Settings>) -> Result<(), Box<dyn Error>> {
    let client = HardwareClient::new(settings)?;

    let status = client.status().await?;
    tracing::info!(server_time = %status.server_time, "{}", status.message);

    let interval = match client.config().await {
        Ok(response) => {
            tracing::info!(
                facility_id = response.config.facility_id,
                power_save_mode = response.config.power_save_mode,
                "received device config"
            );
            reporting_interval(Some(response.config.reporting_interval), settings)
        }
        Err(e) => {
            tracing::warn!("failed to fetch config, using fallback interval: {e}");
            reporting_interval(None, settings)
        }
    };

    tracing::info!("sending simulated data every {} seconds", interval.as_secs());

    let mut ticker = tokio::time::interval(interval);
    loop {
        ticker.tick().await;

        let reading = simulated_reading(OffsetDateTime::now_utc().hour(), &mut rand::rng());

        tracing::debug!("send: {reading:?}");

        match client.report(&reading).await {
            Ok(receipt) => {
                tracing::info!(data_id = receipt.data_id, "{}", receipt.message);

                if let Some(alert) = &receipt.alert {
                    log_alert(alert);
                }
            }
            Err(e) => tracing::error!("failed to send reading: {e}"),
        }
    }
}

fn reporting_interval(configured: Option<u32>, settings: &Settings) -> Duration {
    configured
        .filter(|secs| *secs > 0)
        .map(|secs| Duration::from_secs(secs.into()))
        .unwrap_or_else(|| settings.meter.fallback_interval())
}

fn log_alert(alert: &Alert) {
    match alert.level {
        AlertLevel::Critical => tracing::error!("CRITICAL ALERT: {}", alert.message),
        AlertLevel::Warning => tracing::warn!("WARNING: {}", alert.message),
    }
}
