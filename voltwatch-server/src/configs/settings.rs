use std::env;

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

use crate::configs::normalize_path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Server {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Logger {
    pub level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Database {
    pub migration_path: Option<String>,
    pub clean_start: bool,
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hardware {
    /// How long a reading still counts as live for the latest/activity endpoints.
    pub recent_window_secs: u64,
}

impl Default for Hardware {
    fn default() -> Self {
        Self { recent_window_secs: 60 }
    }
}

/// Facility and device key seeded into an empty database.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bootstrap {
    pub facility_name: String,
    pub location: String,
    pub api_key: String,
    pub nominal_voltage: f64,
    pub reporting_interval: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub server: Server,
    pub logger: Logger,
    pub database: Database,
    #[serde(default)]
    pub hardware: Hardware,
    pub bootstrap: Option<Bootstrap>,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or("development".into());

        let mut settings: Settings = Config::builder()
            .add_source(File::with_name("configs/default"))
            .add_source(File::with_name(&format!("configs/{run_mode}")).required(false))
            .add_source(Environment::with_prefix("VOLTWATCH").separator("__"))
            .build()?
            .try_deserialize()?;

        if let Some(migrate) = &settings.database.migration_path {
            let migrate_path = normalize_path(migrate)
                .map_err(|e| ConfigError::Message(e.to_string()))?
                .to_string_lossy()
                .to_string();

            settings.database.migration_path = Some(migrate_path);
        }

        if let Some(bootstrap) = &settings.bootstrap {
            if bootstrap.api_key.trim().is_empty() {
                return Err(ConfigError::Message(String::from(
                    "bootstrap.api_key must not be empty",
                )));
            }
        }

        Ok(settings)
    }
}
