use std::error::Error;
use std::time::Duration;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Logger {
    pub level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Server {
    pub url: String,
    pub api_key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Meter {
    pub fallback_interval_secs: u64,
    pub request_timeout_secs: u64,
}

impl Meter {
    pub fn fallback_interval(&self) -> Duration {
        Duration::from_secs(self.fallback_interval_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub logger: Logger,
    pub server: Server,
    pub meter: Meter,
}

impl Settings {
    pub fn new() -> Result<Self, Box<dyn Error>> {
        Self::parse(include_str!(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/configs/default.toml"
        )))
    }

    fn parse(source: &str) -> Result<Self, Box<dyn Error>> {
        let mut settings: Settings = toml::from_str(source)?;

        settings.server.url = settings.server.url.trim_end_matches('/').to_string();

        if settings.server.api_key.trim().is_empty() {
            return Err("server.api_key must not be empty".into());
        }

        if settings.meter.fallback_interval_secs == 0 {
            return Err("meter.fallback_interval_secs must be greater than zero".into());
        }

        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_settings() {
        let settings = Settings::new().unwrap();

        assert_eq!(settings.server.url, "http://localhost:5000");
        assert_eq!(settings.server.api_key, "dev_hardware_key");
        assert_eq!(settings.meter.fallback_interval(), Duration::from_secs(300));
    }

    #[test]
    fn test_trailing_slash_and_empty_key() {
        let source = r#"
            [logger]
            level = "debug"

            [server]
            url = "http://meter.local:5000/"
            api_key = "key"

            [meter]
            fallback_interval_secs = 60
            request_timeout_secs = 5
        "#;

        let settings = Settings::parse(source).unwrap();
        assert_eq!(settings.server.url, "http://meter.local:5000");

        let source = source.replace(r#"api_key = "key""#, r#"api_key = " ""#);
        assert!(Settings::parse(&source).is_err());
    }
}
