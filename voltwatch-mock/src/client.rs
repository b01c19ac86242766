use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use voltwatch_api::API_KEY_HEADER;
use voltwatch_api::models::{ConfigResponse, ErrorResponse, IngestReceipt, SensorReading, StatusResponse};

use crate::settings::Settings;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Server answered {status}: {message}")]
    Rejected { status: StatusCode, message: String },
}

/// Talks to the hardware endpoints on behalf of one meter.
#[derive(Clone)]
pub struct HardwareClient {
    http: Client,
    base_url: String,
    api_key: String,
}

impl HardwareClient {
    pub fn new(settings: &Settings) -> Result<Self, ClientError> {
        let http = Client::builder()
            .timeout(settings.meter.request_timeout())
            .build()?;

        Ok(Self {
            http,
            base_url: settings.server.url.clone(),
            api_key: settings.server.api_key.clone(),
        })
    }

    pub async fn status(&self) -> Result<StatusResponse, ClientError> {
        self.send(self.http.get(self.url("/api/hardware/status"))).await
    }

    pub async fn config(&self) -> Result<ConfigResponse, ClientError> {
        self.send(self.http.get(self.url("/api/hardware/config"))).await
    }

    pub async fn report(&self, reading: &SensorReading) -> Result<IngestReceipt, ClientError> {
        self.send(self.http.post(self.url("/api/hardware/data")).json(reading))
            .await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ClientError> {
        let response = request.header(API_KEY_HEADER, &self.api_key).send().await?;

        Self::decode(response).await
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
        let status = response.status();

        if status.is_success() {
            return Ok(response.json().await?);
        }

        let message = match response.json::<ErrorResponse>().await {
            Ok(error) => error.message,
            Err(_) => status.canonical_reason().unwrap_or("unknown error").to_string(),
        };

        Err(ClientError::Rejected { status, message })
    }
}
