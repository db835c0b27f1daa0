use async_trait::async_trait;
use reqwest::Client;
use shared::{
    error::PredictionError,
    protocol::{HealthResponse, PredictionResponse, RequestPayload},
};
use thiserror::Error;
use tracing::{debug, info, warn};
use url::Url;

pub mod controller;
pub mod draft;
pub mod state;

pub use controller::{FormController, InFlightRequest, SubmitTicket};
pub use draft::{coerce_numeric, Draft, NOT_A_NUMBER};
pub use state::{FormSnapshot, ResultState};

pub const DEFAULT_PREDICT_PATH: &str = "/predict";

#[derive(Debug, Error)]
pub enum EndpointError {
    #[error("invalid prediction service url '{url}': {source}")]
    InvalidUrl {
        url: String,
        source: url::ParseError,
    },
    #[error("prediction service url must use http or https, got '{0}'")]
    UnsupportedScheme(String),
}

/// Where the prediction service lives. Fixed for the lifetime of the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceEndpoint {
    predict_url: Url,
    health_url: Url,
}

impl ServiceEndpoint {
    /// `predict_path` is appended to `service_url`, so a base with a path
    /// prefix (`https://host/api`) keeps it.
    pub fn parse(service_url: &str, predict_path: &str) -> Result<Self, EndpointError> {
        let base = service_url.trim().trim_end_matches('/');
        let path = predict_path.trim().trim_start_matches('/');

        let parse = |raw: String| {
            Url::parse(&raw).map_err(|source| EndpointError::InvalidUrl { url: raw, source })
        };
        let health_url = parse(format!("{base}/"))?;
        if !matches!(health_url.scheme(), "http" | "https") {
            return Err(EndpointError::UnsupportedScheme(
                health_url.scheme().to_string(),
            ));
        }
        let predict_url = parse(format!("{base}/{path}"))?;

        Ok(Self {
            predict_url,
            health_url,
        })
    }

    pub fn predict_url(&self) -> &Url {
        &self.predict_url
    }

    pub fn health_url(&self) -> &Url {
        &self.health_url
    }
}

/// The remote crop prediction service.
#[async_trait]
pub trait PredictionClient: Send + Sync {
    /// Sends one prediction request. Never retries.
    async fn predict(&self, payload: &RequestPayload) -> Result<String, PredictionError>;
    /// Returns the service's self-reported status line.
    async fn health(&self) -> Result<String, PredictionError>;
}

pub struct HttpPredictionClient {
    http: Client,
    endpoint: ServiceEndpoint,
}

impl HttpPredictionClient {
    pub fn new(endpoint: ServiceEndpoint) -> Self {
        Self::with_client(Client::new(), endpoint)
    }

    pub fn with_client(http: Client, endpoint: ServiceEndpoint) -> Self {
        Self { http, endpoint }
    }

    pub fn endpoint(&self) -> &ServiceEndpoint {
        &self.endpoint
    }
}

#[async_trait]
impl PredictionClient for HttpPredictionClient {
    async fn predict(&self, payload: &RequestPayload) -> Result<String, PredictionError> {
        let url = self.endpoint.predict_url.clone();
        debug!(%url, ?payload, "posting prediction request");

        // `json` sets `Content-Type: application/json`; nothing else is sent.
        let response = self
            .http
            .post(url)
            .json(payload)
            .send()
            .await
            .map_err(|err| PredictionError::Transport(err.to_string()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|err| PredictionError::Transport(err.to_string()))?;
        if !status.is_success() {
            debug!(%status, "prediction service answered with a non-success status");
        }

        PredictionResponse::interpret(&body)
    }

    async fn health(&self) -> Result<String, PredictionError> {
        let response = self
            .http
            .get(self.endpoint.health_url.clone())
            .send()
            .await
            .map_err(|err| PredictionError::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            warn!(%status, "prediction service health check failed");
            return Err(PredictionError::Transport(format!(
                "health check returned {status}"
            )));
        }

        let body = response
            .bytes()
            .await
            .map_err(|err| PredictionError::Transport(err.to_string()))?;
        let health: HealthResponse = serde_json::from_slice(&body)
            .map_err(|err| PredictionError::MalformedBody(err.to_string()))?;
        info!(status = %health.status, "prediction service is up");
        Ok(health.status)
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
