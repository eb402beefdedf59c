//! HTTP client for the price prediction service.

use std::time::Duration;

use anyhow::Context;
use reqwest::Client;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, error, info, warn};

use super::models::{ErrorBody, PredictionResult};
use crate::form::PredictionRequest;

pub const REJECTED_FALLBACK: &str = "Prediction failed";

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Failures of a prediction call, each rendering as the message shown to the user.
#[derive(Debug, Error)]
pub enum PredictionError {
    /// The service answered with an error status.
    #[error("{message}")]
    Rejected { status: u16, message: String },

    /// The request went out but no response came back.
    #[error("Unable to connect to server. Please ensure the backend is running.")]
    Unreachable(#[source] reqwest::Error),

    #[error("An unexpected error occurred")]
    Unexpected(#[source] BoxError),

    #[error("Health check failed")]
    HealthCheckFailed(#[source] BoxError),
}

pub struct PredictionClient {
    client: Client,
    base_url: String,
}

impl PredictionClient {
    /// Builds a client for `base_url`. `timeout` of `None` keeps transport defaults.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> anyhow::Result<Self> {
        let mut builder = Client::builder()
            .user_agent(concat!("house-price-form/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn predict(
        &self,
        request: &PredictionRequest,
    ) -> Result<PredictionResult, PredictionError> {
        let body = request
            .to_wire()
            .map_err(|e| PredictionError::Unexpected(Box::new(e)))?;
        let url = format!("{}/predict", self.base_url);

        info!(%url, "Requesting price prediction");

        let res = match self.client.post(&url).json(&body).send().await {
            Ok(res) => res,
            Err(e) if e.is_builder() => {
                error!(error = %e, "Could not build prediction request");
                return Err(PredictionError::Unexpected(Box::new(e)));
            }
            Err(e) => {
                warn!(error = %e, "No response from prediction service");
                return Err(PredictionError::Unreachable(e));
            }
        };

        let status = res.status();
        if !status.is_success() {
            let text = res.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorBody>(&text)
                .ok()
                .and_then(|b| b.message())
                .unwrap_or_else(|| REJECTED_FALLBACK.to_string());

            warn!(status = status.as_u16(), %message, "Prediction rejected");
            return Err(PredictionError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let result: PredictionResult = res.json().await.map_err(|e| {
            error!(error = %e, "Malformed prediction response");
            PredictionError::Unexpected(Box::new(e))
        })?;

        debug!(price = result.predicted_price, "Prediction received");
        Ok(result)
    }

    /// Health check. The body is returned as-is.
    pub async fn check_health(&self) -> Result<Value, PredictionError> {
        let url = format!("{}/health", self.base_url);

        let res = self
            .client
            .get(&url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| PredictionError::HealthCheckFailed(Box::new(e)))?;

        res.json()
            .await
            .map_err(|e| PredictionError::HealthCheckFailed(Box::new(e)))
    }
}
