use super::models::{DelegatedPrediction, DelegatedPredictor, DelegationError, PredictionFeatures};
use crate::constants::network::USER_AGENT;
use anyhow::{Context, Result};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, error};

/// Delegated predictor reached over HTTP.
///
/// POSTs the feature JSON and expects `{"surfer_count": n, "explanation": {..}}`.
pub struct HttpPredictor {
    url: String,
    client: Client,
    timeout: Duration,
}

impl HttpPredictor {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            url: url.into(),
            client,
            timeout,
        })
    }
}

#[async_trait::async_trait]
impl DelegatedPredictor for HttpPredictor {
    async fn predict(
        &self,
        features: &PredictionFeatures,
    ) -> Result<DelegatedPrediction, DelegationError> {
        debug!("Requesting delegated prediction from {}: {:?}", self.url, features);

        let response = self
            .client
            .post(&self.url)
            .json(features)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    DelegationError::Timeout(self.timeout.as_secs())
                } else {
                    DelegationError::Http(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read response body".to_string());
            error!("Predictor error: {} - {}", status, body);
            return Err(DelegationError::Status {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<DelegatedPrediction>()
            .await
            .map_err(|e| DelegationError::Parse(e.to_string()))
    }

    fn name(&self) -> &str {
        "http"
    }
}
