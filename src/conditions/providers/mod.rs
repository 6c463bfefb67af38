pub mod hnd_bayern;
pub mod open_meteo;
pub mod pegel_alarm;
pub mod water_temperature;

pub use hnd_bayern::HndBayernHistorySource;
pub use open_meteo::OpenMeteoWeatherSource;
pub use pegel_alarm::PegelAlarmLevelSource;
pub use water_temperature::HttpWaterTemperatureSource;

use super::models::FetchError;
use crate::constants::network::USER_AGENT;
use anyhow::{Context, Result};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::error;

/// Build an HTTP client with a hard request timeout
pub(crate) fn build_client(timeout: Duration) -> Result<Client> {
    Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()
        .context("Failed to create HTTP client")
}

/// Send a request, turning transport failures and non-2xx answers into errors
async fn send(
    source: &str,
    request: RequestBuilder,
    timeout: Duration,
) -> Result<Response, FetchError> {
    let response = request.send().await.map_err(|e| {
        if e.is_timeout() {
            FetchError::Timeout(timeout.as_secs())
        } else {
            FetchError::Http(e.to_string())
        }
    })?;

    let status = response.status();
    if !status.is_success() {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unable to read response body".to_string());
        error!("{} returned HTTP {}: {}", source, status, body);
        return Err(FetchError::Status {
            status: status.as_u16(),
            body,
        });
    }

    Ok(response)
}

/// Send a request and decode a JSON body, classifying every failure
pub(crate) async fn send_json<T: DeserializeOwned>(
    source: &str,
    request: RequestBuilder,
    timeout: Duration,
) -> Result<T, FetchError> {
    send(source, request, timeout)
        .await?
        .json::<T>()
        .await
        .map_err(|e| FetchError::Parse(e.to_string()))
}

/// Send a request and return the body as text
pub(crate) async fn send_text(
    source: &str,
    request: RequestBuilder,
    timeout: Duration,
) -> Result<String, FetchError> {
    send(source, request, timeout)
        .await?
        .text()
        .await
        .map_err(|e| FetchError::Http(e.to_string()))
}
