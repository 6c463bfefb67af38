use crate::conditions::models::{FetchError, WaterTemperatureSource};
use anyhow::Result;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// Reads the latest river temperature from the temperature download service.
///
/// That service does the slow part (requesting, polling and unzipping the
/// state hydrology export) and answers with `{"temperature": 14.2}`.
pub struct HttpWaterTemperatureSource {
    url: String,
    client: Client,
    timeout: Duration,
}

#[derive(Debug, Deserialize)]
struct TemperatureResponse {
    temperature: f64,
}

impl HttpWaterTemperatureSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        Ok(Self {
            url: url.into(),
            client: super::build_client(timeout)?,
            timeout,
        })
    }
}

#[async_trait::async_trait]
impl WaterTemperatureSource for HttpWaterTemperatureSource {
    async fn fetch_water_temperature(&self) -> Result<f64, FetchError> {
        debug!("Fetching water temperature from {}", self.url);

        let data: TemperatureResponse =
            super::send_json(self.name(), self.client.get(&self.url), self.timeout).await?;

        Ok(data.temperature)
    }

    fn name(&self) -> &str {
        "water-temperature"
    }
}
