use crate::conditions::models::{FetchError, WeatherReading, WeatherSource};
use anyhow::{Context, Result};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

/// Open-Meteo current weather provider
pub struct OpenMeteoWeatherSource {
    url: Url,
    client: Client,
    timeout: Duration,
}

/// Open-Meteo forecast response, reduced to what we read
#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current_weather: CurrentWeather,
}

#[derive(Debug, Deserialize)]
struct CurrentWeather {
    temperature: f64,
    weathercode: i32,
}

impl OpenMeteoWeatherSource {
    /// Create a provider for the given coordinates
    pub fn new(base_url: &str, latitude: f64, longitude: f64, timeout: Duration) -> Result<Self> {
        let url = Url::parse_with_params(
            base_url,
            &[
                ("latitude", latitude.to_string()),
                ("longitude", longitude.to_string()),
                ("current_weather", "true".to_string()),
            ],
        )
        .with_context(|| format!("Invalid weather base URL: {base_url}"))?;

        Ok(Self {
            url,
            client: super::build_client(timeout)?,
            timeout,
        })
    }

    pub fn url(&self) -> &str {
        self.url.as_str()
    }
}

#[async_trait::async_trait]
impl WeatherSource for OpenMeteoWeatherSource {
    async fn fetch_current_weather(&self) -> Result<WeatherReading, FetchError> {
        debug!("Fetching current weather from {}", self.url);

        let data: ForecastResponse =
            super::send_json(self.name(), self.client.get(self.url.clone()), self.timeout).await?;

        let reading = WeatherReading::new(
            data.current_weather.temperature,
            data.current_weather.weathercode,
        );
        info!(
            "Current weather: {:.1}°C, {} (code {})",
            reading.temperature,
            reading.condition(),
            reading.condition_code
        );

        Ok(reading)
    }

    fn name(&self) -> &str {
        "open-meteo"
    }
}
