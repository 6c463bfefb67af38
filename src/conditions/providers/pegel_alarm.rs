use crate::conditions::models::{FetchError, WaterLevelFlow, WaterLevelSource};
use anyhow::Result;
use chrono::{DateTime, FixedOffset};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info};

/// Format of PegelAlarm's `requestDate`, e.g. `17.04.2025T22:43:04+0200`
const REQUEST_DATE_FORMAT: &str = "%d.%m.%YT%H:%M:%S%z";

/// PegelAlarm gauge provider for water level and flow
pub struct PegelAlarmLevelSource {
    url: String,
    client: Client,
    timeout: Duration,
}

#[derive(Debug, Deserialize)]
struct StationListResponse {
    payload: Payload,
}

#[derive(Debug, Deserialize)]
struct Payload {
    #[serde(default)]
    stations: Vec<Station>,
}

#[derive(Debug, Deserialize)]
struct Station {
    #[serde(default)]
    data: Vec<StationValue>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StationValue {
    #[serde(default)]
    request_date: String,
    value: f64,
}

impl PegelAlarmLevelSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        Ok(Self {
            url: url.into(),
            client: super::build_client(timeout)?,
            timeout,
        })
    }
}

/// First station carries level in `data[0]` and flow in `data[1]`
fn parse_level_and_flow(response: StationListResponse) -> Result<WaterLevelFlow, FetchError> {
    let station = response
        .payload
        .stations
        .into_iter()
        .next()
        .ok_or_else(|| FetchError::InvalidResponse("no stations in response".to_string()))?;

    if station.data.len() < 2 {
        return Err(FetchError::InvalidResponse(format!(
            "expected level and flow values, got {} value(s)",
            station.data.len()
        )));
    }

    let level = &station.data[0];
    let flow = &station.data[1];

    let observed_at = DateTime::<FixedOffset>::parse_from_str(&level.request_date, REQUEST_DATE_FORMAT)
        .map_err(|e| {
            FetchError::Parse(format!("requestDate '{}': {}", level.request_date, e))
        })?;

    Ok(WaterLevelFlow {
        level: level.value,
        flow: flow.value,
        observed_at,
    })
}

#[async_trait::async_trait]
impl WaterLevelSource for PegelAlarmLevelSource {
    async fn fetch_water_level_and_flow(&self) -> Result<WaterLevelFlow, FetchError> {
        debug!("Fetching water level and flow from {}", self.url);

        let data: StationListResponse =
            super::send_json(self.name(), self.client.get(&self.url), self.timeout).await?;
        let reading = parse_level_and_flow(data)?;

        info!(
            "Water level {:.1} cm, flow {:.1} m³/s (as of {})",
            reading.level,
            reading.flow,
            reading.observed_at.to_rfc3339()
        );

        Ok(reading)
    }

    fn name(&self) -> &str {
        "pegelalarm"
    }
}
