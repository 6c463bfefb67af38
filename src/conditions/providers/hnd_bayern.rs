use crate::conditions::models::{FetchError, HistoricalWaterLevel, WaterLevelHistorySource};
use anyhow::Result;
use lazy_static::lazy_static;
use regex::Regex;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info};

lazy_static! {
    static ref LEVEL_TABLE: Regex =
        Regex::new(r#"(?is)<table[^>]*class\s*=\s*"[^"]*\btblsort\b[^"]*"[^>]*>(.*?)</table>"#)
            .expect("level table pattern");
    static ref TABLE_BODY: Regex =
        Regex::new(r"(?is)<tbody[^>]*>(.*?)</tbody>").expect("table body pattern");
    static ref ROW: Regex = Regex::new(r"(?is)<tr[^>]*>(.*?)</tr>").expect("row pattern");
    static ref CELL: Regex = Regex::new(r"(?is)<td[^>]*>(.*?)</td>").expect("cell pattern");
    static ref TAG: Regex = Regex::new(r"(?s)<[^>]*>").expect("tag pattern");
}

/// Water level table of the Bavarian flood service (HND Bayern).
///
/// The gauge page lists one row per measurement, newest first, with the
/// date in the first column and the level in cm (German decimal comma) in
/// the second.
pub struct HndBayernHistorySource {
    url: String,
    client: Client,
    timeout: Duration,
}

impl HndBayernHistorySource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        Ok(Self {
            url: url.into(),
            client: super::build_client(timeout)?,
            timeout,
        })
    }
}

/// Visible text of an HTML fragment
fn cell_text(html: &str) -> String {
    TAG.replace_all(html, "")
        .replace("&nbsp;", " ")
        .replace("&#160;", " ")
        .trim()
        .to_string()
}

/// Rows of the `tblsort` table; rows without a numeric level are skipped
fn parse_level_table(html: &str) -> Result<Vec<HistoricalWaterLevel>, FetchError> {
    let table = LEVEL_TABLE
        .captures(html)
        .and_then(|c| c.get(1))
        .ok_or_else(|| FetchError::InvalidResponse("water level table not found".to_string()))?
        .as_str();

    let body = TABLE_BODY
        .captures(table)
        .and_then(|c| c.get(1))
        .map_or(table, |m| m.as_str());

    let mut levels = Vec::new();
    for row in ROW.captures_iter(body) {
        let cells: Vec<String> = CELL
            .captures_iter(&row[1])
            .map(|c| cell_text(&c[1]))
            .collect();
        if cells.len() < 2 {
            continue;
        }

        match cells[1].replace(',', ".").parse::<f64>() {
            Ok(value) => levels.push(HistoricalWaterLevel {
                date_time: cells[0].clone(),
                value,
            }),
            Err(_) => debug!("Skipping level row '{}': '{}'", cells[0], cells[1]),
        }
    }

    Ok(levels)
}

#[async_trait::async_trait]
impl WaterLevelHistorySource for HndBayernHistorySource {
    async fn fetch_water_level_history(&self) -> Result<Vec<HistoricalWaterLevel>, FetchError> {
        debug!("Fetching water level history from {}", self.url);

        let page = super::send_text(self.name(), self.client.get(&self.url), self.timeout).await?;
        let levels = parse_level_table(&page)?;

        info!("Fetched {} historical water levels", levels.len());
        Ok(levels)
    }

    fn name(&self) -> &str {
        "hnd-bayern"
    }
}
