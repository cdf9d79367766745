use super::DrawSource;
use crate::error::DataSourceError;
use crate::types::{DrawRecord, HistorySeries, IssueId};
use async_trait::async_trait;
use chrono::NaiveDateTime;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

pub const WINGO_API_URL: &str =
    "https://draw.ar-lottery01.com/WinGo/WinGo_1M/GetHistoryIssuePage.json";
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";
const CREATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Deserialize)]
struct HistoryResponse {
    data: Option<HistoryPage>,
}

#[derive(Debug, Deserialize)]
struct HistoryPage {
    list: Option<Vec<HistoryItem>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct HistoryItem {
    #[serde(default)]
    issue_number: Value,
    #[serde(default)]
    number: Value,
    #[serde(default)]
    create_time: Value,
}

/// REST client for the one-minute WinGo draw history.
#[derive(Clone)]
pub struct WinGoClient {
    client: Client,
    url: String,
}

impl WinGoClient {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Default for WinGoClient {
    fn default() -> Self {
        Self::new(WINGO_API_URL, Duration::from_millis(8000))
    }
}

#[async_trait]
impl DrawSource for WinGoClient {
    async fn fetch(&self) -> Result<HistorySeries, DataSourceError> {
        debug!("Fetching draw history from {}", self.url);

        let response = self
            .client
            .get(&self.url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(DataSourceError::from_request)?;

        if !response.status().is_success() {
            let status = response.status();
            warn!("WinGo API returned {}", status);
            return Err(DataSourceError::Status(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(DataSourceError::from_request)?;

        let history =
            parse_history(&body, chrono::Utc::now().timestamp_millis()).map_err(|e| {
                warn!("Rejected WinGo response: {}", e);
                e
            })?;

        debug!("Fetched {} draws", history.len());
        Ok(history)
    }

    fn name(&self) -> &'static str {
        "wingo"
    }
}

/// Parse a history page into an oldest-first series.
///
/// `now` stands in for draws without a usable `createTime`.
pub fn parse_history(body: &str, now: i64) -> Result<HistorySeries, DataSourceError> {
    let response: HistoryResponse =
        serde_json::from_str(body).map_err(|e| DataSourceError::Malformed(e.to_string()))?;

    let items = response
        .data
        .and_then(|page| page.list)
        .ok_or_else(|| DataSourceError::Malformed("missing data.list".to_string()))?;

    let mut records = items
        .iter()
        .map(|item| parse_item(item, now))
        .collect::<Result<Vec<_>, _>>()?;

    // Upstream lists newest first
    records.reverse();

    Ok(HistorySeries::new(records))
}

fn parse_item(item: &HistoryItem, now: i64) -> Result<DrawRecord, DataSourceError> {
    let issue = match &item.issue_number {
        Value::String(s) => s.parse::<IssueId>().ok(),
        Value::Number(n) => n.as_u64().map(IssueId),
        _ => None,
    }
    .ok_or_else(|| {
        DataSourceError::Malformed(format!("invalid issue number {}", item.issue_number))
    })?;

    let number = parse_number(&item.number);
    let digit = u8::try_from(number).map_err(|_| {
        DataSourceError::Malformed(format!("draw {} has number {}", issue, number))
    })?;

    DrawRecord::try_new(issue, digit, parse_create_time(&item.create_time, now))
        .map_err(|e| DataSourceError::Malformed(e.to_string()))
}

/// Leading integer of the field; anything unreadable counts as 0.
fn parse_number(value: &Value) -> i64 {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.trunc() as i64))
            .unwrap_or(0),
        Value::String(s) => leading_integer(s).unwrap_or(0),
        _ => 0,
    }
}

/// Digits too long for `i64` saturate, so they still fail the 0-9 check.
fn leading_integer(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, digits) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    let digits = &digits[..end];
    if digits.is_empty() {
        return None;
    }

    let value = match digits.parse::<i64>() {
        Ok(n) if negative => -n,
        Ok(n) => n,
        Err(_) if negative => i64::MIN,
        Err(_) => i64::MAX,
    };
    Some(value)
}

fn parse_create_time(value: &Value, now: i64) -> i64 {
    match value {
        Value::Number(n) => n.as_i64().unwrap_or(now),
        Value::String(s) => NaiveDateTime::parse_from_str(s.trim(), CREATE_TIME_FORMAT)
            .map(|dt| dt.and_utc().timestamp_millis())
            .unwrap_or(now),
        _ => now,
    }
}
