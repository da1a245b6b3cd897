use reqwest::Client;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde_json::Value;
use std::collections::HashMap;
use std::str::FromStr;

use crate::error::RateError;
use crate::models::historical::HistoricalQuote;
use crate::models::quote::Quote;
use crate::services::price_utils::{normalize_unit, parse_feed_price};

/// Provider name attached to every quote from the feed.
pub const VENDOR_NAME: &str = "CANLIDOVIZ";

const BUY_FIELDS: &[&str] = &["buyPrice", "buy"];
const SELL_FIELDS: &[&str] = &["sellPrice", "sell"];
const TIMESTAMP_FIELDS: &[&str] = &["date", "updateDate"];

/// Client for the vendor's live feed, tick-addressed history and chart APIs.
#[derive(Clone)]
pub struct CanliDovizService {
    client: Client,
    feed_url: String,
    history_url: String,
    chart_url: String,
}

impl CanliDovizService {
    pub fn new(client: Client, feed_url: String, history_url: String, chart_url: String) -> Self {
        Self {
            client,
            feed_url,
            history_url,
            chart_url: chart_url.trim_end_matches('/').to_string(),
        }
    }

    async fn get_json(&self, url: &str, query: &[(&str, String)]) -> Result<Value, RateError> {
        let response = self
            .client
            .get(url)
            .header("accept", "application/json")
            .query(query)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(RateError::UpstreamUnavailable(format!(
                "upstream API error {} from {}: {}",
                status, url, error_text
            )));
        }

        response.json::<Value>().await.map_err(|e| {
            RateError::UpstreamFormat(format!("invalid JSON from {}: {}", url, e))
        })
    }

    /// Current quotes for every code the feed publishes.
    pub async fn fetch_feed(&self) -> Result<HashMap<String, Quote>, RateError> {
        tracing::debug!("Fetching live feed from {}", self.feed_url);

        let payload = self.get_json(&self.feed_url, &[]).await?;
        let quotes = quotes_from_feed(&payload)?;

        tracing::debug!("Feed returned {} usable quotes", quotes.len());

        Ok(quotes)
    }

    /// Records for `history_id` in the tick window `[start_ticks, end_ticks)`.
    pub async fn fetch_history(
        &self,
        history_id: i64,
        source_code: &str,
        start_ticks: i64,
        end_ticks: i64,
    ) -> Result<Vec<HistoricalQuote>, RateError> {
        tracing::info!(
            "Fetching history for {} (item {}) ticks {}..{}",
            source_code,
            history_id,
            start_ticks,
            end_ticks
        );

        let payload = self
            .get_json(
                &self.history_url,
                &[
                    ("itemId", history_id.to_string()),
                    ("startDate", start_ticks.to_string()),
                    ("endDate", end_ticks.to_string()),
                ],
            )
            .await?;

        history_from_payload(&payload, source_code)
    }

    /// Chart series, passed through untouched.
    pub async fn fetch_chart(&self, chart_id: i64) -> Result<Value, RateError> {
        let url = format!("{}/{}", self.chart_url, chart_id);
        tracing::info!("Fetching chart series {}", url);
        self.get_json(&url, &[]).await
    }
}

/// First of `names` present with a non-null value.
fn field<'a>(record: &'a Value, names: &[&str]) -> Option<&'a Value> {
    names
        .iter()
        .find_map(|name| record.get(*name).filter(|value| !value.is_null()))
}

fn price_field(record: &Value, names: &[&str]) -> Option<Decimal> {
    match field(record, names)? {
        Value::String(raw) => parse_feed_price(raw),
        Value::Number(n) => Decimal::from_str(&n.to_string())
            .ok()
            .or_else(|| n.as_f64().and_then(Decimal::from_f64)),
        _ => None,
    }
}

fn text_field<'a>(record: &'a Value, names: &[&str]) -> Option<&'a str> {
    field(record, names).and_then(Value::as_str)
}

/// Index a feed payload by source code.
///
/// The payload must be a JSON array. Records without a code or with
/// unparseable prices are dropped; the first record for a code wins.
pub fn quotes_from_feed(payload: &Value) -> Result<HashMap<String, Quote>, RateError> {
    let items = payload.as_array().ok_or_else(|| {
        RateError::UpstreamFormat("feed payload is not a JSON array".to_string())
    })?;

    let mut quotes = HashMap::with_capacity(items.len());

    for item in items {
        let Some(code) = item.get("code").and_then(Value::as_str) else {
            tracing::debug!("Skipping feed record without code: {}", item);
            continue;
        };

        let (Some(buy), Some(sell)) = (price_field(item, BUY_FIELDS), price_field(item, SELL_FIELDS))
        else {
            tracing::debug!("Skipping feed record {}: unparseable prices", code);
            continue;
        };

        let (buy, sell) = normalize_unit(code, buy, sell);

        quotes.entry(code.to_string()).or_insert(Quote {
            provider: VENDOR_NAME.to_string(),
            buy,
            sell,
        });
    }

    Ok(quotes)
}

/// Convert a history payload into records in upstream order.
pub fn history_from_payload(
    payload: &Value,
    source_code: &str,
) -> Result<Vec<HistoricalQuote>, RateError> {
    let items = payload.as_array().ok_or_else(|| {
        RateError::UpstreamFormat("history payload is not a JSON array".to_string())
    })?;

    let records = items
        .iter()
        .filter_map(|item| {
            let time = text_field(item, TIMESTAMP_FIELDS)?;
            let buy = price_field(item, BUY_FIELDS);
            let sell = price_field(item, SELL_FIELDS);
            match (buy, sell) {
                (Some(buy), Some(sell)) => {
                    let (buy, sell) = normalize_unit(source_code, buy, sell);
                    Some(HistoricalQuote {
                        time: time.to_string(),
                        buy,
                        sell,
                    })
                }
                _ => {
                    tracing::debug!("Skipping history record at {}: unparseable prices", time);
                    None
                }
            }
        })
        .collect();

    Ok(records)
}
