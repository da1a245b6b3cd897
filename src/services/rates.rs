use chrono::NaiveDate;
use futures_util::future::join_all;
use serde_json::Value;
use std::collections::BTreeMap;

use crate::error::{ErrorResponse, RateError};
use crate::models::asset::AssetDescriptor;
use crate::models::historical::{HistoricalPoint, HistoricalQuote};
use crate::models::quote::{AssetRates, Quote, RateResult};
use crate::scrapers::comparison_table::ComparisonTableScraper;
use crate::services::asset_registry;
use crate::services::canlidoviz::CanliDovizService;
use crate::services::merge::merge_asset_quotes;
use crate::services::tick_date::{
    date_range_to_ticks, day_to_ticks, parse_iso_date, upstream_timestamp_to_iso,
};

/// Longest span, in days between start and end, a range query may cover.
///
/// The span is the day difference `end - start`, so `2024-01-01..2024-02-01`
/// (31) is accepted and returns 32 inclusive daily points.
pub const MAX_RANGE_DAYS: i64 = 31;

/// Entry point for every rate query. Holds no state beyond the two upstream clients.
#[derive(Clone)]
pub struct RateService {
    table: ComparisonTableScraper,
    feed: CanliDovizService,
}

impl RateService {
    pub fn new(table: ComparisonTableScraper, feed: CanliDovizService) -> Self {
        Self { table, feed }
    }

    fn resolve(key: &str) -> Result<&'static AssetDescriptor, RateError> {
        asset_registry::lookup(key)
            .ok_or_else(|| RateError::NotFound(format!("Unknown asset '{}'", key)))
    }

    async fn fetch_table(&self, asset: &AssetDescriptor) -> Option<Result<Vec<Quote>, RateError>> {
        match asset.table_path {
            Some(path) => Some(self.table.fetch_quotes(path).await),
            None => None,
        }
    }

    /// Merged rates for every registered asset, keyed by asset key.
    ///
    /// The feed is fetched once and all table pages concurrently. An asset
    /// whose sources all failed gets an error entry; the rest are unaffected.
    pub async fn get_all_rates(&self) -> BTreeMap<String, AssetRates> {
        let assets = asset_registry::all();
        tracing::info!("Fetching rates for {} assets", assets.len());

        let (tables, feed) = tokio::join!(
            join_all(assets.iter().map(|asset| self.fetch_table(asset))),
            self.feed.fetch_feed()
        );

        assets
            .iter()
            .zip(tables)
            .map(|(asset, table)| {
                let entry = match merge_asset_quotes(asset, table.as_ref(), &feed) {
                    Ok(result) => AssetRates::Rates(result),
                    Err(e) => AssetRates::Failed(ErrorResponse::from(&e)),
                };
                (asset.key.to_string(), entry)
            })
            .collect()
    }

    pub async fn get_rate(&self, key: &str) -> Result<RateResult, RateError> {
        let asset = Self::resolve(key)?;
        tracing::info!("Fetching rates for {}", asset.key);

        let (table, feed) = tokio::join!(self.fetch_table(asset), self.feed.fetch_feed());

        merge_asset_quotes(asset, table.as_ref(), &feed)
    }

    /// The first upstream record on `date` (`YYYY-MM-DD`).
    pub async fn get_history_point(&self, key: &str, date: &str) -> Result<HistoricalQuote, RateError> {
        let asset = Self::resolve(key)?;
        let history_id = history_id(asset)?;
        let day = parse_iso_date(date)?;
        let (start, end) = day_to_ticks(day)?;

        let records = self
            .feed
            .fetch_history(history_id, asset.source_code, start, end)
            .await?;

        records.into_iter().next().ok_or_else(|| {
            RateError::NotFound(format!("No history record for '{}' on {}", asset.key, day))
        })
    }

    /// Daily points from `start` to `end`, both inclusive.
    pub async fn get_history_range(
        &self,
        key: &str,
        start: &str,
        end: &str,
    ) -> Result<Vec<HistoricalPoint>, RateError> {
        let asset = Self::resolve(key)?;
        let history_id = history_id(asset)?;
        let (start_date, end_date) = validate_range(start, end)?;
        let (from, to) = date_range_to_ticks(start_date, end_date)?;

        let records = self
            .feed
            .fetch_history(history_id, asset.source_code, from, to)
            .await?;

        let points: Vec<HistoricalPoint> = records
            .into_iter()
            .filter_map(|record| match upstream_timestamp_to_iso(&record.time) {
                Some(date) => Some(HistoricalPoint {
                    date,
                    buy: record.buy,
                    sell: record.sell,
                }),
                None => {
                    tracing::debug!("Dropping history record with timestamp '{}'", record.time);
                    None
                }
            })
            .collect();

        tracing::info!(
            "Returning {} history points for {} ({} to {})",
            points.len(),
            asset.key,
            start_date,
            end_date
        );

        Ok(points)
    }

    pub async fn get_chart(&self, key: &str) -> Result<Value, RateError> {
        let asset = Self::resolve(key)?;
        let chart_id = asset.chart_id.ok_or_else(|| {
            RateError::NotFound(format!("Asset '{}' has no chart series", asset.key))
        })?;

        self.feed.fetch_chart(chart_id).await
    }
}

fn history_id(asset: &AssetDescriptor) -> Result<i64, RateError> {
    asset.history_id.ok_or_else(|| {
        RateError::NotFound(format!("Asset '{}' has no history series", asset.key))
    })
}

/// Parse both dates and enforce `start <= end` and the [`MAX_RANGE_DAYS`] cap.
pub fn validate_range(start: &str, end: &str) -> Result<(NaiveDate, NaiveDate), RateError> {
    let start_date = parse_iso_date(start)?;
    let end_date = parse_iso_date(end)?;

    if start_date > end_date {
        return Err(RateError::InvalidInput(format!(
            "Start date {} is after end date {}",
            start_date, end_date
        )));
    }

    let span = (end_date - start_date).num_days();
    if span > MAX_RANGE_DAYS {
        return Err(RateError::InvalidInput(format!(
            "Date range spans {} days, maximum is {}",
            span, MAX_RANGE_DAYS
        )));
    }

    Ok((start_date, end_date))
}
