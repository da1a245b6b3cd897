//! Combine both sources' output into one ordered quote list per asset.

use std::collections::HashMap;

use crate::error::RateError;
use crate::models::asset::AssetDescriptor;
use crate::models::quote::{Quote, RateResult};

/// Merge table rows and the feed quote for `asset`.
///
/// `table` is `None` when the asset has no table page. Table rows come first
/// in document order, then the feed quote for the asset's source code. A
/// failed source contributes nothing; only when every source that applies to
/// the asset failed is the result an error.
pub fn merge_asset_quotes(
    asset: &AssetDescriptor,
    table: Option<&Result<Vec<Quote>, RateError>>,
    feed: &Result<HashMap<String, Quote>, RateError>,
) -> Result<RateResult, RateError> {
    let mut quotes = Vec::new();
    let mut failures = Vec::new();

    match table {
        Some(Ok(rows)) => quotes.extend(rows.iter().cloned()),
        Some(Err(e)) => {
            tracing::warn!("Table source failed for {}: {}", asset.key, e);
            failures.push(format!("table source: {}", e));
        }
        None => {}
    }

    match feed {
        Ok(feed_quotes) => {
            if let Some(quote) = feed_quotes.get(asset.source_code) {
                quotes.push(quote.clone());
            } else {
                tracing::debug!("Feed has no quote for {} ({})", asset.key, asset.source_code);
            }
        }
        Err(e) => {
            tracing::warn!("Feed source failed for {}: {}", asset.key, e);
            failures.push(format!("feed source: {}", e));
        }
    }

    let applicable_sources = if table.is_some() { 2 } else { 1 };
    if failures.len() == applicable_sources {
        return Err(RateError::UpstreamUnavailable(format!(
            "all sources failed for '{}': {}",
            asset.key,
            failures.join("; ")
        )));
    }

    Ok(RateResult {
        asset: asset.key.to_string(),
        quotes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::asset_registry::lookup;
    use rust_decimal_macros::dec;

    fn quote(provider: &str, buy: rust_decimal::Decimal, sell: rust_decimal::Decimal) -> Quote {
        Quote {
            provider: provider.to_string(),
            buy,
            sell,
        }
    }

    fn feed() -> Result<HashMap<String, Quote>, RateError> {
        let mut quotes = HashMap::new();
        quotes.insert("USD".to_string(), quote("CANLIDOVIZ", dec!(34.10), dec!(34.20)));
        quotes.insert("ONS".to_string(), quote("CANLIDOVIZ", dec!(2650), dec!(2651)));
        Ok(quotes)
    }

    fn timeout() -> RateError {
        RateError::UpstreamUnavailable("request timed out".to_string())
    }

    #[test]
    fn test_table_rows_then_feed_quote() {
        let usd = lookup("usd").unwrap();
        let table = Ok(vec![
            quote("IS BANKASI", dec!(34.00), dec!(34.50)),
            quote("GARANTI BBVA", dec!(33.90), dec!(34.60)),
        ]);

        let result = merge_asset_quotes(usd, Some(&table), &feed()).unwrap();
        let providers: Vec<&str> = result.quotes.iter().map(|q| q.provider.as_str()).collect();
        assert_eq!(result.asset, "usd");
        assert_eq!(providers, vec!["IS BANKASI", "GARANTI BBVA", "CANLIDOVIZ"]);
    }

    #[test]
    fn test_table_failure_keeps_feed_quote() {
        let usd = lookup("usd").unwrap();
        let table = Err(timeout());

        let result = merge_asset_quotes(usd, Some(&table), &feed()).unwrap();
        assert_eq!(result.quotes, vec![quote("CANLIDOVIZ", dec!(34.10), dec!(34.20))]);
    }

    #[test]
    fn test_feed_failure_keeps_table_rows() {
        let usd = lookup("usd").unwrap();
        let table = Ok(vec![quote("IS BANKASI", dec!(34.00), dec!(34.50))]);

        let result = merge_asset_quotes(usd, Some(&table), &Err(timeout())).unwrap();
        assert_eq!(result.quotes.len(), 1);
        assert_eq!(result.quotes[0].provider, "IS BANKASI");
    }

    #[test]
    fn test_feed_only_asset() {
        let ons = lookup("ons").unwrap();
        let result = merge_asset_quotes(ons, None, &feed()).unwrap();
        assert_eq!(result.quotes, vec![quote("CANLIDOVIZ", dec!(2650), dec!(2651))]);

        let chf = lookup("chf").unwrap();
        assert!(merge_asset_quotes(chf, None, &feed()).unwrap().quotes.is_empty());

        assert!(matches!(
            merge_asset_quotes(ons, None, &Err(timeout())),
            Err(RateError::UpstreamUnavailable(_))
        ));
    }

    #[test]
    fn test_every_source_failed() {
        let usd = lookup("usd").unwrap();
        let table = Err(RateError::UpstreamFormat("bad page".to_string()));

        let err = merge_asset_quotes(usd, Some(&table), &Err(timeout())).unwrap_err();
        let RateError::UpstreamUnavailable(message) = err else {
            panic!("expected UpstreamUnavailable");
        };
        assert!(message.contains("table source"));
        assert!(message.contains("feed source"));
    }

    #[test]
    fn test_empty_sources_are_not_failures() {
        let eur = lookup("eur").unwrap();
        let result = merge_asset_quotes(eur, Some(&Ok(Vec::new())), &feed()).unwrap();
        assert!(result.quotes.is_empty());
    }
}
