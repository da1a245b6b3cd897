use reqwest::Client;

use super::parser::parse_comparison_table;
use crate::error::RateError;
use crate::models::quote::Quote;

/// Fetches per-asset bank comparison pages from the HTML table source.
#[derive(Clone)]
pub struct ComparisonTableScraper {
    client: Client,
    base_url: String,
}

impl ComparisonTableScraper {
    pub fn new(client: Client, base_url: String) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub async fn fetch_quotes(&self, table_path: &str) -> Result<Vec<Quote>, RateError> {
        let url = format!("{}{}", self.base_url, table_path);
        tracing::debug!("Scraping comparison table {}", url);

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(RateError::UpstreamUnavailable(format!(
                "table source returned {} for {}",
                response.status(),
                table_path
            )));
        }

        let html = response.text().await?;
        let quotes = parse_comparison_table(&html);

        tracing::debug!("Scraped {} quotes from {}", quotes.len(), table_path);

        Ok(quotes)
    }
}
