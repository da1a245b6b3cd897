use anyhow::Context;
use std::env;
use std::net::SocketAddr;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    /// Joined with each asset's table path.
    pub table_source_base_url: String,
    pub feed_url: String,
    pub history_url: String,
    pub chart_url: String,
    /// Applied to every upstream call; nothing is retried.
    pub upstream_timeout: Duration,
    pub user_agent: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            table_source_base_url: "https://www.doviz.com".to_string(),
            feed_url: "https://api.canlidoviz.com/web/items?marketId=1&type=0".to_string(),
            history_url: "https://api.canlidoviz.com/items/history".to_string(),
            chart_url: "https://api.canlidoviz.com/items/chart".to_string(),
            upstream_timeout: Duration::from_secs(10),
            user_agent: "Mozilla/5.0".to_string(),
        }
    }
}

impl AppConfig {
    /// Read overrides from the environment; unset variables keep their defaults.
    pub fn from_env() -> anyhow::Result<Self> {
        let defaults = Self::default();

        let bind_addr = match env::var("BIND_ADDR") {
            Ok(addr) => addr
                .parse()
                .with_context(|| format!("BIND_ADDR '{}' is not a socket address", addr))?,
            Err(_) => defaults.bind_addr,
        };

        let upstream_timeout = match env::var("UPSTREAM_TIMEOUT_SECS") {
            Ok(secs) => Duration::from_secs(
                secs.parse()
                    .context("UPSTREAM_TIMEOUT_SECS must be a number of seconds")?,
            ),
            Err(_) => defaults.upstream_timeout,
        };

        Ok(Self {
            bind_addr,
            table_source_base_url: env::var("TABLE_SOURCE_BASE_URL")
                .unwrap_or(defaults.table_source_base_url),
            feed_url: env::var("FEED_URL").unwrap_or(defaults.feed_url),
            history_url: env::var("HISTORY_URL").unwrap_or(defaults.history_url),
            chart_url: env::var("CHART_URL").unwrap_or(defaults.chart_url),
            upstream_timeout,
            user_agent: env::var("USER_AGENT").unwrap_or(defaults.user_agent),
        })
    }
}
