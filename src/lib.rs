// src/lib.rs

use axum::{routing::get, Router};
use reqwest::Client;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use config::AppConfig;
use scrapers::comparison_table::ComparisonTableScraper;
use services::{canlidoviz::CanliDovizService, rates::RateService};

#[derive(Clone)]
pub struct AppState {
    pub rates: RateService,
}

impl AppState {
    /// Build both upstream clients over one HTTP client carrying the configured timeout.
    pub fn new(config: &AppConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(config.upstream_timeout)
            .user_agent(config.user_agent.clone())
            .gzip(true)
            .deflate(true)
            .brotli(true)
            .build()?;

        let table = ComparisonTableScraper::new(client.clone(), config.table_source_base_url.clone());
        let feed = CanliDovizService::new(
            client,
            config.feed_url.clone(),
            config.history_url.clone(),
            config.chart_url.clone(),
        );

        Ok(Self {
            rates: RateService::new(table, feed),
        })
    }
}

pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(hello_rates))
        .route("/api/assets", get(handlers::rates::list_assets))
        .route("/api/rates", get(handlers::rates::get_all_rates))
        .route("/api/rates/{asset}", get(handlers::rates::get_rate))
        .route("/api/history/{asset}", get(handlers::historical::get_history_point))
        .route("/api/history/{asset}/range", get(handlers::historical::get_history_range))
        .route("/api/chart/{asset}", get(handlers::chart::get_chart))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn hello_rates() -> &'static str {
    "Hello from the rates backend!"
}

pub mod config;
pub mod error;

pub mod models {
    pub mod asset;
    pub mod historical;
    pub mod quote;
}

pub mod services {
    pub mod asset_registry;
    pub mod canlidoviz;
    pub mod merge;
    pub mod price_utils;
    pub mod rates;
    pub mod tick_date;
}

pub mod scrapers;

pub mod handlers {
    pub mod chart;
    pub mod historical;
    pub mod rates;
}
