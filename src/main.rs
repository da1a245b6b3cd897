use rates_backend::{app, config::AppConfig, AppState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,rates_backend=debug,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env()?;
    tracing::info!(
        "Upstreams: table={} feed={} (timeout {:?})",
        config.table_source_base_url,
        config.feed_url,
        config.upstream_timeout
    );

    let state = AppState::new(&config)?;

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;

    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app(state)).await?;

    Ok(())
}
