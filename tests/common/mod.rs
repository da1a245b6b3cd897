#![allow(dead_code)]

use axum::{
    extract::{Path, Query},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use rates_backend::{
    config::AppConfig,
    services::tick_date::{ticks_to_date, TICKS_PER_DAY},
    AppState,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpListener;

pub const GRAM_ALTIN_PAGE: &str = r#"
<html><body>
<table>
  <thead><tr><th>Kurum</th><th>Alış</th><th>Satış</th></tr></thead>
  <tbody>
    <tr><td>İŞ BANKASI<br><small>10:32</small></td><td>2.440,10</td><td>2.470,90</td></tr>
    <tr><td>HALKBANK</td><td>-</td><td>-</td></tr>
    <tr><td>KAPALIÇARŞI</td><td>2.448,00 TL</td><td>2.452,00 TL</td></tr>
  </tbody>
</table>
</body></html>
"#;

pub const SIMPLE_PAGE: &str = r#"
<table><tbody><tr><td>ZİRAAT BANKASI</td><td>10,00</td><td>11,00</td></tr></tbody></table>
"#;

/// Per-request timeout used by test states; the slow table page exceeds it.
pub const TEST_TIMEOUT: Duration = Duration::from_millis(500);

pub fn feed_payload() -> Value {
    json!([
        {"code": "GA", "buyPrice": "2.450,50", "sellPrice": "2.460,75"},
        {"code": "USD", "buyPrice": "34,10", "sellPrice": "34,20"},
        {"code": "EUR", "buyPrice": "37,05", "sellPrice": "37,15"},
        {"code": "GBP", "buyPrice": "43,10", "sellPrice": "43,30"},
        {"code": "ONS", "buyPrice": "2650.12", "sellPrice": "2651.40"},
        {"code": "AG1000", "buyPrice": "73.000", "sellPrice": "73.500"},
        {"code": "XYZ", "buyPrice": "1", "sellPrice": "2"},
        {"code": "C", "buyPrice": "bozuk", "sellPrice": "4.100"}
    ])
}

/// Serves one record per day of the requested tick window, then one record
/// with a malformed timestamp.
async fn history(Query(params): Query<HashMap<String, String>>) -> Response {
    let parsed = (
        params.get("itemId").and_then(|v| v.parse::<i64>().ok()),
        params.get("startDate").and_then(|v| v.parse::<i64>().ok()),
        params.get("endDate").and_then(|v| v.parse::<i64>().ok()),
    );
    let (Some(item), Some(start), Some(end)) = parsed else {
        return (StatusCode::BAD_REQUEST, "missing parameters").into_response();
    };

    let (buy, sell) = match item {
        32 => ("2.450,50", "2.460,75"),
        40 => ("73.000", "73.500"),
        1 => return Json(json!([])).into_response(),
        _ => return StatusCode::NOT_FOUND.into_response(),
    };

    let mut records = Vec::new();
    let mut tick = start;
    while tick < end {
        if let Some(day) = ticks_to_date(tick) {
            records.push(json!({
                "date": day.format("%d.%m.%Y 00:00:00").to_string(),
                "buyPrice": buy,
                "sellPrice": sell,
            }));
        }
        tick += TICKS_PER_DAY;
    }
    records.push(json!({"date": "2024-03-16T00:00:00", "buyPrice": buy, "sellPrice": sell}));

    Json(Value::Array(records)).into_response()
}

/// Start a stub of both upstreams on an ephemeral port.
///
/// `/doviz/usd` never answers in time, `/doviz/eur` fails, `/doviz/gbp` has
/// no table. Without `feed_available` the feed route is missing (404).
pub async fn spawn_upstream(feed_available: bool) -> SocketAddr {
    let mut router = Router::new()
        .route("/altin/gram-altin", get(|| async { Html(GRAM_ALTIN_PAGE) }))
        .route("/altin/ceyrek-altin", get(|| async { Html(SIMPLE_PAGE) }))
        .route("/altin/yarim-altin", get(|| async { Html(SIMPLE_PAGE) }))
        .route("/altin/tam-altin", get(|| async { Html(SIMPLE_PAGE) }))
        .route("/altin/gumus", get(|| async { Html(SIMPLE_PAGE) }))
        .route(
            "/doviz/usd",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(3)).await;
                Html(SIMPLE_PAGE)
            }),
        )
        .route(
            "/doviz/eur",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded") }),
        )
        .route(
            "/doviz/gbp",
            get(|| async { Html("<html><body><p>bakım çalışması</p></body></html>") }),
        )
        .route("/history", get(history))
        .route(
            "/chart/{id}",
            get(|Path(id): Path<i64>| async move {
                Json(json!({"id": id, "series": [[1710460800000i64, 2450.5]]}))
            }),
        );

    if feed_available {
        router = router.route("/feed", get(|| async { Json(feed_payload()) }));
    }

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind stub upstream");
    let addr = listener.local_addr().expect("stub upstream has no address");

    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("stub upstream crashed");
    });

    addr
}

pub fn test_config(upstream: SocketAddr) -> AppConfig {
    AppConfig {
        table_source_base_url: format!("http://{}", upstream),
        feed_url: format!("http://{}/feed", upstream),
        history_url: format!("http://{}/history", upstream),
        chart_url: format!("http://{}/chart", upstream),
        upstream_timeout: TEST_TIMEOUT,
        ..AppConfig::default()
    }
}

/// Router wired to a fresh stub upstream.
pub async fn build_test_router(feed_available: bool) -> Router {
    let upstream = spawn_upstream(feed_available).await;
    let state = AppState::new(&test_config(upstream)).expect("Failed to build test state");
    rates_backend::app(state)
}
