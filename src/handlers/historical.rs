use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::error::RateError;
use crate::models::historical::{
    HistoricalPoint, HistoricalQuote, HistoryPointQuery, HistoryRangeQuery,
};
use crate::AppState;

/// Handler for GET /api/history/{asset}?date=YYYY-MM-DD
pub async fn get_history_point(
    State(state): State<AppState>,
    Path(asset): Path<String>,
    Query(query): Query<HistoryPointQuery>,
) -> Result<Json<HistoricalQuote>, RateError> {
    let point = state.rates.get_history_point(&asset, &query.date).await?;
    Ok(Json(point))
}

/// Handler for GET /api/history/{asset}/range?start=YYYY-MM-DD&end=YYYY-MM-DD
pub async fn get_history_range(
    State(state): State<AppState>,
    Path(asset): Path<String>,
    Query(query): Query<HistoryRangeQuery>,
) -> Result<Json<Vec<HistoricalPoint>>, RateError> {
    let points = state
        .rates
        .get_history_range(&asset, &query.start, &query.end)
        .await?;
    Ok(Json(points))
}
