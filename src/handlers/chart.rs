use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::Value;

use crate::{error::RateError, AppState};

/// Handler for GET /api/chart/{asset}
pub async fn get_chart(
    State(state): State<AppState>,
    Path(asset): Path<String>,
) -> Result<Json<Value>, RateError> {
    let series = state.rates.get_chart(&asset).await?;
    Ok(Json(series))
}
