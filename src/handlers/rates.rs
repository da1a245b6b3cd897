use axum::{
    extract::{Path, State},
    Json,
};

use crate::{
    error::RateError,
    models::{
        asset::AssetDescriptor,
        quote::{AllRatesResponse, RateResult},
    },
    services::asset_registry,
    AppState,
};

/// Handler for GET /api/assets
pub async fn list_assets() -> Json<Vec<AssetDescriptor>> {
    Json(asset_registry::all().to_vec())
}

/// Handler for GET /api/rates
/// Per-asset failures are reported inside `data`, never as a request error.
pub async fn get_all_rates(State(state): State<AppState>) -> Json<AllRatesResponse> {
    let data = state.rates.get_all_rates().await;

    Json(AllRatesResponse {
        status: "success".to_string(),
        data,
    })
}

/// Handler for GET /api/rates/{asset}
pub async fn get_rate(
    State(state): State<AppState>,
    Path(asset): Path<String>,
) -> Result<Json<RateResult>, RateError> {
    let result = state.rates.get_rate(&asset).await?;

    tracing::info!("Returning {} quotes for {}", result.quotes.len(), result.asset);

    Ok(Json(result))
}
