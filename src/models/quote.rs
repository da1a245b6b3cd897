use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ErrorResponse;

/// A buy/sell pair from one provider. `buy <= sell` is usual but not enforced.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Quote {
    pub provider: String,
    pub buy: Decimal,
    pub sell: Decimal,
}

/// All quotes for one asset: table rows in document order, feed quote last.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RateResult {
    pub asset: String,
    pub quotes: Vec<Quote>,
}

/// Entry of the all-rates map: either the merged result or why it failed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum AssetRates {
    Rates(RateResult),
    Failed(ErrorResponse),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllRatesResponse {
    pub status: String,
    pub data: std::collections::BTreeMap<String, AssetRates>,
}
