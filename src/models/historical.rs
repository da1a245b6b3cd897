use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One day of a range query. `date` is `YYYY-MM-DD`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HistoricalPoint {
    pub date: String,
    pub buy: Decimal,
    pub sell: Decimal,
}

/// Single-point history answer; `time` is the upstream timestamp as received.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HistoricalQuote {
    pub time: String,
    pub buy: Decimal,
    pub sell: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryPointQuery {
    pub date: String, // YYYY-MM-DD format
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryRangeQuery {
    pub start: String, // YYYY-MM-DD format
    pub end: String,   // YYYY-MM-DD format
}
