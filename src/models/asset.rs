use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AssetCategory {
    Metal,
    Currency,
}

/// One supported asset and how it is addressed in each upstream source.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct AssetDescriptor {
    pub key: &'static str,
    pub source_code: &'static str,
    pub category: AssetCategory,
    /// Path of the comparison page on the table source, if it covers this asset.
    pub table_path: Option<&'static str>,
    pub chart_id: Option<i64>,
    pub history_id: Option<i64>,
}
