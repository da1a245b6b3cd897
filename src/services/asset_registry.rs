//! Static table of supported assets, keyed by canonical lowercase key.

use lazy_static::lazy_static;
use std::collections::HashMap;

use crate::models::asset::{AssetCategory, AssetDescriptor};

const fn metal(
    key: &'static str,
    source_code: &'static str,
    table_path: Option<&'static str>,
    chart_id: Option<i64>,
    history_id: Option<i64>,
) -> AssetDescriptor {
    AssetDescriptor {
        key,
        source_code,
        category: AssetCategory::Metal,
        table_path,
        chart_id,
        history_id,
    }
}

const fn currency(
    key: &'static str,
    source_code: &'static str,
    table_path: Option<&'static str>,
    chart_id: Option<i64>,
    history_id: Option<i64>,
) -> AssetDescriptor {
    AssetDescriptor {
        key,
        source_code,
        category: AssetCategory::Currency,
        table_path,
        chart_id,
        history_id,
    }
}

pub static ASSETS: &[AssetDescriptor] = &[
    metal("gram-altin", "GA", Some("/altin/gram-altin"), Some(32), Some(32)),
    metal("ceyrek-altin", "C", Some("/altin/ceyrek-altin"), Some(33), None),
    metal("yarim-altin", "Y", Some("/altin/yarim-altin"), None, None),
    metal("tam-altin", "T", Some("/altin/tam-altin"), None, None),
    metal("ons", "ONS", None, Some(35), Some(35)),
    metal("gumus", "AG1000", Some("/altin/gumus"), Some(40), Some(40)),
    currency("usd", "USD", Some("/doviz/usd"), Some(1), Some(1)),
    currency("eur", "EUR", Some("/doviz/eur"), Some(50), Some(50)),
    currency("gbp", "GBP", Some("/doviz/gbp"), Some(51), Some(51)),
    currency("chf", "CHF", None, None, Some(52)),
];

lazy_static! {
    static ref BY_KEY: HashMap<&'static str, &'static AssetDescriptor> =
        ASSETS.iter().map(|asset| (asset.key, asset)).collect();
}

/// Case-insensitive lookup of a canonical key.
pub fn lookup(key: &str) -> Option<&'static AssetDescriptor> {
    BY_KEY.get(key.trim().to_lowercase().as_str()).copied()
}

pub fn all() -> &'static [AssetDescriptor] {
    ASSETS
}
