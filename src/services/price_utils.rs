//! Price string parsing for both upstream sources, plus unit rescaling.
//!
//! The two sources format numbers differently, so there are two parsers:
//! [`parse_table_price`] for the scraped comparison tables and
//! [`parse_feed_price`] for the JSON feed. Both share the same stripping and
//! separator classification and return `None` instead of failing, so callers
//! can drop the offending row and keep going.

use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::str::FromStr;

lazy_static! {
    static ref PLAIN_DECIMAL: Regex = Regex::new(r"^[+-]?\d+(\.\d+)?$").unwrap();
}

const CURRENCY_MARKERS: &[&str] = &["TL", "₺", "$", "€"];

/// Feed codes quoted per kilogram that must be rescaled to per gram.
pub const PER_KILOGRAM_CODES: &[&str] = &["AG1000"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Separators {
    None,
    CommaOnly,
    DotOnly,
    Both,
}

/// Remove currency markers and whitespace, and report which separators remain.
fn strip_and_classify(raw: &str) -> (String, Separators) {
    let mut cleaned = raw.to_string();
    for marker in CURRENCY_MARKERS {
        cleaned = cleaned.replace(marker, "");
    }
    let cleaned: String = cleaned.chars().filter(|c| !c.is_whitespace()).collect();

    let separators = match (cleaned.contains(','), cleaned.contains('.')) {
        (true, true) => Separators::Both,
        (true, false) => Separators::CommaOnly,
        (false, true) => Separators::DotOnly,
        (false, false) => Separators::None,
    };

    (cleaned, separators)
}

/// Whichever separator appears last is the decimal point; the other one groups.
fn resolve_mixed_separators(s: &str) -> String {
    let last_comma = s.rfind(',');
    let last_dot = s.rfind('.');

    if last_comma > last_dot {
        s.replace('.', "").replace(',', ".")
    } else {
        s.replace(',', "")
    }
}

fn to_decimal(s: &str) -> Option<Decimal> {
    if !PLAIN_DECIMAL.is_match(s) {
        return None;
    }
    Decimal::from_str(s).ok()
}

/// Parse a price cell from the comparison table.
///
/// A lone comma is always the decimal separator; a lone dot is taken literally.
pub fn parse_table_price(raw: &str) -> Option<Decimal> {
    let (cleaned, separators) = strip_and_classify(raw);

    let normalized = match separators {
        Separators::Both => resolve_mixed_separators(&cleaned),
        Separators::CommaOnly => cleaned.replace(',', "."),
        Separators::DotOnly | Separators::None => cleaned,
    };

    to_decimal(&normalized)
}

/// Parse a price string from the JSON feed.
///
/// Same rules as [`parse_table_price`], except that a lone dot followed by a
/// three-digit final group is read as thousands grouping: `"7.300"` is 7300.
/// Known limitation: real decimals with three fractional digits are misread
/// (`"43.500"` becomes 43500).
pub fn parse_feed_price(raw: &str) -> Option<Decimal> {
    let (cleaned, separators) = strip_and_classify(raw);

    let normalized = match separators {
        Separators::Both => resolve_mixed_separators(&cleaned),
        Separators::CommaOnly => cleaned.replace(',', "."),
        Separators::DotOnly if is_thousands_grouped(&cleaned) => cleaned.replace('.', ""),
        Separators::DotOnly | Separators::None => cleaned,
    };

    to_decimal(&normalized)
}

fn is_thousands_grouped(s: &str) -> bool {
    let segments: Vec<&str> = s.split('.').collect();
    match segments.last() {
        Some(last) if segments.len() > 1 => {
            last.len() == 3 && last.chars().all(|c| c.is_ascii_digit())
        }
        _ => false,
    }
}

pub fn requires_gram_rescale(code: &str) -> bool {
    PER_KILOGRAM_CODES.contains(&code)
}

/// Rescale per-kilogram codes to per-gram prices; other codes pass through.
pub fn normalize_unit(code: &str, buy: Decimal, sell: Decimal) -> (Decimal, Decimal) {
    if requires_gram_rescale(code) {
        (buy / dec!(1000), sell / dec!(1000))
    } else {
        (buy, sell)
    }
}
