use lazy_static::lazy_static;
use scraper::{ElementRef, Html, Selector};

use crate::models::quote::Quote;
use crate::services::price_utils::parse_table_price;

lazy_static! {
    static ref TABLE_BODY: Selector = Selector::parse("tbody").unwrap();
}

/// Replace the Turkish uppercase letters İ, Ş, Ü, Ç with I, S, U, C. Nothing else changes.
pub fn normalize_provider_name(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            'İ' => 'I',
            'Ş' => 'S',
            'Ü' => 'U',
            'Ç' => 'C',
            other => other,
        })
        .collect()
}

/// Direct child elements named `tag`; markup nested deeper is not matched.
fn child_elements<'a>(parent: ElementRef<'a>, tag: &'static str) -> impl Iterator<Item = ElementRef<'a>> {
    parent
        .children()
        .filter_map(ElementRef::wrap)
        .filter(move |el| el.value().name() == tag)
}

/// First non-blank line of the cell's text, trimmed.
fn first_line(cell: ElementRef<'_>) -> Option<String> {
    cell.text()
        .flat_map(str::lines)
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(str::to_string)
}

fn parse_row(row: ElementRef<'_>) -> Option<Quote> {
    let cells: Vec<ElementRef<'_>> = child_elements(row, "td").collect();
    if cells.len() < 3 {
        return None;
    }

    let provider = normalize_provider_name(&first_line(cells[0])?);
    let buy_raw = first_line(cells[1]).unwrap_or_default();
    let sell_raw = first_line(cells[2]).unwrap_or_default();

    match (parse_table_price(&buy_raw), parse_table_price(&sell_raw)) {
        (Some(buy), Some(sell)) => Some(Quote { provider, buy, sell }),
        _ => {
            tracing::debug!(
                "Skipping row for {}: unparseable prices buy='{}' sell='{}'",
                provider,
                buy_raw,
                sell_raw
            );
            None
        }
    }
}

/// Extract one quote per row of the first table body, in document order.
///
/// Rows with fewer than three cells or unparseable prices are skipped. A
/// document without a table body yields no quotes.
pub fn parse_comparison_table(html: &str) -> Vec<Quote> {
    let document = Html::parse_document(html);

    let Some(body) = document.select(&TABLE_BODY).next() else {
        tracing::warn!("No table body found in comparison page");
        return Vec::new();
    };

    child_elements(body, "tr").filter_map(parse_row).collect()
}
