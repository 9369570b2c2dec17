//! Raw depth snapshots and the display-ready view model built from them.
//!
//! [`build_view_model`] is a pure function: every refresh is a full
//! rebuild from a fresh snapshot, with no state carried between calls.

use std::cmp::Ordering;

use serde::Deserialize;

/// A single `[price, quantity]` level as served on the wire, both fields
/// decimal text.
pub type RawLevel = (String, String);

/// Raw snapshot as served by `GET /orderbook/{asset}`. Levels arrive in
/// no particular order.
#[derive(Debug, Clone, Deserialize)]
pub struct RawOrderbook {
    #[serde(rename = "lastUpdatedId")]
    pub last_updated_id: u64,
    pub bids: Vec<RawLevel>,
    pub asks: Vec<RawLevel>,
}

/// One display row of a side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrderbookRow {
    pub price: f64,
    pub quantity: f64,
    /// `price * quantity`, fixed at construction.
    pub total: f64,
}

/// One side of the book, rows sorted ascending by price.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderbookSide {
    pub rows: Vec<OrderbookRow>,
    /// Price of `rows[0]` after sorting, absent when the side is empty.
    pub best_price: Option<f64>,
}

/// Sorted, typed, best-price-annotated book ready for display.
///
/// Both sides are ascending by price; the display layer chooses the
/// best-to-worst reading order per side.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderbookViewModel {
    pub last_updated_id: u64,
    pub bids: OrderbookSide,
    pub asks: OrderbookSide,
}

/// Builds the display view model from a raw snapshot.
///
/// Malformed decimal text yields a NaN-bearing row rather than aborting
/// the side; rendering treats NaN as a formatting edge case.
pub fn build_view_model(raw: &RawOrderbook) -> OrderbookViewModel {
    OrderbookViewModel {
        last_updated_id: raw.last_updated_id,
        bids: build_side(&raw.bids),
        asks: build_side(&raw.asks),
    }
}

fn build_side(levels: &[RawLevel]) -> OrderbookSide {
    let mut rows: Vec<OrderbookRow> = levels
        .iter()
        .map(|(price_text, qty_text)| {
            let price = parse_decimal_text(price_text);
            let quantity = parse_decimal_text(qty_text);
            OrderbookRow {
                price,
                quantity,
                total: price * quantity,
            }
        })
        .collect();

    // Stable sort: equal prices (and NaN rows, which compare as equal)
    // keep their arrival order.
    rows.sort_by(|a, b| a.price.partial_cmp(&b.price).unwrap_or(Ordering::Equal));

    let best_price = rows.first().map(|row| row.price);
    OrderbookSide { rows, best_price }
}

/// Parses wire decimal text; malformed input maps to NaN.
fn parse_decimal_text(text: &str) -> f64 {
    text.trim().parse().unwrap_or(f64::NAN)
}
