//! Trade submission request/response models.

use serde::{Deserialize, Serialize};

use super::{Asset, OrderType, Side};

/// Body for `POST /trade`.
///
/// Numeric fields carry values already rounded to 6 decimals; free-form
/// field text never reaches the wire. `price` is optional on the wire
/// (market orders omit it) but always present for the limit orders this
/// form places.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRequest {
    pub asset: Asset,
    pub side: Side,
    #[serde(rename = "type")]
    pub order_type: OrderType,
    pub quantity: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    pub notional: f64,
}

/// An accepted order: the request echoed back with an id and acceptance
/// time.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TradeResponse {
    pub asset: Asset,
    pub side: Side,
    #[serde(rename = "type")]
    pub order_type: OrderType,
    pub quantity: f64,
    #[serde(default)]
    pub price: Option<f64>,
    pub notional: f64,
    /// Opaque identifier assigned by the collaborator.
    pub id: String,
    /// Acceptance time, epoch milliseconds.
    pub timestamp: u64,
}
