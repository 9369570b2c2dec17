//! Shared models for the orderbook and trade collaborator API.
//!
//! Contains the asset/side/order-type enumerations with their wire
//! names, the structured error body, and the per-endpoint models under
//! [`orderbook`] and [`trade`].

pub mod orderbook;
pub mod trade;

use std::fmt;

use serde::{Deserialize, Serialize};

/// Assets with a published depth book.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Asset {
    #[default]
    Btc,
    Eth,
}

impl Asset {
    /// Returns the wire-format asset name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Asset::Btc => "BTC",
            Asset::Eth => "ETH",
        }
    }

    /// Cycles to the next selectable asset.
    pub fn toggle(&mut self) {
        *self = match self {
            Asset::Btc => Asset::Eth,
            Asset::Eth => Asset::Btc,
        };
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Order side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    #[default]
    Buy,
    Sell,
}

impl Side {
    /// Returns the wire-format side name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Buy => "BUY",
            Side::Sell => "SELL",
        }
    }

    /// Flips between buy and sell.
    pub fn toggle(&mut self) {
        *self = match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        };
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Order execution type. The entry form only ever places limit orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderType {
    Limit,
    Market,
}

impl OrderType {
    /// Returns the wire-format type name.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderType::Limit => "LIMIT",
            OrderType::Market => "MARKET",
        }
    }
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured error body returned by the collaborator on a rejection.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    pub error: String,
}
