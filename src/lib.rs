//! Depth-book viewer with reactive limit-order entry.
//!
//! Provides the display pipeline that turns raw bid/ask snapshots into a
//! sorted, best-price-annotated view model, and the order-entry engine
//! that keeps price, quantity, and notional reconciled under user edits,
//! prefill, and auto-submission from the book.

pub mod api;
pub mod config;
pub mod error;
pub mod form;
pub mod models;
pub mod numeric;
pub mod tui;

pub use error::{BookdeskError, Result};
