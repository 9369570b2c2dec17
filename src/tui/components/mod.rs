//! Reusable UI components.

pub mod book_table;
pub mod header;
pub mod notification;
pub mod order_panel;
