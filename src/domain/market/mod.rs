//! Market domain — connectivity, exchange metadata, order book, fees.

pub mod client;
pub mod wire;

pub use client::Markets;
pub use wire::{
    ExchangeInfo, OrderBookResponse, Symbol, TimeResponse, TradeFeeData, TradeFeeResponse,
};

/// Depth returned when the caller passes a non-positive or oversized limit.
pub const DEFAULT_ORDER_BOOK_DEPTH: i32 = 100;
/// Largest depth the venue will serve.
pub const MAX_ORDER_BOOK_DEPTH: i32 = 5000;
