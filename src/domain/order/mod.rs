//! Order domain — placement, queries, account trade history.

pub mod client;
pub mod wire;

use serde::{Deserialize, Serialize};
use std::fmt;

pub use client::Orders;
pub use wire::{
    CreateOrderRequest, CreateOrderResponse, GetAccountTradeListRequest,
    GetAccountTradeListResponse, GetOrderRequest, GetOrderResponse,
};

// ─── Side ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Side {
    Buy,
    Sell,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Buy => write!(f, "BUY"),
            Side::Sell => write!(f, "SELL"),
        }
    }
}

// ─── OrderType ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderType {
    Limit,
    Market,
    LimitMarket,
    ImmediateOrCancel,
    FillOrKill,
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderType::Limit => write!(f, "LIMIT"),
            OrderType::Market => write!(f, "MARKET"),
            OrderType::LimitMarket => write!(f, "LIMIT_MARKET"),
            OrderType::ImmediateOrCancel => write!(f, "IMMEDIATE_OR_CANCEL"),
            OrderType::FillOrKill => write!(f, "FILL_OR_KILL"),
        }
    }
}

// ─── OrderStatus ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    New,
    Filled,
    PartiallyFilled,
    Cancelled,
    PartiallyCancelled,
}
