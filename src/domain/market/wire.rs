//! Wire formats for the market endpoints.

use rust_decimal::Decimal;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct TimeResponse {
    #[serde(rename = "serverTime")]
    pub server_time: i64,
}

// ─── Exchange information ────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct ExchangeInfo {
    pub timezone: String,
    #[serde(rename = "serverTime")]
    pub server_time: i64,
    #[serde(default)]
    pub symbols: Vec<Symbol>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Symbol {
    pub symbol: String,
    pub status: String,
    pub base_asset: String,
    pub base_asset_precision: i32,
    pub quote_asset: String,
    pub quote_precision: i32,
    pub quote_asset_precision: i32,
    pub base_commission_precision: i32,
    pub quote_commission_precision: i32,
    #[serde(default)]
    pub order_types: Vec<String>,
    pub is_spot_trading_allowed: bool,
    pub is_margin_trading_allowed: bool,
    #[serde(default)]
    pub quote_amount_precision: String,
    #[serde(default)]
    pub base_size_precision: String,
    #[serde(default)]
    pub permissions: Vec<String>,
    #[serde(default)]
    pub max_quote_amount: String,
    #[serde(default)]
    pub maker_commission: String,
    #[serde(default)]
    pub taker_commission: String,
    #[serde(default)]
    pub quote_amount_precision_market: String,
    #[serde(default)]
    pub max_quote_amount_market: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub trade_side_type: i32,
}

// ─── Order book ──────────────────────────────────────────────────────────────

/// Depth snapshot; bids/asks are `[price, quantity]` string pairs.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderBookResponse {
    #[serde(rename = "lastUpdateId")]
    pub last_update_id: i64,
    pub bids: Vec<[String; 2]>,
    pub asks: Vec<[String; 2]>,
}

// ─── Trade fee ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct TradeFeeResponse {
    pub data: TradeFeeData,
    pub code: i32,
    #[serde(default)]
    pub message: String,
    pub timestamp: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TradeFeeData {
    #[serde(rename = "taker_commission")]
    pub taker_commission: Decimal,
    #[serde(rename = "maker_commission")]
    pub maker_commission: Decimal,
}
