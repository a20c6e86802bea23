//! Wire formats for the order endpoints.

use rust_decimal::Decimal;
use serde::Deserialize;

use super::{OrderStatus, OrderType, Side};

// ─── New order ───────────────────────────────────────────────────────────────

/// Parameters for placing a new order. Quantities and prices are passed
/// pre-formatted so the caller controls precision.
#[derive(Debug, Clone)]
pub struct CreateOrderRequest {
    pub symbol: String,
    pub side: Side,
    pub order_type: OrderType,
    pub quantity: Option<String>,
    pub quote_order_qty: Option<String>,
    pub price: Option<String>,
    pub new_client_order_id: Option<String>,
    pub recv_window: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderResponse {
    pub symbol: String,
    pub order_id: String,
    pub order_list_id: i64,
    pub price: Decimal,
    pub orig_qty: Decimal,
    #[serde(rename = "type")]
    pub order_type: OrderType,
    pub side: Side,
    pub transact_time: i64,
}

// ─── Query order ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct GetOrderRequest {
    pub symbol: String,
    pub order_id: Option<String>,
    pub orig_client_order_id: Option<String>,
    pub recv_window: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetOrderResponse {
    pub symbol: String,
    pub order_id: String,
    #[serde(default)]
    pub orig_client_order_id: String,
    #[serde(rename = "clientOrderId", default)]
    pub client_order_id: String,
    pub price: Decimal,
    pub orig_qty: Decimal,
    pub executed_qty: Decimal,
    pub cummulative_quote_qty: Decimal,
    pub status: OrderStatus,
    #[serde(default)]
    pub time_in_force: String,
    #[serde(rename = "type")]
    pub order_type: OrderType,
    pub side: Side,
    pub stop_price: Decimal,
    #[serde(rename = "time")]
    pub create_time: i64,
    pub update_time: i64,
    pub is_working: bool,
    pub orig_quote_order_qty: Decimal,
}

// ─── Account trade list ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct GetAccountTradeListRequest {
    pub symbol: String,
    pub order_id: Option<String>,
    pub start_time: Option<i64>,
    pub end_time: Option<i64>,
    pub limit: Option<i32>,
    pub recv_window: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetAccountTradeListResponse {
    pub symbol: String,
    pub id: String,
    pub order_id: String,
    pub order_list_id: i64,
    pub price: Decimal,
    pub qty: Decimal,
    pub quote_qty: Decimal,
    pub commission: Decimal,
    pub commission_asset: String,
    pub time: i64,
    pub is_buyer: bool,
    pub is_maker: bool,
    pub is_best_match: bool,
    pub is_self_trade: bool,
    pub client_order_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_order_response_decodes() {
        let raw = r#"{
            "symbol": "BTCUSDT",
            "orderId": "C02__443776347957968896",
            "orderListId": -1,
            "price": "40000",
            "origQty": "0.001",
            "type": "LIMIT",
            "side": "BUY",
            "transactTime": 1699999999999
        }"#;
        let resp: CreateOrderResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(resp.side, Side::Buy);
        assert_eq!(resp.orig_qty.to_string(), "0.001");
    }

    #[test]
    fn account_trade_decodes_with_null_client_order_id() {
        let raw = r#"{
            "symbol": "BTCUSDT",
            "id": "bdd1b9a3",
            "orderId": "C02__443",
            "orderListId": -1,
            "price": "40000",
            "qty": "0.001",
            "quoteQty": "40",
            "commission": "0.04",
            "commissionAsset": "USDT",
            "time": 1699999999999,
            "isBuyer": true,
            "isMaker": false,
            "isBestMatch": true,
            "isSelfTrade": false,
            "clientOrderId": null
        }"#;
        let trade: GetAccountTradeListResponse = serde_json::from_str(raw).unwrap();
        assert!(trade.client_order_id.is_none());
        assert!(trade.is_buyer);
    }
}
