//! Orders sub-client — place, query, trade history. All endpoints signed.

use crate::client::MexcClient;
use crate::error::SdkError;
use crate::http::{RetryPolicy, Security};
use crate::network::{ENDPOINT_ACCOUNT_TRADE_LIST, ENDPOINT_ORDER};

use super::wire::{
    CreateOrderRequest, CreateOrderResponse, GetAccountTradeListRequest,
    GetAccountTradeListResponse, GetOrderRequest, GetOrderResponse,
};

pub struct Orders<'a> {
    pub(crate) client: &'a MexcClient,
}

impl<'a> Orders<'a> {
    /// Place a new order. Never retried: order placement is not
    /// idempotent.
    pub async fn create(&self, req: &CreateOrderRequest) -> Result<CreateOrderResponse, SdkError> {
        let mut params: Vec<(&str, String)> = vec![
            ("symbol", req.symbol.clone()),
            ("side", req.side.to_string()),
            ("type", req.order_type.to_string()),
        ];
        if let Some(quantity) = &req.quantity {
            params.push(("quantity", quantity.clone()));
        }
        if let Some(quote_order_qty) = &req.quote_order_qty {
            params.push(("quoteOrderQty", quote_order_qty.clone()));
        }
        if let Some(price) = &req.price {
            params.push(("price", price.clone()));
        }
        if let Some(client_order_id) = &req.new_client_order_id {
            params.push(("newClientOrderId", client_order_id.clone()));
        }
        if let Some(recv_window) = req.recv_window {
            params.push(("recvWindow", recv_window.to_string()));
        }

        Ok(self
            .client
            .http
            .post(ENDPOINT_ORDER, &params, Security::Signed, RetryPolicy::None)
            .await?)
    }

    /// Query an order by venue id or original client id.
    pub async fn query(&self, req: &GetOrderRequest) -> Result<GetOrderResponse, SdkError> {
        let mut params: Vec<(&str, String)> = vec![("symbol", req.symbol.clone())];
        if let Some(order_id) = &req.order_id {
            params.push(("orderId", order_id.clone()));
        }
        if let Some(orig_client_order_id) = &req.orig_client_order_id {
            params.push(("origClientOrderId", orig_client_order_id.clone()));
        }
        if let Some(recv_window) = req.recv_window {
            params.push(("recvWindow", recv_window.to_string()));
        }

        Ok(self
            .client
            .http
            .get(
                ENDPOINT_ORDER,
                &params,
                Security::Signed,
                RetryPolicy::Idempotent,
            )
            .await?)
    }

    /// Trades executed for the account on a symbol.
    pub async fn account_trade_list(
        &self,
        req: &GetAccountTradeListRequest,
    ) -> Result<Vec<GetAccountTradeListResponse>, SdkError> {
        let mut params: Vec<(&str, String)> = vec![("symbol", req.symbol.clone())];
        if let Some(order_id) = &req.order_id {
            params.push(("orderId", order_id.clone()));
        }
        if let Some(start_time) = req.start_time {
            params.push(("startTime", start_time.to_string()));
        }
        if let Some(end_time) = req.end_time {
            params.push(("endTime", end_time.to_string()));
        }
        if let Some(limit) = req.limit {
            params.push(("limit", limit.to_string()));
        }
        if let Some(recv_window) = req.recv_window {
            params.push(("recvWindow", recv_window.to_string()));
        }

        Ok(self
            .client
            .http
            .get(
                ENDPOINT_ACCOUNT_TRADE_LIST,
                &params,
                Security::Signed,
                RetryPolicy::Idempotent,
            )
            .await?)
    }
}
