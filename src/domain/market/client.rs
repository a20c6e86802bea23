//! Market sub-client — public endpoints plus the signed fee query.

use crate::client::MexcClient;
use crate::error::SdkError;
use crate::http::{RetryPolicy, Security};
use crate::network::{
    ENDPOINT_EXCHANGE_INFO, ENDPOINT_ORDER_BOOK, ENDPOINT_PING, ENDPOINT_TIME, ENDPOINT_TRADE_FEE,
};

use super::wire::{ExchangeInfo, OrderBookResponse, TimeResponse, TradeFeeResponse};
use super::{DEFAULT_ORDER_BOOK_DEPTH, MAX_ORDER_BOOK_DEPTH};

pub struct Markets<'a> {
    pub(crate) client: &'a MexcClient,
}

impl<'a> Markets<'a> {
    /// Test connectivity to the REST API.
    pub async fn ping(&self) -> Result<(), SdkError> {
        let _: serde_json::Value = self
            .client
            .http
            .get(ENDPOINT_PING, &[], Security::Public, RetryPolicy::Idempotent)
            .await?;
        Ok(())
    }

    /// Current server time in epoch milliseconds.
    pub async fn time(&self) -> Result<TimeResponse, SdkError> {
        Ok(self
            .client
            .http
            .get(ENDPOINT_TIME, &[], Security::Public, RetryPolicy::Idempotent)
            .await?)
    }

    /// Exchange trading rules and symbol metadata. An empty `symbols`
    /// slice returns every symbol.
    pub async fn exchange_info(&self, symbols: &[&str]) -> Result<ExchangeInfo, SdkError> {
        let mut params: Vec<(&str, String)> = Vec::new();
        if !symbols.is_empty() {
            params.push(("symbols", symbols.join(",")));
        }

        Ok(self
            .client
            .http
            .get(
                ENDPOINT_EXCHANGE_INFO,
                &params,
                Security::Public,
                RetryPolicy::Idempotent,
            )
            .await?)
    }

    /// Depth snapshot for `symbol`. Out-of-range limits fall back to the
    /// venue default of 100.
    pub async fn order_book(
        &self,
        symbol: &str,
        mut limit: i32,
    ) -> Result<OrderBookResponse, SdkError> {
        if limit <= 0 || limit > MAX_ORDER_BOOK_DEPTH {
            limit = DEFAULT_ORDER_BOOK_DEPTH;
        }

        let params = [
            ("symbol", symbol.to_string()),
            ("limit", limit.to_string()),
        ];
        Ok(self
            .client
            .http
            .get(
                ENDPOINT_ORDER_BOOK,
                &params,
                Security::Public,
                RetryPolicy::Idempotent,
            )
            .await?)
    }

    /// Maker/taker commission rates for `symbol`.
    pub async fn trade_fee(&self, symbol: &str) -> Result<TradeFeeResponse, SdkError> {
        let params = [("symbol", symbol.to_string())];
        Ok(self
            .client
            .http
            .get(
                ENDPOINT_TRADE_FEE,
                &params,
                Security::Signed,
                RetryPolicy::Idempotent,
            )
            .await?)
    }
}
