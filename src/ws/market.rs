//! Market data streams — public order-book channels.

use crate::error::WsError;
use crate::ws::{OnReceive, WsPool, WsRequest};

use serde::Deserialize;
use std::fmt;
use std::sync::Arc;

/// Partial book depth channel: full top-N snapshot per push.
const PARTIAL_DEPTH_PATTERN: &str = "spot@public.limit.depth.v3.api";
/// Aggregate diff depth channel.
const DIFF_DEPTH_PATTERN: &str = "spot@public.arrg.depth.v3.api";

/// Book depth levels accepted by the venue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookDepth {
    Min,
    Mid,
    Max,
}

impl BookDepth {
    pub fn level(self) -> u8 {
        match self {
            BookDepth::Min => 5,
            BookDepth::Mid => 10,
            BookDepth::Max => 20,
        }
    }
}

impl fmt::Display for BookDepth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.level())
    }
}

fn partial_depth_channel(symbol: &str, depth: BookDepth) -> String {
    format!("{PARTIAL_DEPTH_PATTERN}@{symbol}@{depth}")
}

fn diff_depth_channel(symbol: &str, depth: BookDepth) -> String {
    format!("{DIFF_DEPTH_PATTERN}@{symbol}@{depth}")
}

// ─── Wire types ──────────────────────────────────────────────────────────────

/// One price level of an order-book push.
#[derive(Debug, Clone, Deserialize)]
pub struct PriceLevel {
    #[serde(rename = "p")]
    pub price: String,
    #[serde(rename = "v")]
    pub volume: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OrderBookData {
    #[serde(default)]
    pub bids: Vec<PriceLevel>,
    #[serde(default)]
    pub asks: Vec<PriceLevel>,
    #[serde(rename = "e", default)]
    pub event: String,
    #[serde(rename = "r", default)]
    pub request_id: String,
}

/// A partial-depth order-book push.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderBook {
    #[serde(rename = "c")]
    pub channel: String,
    #[serde(rename = "d")]
    pub data: OrderBookData,
    #[serde(rename = "s")]
    pub symbol: String,
    #[serde(rename = "t")]
    pub timestamp: i64,
}

// ─── Service ─────────────────────────────────────────────────────────────────

/// Typed market-data service over the connection pool.
pub struct MarketStream {
    pool: Arc<WsPool>,
}

impl MarketStream {
    pub fn new(pool: Arc<WsPool>) -> Self {
        Self { pool }
    }

    /// Subscribe to partial book depth for each symbol.
    ///
    /// The callback runs on the owning connection's read worker.
    pub async fn order_book_subscribe(
        &self,
        symbols: &[&str],
        depth: BookDepth,
        callback: impl Fn(OrderBook) + Send + Sync + 'static,
    ) -> Result<(), WsError> {
        let callback = Arc::new(callback);

        for symbol in symbols {
            let cb = Arc::clone(&callback);
            let error_listener = self.pool.error_listener();
            let listener: OnReceive = Arc::new(move |raw| {
                match serde_json::from_str::<OrderBook>(raw) {
                    Ok(book) => cb(book),
                    Err(e) => error_listener.on_error(false, WsError::Decode(e.to_string())),
                }
            });

            let channel = partial_depth_channel(symbol, depth);
            self.pool.subscribe(&channel, &[], listener).await?;
        }
        Ok(())
    }

    pub async fn order_book_unsubscribe(
        &self,
        symbols: &[&str],
        depth: BookDepth,
    ) -> Result<(), WsError> {
        for symbol in symbols {
            self.pool
                .unsubscribe(&partial_depth_channel(symbol, depth))
                .await?;
        }
        Ok(())
    }

    /// Subscribe to the aggregate diff depth channel for each symbol.
    ///
    /// The payload schema is venue-defined; frames are delivered raw.
    pub async fn order_book_diff_subscribe(
        &self,
        symbols: &[&str],
        depth: BookDepth,
        callback: OnReceive,
    ) -> Result<(), WsError> {
        for symbol in symbols {
            let channel = diff_depth_channel(symbol, depth);
            self.pool
                .subscribe(&channel, &[], Arc::clone(&callback))
                .await?;
        }
        Ok(())
    }

    pub async fn order_book_diff_unsubscribe(
        &self,
        symbols: &[&str],
        depth: BookDepth,
    ) -> Result<(), WsError> {
        for symbol in symbols {
            self.pool
                .unsubscribe(&diff_depth_channel(symbol, depth))
                .await?;
        }
        Ok(())
    }

    /// Application-level ping on the least-loaded connection.
    pub async fn ping(&self) -> Result<(), WsError> {
        self.pool.send(&WsRequest::ping()).await
    }
}
