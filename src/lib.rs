//! # MEXC SDK
//!
//! A Rust SDK for the MEXC spot exchange: typed REST endpoints and
//! pooled WebSocket streams.
//!
//! ## Architecture
//!
//! The SDK is organized in layers:
//!
//! 1. **Core** — Error types and network constants
//! 2. **HTTP API** — `MexcHttp` with request signing and per-endpoint retry policies
//! 3. **Domain** — Typed REST sub-clients: market, order, account, wallet, stream
//! 4. **WebSocket** — `WsPool` multiplexing channel subscriptions over pooled
//!    connections, with typed market/user stream services on top
//! 5. **High-Level Client** — `MexcClient` with nested sub-clients
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use mexc_sdk::prelude::*;
//! use std::sync::Arc;
//!
//! let client = MexcClient::builder()
//!     .credentials("api_key", "secret_key")
//!     .build();
//!
//! let time = client.markets().time().await?;
//!
//! let pool = client.ws(Arc::new(|closed: bool, err: WsError| {
//!     eprintln!("ws error (closed={closed}): {err}");
//! }));
//! let market = MarketStream::new(pool);
//! market
//!     .order_book_subscribe(&["BTCUSDT"], BookDepth::Min, |book| {
//!         println!("{} bids: {}", book.symbol, book.data.bids.len());
//!     })
//!     .await?;
//! ```

// ── Layer 1: Core ────────────────────────────────────────────────────────────

/// Unified SDK error types.
pub mod error;

/// Network URL and endpoint constants.
pub mod network;

// ── Layer 2: HTTP API ────────────────────────────────────────────────────────

/// HTTP client with HMAC request signing and retry policies.
pub mod http;

// ── Layer 3: Domain ──────────────────────────────────────────────────────────

/// Domain modules (vertical slices): sub-clients and wire types.
pub mod domain;

// ── Layer 4: WebSocket ───────────────────────────────────────────────────────

/// WebSocket connection pool, subscriptions, and stream services.
pub mod ws;

// ── Layer 5: High-Level Client ───────────────────────────────────────────────

/// `MexcClient` — the primary entry point.
pub mod client;

// ── Prelude ──────────────────────────────────────────────────────────────────

pub mod prelude {
    // Errors
    pub use crate::error::{HttpError, SdkError, WsError};

    // Network
    pub use crate::network::{DEFAULT_API_URL, DEFAULT_WS_URL};

    // HTTP client
    pub use crate::http::{RetryConfig, RetryPolicy, Security};

    // Domain types — market
    pub use crate::domain::market::{
        ExchangeInfo, OrderBookResponse, Symbol, TimeResponse, TradeFeeResponse,
    };

    // Domain types — order
    pub use crate::domain::order::{
        CreateOrderRequest, CreateOrderResponse, GetAccountTradeListRequest,
        GetAccountTradeListResponse, GetOrderRequest, GetOrderResponse, OrderStatus, OrderType,
        Side,
    };

    // Domain types — account, wallet, stream
    pub use crate::domain::account::{AccountInformationResponse, Balance};
    pub use crate::domain::stream::ListenKeys;
    pub use crate::domain::wallet::{
        CoinInfoResponse, InternalTransferRequest, TransferRequest, WithdrawRequest,
    };

    // High-level client
    pub use crate::client::{MexcClient, MexcClientBuilder};

    // WebSocket
    pub use crate::ws::market::{BookDepth, MarketStream, OrderBook};
    pub use crate::ws::user::{OrderEvent, UserStream};
    pub use crate::ws::{ErrorListener, OnReceive, WsConfig, WsPool, WsRequest};
}
