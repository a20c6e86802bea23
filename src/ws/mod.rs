//! WebSocket layer — pooled connections, subscriptions, dispatch.
//!
//! The entry point is [`WsPool`], which multiplexes logical channel
//! subscriptions across a bounded set of [`WsConnection`]s (at most
//! [`WsConfig::max_subscriptions`] channels per socket). Each connection
//! runs its own read, keepalive, and scheduled-reconnect workers.
//!
//! [`market::MarketStream`] and [`user::UserStream`] are typed services
//! layered on top of the pool.

pub mod connection;
pub mod market;
pub mod pool;
pub mod registry;
pub mod user;

use crate::error::WsError;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

pub use connection::WsConnection;
pub use pool::WsPool;
pub use registry::Subscriptions;

// ─── Delivery callbacks ──────────────────────────────────────────────────────

/// Per-channel delivery callback.
///
/// Invoked synchronously on the owning connection's read worker with the
/// raw frame payload. Callbacks that do non-trivial work should hand off
/// to their own task/queue instead of blocking the read loop.
pub type OnReceive = Arc<dyn Fn(&str) + Send + Sync>;

/// Listener for errors raised by the background workers.
///
/// `connection_closed` is `true` for transport-fatal errors (peer closed,
/// reconnect failed) and `false` for transient ones (single ping/send/
/// decode failure, unhandled message).
pub trait ErrorListener: Send + Sync {
    fn on_error(&self, connection_closed: bool, error: WsError);
}

impl<F> ErrorListener for F
where
    F: Fn(bool, WsError) + Send + Sync,
{
    fn on_error(&self, connection_closed: bool, error: WsError) {
        self(connection_closed, error)
    }
}

// ─── Outbound messages ───────────────────────────────────────────────────────

/// Request method of the outbound control envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum WsMethod {
    #[serde(rename = "SUBSCRIPTION")]
    Subscription,
    #[serde(rename = "UNSUBSCRIPTION")]
    Unsubscription,
    #[serde(rename = "PING")]
    Ping,
}

/// Outbound control envelope: `{"method": ..., "params": [channel, ...]}`.
#[derive(Debug, Clone, Serialize)]
pub struct WsRequest {
    pub method: WsMethod,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<String>,
}

impl WsRequest {
    pub fn subscribe(channel: &str) -> Self {
        Self {
            method: WsMethod::Subscription,
            params: vec![channel.to_string()],
        }
    }

    pub fn unsubscribe(channel: &str) -> Self {
        Self {
            method: WsMethod::Unsubscription,
            params: vec![channel.to_string()],
        }
    }

    pub fn ping() -> Self {
        Self {
            method: WsMethod::Ping,
            params: Vec::new(),
        }
    }
}

// ─── Inbound envelope ────────────────────────────────────────────────────────

/// Minimal inbound envelope — only the channel tag is needed for routing;
/// the full payload is handed to the channel callback as raw text.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct InboundEnvelope {
    #[serde(rename = "c")]
    pub channel: Option<String>,
}

/// Literal keepalive acknowledgment sent by the venue as plain text.
pub(crate) const PONG_PAYLOAD: &str = "PONG";

// ─── Config ──────────────────────────────────────────────────────────────────

/// Configuration for the WS pool and its connections.
///
/// The defaults are venue constants: MEXC caps each socket at 30
/// subscriptions, expects an application-level PING every 30 seconds, and
/// unilaterally terminates sockets near the 24-hour mark, so connections
/// are proactively rotated after 23 hours.
#[derive(Debug, Clone)]
pub struct WsConfig {
    pub url: String,
    /// Hard cap on registry entries per connection.
    pub max_subscriptions: usize,
    /// Application-level PING cadence.
    pub keepalive_interval: Duration,
    /// Connection age at which a proactive reconnect is scheduled.
    pub reconnect_after: Duration,
    /// Dial timeout for connect and reconnect.
    pub connect_timeout: Duration,
}

impl Default for WsConfig {
    fn default() -> Self {
        Self {
            url: crate::network::DEFAULT_WS_URL.to_string(),
            max_subscriptions: 30,
            keepalive_interval: Duration::from_secs(30),
            reconnect_after: Duration::from_secs(23 * 60 * 60),
            connect_timeout: Duration::from_secs(30),
        }
    }
}
