//! Unified SDK error types.

use thiserror::Error;

/// Top-level SDK error.
#[derive(Error, Debug)]
pub enum SdkError {
    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),

    #[error("WebSocket error: {0}")]
    Ws(#[from] WsError),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

/// HTTP-layer errors.
#[derive(Error, Debug)]
pub enum HttpError {
    #[error("Request failed: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Server error {status}: {body}")]
    ServerError { status: u16, body: String },

    #[error("Rate limited (retry after {retry_after_ms:?}ms)")]
    RateLimited { retry_after_ms: Option<u64> },

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Missing API credentials for signed endpoint {0}")]
    MissingCredentials(String),

    #[error("Response parse error: {0}")]
    Parse(String),

    #[error("Max retries exceeded after {attempts} attempts: {last_error}")]
    MaxRetriesExceeded { attempts: u32, last_error: String },
}

/// WebSocket errors.
///
/// Errors from direct calls (`subscribe`, `send`, `connect`) are returned
/// synchronously; errors from the background workers are delivered through
/// the pool's [`ErrorListener`](crate::ws::ErrorListener).
#[derive(Error, Debug)]
pub enum WsError {
    #[error("No available connection id: {0}")]
    NotConnected(String),

    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Send failed: {0}")]
    SendFailed(String),

    #[error("Max subscriptions exceeded ({max} per connection)")]
    MaxSubscriptions { max: usize },

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Unhandled message on channel [{channel}]")]
    UnhandledMessage { channel: String },

    #[error("Ping error: {0}")]
    Ping(String),

    #[error("Connection closed: {0}")]
    Closed(String),

    #[error("Scheduled reconnect error: {0}")]
    ScheduledReconnect(String),

    #[error("Resubscription error for channel [{channel}]: {reason}")]
    Resubscribe { channel: String, reason: String },

    #[error("Listen key error: {0}")]
    ListenKey(String),
}
