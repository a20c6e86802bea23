//! User data stream lifecycle — listen-key creation and keep-alive.

use crate::error::HttpError;
use crate::http::{MexcHttp, RetryPolicy, Security};
use crate::network::ENDPOINT_STREAM;

use serde::Deserialize;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// The venue expires idle listen keys after 60 minutes; refreshing at
/// half that keeps the key alive with margin.
pub const LISTEN_KEY_KEEPALIVE_INTERVAL: Duration = Duration::from_secs(30 * 60);

#[derive(Debug, Deserialize)]
struct ListenKeyResponse {
    #[serde(rename = "listenKey")]
    listen_key: String,
}

/// Listen-key service. Owns its HTTP handle so it can be moved into
/// long-lived keep-alive tasks.
#[derive(Clone)]
pub struct ListenKeys {
    http: MexcHttp,
}

impl ListenKeys {
    pub fn new(http: MexcHttp) -> Self {
        Self { http }
    }

    /// Create a fresh listen key for a user data stream.
    pub async fn create(&self) -> Result<String, HttpError> {
        let resp: ListenKeyResponse = self
            .http
            .post(ENDPOINT_STREAM, &[], Security::Signed, RetryPolicy::None)
            .await?;
        Ok(resp.listen_key)
    }

    /// Extend the validity of an existing listen key.
    pub async fn keep_alive(&self, key: &str) -> Result<(), HttpError> {
        let _: serde_json::Value = self
            .http
            .put(
                ENDPOINT_STREAM,
                &[("listenKey", key.to_string())],
                Security::Signed,
                RetryPolicy::Idempotent,
            )
            .await?;
        Ok(())
    }

    /// Refresh `key` on a fixed cadence until cancelled.
    ///
    /// Returns `Ok(())` on cancellation and the keep-alive error if a
    /// refresh fails; the key should be treated as lost at that point.
    pub async fn run_keep_alive(
        &self,
        key: &str,
        cancel: CancellationToken,
    ) -> Result<(), HttpError> {
        loop {
            tokio::select! {
                _ = cancel.cancelled() => return Ok(()),
                _ = tokio::time::sleep(LISTEN_KEY_KEEPALIVE_INTERVAL) => {
                    self.keep_alive(key).await?;
                    tracing::debug!("listen key refreshed");
                }
            }
        }
    }
}
