//! Connection pool — capacity-aware placement of subscriptions.
//!
//! The pool owns every connection it opens and an index from channel name
//! to owning connection (used only for unsubscribe routing). Placement
//! rule: explicit connect params (e.g. a listen key) or an empty pool
//! always open a new connection; otherwise the least-loaded connection is
//! reused while it has free registry slots.

use crate::error::WsError;
use crate::ws::{ErrorListener, OnReceive, WsConfig, WsConnection, WsRequest};

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

struct PoolState {
    /// Connections eligible for load-balanced placement.
    shared: Vec<Arc<WsConnection>>,
    /// Connections opened with explicit params (listen-key streams);
    /// owned for teardown but never selected for other subscriptions.
    dedicated: Vec<Arc<WsConnection>>,
    /// Channel → owning connection, for unsubscribe routing.
    channel_index: HashMap<String, Arc<WsConnection>>,
}

/// WebSocket connection pool for the MEXC exchange.
pub struct WsPool {
    config: WsConfig,
    error_listener: Arc<dyn ErrorListener>,
    /// One lock over select-or-create + register, so two callers cannot
    /// race to overfill the same connection.
    state: Mutex<PoolState>,
}

impl WsPool {
    pub fn new(config: WsConfig, error_listener: Arc<dyn ErrorListener>) -> Self {
        Self {
            config,
            error_listener,
            state: Mutex::new(PoolState {
                shared: Vec::new(),
                dedicated: Vec::new(),
                channel_index: HashMap::new(),
            }),
        }
    }

    /// Ensure a connection exists, opening one if needed.
    ///
    /// Non-empty `params` always open a dedicated connection carrying the
    /// params in the URL query.
    pub async fn connect(&self, params: &[(&str, &str)]) -> Result<Arc<WsConnection>, WsError> {
        let mut state = self.state.lock().await;
        self.get_or_create(&mut state, params, false).await
    }

    /// Send a request on the least-loaded connection.
    pub async fn send(&self, request: &WsRequest) -> Result<(), WsError> {
        let conn = {
            let mut state = self.state.lock().await;
            self.get_or_create(&mut state, &[], false).await?
        };
        conn.send(request).await
    }

    /// Subscribe `channel`, placing it on a connection with free capacity
    /// (or a fresh one), and record the placement for unsubscribe routing.
    pub async fn subscribe(
        &self,
        channel: &str,
        params: &[(&str, &str)],
        callback: OnReceive,
    ) -> Result<(), WsError> {
        let mut state = self.state.lock().await;

        let conn = self.get_or_create(&mut state, params, true).await?;
        conn.subscribe(channel, callback).await?;

        state.channel_index.insert(channel.to_string(), conn);
        Ok(())
    }

    /// Unsubscribe `channel`. No-op if the channel was never subscribed.
    pub async fn unsubscribe(&self, channel: &str) -> Result<(), WsError> {
        let mut state = self.state.lock().await;

        let conn = match state.channel_index.remove(channel) {
            Some(conn) => conn,
            None => return Ok(()),
        };

        // The index entry is gone either way; the connection's registry
        // removal is unconditional too, so a failed send only means the
        // unsubscribe frame never reached the venue.
        conn.unsubscribe(channel).await
    }

    /// Disconnect every pooled connection. All connections are attempted;
    /// the first error is reported after the drain completes.
    pub async fn disconnect(&self) -> Result<(), WsError> {
        let mut state = self.state.lock().await;
        let PoolState {
            shared,
            dedicated,
            channel_index,
        } = &mut *state;

        let mut first_error = None;
        for conn in shared.drain(..).chain(dedicated.drain(..)) {
            if let Err(e) = conn.disconnect().await {
                tracing::warn!(id = %conn.id(), error = %e, "disconnect error");
                first_error.get_or_insert(e);
            }
        }
        channel_index.clear();

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Listener shared with every connection this pool opens.
    pub(crate) fn error_listener(&self) -> Arc<dyn ErrorListener> {
        Arc::clone(&self.error_listener)
    }

    /// Number of live connections (shared + dedicated).
    pub async fn connection_count(&self) -> usize {
        let state = self.state.lock().await;
        state.shared.len() + state.dedicated.len()
    }

    /// Registry sizes of the shared connections, largest first.
    pub async fn subscription_counts(&self) -> Vec<usize> {
        let state = self.state.lock().await;
        let mut counts: Vec<usize> = state
            .shared
            .iter()
            .map(|c| c.subscription_count())
            .collect();
        counts.sort_unstable_by(|a, b| b.cmp(a));
        counts
    }

    // ── Placement ────────────────────────────────────────────────────────

    /// Select or create a connection for a send/subscribe request.
    ///
    /// Callers hold the state lock for the whole read-modify-write
    /// sequence. Selection picks the connection with the most free
    /// registry slots ("pop the least-loaded").
    async fn get_or_create(
        &self,
        state: &mut PoolState,
        params: &[(&str, &str)],
        is_subscribe: bool,
    ) -> Result<Arc<WsConnection>, WsError> {
        if !params.is_empty() {
            let conn = self.open_connection(params).await?;
            state.dedicated.push(Arc::clone(&conn));
            return Ok(conn);
        }

        if state.shared.is_empty() {
            let conn = self.open_connection(&[]).await?;
            state.shared.push(Arc::clone(&conn));
            return Ok(conn);
        }

        let least_loaded = state
            .shared
            .iter()
            .max_by_key(|c| c.free_capacity())
            .map(Arc::clone)
            .ok_or_else(|| WsError::NotConnected("empty pool".to_string()))?;

        if !is_subscribe || least_loaded.free_capacity() > 0 {
            return Ok(least_loaded);
        }

        let conn = self.open_connection(&[]).await?;
        state.shared.push(Arc::clone(&conn));
        Ok(conn)
    }

    /// Dial a new connection, with `params` appended to the URL query.
    async fn open_connection(&self, params: &[(&str, &str)]) -> Result<Arc<WsConnection>, WsError> {
        let url = build_url(&self.config.url, params);
        let conn = Arc::new(WsConnection::new(
            url,
            self.config.clone(),
            Arc::clone(&self.error_listener),
        ));
        conn.connect().await?;
        Ok(conn)
    }
}

fn build_url(base: &str, params: &[(&str, &str)]) -> String {
    if params.is_empty() {
        return base.to_string();
    }
    let query = params
        .iter()
        .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&");
    format!("{base}?{query}")
}
