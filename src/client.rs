//! High-level client — `MexcClient` with nested sub-client accessors.
//!
//! Each REST domain has its own sub-client in `domain/<name>`. This
//! module keeps the builder, the shared HTTP handle, and the accessor
//! methods. WebSocket pools are created per error listener with [`MexcClient::ws`].

use crate::domain::account::Accounts;
use crate::domain::market::Markets;
use crate::domain::order::Orders;
use crate::domain::stream::ListenKeys;
use crate::domain::wallet::Wallets;
use crate::http::MexcHttp;
use crate::ws::{ErrorListener, WsConfig, WsPool};

use std::sync::Arc;

/// The primary entry point for the MEXC SDK.
///
/// Provides nested sub-client accessors for each domain:
/// `client.markets()`, `client.orders()`, etc.
#[derive(Clone)]
pub struct MexcClient {
    pub(crate) http: MexcHttp,
    pub(crate) ws_config: WsConfig,
}

impl MexcClient {
    pub fn builder() -> MexcClientBuilder {
        MexcClientBuilder::default()
    }

    // ── Sub-client accessors ─────────────────────────────────────────────

    pub fn markets(&self) -> Markets<'_> {
        Markets { client: self }
    }

    pub fn orders(&self) -> Orders<'_> {
        Orders { client: self }
    }

    pub fn accounts(&self) -> Accounts<'_> {
        Accounts { client: self }
    }

    pub fn wallets(&self) -> Wallets<'_> {
        Wallets { client: self }
    }

    /// Listen-key service for user data streams. Owned (not borrowed) so
    /// it can be moved into background keep-alive tasks.
    pub fn streams(&self) -> ListenKeys {
        ListenKeys::new(self.http.clone())
    }

    /// The WS config connections will be opened with.
    pub fn ws_config(&self) -> &WsConfig {
        &self.ws_config
    }

    /// Create a WS connection pool reporting background errors to
    /// `error_listener`.
    ///
    /// The pool is intentionally not embedded in `MexcClient`: connection
    /// lifetimes are managed at the application layer, and each pool
    /// carries its own error listener.
    pub fn ws(&self, error_listener: Arc<dyn ErrorListener>) -> Arc<WsPool> {
        Arc::new(WsPool::new(self.ws_config.clone(), error_listener))
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// Builder
// ═════════════════════════════════════════════════════════════════════════════

pub struct MexcClientBuilder {
    base_url: String,
    ws_url: String,
    api_key: Option<String>,
    secret_key: Option<String>,
}

impl Default for MexcClientBuilder {
    fn default() -> Self {
        Self {
            base_url: crate::network::DEFAULT_API_URL.to_string(),
            ws_url: crate::network::DEFAULT_WS_URL.to_string(),
            api_key: None,
            secret_key: None,
        }
    }
}

impl MexcClientBuilder {
    pub fn base_url(mut self, url: &str) -> Self {
        self.base_url = url.to_string();
        self
    }

    pub fn ws_url(mut self, url: &str) -> Self {
        self.ws_url = url.to_string();
        self
    }

    /// API credentials for signed endpoints. Public endpoints work
    /// without them.
    pub fn credentials(mut self, api_key: &str, secret_key: &str) -> Self {
        self.api_key = Some(api_key.to_string());
        self.secret_key = Some(secret_key.to_string());
        self
    }

    pub fn build(self) -> MexcClient {
        MexcClient {
            http: MexcHttp::new(&self.base_url, self.api_key, self.secret_key),
            ws_config: WsConfig {
                url: self.ws_url,
                ..WsConfig::default()
            },
        }
    }
}
