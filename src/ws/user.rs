//! User data stream — private order updates over a listen-key connection.

use crate::domain::stream::ListenKeys;
use crate::error::WsError;
use crate::ws::{OnReceive, WsPool};

use rust_decimal::Decimal;
use serde::Deserialize;
use std::sync::{Arc, Mutex};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Private order-update channel.
pub const SPOT_ORDERS_CHANNEL: &str = "spot@private.orders.v3.api";

// ─── Wire types ──────────────────────────────────────────────────────────────

/// Order side as pushed on the private stream (numeric, unlike REST).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "i32")]
pub enum Side {
    Buy = 1,
    Sell = 2,
}

impl TryFrom<i32> for Side {
    type Error = String;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Side::Buy),
            2 => Ok(Side::Sell),
            other => Err(format!("unknown order side {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "i32")]
pub enum OrderType {
    LimitOrder = 1,
    PostOnly = 2,
    ImmediateOrCancel = 3,
    FillOrKill = 4,
    MarketOrder = 5,
    StopLimit = 100,
}

impl TryFrom<i32> for OrderType {
    type Error = String;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(OrderType::LimitOrder),
            2 => Ok(OrderType::PostOnly),
            3 => Ok(OrderType::ImmediateOrCancel),
            4 => Ok(OrderType::FillOrKill),
            5 => Ok(OrderType::MarketOrder),
            100 => Ok(OrderType::StopLimit),
            other => Err(format!("unknown order type {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "i32")]
pub enum OrderStatus {
    New = 1,
    Filled = 2,
    PartiallyFilled = 3,
    Cancelled = 4,
    PartiallyCancelled = 5,
}

impl TryFrom<i32> for OrderStatus {
    type Error = String;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(OrderStatus::New),
            2 => Ok(OrderStatus::Filled),
            3 => Ok(OrderStatus::PartiallyFilled),
            4 => Ok(OrderStatus::Cancelled),
            5 => Ok(OrderStatus::PartiallyCancelled),
            other => Err(format!("unknown order status {other}")),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct OrderEventData {
    #[serde(rename = "A")]
    pub remain_amount: Decimal,
    #[serde(rename = "O")]
    pub create_time: i64,
    #[serde(rename = "S")]
    pub side: Side,
    #[serde(rename = "V")]
    pub remain_quantity: Decimal,
    #[serde(rename = "a")]
    pub amount: Decimal,
    #[serde(rename = "c", default)]
    pub client_order_id: String,
    #[serde(rename = "i")]
    pub order_id: String,
    #[serde(rename = "m")]
    pub is_maker: u8,
    #[serde(rename = "o")]
    pub order_type: OrderType,
    #[serde(rename = "p")]
    pub price: Decimal,
    #[serde(rename = "s")]
    pub status: OrderStatus,
    #[serde(rename = "v")]
    pub quantity: Decimal,
    #[serde(rename = "ap", default)]
    pub avg_price: Decimal,
    #[serde(rename = "cv", default)]
    pub cumulative_quantity: Decimal,
    #[serde(rename = "ca", default)]
    pub cumulative_amount: Decimal,
}

/// An order-update push on [`SPOT_ORDERS_CHANNEL`].
#[derive(Debug, Clone, Deserialize)]
pub struct OrderEvent {
    #[serde(rename = "c")]
    pub channel: String,
    #[serde(rename = "d")]
    pub data: OrderEventData,
    #[serde(rename = "s")]
    pub symbol: String,
    #[serde(rename = "t")]
    pub timestamp: i64,
}

// ─── Service ─────────────────────────────────────────────────────────────────

struct KeepAlive {
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

/// Typed private-stream service over the connection pool.
///
/// Order subscriptions ride a dedicated connection keyed by a listen key;
/// the service owns the background task that keeps the key alive.
pub struct UserStream {
    pool: Arc<WsPool>,
    listen_keys: ListenKeys,
    keepalive: Mutex<Option<KeepAlive>>,
}

impl UserStream {
    pub fn new(pool: Arc<WsPool>, listen_keys: ListenKeys) -> Self {
        Self {
            pool,
            listen_keys,
            keepalive: Mutex::new(None),
        }
    }

    /// Subscribe to private order updates.
    ///
    /// Creates a listen key, opens a dedicated connection authenticated by
    /// it, and spawns a keep-alive refresher. A keep-alive failure is
    /// surfaced through the pool's error listener as connection-fatal.
    pub async fn orders_subscribe(
        &self,
        callback: impl Fn(OrderEvent) + Send + Sync + 'static,
    ) -> Result<(), WsError> {
        let key = self
            .listen_keys
            .create()
            .await
            .map_err(|e| WsError::ListenKey(e.to_string()))?;

        let cancel = CancellationToken::new();
        let handle = {
            let keys = self.listen_keys.clone();
            let key = key.clone();
            let token = cancel.clone();
            let error_listener = self.pool.error_listener();
            tokio::spawn(async move {
                if let Err(e) = keys.run_keep_alive(&key, token).await {
                    error_listener.on_error(true, WsError::ListenKey(e.to_string()));
                }
            })
        };

        let cb = Arc::new(callback);
        let error_listener = self.pool.error_listener();
        let listener: OnReceive = Arc::new(move |raw| {
            match serde_json::from_str::<OrderEvent>(raw) {
                Ok(event) => cb(event),
                Err(e) => error_listener.on_error(false, WsError::Decode(e.to_string())),
            }
        });

        let result = self
            .pool
            .subscribe(SPOT_ORDERS_CHANNEL, &[("listenKey", &key)], listener)
            .await;

        if result.is_err() {
            cancel.cancel();
            handle.abort();
            return result;
        }

        // Tear down any refresher left over from an earlier subscribe.
        let previous = self
            .keepalive
            .lock()
            .expect("keepalive lock poisoned")
            .replace(KeepAlive { cancel, handle });
        if let Some(old) = previous {
            old.cancel.cancel();
            old.handle.abort();
        }
        Ok(())
    }

    /// Unsubscribe from order updates and stop the keep-alive refresher.
    pub async fn orders_unsubscribe(&self) -> Result<(), WsError> {
        if let Some(keepalive) = self
            .keepalive
            .lock()
            .expect("keepalive lock poisoned")
            .take()
        {
            keepalive.cancel.cancel();
            keepalive.handle.abort();
        }
        self.pool.unsubscribe(SPOT_ORDERS_CHANNEL).await
    }
}
