//! A single pooled WebSocket connection.
//!
//! Each `WsConnection` owns exactly one socket plus its subscription
//! registry, and runs three workers scoped to a cancellable lifetime:
//!
//! - **read** — receives frames and dispatches them to channel callbacks;
//! - **keepalive** — sends an application-level PING every 30 seconds;
//! - **scheduled reconnect** — proactively redials after 23 hours, before
//!   the venue terminates the socket near the 24-hour mark.
//!
//! A reconnect (scheduled or triggered by a read error) cancels the old
//! lifetime, swaps in a freshly dialed socket under the same connection
//! identity, restarts the workers, and replays one SUBSCRIPTION frame per
//! registered channel.

use crate::error::WsError;
use crate::ws::{
    ErrorListener, InboundEnvelope, OnReceive, Subscriptions, WsConfig, WsRequest, PONG_PAYLOAD,
};

use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use std::sync::Arc;
use tokio::net::TcpStream;
use tokio::sync::Mutex;
use tokio::time::timeout;
use tokio_tungstenite::tungstenite::{Error as TungsteniteError, Message};
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;
type WsSink = SplitSink<WsStream, Message>;
type WsSource = SplitStream<WsStream>;

/// What the read loop should do after handling a frame.
#[derive(PartialEq)]
enum Flow {
    Continue,
    Stop,
}

/// One physical duplex socket plus its subscription state and workers.
pub struct WsConnection {
    id: Uuid,
    url: String,
    config: WsConfig,
    subs: Subscriptions,
    /// Send serialization lock; also records whether a socket is live.
    writer: Mutex<Option<WsSink>>,
    /// Guards subscribe/unsubscribe against a concurrent resubscription
    /// replay. Distinct from the registry's own lock so dispatch never
    /// contends with it.
    sub_lock: Mutex<()>,
    /// Cancels the current read/keepalive/reconnect workers.
    lifetime: std::sync::Mutex<CancellationToken>,
    error_listener: Arc<dyn ErrorListener>,
}

impl WsConnection {
    pub fn new(url: String, config: WsConfig, error_listener: Arc<dyn ErrorListener>) -> Self {
        Self {
            id: Uuid::new_v4(),
            url,
            config,
            subs: Subscriptions::new(),
            writer: Mutex::new(None),
            sub_lock: Mutex::new(()),
            lifetime: std::sync::Mutex::new(CancellationToken::new()),
            error_listener,
        }
    }

    /// Opaque connection id, for logging and correlation.
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn subscription_count(&self) -> usize {
        self.subs.len()
    }

    /// Free registry slots on this connection.
    pub(crate) fn free_capacity(&self) -> usize {
        self.config.max_subscriptions.saturating_sub(self.subs.len())
    }

    pub async fn is_connected(&self) -> bool {
        self.writer.lock().await.is_some()
    }

    // ── Lifecycle ────────────────────────────────────────────────────────

    /// Dial the socket and start the workers. No-op if already connected.
    pub async fn connect(self: &Arc<Self>) -> Result<(), WsError> {
        let mut writer = self.writer.lock().await;
        if writer.is_some() {
            return Ok(());
        }

        let (sink, source) = self.dial().await?;
        *writer = Some(sink);
        drop(writer);

        self.spawn_workers(source);
        tracing::debug!(id = %self.id, url = %self.url, "ws connection established");
        Ok(())
    }

    /// Send a close frame and retire the workers. Terminal.
    pub async fn disconnect(&self) -> Result<(), WsError> {
        self.lifetime
            .lock()
            .expect("lifetime lock poisoned")
            .cancel();

        let mut writer = self.writer.lock().await;
        if let Some(mut sink) = writer.take() {
            match sink.send(Message::Close(None)).await {
                Ok(()) | Err(TungsteniteError::ConnectionClosed | TungsteniteError::AlreadyClosed) => {}
                Err(e) => return Err(WsError::SendFailed(e.to_string())),
            }
            let _ = sink.close().await;
        }
        Ok(())
    }

    // ── Operations ───────────────────────────────────────────────────────

    /// Write one request as a single frame.
    ///
    /// All sends on one connection are totally ordered by the writer lock;
    /// no ordering holds across different connections.
    pub async fn send(&self, request: &WsRequest) -> Result<(), WsError> {
        let mut writer = self.writer.lock().await;
        let sink = writer
            .as_mut()
            .ok_or_else(|| WsError::NotConnected(self.id.to_string()))?;

        let text = serde_json::to_string(request).map_err(|e| WsError::SendFailed(e.to_string()))?;
        sink.send(Message::Text(text.into()))
            .await
            .map_err(|e| WsError::SendFailed(e.to_string()))
    }

    /// Register a callback for `channel` and send the subscribe frame.
    ///
    /// The registry entry is added before the send and rolled back if the
    /// send fails, so a callback can never fire for a subscription whose
    /// request never reached the transport.
    pub async fn subscribe(&self, channel: &str, callback: OnReceive) -> Result<(), WsError> {
        let _guard = self.sub_lock.lock().await;

        if self.subs.len() >= self.config.max_subscriptions {
            return Err(WsError::MaxSubscriptions {
                max: self.config.max_subscriptions,
            });
        }

        self.subs.add(channel, callback);
        if let Err(e) = self.send(&WsRequest::subscribe(channel)).await {
            self.subs.remove(channel);
            return Err(e);
        }
        Ok(())
    }

    /// Drop the registry entry for `channel` and send the unsubscribe frame.
    ///
    /// Removal is unconditional — even if the send fails, the caller no
    /// longer wants callbacks.
    pub async fn unsubscribe(&self, channel: &str) -> Result<(), WsError> {
        let _guard = self.sub_lock.lock().await;

        self.subs.remove(channel);
        self.send(&WsRequest::unsubscribe(channel)).await
    }

    // ── Workers ──────────────────────────────────────────────────────────

    async fn dial(&self) -> Result<(WsSink, WsSource), WsError> {
        let (stream, _) = timeout(self.config.connect_timeout, connect_async(self.url.as_str()))
            .await
            .map_err(|_| WsError::ConnectionFailed(format!("dial timeout for {}", self.url)))?
            .map_err(|e| WsError::ConnectionFailed(e.to_string()))?;
        Ok(stream.split())
    }

    /// Start read/keepalive/scheduled-reconnect workers under a fresh
    /// lifetime, retiring any token stored for a previous socket.
    fn spawn_workers(self: &Arc<Self>, source: WsSource) {
        let token = CancellationToken::new();
        *self.lifetime.lock().expect("lifetime lock poisoned") = token.clone();

        let conn = Arc::clone(self);
        let read_token = token.clone();
        tokio::spawn(async move { conn.read_loop(source, read_token).await });

        let conn = Arc::clone(self);
        let ping_token = token.clone();
        tokio::spawn(async move { conn.keepalive_loop(ping_token).await });

        let conn = Arc::clone(self);
        tokio::spawn(async move { conn.scheduled_reconnect_loop(token).await });
    }

    /// Blocking receive of frames in sequence.
    ///
    /// A clean close from the peer is fatal (assumed intentional, no
    /// auto-reconnect); any other read error triggers a reconnect.
    async fn read_loop(self: Arc<Self>, mut source: WsSource, token: CancellationToken) {
        loop {
            tokio::select! {
                _ = token.cancelled() => return,
                frame = source.next() => match frame {
                    Some(Ok(message)) => {
                        if self.handle_frame(message) == Flow::Stop {
                            return;
                        }
                    }
                    Some(Err(err)) => {
                        self.handle_read_error(err).await;
                        return;
                    }
                    None => {
                        self.error_listener
                            .on_error(true, WsError::Closed("stream ended".to_string()));
                        return;
                    }
                },
            }
        }
    }

    async fn handle_read_error(self: &Arc<Self>, err: TungsteniteError) {
        match err {
            TungsteniteError::ConnectionClosed | TungsteniteError::AlreadyClosed => {
                self.error_listener
                    .on_error(true, WsError::Closed(err.to_string()));
            }
            other => {
                tracing::warn!(id = %self.id, error = %other, "read loop error, reconnecting");
                if let Err(re) = self.reconnect().await {
                    self.error_listener.on_error(true, re);
                }
            }
        }
    }

    /// Decode one inbound frame and route it.
    fn handle_frame(&self, message: Message) -> Flow {
        match message {
            Message::Text(text) => {
                let raw: &str = text.as_ref();
                if raw != PONG_PAYLOAD {
                    self.dispatch(raw);
                }
                Flow::Continue
            }
            Message::Binary(bytes) => {
                match std::str::from_utf8(&bytes) {
                    Ok(raw) => self.dispatch(raw),
                    Err(e) => self
                        .error_listener
                        .on_error(false, WsError::Decode(e.to_string())),
                }
                Flow::Continue
            }
            // Transport-level control frames are swallowed.
            Message::Ping(_) | Message::Pong(_) | Message::Frame(_) => Flow::Continue,
            Message::Close(frame) => {
                let reason = frame
                    .map(|f| f.reason.to_string())
                    .unwrap_or_else(|| "no close frame".to_string());
                self.error_listener
                    .on_error(true, WsError::Closed(format!("received close frame: {reason}")));
                Flow::Stop
            }
        }
    }

    /// Route a data frame to the callback registered for its channel tag.
    /// Unmatched frames are reported, not dropped silently.
    fn dispatch(&self, raw: &str) {
        let envelope: InboundEnvelope = match serde_json::from_str(raw) {
            Ok(env) => env,
            Err(e) => {
                self.error_listener
                    .on_error(false, WsError::Decode(e.to_string()));
                return;
            }
        };

        let channel = envelope.channel.unwrap_or_default();
        match self.subs.get(&channel) {
            Some(callback) => callback(raw),
            None => self
                .error_listener
                .on_error(false, WsError::UnhandledMessage { channel }),
        }
    }

    async fn keepalive_loop(self: Arc<Self>, token: CancellationToken) {
        let mut ticker = tokio::time::interval(self.config.keepalive_interval);
        // the first tick completes immediately
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = token.cancelled() => return,
                _ = ticker.tick() => {
                    if let Err(e) = self.send(&WsRequest::ping()).await {
                        // The read loop, not this one, decides liveness.
                        self.error_listener.on_error(false, WsError::Ping(e.to_string()));
                    }
                }
            }
        }
    }

    async fn scheduled_reconnect_loop(self: Arc<Self>, token: CancellationToken) {
        tokio::select! {
            _ = token.cancelled() => {}
            _ = tokio::time::sleep(self.config.reconnect_after) => {
                tracing::info!(id = %self.id, "running scheduled reconnect");
                if let Err(e) = self.reconnect().await {
                    self.error_listener
                        .on_error(true, WsError::ScheduledReconnect(e.to_string()));
                }
            }
        }
    }

    /// Redial the same URL, swap in the new socket under the same
    /// connection identity, restart the workers, and replay one subscribe
    /// frame per registered channel. The old socket is closed only after
    /// the replacement is live.
    async fn reconnect(self: &Arc<Self>) -> Result<(), WsError> {
        // Retire the old workers so they cannot act on the replaced socket.
        self.lifetime
            .lock()
            .expect("lifetime lock poisoned")
            .cancel();

        let _guard = self.sub_lock.lock().await;

        let (sink, source) = self.dial().await?;
        let old_sink = {
            let mut writer = self.writer.lock().await;
            writer.replace(sink)
        };
        self.spawn_workers(source);

        let mut replay_error = None;
        for channel in self.subs.channels() {
            if let Err(e) = self.send(&WsRequest::subscribe(&channel)).await {
                replay_error = Some(WsError::Resubscribe {
                    channel,
                    reason: e.to_string(),
                });
                break;
            }
        }

        if let Some(mut old) = old_sink {
            let _ = old.send(Message::Close(None)).await;
            let _ = old.close().await;
        }

        match replay_error {
            Some(e) => Err(e),
            None => {
                tracing::info!(id = %self.id, "reconnect successful");
                Ok(())
            }
        }
    }
}
