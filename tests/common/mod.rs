//! In-process WebSocket server used by the pool integration tests.
//!
//! Speaks just enough of the venue protocol: records every text frame it
//! receives, answers `{"method":"PING"}` with a literal `PONG` text
//! frame, and can push scripted frames, close cleanly, or drop the TCP
//! stream without a closing handshake.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::broadcast;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::WebSocketStream;

#[derive(Clone)]
enum Command {
    Send(String),
    Close,
    Abort,
}

struct ServerState {
    received: Mutex<Vec<String>>,
    accepted: AtomicUsize,
    commands: broadcast::Sender<Command>,
}

pub struct MockServer {
    addr: SocketAddr,
    state: Arc<ServerState>,
}

impl MockServer {
    pub async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (commands, _) = broadcast::channel(64);
        let state = Arc::new(ServerState {
            received: Mutex::new(Vec::new()),
            accepted: AtomicUsize::new(0),
            commands,
        });

        let accept_state = Arc::clone(&state);
        tokio::spawn(async move {
            loop {
                let Ok((stream, _)) = listener.accept().await else {
                    return;
                };
                accept_state.accepted.fetch_add(1, Ordering::SeqCst);
                let conn_state = Arc::clone(&accept_state);
                tokio::spawn(async move {
                    if let Ok(ws) = tokio_tungstenite::accept_async(stream).await {
                        let rx = conn_state.commands.subscribe();
                        serve_connection(ws, conn_state, rx).await;
                    }
                });
            }
        });

        Self { addr, state }
    }

    /// Connect URL, with an explicit path so query parameters appended by
    /// the pool still form a valid request target.
    pub fn url(&self) -> String {
        format!("ws://{}/", self.addr)
    }

    /// All text frames received so far, in arrival order per connection.
    pub fn received(&self) -> Vec<String> {
        self.state.received.lock().unwrap().clone()
    }

    /// SUBSCRIPTION frames received that carry `channel` in their params.
    pub fn subscription_frames_for(&self, channel: &str) -> usize {
        self.received()
            .iter()
            .filter(|f| f.contains("SUBSCRIPTION") && !f.contains("UNSUBSCRIPTION") && f.contains(channel))
            .count()
    }

    pub fn connections_accepted(&self) -> usize {
        self.state.accepted.load(Ordering::SeqCst)
    }

    /// Push a text frame to every live connection.
    pub fn push(&self, text: &str) {
        let _ = self.state.commands.send(Command::Send(text.to_string()));
    }

    /// Close every connection with a proper closing handshake.
    pub fn close_all(&self) {
        let _ = self.state.commands.send(Command::Close);
    }

    /// Drop every connection abruptly, no close frame.
    pub fn drop_all(&self) {
        let _ = self.state.commands.send(Command::Abort);
    }
}

async fn serve_connection(
    mut ws: WebSocketStream<TcpStream>,
    state: Arc<ServerState>,
    mut commands: broadcast::Receiver<Command>,
) {
    loop {
        tokio::select! {
            frame = ws.next() => match frame {
                Some(Ok(Message::Text(text))) => {
                    let raw = text.to_string();
                    let is_ping = raw.contains("\"PING\"");
                    state.received.lock().unwrap().push(raw);
                    if is_ping && ws.send(Message::Text("PONG".into())).await.is_err() {
                        return;
                    }
                }
                Some(Ok(Message::Close(_))) | Some(Err(_)) | None => return,
                Some(Ok(_)) => {}
            },
            command = commands.recv() => match command {
                Ok(Command::Send(text)) => {
                    if ws.send(Message::Text(text.into())).await.is_err() {
                        return;
                    }
                }
                Ok(Command::Close) => {
                    let _ = ws.close(None).await;
                    return;
                }
                // Dropping the stream resets the TCP connection without
                // a closing handshake.
                Ok(Command::Abort) | Err(_) => return,
            },
        }
    }
}

/// Poll `condition` until it holds or five seconds elapse.
pub async fn wait_for(description: &str, condition: impl Fn() -> bool) {
    let deadline = tokio::time::Instant::now() + Duration::from_secs(5);
    while !condition() {
        if tokio::time::Instant::now() > deadline {
            panic!("timed out waiting for: {description}");
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}
