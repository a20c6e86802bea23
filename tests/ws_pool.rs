//! Integration tests for the WebSocket connection pool.
//!
//! Each test runs an in-process WebSocket server (see `common`) and
//! exercises the pool against it: capacity-based placement, dispatch
//! routing, PONG handling, reconnect replay, and teardown.

mod common;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use common::{wait_for, MockServer};
use mexc_sdk::error::WsError;
use mexc_sdk::ws::{ErrorListener, WsConfig, WsPool, WsRequest};

fn noop_listener() -> Arc<dyn ErrorListener> {
    Arc::new(|_closed: bool, _err: WsError| {})
}

fn pool_for(server: &MockServer) -> WsPool {
    let config = WsConfig {
        url: server.url(),
        ..WsConfig::default()
    };
    WsPool::new(config, noop_listener())
}

#[tokio::test]
async fn thirty_one_subscriptions_span_two_connections() {
    let server = MockServer::start().await;
    let pool = pool_for(&server);

    for i in 0..31 {
        pool.subscribe(&format!("channel-{i}"), &[], Arc::new(|_| {}))
            .await
            .unwrap();
    }

    assert_eq!(pool.connection_count().await, 2);
    assert_eq!(pool.subscription_counts().await, vec![30, 1]);
    assert_eq!(server.connections_accepted(), 2);

    pool.disconnect().await.unwrap();
}

#[tokio::test]
async fn connect_is_idempotent() {
    let server = MockServer::start().await;
    let pool = pool_for(&server);

    pool.connect(&[]).await.unwrap();
    pool.connect(&[]).await.unwrap();

    assert_eq!(pool.connection_count().await, 1);
    pool.disconnect().await.unwrap();
}

#[tokio::test]
async fn pong_reply_is_swallowed() {
    let server = MockServer::start().await;

    let errors = Arc::new(AtomicUsize::new(0));
    let error_count = Arc::clone(&errors);
    let config = WsConfig {
        url: server.url(),
        ..WsConfig::default()
    };
    let pool = WsPool::new(
        config,
        Arc::new(move |_closed: bool, _err: WsError| {
            error_count.fetch_add(1, Ordering::SeqCst);
        }),
    );

    let hits = Arc::new(AtomicUsize::new(0));
    let cb_hits = Arc::clone(&hits);
    pool.subscribe(
        "some-channel",
        &[],
        Arc::new(move |_| {
            cb_hits.fetch_add(1, Ordering::SeqCst);
        }),
    )
    .await
    .unwrap();

    pool.send(&WsRequest::ping()).await.unwrap();
    wait_for("server to receive the ping", || {
        server.received().iter().any(|f| f.contains("\"PING\""))
    })
    .await;

    // Give the PONG reply time to arrive; it must reach neither the
    // channel callback nor the error listener.
    tokio::time::sleep(Duration::from_millis(200)).await;
    assert_eq!(hits.load(Ordering::SeqCst), 0);
    assert_eq!(errors.load(Ordering::SeqCst), 0);

    pool.disconnect().await.unwrap();
}

#[tokio::test]
async fn frames_route_by_channel_tag() {
    let server = MockServer::start().await;
    let pool = pool_for(&server);

    let x_hits = Arc::new(AtomicUsize::new(0));
    let y_hits = Arc::new(AtomicUsize::new(0));

    let x = Arc::clone(&x_hits);
    pool.subscribe("chan-x", &[], Arc::new(move |_| {
        x.fetch_add(1, Ordering::SeqCst);
    }))
    .await
    .unwrap();
    let y = Arc::clone(&y_hits);
    pool.subscribe("chan-y", &[], Arc::new(move |_| {
        y.fetch_add(1, Ordering::SeqCst);
    }))
    .await
    .unwrap();

    server.push(r#"{"c":"chan-x","d":{"k":1},"t":1}"#);

    let x = Arc::clone(&x_hits);
    wait_for("frame delivery to chan-x", move || {
        x.load(Ordering::SeqCst) == 1
    })
    .await;
    assert_eq!(y_hits.load(Ordering::SeqCst), 0);

    pool.disconnect().await.unwrap();
}

#[tokio::test]
async fn unsubscribed_channel_stops_receiving() {
    let server = MockServer::start().await;

    let unhandled = Arc::new(AtomicUsize::new(0));
    let unhandled_count = Arc::clone(&unhandled);
    let config = WsConfig {
        url: server.url(),
        ..WsConfig::default()
    };
    let pool = WsPool::new(
        config,
        Arc::new(move |_closed: bool, err: WsError| {
            if matches!(err, WsError::UnhandledMessage { .. }) {
                unhandled_count.fetch_add(1, Ordering::SeqCst);
            }
        }),
    );

    let hits = Arc::new(AtomicUsize::new(0));
    let cb_hits = Arc::clone(&hits);
    pool.subscribe("chan-x", &[], Arc::new(move |_| {
        cb_hits.fetch_add(1, Ordering::SeqCst);
    }))
    .await
    .unwrap();
    pool.unsubscribe("chan-x").await.unwrap();

    server.push(r#"{"c":"chan-x","d":{},"t":1}"#);

    let unhandled_seen = Arc::clone(&unhandled);
    wait_for("frame reported as unhandled", move || {
        unhandled_seen.load(Ordering::SeqCst) == 1
    })
    .await;
    assert_eq!(hits.load(Ordering::SeqCst), 0, "callback fired after unsubscribe");

    // Unsubscribing again is a no-op.
    pool.unsubscribe("chan-x").await.unwrap();

    pool.disconnect().await.unwrap();
}

#[tokio::test]
async fn reconnect_replays_every_subscription_once() {
    let server = MockServer::start().await;
    let pool = pool_for(&server);

    pool.subscribe("replay-a", &[], Arc::new(|_| {})).await.unwrap();
    pool.subscribe("replay-b", &[], Arc::new(|_| {})).await.unwrap();

    // The subscribe frames are in flight; let the server record them
    // before the drop, so the replay is distinguishable from them.
    wait_for("initial subscriptions to reach the server", || {
        server.subscription_frames_for("replay-a") == 1
            && server.subscription_frames_for("replay-b") == 1
    })
    .await;

    server.drop_all();

    wait_for("both channels to be resubscribed after reconnect", || {
        server.subscription_frames_for("replay-a") == 2
            && server.subscription_frames_for("replay-b") == 2
    })
    .await;

    assert_eq!(server.connections_accepted(), 2);
    assert_eq!(pool.connection_count().await, 1);
    assert_eq!(pool.subscription_counts().await, vec![2]);

    pool.disconnect().await.unwrap();
}

#[tokio::test]
async fn clean_close_is_fatal_without_reconnect() {
    let server = MockServer::start().await;

    let closed_errors = Arc::new(AtomicUsize::new(0));
    let closed_count = Arc::clone(&closed_errors);
    let config = WsConfig {
        url: server.url(),
        ..WsConfig::default()
    };
    let pool = WsPool::new(
        config,
        Arc::new(move |closed: bool, _err: WsError| {
            if closed {
                closed_count.fetch_add(1, Ordering::SeqCst);
            }
        }),
    );

    pool.subscribe("chan", &[], Arc::new(|_| {})).await.unwrap();

    server.close_all();

    let closed_seen = Arc::clone(&closed_errors);
    wait_for("close to be reported as fatal", move || {
        closed_seen.load(Ordering::SeqCst) >= 1
    })
    .await;

    // No redial: the peer's close is intentional.
    tokio::time::sleep(Duration::from_millis(200)).await;
    assert_eq!(server.connections_accepted(), 1);
}

#[tokio::test]
async fn dedicated_connections_are_not_load_balanced() {
    let server = MockServer::start().await;
    let pool = pool_for(&server);

    pool.subscribe(
        "private-channel",
        &[("listenKey", "abc123")],
        Arc::new(|_| {}),
    )
    .await
    .unwrap();

    // The dedicated connection exists but is invisible to shared placement.
    assert_eq!(pool.connection_count().await, 1);
    assert!(pool.subscription_counts().await.is_empty());

    // A plain subscription must open its own shared connection.
    pool.subscribe("public-channel", &[], Arc::new(|_| {}))
        .await
        .unwrap();
    assert_eq!(pool.connection_count().await, 2);
    assert_eq!(pool.subscription_counts().await, vec![1]);

    // The listen key rides the dedicated connection's URL.
    wait_for("dedicated connection to subscribe", || {
        server.subscription_frames_for("private-channel") == 1
    })
    .await;

    pool.disconnect().await.unwrap();
}

#[tokio::test]
async fn disconnect_drains_the_pool() {
    let server = MockServer::start().await;
    let pool = pool_for(&server);

    pool.subscribe("a", &[], Arc::new(|_| {})).await.unwrap();
    pool.subscribe("b", &[("listenKey", "k")], Arc::new(|_| {}))
        .await
        .unwrap();
    assert_eq!(pool.connection_count().await, 2);

    pool.disconnect().await.unwrap();
    assert_eq!(pool.connection_count().await, 0);
}

#[tokio::test]
async fn failed_unsubscribe_still_clears_routing() {
    let server = MockServer::start().await;

    let closed_errors = Arc::new(AtomicUsize::new(0));
    let closed_count = Arc::clone(&closed_errors);
    let config = WsConfig {
        url: server.url(),
        ..WsConfig::default()
    };
    let pool = WsPool::new(
        config,
        Arc::new(move |closed: bool, _err: WsError| {
            if closed {
                closed_count.fetch_add(1, Ordering::SeqCst);
            }
        }),
    );

    pool.subscribe("chan", &[], Arc::new(|_| {})).await.unwrap();

    // Kill the socket under the subscription; sends now fail.
    server.close_all();
    let closed_seen = Arc::clone(&closed_errors);
    wait_for("the peer close to be observed", move || {
        closed_seen.load(Ordering::SeqCst) >= 1
    })
    .await;

    // The failed unsubscribe surfaces its send error but must still
    // drop the channel from the routing index, so a retry is a no-op.
    assert!(pool.unsubscribe("chan").await.is_err());
    assert!(pool.unsubscribe("chan").await.is_ok());
}

#[tokio::test]
async fn undecodable_order_book_frame_reaches_the_error_listener() {
    use mexc_sdk::ws::market::{BookDepth, MarketStream};

    let server = MockServer::start().await;

    let decode_errors = Arc::new(AtomicUsize::new(0));
    let decode_count = Arc::clone(&decode_errors);
    let config = WsConfig {
        url: server.url(),
        ..WsConfig::default()
    };
    let pool = Arc::new(WsPool::new(
        config,
        Arc::new(move |closed: bool, err: WsError| {
            if !closed && matches!(err, WsError::Decode(_)) {
                decode_count.fetch_add(1, Ordering::SeqCst);
            }
        }),
    ));

    let hits = Arc::new(AtomicUsize::new(0));
    let cb_hits = Arc::clone(&hits);
    let market = MarketStream::new(Arc::clone(&pool));
    market
        .order_book_subscribe(&["BTCUSDT"], BookDepth::Min, move |_book| {
            cb_hits.fetch_add(1, Ordering::SeqCst);
        })
        .await
        .unwrap();

    // Routable channel tag, but the payload does not fit the book shape.
    server.push(r#"{"c":"spot@public.limit.depth.v3.api@BTCUSDT@5","d":{},"t":"not-a-number"}"#);

    let reported = Arc::clone(&decode_errors);
    wait_for("the decode failure to reach the listener", move || {
        reported.load(Ordering::SeqCst) == 1
    })
    .await;
    assert_eq!(hits.load(Ordering::SeqCst), 0);

    pool.disconnect().await.unwrap();
}

#[tokio::test]
async fn malformed_frame_is_reported_but_not_fatal() {
    let server = MockServer::start().await;

    let decode_errors: Arc<Mutex<Vec<(bool, WsError)>>> = Arc::default();
    let sink = Arc::clone(&decode_errors);
    let config = WsConfig {
        url: server.url(),
        ..WsConfig::default()
    };
    let pool = WsPool::new(
        config,
        Arc::new(move |closed: bool, err: WsError| {
            sink.lock().unwrap().push((closed, err));
        }),
    );

    let hits = Arc::new(AtomicUsize::new(0));
    let cb_hits = Arc::clone(&hits);
    pool.subscribe("chan", &[], Arc::new(move |_| {
        cb_hits.fetch_add(1, Ordering::SeqCst);
    }))
    .await
    .unwrap();

    server.push("this is not json");
    server.push(r#"{"c":"chan","d":{},"t":1}"#);

    let delivered = Arc::clone(&hits);
    wait_for("the valid frame to still be delivered", move || {
        delivered.load(Ordering::SeqCst) == 1
    })
    .await;

    let errors = decode_errors.lock().unwrap();
    assert!(errors
        .iter()
        .any(|(closed, err)| !closed && matches!(err, WsError::Decode(_))));

    drop(errors);
    pool.disconnect().await.unwrap();
}
