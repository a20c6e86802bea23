//! Live REST tests against the production MEXC API.
//!
//! All tests are `#[ignore]` because they require network access, and the
//! signed ones need `MEXC_API_KEY` / `MEXC_SECRET_KEY` in the environment
//! (or a `.env` file).
//!
//! Run with:
//! ```bash
//! cargo test --test rest_live -- --ignored
//! ```

use mexc_sdk::client::MexcClient;

fn public_client() -> MexcClient {
    MexcClient::builder().build()
}

fn signed_client() -> MexcClient {
    dotenvy::dotenv().ok();
    let api_key = std::env::var("MEXC_API_KEY").expect("MEXC_API_KEY not set");
    let secret_key = std::env::var("MEXC_SECRET_KEY").expect("MEXC_SECRET_KEY not set");
    MexcClient::builder()
        .credentials(&api_key, &secret_key)
        .build()
}

#[tokio::test]
#[ignore]
async fn ping_succeeds() {
    public_client().markets().ping().await.expect("ping");
}

#[tokio::test]
#[ignore]
async fn server_time_is_plausible() {
    let time = public_client().markets().time().await.expect("time");
    assert!(time.server_time > 1_600_000_000_000, "{}", time.server_time);
}

#[tokio::test]
#[ignore]
async fn exchange_info_lists_btcusdt() {
    let info = public_client()
        .markets()
        .exchange_info(&["BTCUSDT"])
        .await
        .expect("exchange info");
    assert!(info.symbols.iter().any(|s| s.symbol == "BTCUSDT"));
}

#[tokio::test]
#[ignore]
async fn order_book_has_both_sides() {
    let book = public_client()
        .markets()
        .order_book("BTCUSDT", 5)
        .await
        .expect("order book");
    assert!(!book.bids.is_empty());
    assert!(!book.asks.is_empty());
}

#[tokio::test]
#[ignore]
async fn account_information_decodes() {
    let info = signed_client()
        .accounts()
        .information(None)
        .await
        .expect("account information");
    assert!(!info.account_type.is_empty());
}

#[tokio::test]
#[ignore]
async fn listen_key_create_and_keep_alive() {
    let streams = signed_client().streams();
    let key = streams.create().await.expect("create listen key");
    assert!(!key.is_empty());
    streams.keep_alive(&key).await.expect("keep alive");
}
