//! Network URL and endpoint constants for the MEXC spot API.

/// Default REST API base URL.
pub const DEFAULT_API_URL: &str = "https://api.mexc.com";

/// Default WebSocket URL.
pub const DEFAULT_WS_URL: &str = "wss://wbs-api.mexc.com/ws";

// ─── REST endpoints ──────────────────────────────────────────────────────────

pub const ENDPOINT_EXCHANGE_INFO: &str = "/api/v3/exchangeInfo";
pub const ENDPOINT_ORDER: &str = "/api/v3/order";
pub const ENDPOINT_ORDER_BOOK: &str = "/api/v3/depth";
pub const ENDPOINT_PING: &str = "/api/v3/ping";
pub const ENDPOINT_TIME: &str = "/api/v3/time";
pub const ENDPOINT_TRADE_FEE: &str = "/api/v3/tradeFee";
pub const ENDPOINT_ACCOUNT_TRADE_LIST: &str = "/api/v3/myTrades";
pub const ENDPOINT_INTERNAL_TRANSFER: &str = "/api/v3/capital/transfer/internal";
pub const ENDPOINT_UNIVERSAL_TRANSFER: &str = "/api/v3/capital/sub-account/universalTransfer";
pub const ENDPOINT_WITHDRAW: &str = "/api/v3/capital/withdraw";
pub const ENDPOINT_WITHDRAW_HISTORY: &str = "/api/v3/capital/withdraw/history";
pub const ENDPOINT_CURRENCY_INFORMATION: &str = "/api/v3/capital/config/getall";
pub const ENDPOINT_ACCOUNT_INFORMATION: &str = "/api/v3/account";

/// User data stream (listen key) endpoint.
pub const ENDPOINT_STREAM: &str = "/api/v3/userDataStream";
