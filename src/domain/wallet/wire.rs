//! Wire formats for the wallet endpoints.

use rust_decimal::Decimal;
use serde::Deserialize;

// ─── Currency information ────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct CoinInfoResponse {
    pub coin: String,
    #[serde(rename = "Name", default)]
    pub name: String,
    #[serde(rename = "networkList", default)]
    pub network_list: Vec<CoinWithdrawInfo>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CoinWithdrawInfo {
    pub coin: String,
    #[serde(rename = "depositDesc", default)]
    pub deposit_desc: String,
    #[serde(rename = "depositEnable")]
    pub deposit_enable: bool,
    #[serde(rename = "minConfirm")]
    pub min_confirm: i32,
    #[serde(rename = "Name", default)]
    pub name: String,
    #[serde(default)]
    pub network: String,
    #[serde(rename = "withdrawEnable")]
    pub withdraw_enable: bool,
    #[serde(rename = "withdrawFee")]
    pub withdraw_fee: Decimal,
    #[serde(rename = "withdrawIntegerMultiple", default)]
    pub withdraw_integer_multiple: Option<String>,
    #[serde(rename = "withdrawMax")]
    pub withdraw_max: Decimal,
    #[serde(rename = "withdrawMin")]
    pub withdraw_min: Decimal,
    #[serde(rename = "sameAddress", default)]
    pub same_address: bool,
    #[serde(default)]
    pub contract: String,
    #[serde(rename = "withdrawTips", default)]
    pub withdraw_tips: String,
    #[serde(rename = "depositTips", default)]
    pub deposit_tips: String,
    #[serde(rename = "netWork", default)]
    pub net_work: String,
}

// ─── Withdraw ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct WithdrawRequest {
    pub coin: String,
    pub address: String,
    pub amount: String,
    pub withdraw_order_id: Option<String>,
    pub network: Option<String>,
    pub contract_address: Option<String>,
    pub memo: Option<String>,
    pub remark: Option<String>,
    pub recv_window: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WithdrawResponse {
    pub id: String,
}

#[derive(Debug, Clone, Default)]
pub struct WithdrawHistoryRequest {
    pub coin: Option<String>,
    pub status: Option<String>,
    pub limit: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub recv_window: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WithdrawRecord {
    pub id: String,
    pub coin: String,
    pub amount: String,
    pub address: String,
    #[serde(default)]
    pub network: String,
    pub status: i32,
    #[serde(rename = "transactionFee", default)]
    pub transaction_fee: String,
    #[serde(rename = "transHash", default)]
    pub trans_hash: String,
    #[serde(rename = "txId", default)]
    pub tx_id: Option<String>,
    #[serde(default)]
    pub memo: String,
    #[serde(default)]
    pub remark: String,
    #[serde(rename = "applyTime")]
    pub apply_time: i64,
    #[serde(rename = "transferType", default)]
    pub transfer_type: i32,
    #[serde(rename = "withdrawOrderId", default)]
    pub withdraw_order_id: Option<String>,
    #[serde(rename = "confirmNo", default)]
    pub confirm_no: Option<String>,
    #[serde(rename = "coinId", default)]
    pub coin_id: String,
    #[serde(rename = "vcoinId", default)]
    pub vcoin_id: String,
}

// ─── Internal transfer ───────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct InternalTransferRequest {
    /// Recipient identifier: email, uid, or mobile number.
    pub to_account: String,
    /// EMAIL / UID / MOBILE.
    pub to_account_type: String,
    /// Required when `to_account_type` is MOBILE.
    pub area_code: Option<String>,
    pub asset: String,
    pub amount: String,
    pub recv_window: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InternalTransferResponse {
    #[serde(rename = "tranId")]
    pub tran_id: String,
}

#[derive(Debug, Clone, Default)]
pub struct InternalTransferHistoryRequest {
    pub start_time: Option<i64>,
    pub end_time: Option<i64>,
    pub page: Option<i32>,
    pub limit: Option<i32>,
    pub tran_id: Option<String>,
    pub recv_window: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InternalTransferRecord {
    pub tran_id: String,
    pub asset: String,
    pub amount: String,
    pub from_account_type: String,
    pub to_account_type: String,
    #[serde(default)]
    pub from_account: String,
    #[serde(default)]
    pub to_account: String,
    pub status: String,
    pub timestamp: i64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InternalTransferHistoryResponse {
    pub page: i32,
    pub total_records: i32,
    pub total_page_num: i32,
    #[serde(default)]
    pub data: Vec<InternalTransferRecord>,
}

// ─── Universal transfer ──────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct TransferRequest {
    pub from_account: Option<String>,
    pub to_account: Option<String>,
    pub from_type: String,
    pub to_type: String,
    pub asset: String,
    pub amount: String,
    pub recv_window: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TransferResponse {
    #[serde(rename = "tranId")]
    pub tran_id: String,
}

#[derive(Debug, Clone, Default)]
pub struct TransferHistoryRequest {
    pub from_account: Option<String>,
    pub to_account: Option<String>,
    pub from_account_type: String,
    pub to_account_type: String,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
    pub recv_window: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferRecord {
    pub tran_id: String,
    #[serde(default)]
    pub from_account: String,
    #[serde(default)]
    pub to_account: String,
    #[serde(default)]
    pub client_tran_id: String,
    pub asset: String,
    pub amount: String,
    pub from_account_type: String,
    pub to_account_type: String,
    #[serde(default)]
    pub from_symbol: String,
    #[serde(default)]
    pub to_symbol: String,
    pub status: String,
    pub timestamp: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TransferHistoryResponse {
    #[serde(default)]
    pub transfers: Vec<TransferRecord>,
}
