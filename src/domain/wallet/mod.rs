//! Wallet domain — currency metadata, withdrawals, transfers.

pub mod client;
pub mod wire;

pub use client::Wallets;
pub use wire::{
    CoinInfoResponse, CoinWithdrawInfo, InternalTransferHistoryRequest,
    InternalTransferHistoryResponse, InternalTransferRecord, InternalTransferRequest,
    InternalTransferResponse, TransferHistoryRequest, TransferHistoryResponse, TransferRecord,
    TransferRequest, TransferResponse, WithdrawHistoryRequest, WithdrawRecord, WithdrawRequest,
    WithdrawResponse,
};
