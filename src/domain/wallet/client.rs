//! Wallet sub-client — currency metadata, withdrawals, transfers.
//! Every endpoint here is signed.

use crate::client::MexcClient;
use crate::error::{HttpError, SdkError};
use crate::http::{RetryPolicy, Security};
use crate::network::{
    ENDPOINT_CURRENCY_INFORMATION, ENDPOINT_INTERNAL_TRANSFER, ENDPOINT_UNIVERSAL_TRANSFER,
    ENDPOINT_WITHDRAW, ENDPOINT_WITHDRAW_HISTORY,
};

use super::wire::{
    CoinInfoResponse, InternalTransferHistoryRequest, InternalTransferHistoryResponse,
    InternalTransferRequest, InternalTransferResponse, TransferHistoryRequest,
    TransferHistoryResponse, TransferRequest, TransferResponse, WithdrawHistoryRequest,
    WithdrawRecord, WithdrawRequest, WithdrawResponse,
};

pub struct Wallets<'a> {
    pub(crate) client: &'a MexcClient,
}

impl<'a> Wallets<'a> {
    /// Deposit/withdraw metadata for every listed currency.
    pub async fn currency_information(&self) -> Result<Vec<CoinInfoResponse>, SdkError> {
        Ok(self
            .client
            .http
            .get(
                ENDPOINT_CURRENCY_INFORMATION,
                &[],
                Security::Signed,
                RetryPolicy::Idempotent,
            )
            .await?)
    }

    /// Submit a withdrawal. Never retried.
    pub async fn withdraw(&self, req: &WithdrawRequest) -> Result<WithdrawResponse, SdkError> {
        let mut params: Vec<(&str, String)> = vec![
            ("coin", req.coin.clone()),
            ("address", req.address.clone()),
            ("amount", req.amount.clone()),
        ];
        if let Some(network) = &req.network {
            params.push(("netWork", network.clone()));
        }
        if let Some(memo) = &req.memo {
            params.push(("memo", memo.clone()));
        }
        if let Some(contract_address) = &req.contract_address {
            params.push(("contractAddress", contract_address.clone()));
        }
        if let Some(withdraw_order_id) = &req.withdraw_order_id {
            params.push(("withdrawOrderId", withdraw_order_id.clone()));
        }
        if let Some(remark) = &req.remark {
            params.push(("remark", remark.clone()));
        }
        if let Some(recv_window) = req.recv_window {
            params.push(("recvWindow", recv_window.to_string()));
        }

        Ok(self
            .client
            .http
            .post(
                ENDPOINT_WITHDRAW,
                &params,
                Security::Signed,
                RetryPolicy::None,
            )
            .await?)
    }

    pub async fn withdraw_history(
        &self,
        req: &WithdrawHistoryRequest,
    ) -> Result<Vec<WithdrawRecord>, SdkError> {
        let mut params: Vec<(&str, String)> = Vec::new();
        if let Some(coin) = &req.coin {
            params.push(("coin", coin.clone()));
        }
        if let Some(status) = &req.status {
            params.push(("status", status.clone()));
        }
        if let Some(start_time) = &req.start_time {
            params.push(("startTime", start_time.clone()));
        }
        if let Some(end_time) = &req.end_time {
            params.push(("endTime", end_time.clone()));
        }
        if let Some(limit) = &req.limit {
            params.push(("limit", limit.clone()));
        }
        if let Some(recv_window) = req.recv_window {
            params.push(("recvWindow", recv_window.to_string()));
        }

        Ok(self
            .client
            .http
            .get(
                ENDPOINT_WITHDRAW_HISTORY,
                &params,
                Security::Signed,
                RetryPolicy::Idempotent,
            )
            .await?)
    }

    /// Look up a single withdrawal by its venue id.
    pub async fn withdraw_by_id(&self, withdraw_id: &str) -> Result<WithdrawRecord, SdkError> {
        let withdraws = self
            .withdraw_history(&WithdrawHistoryRequest::default())
            .await?;

        withdraws
            .into_iter()
            .find(|w| w.id == withdraw_id)
            .ok_or_else(|| {
                SdkError::Http(HttpError::NotFound(format!(
                    "withdraw record with id {withdraw_id}"
                )))
            })
    }

    /// Transfer funds to another MEXC user. Never retried.
    pub async fn internal_transfer(
        &self,
        req: &InternalTransferRequest,
    ) -> Result<InternalTransferResponse, SdkError> {
        let mut params: Vec<(&str, String)> = vec![
            ("toAccountType", req.to_account_type.clone()),
            ("toAccount", req.to_account.clone()),
            ("asset", req.asset.clone()),
            ("amount", req.amount.clone()),
        ];
        if let Some(area_code) = &req.area_code {
            params.push(("areaCode", area_code.clone()));
        }
        if let Some(recv_window) = req.recv_window {
            params.push(("recvWindow", recv_window.to_string()));
        }

        Ok(self
            .client
            .http
            .post(
                ENDPOINT_INTERNAL_TRANSFER,
                &params,
                Security::Signed,
                RetryPolicy::None,
            )
            .await?)
    }

    pub async fn internal_transfer_history(
        &self,
        req: &InternalTransferHistoryRequest,
    ) -> Result<InternalTransferHistoryResponse, SdkError> {
        let mut params: Vec<(&str, String)> = Vec::new();
        if let Some(start_time) = req.start_time {
            params.push(("startTime", start_time.to_string()));
        }
        if let Some(end_time) = req.end_time {
            params.push(("endTime", end_time.to_string()));
        }
        if let Some(page) = req.page {
            params.push(("page", page.to_string()));
        }
        if let Some(limit) = req.limit {
            params.push(("limit", limit.to_string()));
        }
        if let Some(tran_id) = &req.tran_id {
            params.push(("tranId", tran_id.clone()));
        }
        if let Some(recv_window) = req.recv_window {
            params.push(("recvWindow", recv_window.to_string()));
        }

        Ok(self
            .client
            .http
            .get(
                ENDPOINT_INTERNAL_TRANSFER,
                &params,
                Security::Signed,
                RetryPolicy::Idempotent,
            )
            .await?)
    }

    /// Master-account transfer between account types. Never retried.
    pub async fn universal_transfer(
        &self,
        req: &TransferRequest,
    ) -> Result<TransferResponse, SdkError> {
        let mut params: Vec<(&str, String)> = vec![
            ("asset", req.asset.clone()),
            ("amount", req.amount.clone()),
            ("fromAccountType", req.from_type.clone()),
            ("toAccountType", req.to_type.clone()),
        ];
        if let Some(from_account) = &req.from_account {
            params.push(("fromAccount", from_account.clone()));
        }
        if let Some(to_account) = &req.to_account {
            params.push(("toAccount", to_account.clone()));
        }
        if let Some(recv_window) = req.recv_window {
            params.push(("recvWindow", recv_window.to_string()));
        }

        Ok(self
            .client
            .http
            .post(
                ENDPOINT_UNIVERSAL_TRANSFER,
                &params,
                Security::Signed,
                RetryPolicy::None,
            )
            .await?)
    }

    pub async fn universal_transfer_history(
        &self,
        req: &TransferHistoryRequest,
    ) -> Result<TransferHistoryResponse, SdkError> {
        let mut params: Vec<(&str, String)> = vec![
            ("fromAccountType", req.from_account_type.clone()),
            ("toAccountType", req.to_account_type.clone()),
        ];
        if let Some(from_account) = &req.from_account {
            params.push(("fromAccount", from_account.clone()));
        }
        if let Some(to_account) = &req.to_account {
            params.push(("toAccount", to_account.clone()));
        }
        if let Some(start_time) = &req.start_time {
            params.push(("startTime", start_time.clone()));
        }
        if let Some(end_time) = &req.end_time {
            params.push(("endTime", end_time.clone()));
        }
        if let Some(page) = &req.page {
            params.push(("page", page.clone()));
        }
        if let Some(limit) = &req.limit {
            params.push(("limit", limit.clone()));
        }
        if let Some(recv_window) = req.recv_window {
            params.push(("recvWindow", recv_window.to_string()));
        }

        Ok(self
            .client
            .http
            .get(
                ENDPOINT_UNIVERSAL_TRANSFER,
                &params,
                Security::Signed,
                RetryPolicy::Idempotent,
            )
            .await?)
    }
}
