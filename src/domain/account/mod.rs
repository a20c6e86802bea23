//! Account domain — spot account information.

use crate::client::MexcClient;
use crate::error::SdkError;
use crate::http::{RetryPolicy, Security};
use crate::network::ENDPOINT_ACCOUNT_INFORMATION;

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountInformationResponse {
    pub can_trade: bool,
    pub can_withdraw: bool,
    pub can_deposit: bool,
    pub update_time: Option<i64>,
    pub account_type: String,
    #[serde(default)]
    pub balances: Vec<Balance>,
    #[serde(default)]
    pub permissions: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Balance {
    pub asset: String,
    pub free: String,
    pub locked: String,
}

pub struct Accounts<'a> {
    pub(crate) client: &'a MexcClient,
}

impl<'a> Accounts<'a> {
    /// Spot account state: balances, permissions, trading flags.
    pub async fn information(
        &self,
        recv_window: Option<i64>,
    ) -> Result<AccountInformationResponse, SdkError> {
        let mut params: Vec<(&str, String)> = Vec::new();
        if let Some(recv_window) = recv_window {
            params.push(("recvWindow", recv_window.to_string()));
        }

        Ok(self
            .client
            .http
            .get(
                ENDPOINT_ACCOUNT_INFORMATION,
                &params,
                Security::Signed,
                RetryPolicy::Idempotent,
            )
            .await?)
    }
}
