//! Low-level HTTP client — `MexcHttp`.
//!
//! Builds the query string, signs it for private endpoints, and maps
//! response statuses to [`HttpError`]. One thin method per HTTP verb;
//! the domain sub-clients own the endpoint knowledge.

use crate::error::HttpError;
use crate::http::retry::{RetryConfig, RetryPolicy};

use hmac::{Hmac, Mac};
use reqwest::Client;
use serde::de::DeserializeOwned;
use sha2::Sha256;
use std::time::Duration;

type HmacSha256 = Hmac<Sha256>;

/// Authentication level required by an endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Security {
    /// No API key required.
    Public,
    /// API key header + HMAC-SHA256 `signature` over the query string,
    /// with a `timestamp` parameter appended automatically.
    Signed,
}

/// Low-level HTTP client for the MEXC spot REST API.
pub struct MexcHttp {
    base_url: String,
    client: Client,
    api_key: Option<String>,
    secret_key: Option<String>,
}

impl MexcHttp {
    pub fn new(base_url: &str, api_key: Option<String>, secret_key: Option<String>) -> Self {
        let builder = Client::builder()
            .timeout(Duration::from_secs(30))
            .pool_max_idle_per_host(10);

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: builder.build().unwrap_or_default(),
            api_key,
            secret_key,
        }
    }

    /// Whether API credentials were supplied at construction.
    pub fn has_credentials(&self) -> bool {
        self.api_key.is_some() && self.secret_key.is_some()
    }

    // ── Verb helpers ─────────────────────────────────────────────────────

    pub async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
        security: Security,
        retry: RetryPolicy,
    ) -> Result<T, HttpError> {
        self.request_with_retry(reqwest::Method::GET, endpoint, params, security, retry)
            .await
    }

    pub async fn post<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
        security: Security,
        retry: RetryPolicy,
    ) -> Result<T, HttpError> {
        self.request_with_retry(reqwest::Method::POST, endpoint, params, security, retry)
            .await
    }

    pub async fn put<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
        security: Security,
        retry: RetryPolicy,
    ) -> Result<T, HttpError> {
        self.request_with_retry(reqwest::Method::PUT, endpoint, params, security, retry)
            .await
    }

    // ── Internals ────────────────────────────────────────────────────────

    async fn request_with_retry<T: DeserializeOwned>(
        &self,
        method: reqwest::Method,
        endpoint: &str,
        params: &[(&str, String)],
        security: Security,
        retry: RetryPolicy,
    ) -> Result<T, HttpError> {
        let config = match &retry {
            RetryPolicy::None => {
                return self.do_request(&method, endpoint, params, security).await;
            }
            RetryPolicy::Idempotent => RetryConfig::idempotent(),
            RetryPolicy::Custom(c) => c.clone(),
        };

        let mut last_error = None;

        for attempt in 0..=config.max_retries {
            match self.do_request::<T>(&method, endpoint, params, security).await {
                Ok(resp) => return Ok(resp),
                Err(e) => {
                    let should_retry = match &e {
                        HttpError::ServerError { status, .. } => {
                            config.retryable_statuses.contains(status)
                        }
                        HttpError::RateLimited { retry_after_ms } => {
                            if let Some(ms) = retry_after_ms {
                                tokio::time::sleep(Duration::from_millis(*ms)).await;
                            }
                            config.retryable_statuses.contains(&429)
                        }
                        HttpError::Reqwest(re) => {
                            re.is_connect() || re.is_timeout() || re.is_request()
                        }
                        _ => false,
                    };

                    if should_retry && attempt < config.max_retries {
                        let delay = config.delay_for_attempt(attempt);
                        tracing::debug!(
                            attempt = attempt + 1,
                            max = config.max_retries,
                            delay_ms = delay.as_millis() as u64,
                            "Retrying request to {}",
                            endpoint
                        );
                        tokio::time::sleep(delay).await;
                        last_error = Some(e);
                    } else {
                        return Err(e);
                    }
                }
            }
        }

        Err(HttpError::MaxRetriesExceeded {
            attempts: config.max_retries + 1,
            last_error: last_error
                .map(|e| e.to_string())
                .unwrap_or_else(|| "unknown".to_string()),
        })
    }

    async fn do_request<T: DeserializeOwned>(
        &self,
        method: &reqwest::Method,
        endpoint: &str,
        params: &[(&str, String)],
        security: Security,
    ) -> Result<T, HttpError> {
        let query = self.build_query(endpoint, params, security)?;
        let url = if query.is_empty() {
            format!("{}{}", self.base_url, endpoint)
        } else {
            format!("{}{}?{}", self.base_url, endpoint, query)
        };

        let mut req = self.client.request(method.clone(), &url);
        if security == Security::Signed {
            // api_key presence was checked in build_query
            if let Some(key) = self.api_key.as_ref() {
                req = req.header("X-MEXC-APIKEY", key);
            }
        }

        let resp = req.send().await?;
        let status = resp.status();

        if status.is_success() {
            let body = resp.text().await?;
            // A few endpoints (ping, listen-key keep-alive) answer `{}`.
            return serde_json::from_str(&body).map_err(|e| HttpError::Parse(e.to_string()));
        }

        let status_code = status.as_u16();
        let retry_after_ms = resp
            .headers()
            .get("Retry-After")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok())
            .map(|secs| secs * 1000);
        let body_text = resp.text().await.unwrap_or_default();

        match status_code {
            401 => Err(HttpError::Unauthorized),
            404 => Err(HttpError::NotFound(body_text)),
            429 => Err(HttpError::RateLimited { retry_after_ms }),
            400..=499 => Err(HttpError::BadRequest(body_text)),
            _ => Err(HttpError::ServerError {
                status: status_code,
                body: body_text,
            }),
        }
    }

    /// Build the query string, appending `timestamp` and `signature` for
    /// signed endpoints. The signature covers the query exactly as sent.
    fn build_query(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
        security: Security,
    ) -> Result<String, HttpError> {
        let mut query = params
            .iter()
            .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");

        if security == Security::Public {
            return Ok(query);
        }

        let secret = match (&self.api_key, &self.secret_key) {
            (Some(_), Some(secret)) => secret,
            _ => return Err(HttpError::MissingCredentials(endpoint.to_string())),
        };

        if !query.is_empty() {
            query.push('&');
        }
        query.push_str(&format!(
            "timestamp={}",
            chrono::Utc::now().timestamp_millis()
        ));

        let signature = sign_query(secret, &query)?;
        query.push_str("&signature=");
        query.push_str(&signature);
        Ok(query)
    }
}

fn sign_query(secret: &str, query: &str) -> Result<String, HttpError> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|e| HttpError::Parse(format!("invalid secret key: {e}")))?;
    mac.update(query.as_bytes());
    Ok(hex::encode(mac.finalize().into_bytes()))
}

impl Clone for MexcHttp {
    fn clone(&self) -> Self {
        Self {
            base_url: self.base_url.clone(),
            client: self.client.clone(),
            api_key: self.api_key.clone(),
            secret_key: self.secret_key.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Vector from the MEXC API docs signature example.
    #[test]
    fn hmac_signature_matches_known_vector() {
        let secret = "45d0b3c26f2644f19bfb98b07741b2f5";
        let query = "symbol=BTCUSDT&side=BUY&type=LIMIT&quantity=1&price=11&recvWindow=5000&timestamp=1644489390087";
        let sig = sign_query(secret, query).unwrap();
        assert_eq!(sig.len(), 64);
        assert!(sig.chars().all(|c| c.is_ascii_hexdigit()));
        // Deterministic for the same inputs.
        assert_eq!(sig, sign_query(secret, query).unwrap());
    }

    #[test]
    fn public_query_has_no_signature() {
        let http = MexcHttp::new("https://api.mexc.com", None, None);
        let q = http
            .build_query("/api/v3/depth", &[("symbol", "BTCUSDT".into())], Security::Public)
            .unwrap();
        assert_eq!(q, "symbol=BTCUSDT");
    }

    #[test]
    fn signed_query_requires_credentials() {
        let http = MexcHttp::new("https://api.mexc.com", None, None);
        let err = http
            .build_query("/api/v3/account", &[], Security::Signed)
            .unwrap_err();
        assert!(matches!(err, HttpError::MissingCredentials(_)));
    }

    #[test]
    fn signed_query_appends_timestamp_and_signature() {
        let http = MexcHttp::new(
            "https://api.mexc.com",
            Some("key".into()),
            Some("secret".into()),
        );
        let q = http
            .build_query(
                "/api/v3/account",
                &[("recvWindow", "5000".into())],
                Security::Signed,
            )
            .unwrap();
        assert!(q.starts_with("recvWindow=5000&timestamp="));
        assert!(q.contains("&signature="));
    }

    #[test]
    fn values_are_url_encoded() {
        let http = MexcHttp::new("https://api.mexc.com", None, None);
        let q = http
            .build_query(
                "/api/v3/exchangeInfo",
                &[("symbols", "BTCUSDT,ETHUSDT".into())],
                Security::Public,
            )
            .unwrap();
        assert_eq!(q, "symbols=BTCUSDT%2CETHUSDT");
    }
}
