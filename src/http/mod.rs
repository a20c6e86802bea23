//! HTTP client layer — `MexcHttp` with request signing and retry policies.

pub mod client;
pub mod retry;

pub use client::{MexcHttp, Security};
pub use retry::{RetryConfig, RetryPolicy};
