//! HTTP client module
//!
//! Provides the API client every endpoint module talks through.
//!
//! # Features
//!
//! - **Session cookies**: login sets a cookie that later calls carry automatically
//! - **Envelope decoding**: `{ success, data, error }` unwrapped into typed results
//! - **Error classification**: failures mapped onto [`crate::error::ApiError`]
//! - **Rate Limiting**: Token bucket rate limiter using governor
//! - **Presigned uploads**: raw PUTs to storage without the session cookie

mod client;
mod envelope;
mod rate_limit;

pub use client::{ApiClient, ApiClientConfig, ApiClientConfigBuilder, RequestConfig};
pub use envelope::{classify, Envelope, ErrorBody};
pub use rate_limit::{RateLimiter, RateLimiterConfig};

#[cfg(test)]
mod tests;
