//! Client-side request pacing
//!
//! A governor token bucket shared by clones. The API client waits on it
//! before every call; the seeder uses a slower one between records so a
//! bulk import never floods the backend.

use governor::clock::DefaultClock;
use governor::middleware::NoOpMiddleware;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter as Governor};
use serde::{Deserialize, Serialize};
use std::num::NonZeroU32;
use std::sync::Arc;
use tracing::debug;

type DirectLimiter = Governor<NotKeyed, InMemoryState, DefaultClock, NoOpMiddleware>;

/// Token bucket settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimiterConfig {
    /// Sustained rate
    pub requests_per_second: u32,
    /// Calls allowed back to back before pacing kicks in
    pub burst_size: u32,
}

impl Default for RateLimiterConfig {
    fn default() -> Self {
        Self::new(10, 10)
    }
}

impl RateLimiterConfig {
    pub fn new(requests_per_second: u32, burst_size: u32) -> Self {
        Self {
            requests_per_second,
            burst_size,
        }
    }

    /// One call per second without bursts, for bulk seeding
    pub fn gentle() -> Self {
        Self::new(1, 1)
    }

    fn quota(&self) -> Quota {
        Quota::per_second(at_least_one(self.requests_per_second))
            .allow_burst(at_least_one(self.burst_size))
    }
}

/// Shared token bucket; clones draw from the same bucket
#[derive(Clone)]
pub struct RateLimiter {
    config: RateLimiterConfig,
    bucket: Arc<DirectLimiter>,
}

impl RateLimiter {
    /// Zero rates are raised to one
    pub fn new(config: &RateLimiterConfig) -> Self {
        debug!(
            "Pacing requests at {}/s (burst {})",
            config.requests_per_second, config.burst_size
        );
        Self {
            config: config.clone(),
            bucket: Arc::new(Governor::direct(config.quota())),
        }
    }

    pub fn config(&self) -> &RateLimiterConfig {
        &self.config
    }

    /// Wait for a token
    pub async fn wait(&self) {
        self.bucket.until_ready().await;
    }

    /// Take a token if one is available right now
    pub fn try_acquire(&self) -> bool {
        self.bucket.check().is_ok()
    }
}

fn at_least_one(value: u32) -> NonZeroU32 {
    NonZeroU32::new(value).unwrap_or(NonZeroU32::MIN)
}

impl std::fmt::Debug for RateLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateLimiter")
            .field("requests_per_second", &self.config.requests_per_second)
            .field("burst_size", &self.config.burst_size)
            .finish()
    }
}
