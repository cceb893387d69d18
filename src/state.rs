//! Application state management.

use crate::config::{Config, PricingConfig, RateLimitConfig};
use crate::rate_limit::RateLimiter;
use std::sync::Arc;

/// Application state shared across all handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Pricing limits and defaults.
    pub pricing: PricingConfig,
    /// Rate limit settings.
    pub rate_limit: RateLimitConfig,
    /// Sliding-window request counters.
    pub rate_limiter: Arc<RateLimiter>,
}

impl AppState {
    /// Creates a new application state with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::from_config(&Config::default())
    }

    /// Creates a new application state from configuration.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self {
            pricing: config.pricing.clone(),
            rate_limit: config.rate_limit.clone(),
            rate_limiter: Arc::new(RateLimiter::new()),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
