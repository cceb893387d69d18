//! API middleware for per-client rate limiting.

use crate::error::ApiError;
use crate::state::AppState;
use axum::{
    body::Body,
    extract::State,
    http::{HeaderValue, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::warn;

/// Key prefix for clients identified by address.
const CLIENT_KEY_PREFIX: &str = "ip_";

/// Rate limiting middleware.
///
/// Counts requests per client address over a sliding one-minute window.
/// Returns 429 Too Many Requests once the configured limit is reached and
/// adds rate limit headers to every other response.
pub async fn rate_limit_middleware(
    State(state): State<Arc<AppState>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    // Exempt health check endpoint
    if !state.rate_limit.enabled || request.uri().path() == "/health" {
        return next.run(request).await;
    }

    let limit = state.rate_limit.requests_per_minute;
    let key = format!("{}{}", CLIENT_KEY_PREFIX, extract_client_ip(&request));
    let decision = state.rate_limiter.check_and_record(&key, limit);

    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    let reset = now + decision.retry_after;

    if !decision.allowed {
        warn!(client = %key, limit, "Rate limit exceeded");
        return ApiError::RateLimitExceeded {
            limit,
            remaining: 0,
            reset,
            retry_after: decision.retry_after,
        }
        .into_response();
    }

    let mut response = next.run(request).await;

    let headers = response.headers_mut();
    headers.insert("X-RateLimit-Limit", HeaderValue::from(limit));
    headers.insert("X-RateLimit-Remaining", HeaderValue::from(decision.remaining));
    headers.insert("X-RateLimit-Reset", HeaderValue::from(reset));

    response
}

/// Extract client IP from request.
fn extract_client_ip(request: &Request<Body>) -> String {
    // Try X-Forwarded-For header first
    if let Some(forwarded) = request.headers().get("X-Forwarded-For")
        && let Ok(value) = forwarded.to_str()
        && let Some(ip) = value.split(',').next()
    {
        return ip.trim().to_string();
    }

    // Try X-Real-IP header
    if let Some(real_ip) = request.headers().get("X-Real-IP")
        && let Ok(value) = real_ip.to_str()
    {
        return value.to_string();
    }

    // Default to unknown
    "unknown".to_string()
}
