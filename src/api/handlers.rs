//! API request handlers.

use crate::error::ApiError;
use crate::models::{
    AnalyticPriceResponse, BinomialPriceResponse, ChainRequest, ComparisonResponse,
    HealthResponse, PriceRequest, PriceResponse, PricingModel, PricingPlan,
};
use crate::pricing::{OptionChain, binomial, black_scholes, chain};
use crate::state::AppState;
use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use std::sync::Arc;
use tracing::{debug, warn};

/// Explanation attached to exercise style comparisons.
const COMPARISON_NOTE: &str =
    "Early exercise premium is the value of the right to exercise before expiry";

/// Runs CPU-bound lattice work off the async executor.
async fn run_blocking<T, F>(work: F) -> Result<T, ApiError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| ApiError::Internal(format!("pricing task failed: {e}")))
}

// ============================================================================
// Health Check
// ============================================================================

/// Health check endpoint.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    ),
    tag = "Health"
)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// ============================================================================
// Option Pricing
// ============================================================================

/// Price a single option.
///
/// European options use Black-Scholes-Merton unless `model` is `binomial`.
/// American options always use the binomial lattice. With `compare` set,
/// both exercise styles are priced and the early exercise premium returned.
#[utoipa::path(
    post,
    path = "/api/options/price",
    request_body = PriceRequest,
    responses(
        (status = 200, description = "Option price and Greeks", body = PriceResponse),
        (status = 400, description = "Invalid or missing input", body = crate::error::ErrorResponse),
        (status = 429, description = "Rate limit exceeded")
    ),
    tag = "Pricing"
)]
pub async fn price_option(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<PriceRequest>, JsonRejection>,
) -> Result<Json<PriceResponse>, ApiError> {
    let Json(request) = payload.inspect_err(|e| warn!("Rejected price request: {}", e))?;

    let plan = request.validate(&state.pricing).inspect_err(|e| {
        warn!(field = e.field(), "Price request failed validation: {}", e);
    })?;

    let response = match plan {
        PricingPlan::Analytic(contract) => {
            debug!(
                option_type = %contract.option_type,
                spot = contract.spot,
                strike = contract.strike,
                "Pricing with black-scholes"
            );
            PriceResponse::Analytic(AnalyticPriceResponse::from(black_scholes::price(&contract)))
        }
        PricingPlan::Binomial(params) => {
            debug!(
                option_type = %params.contract.option_type,
                style = %params.style,
                steps = params.steps,
                "Pricing with binomial lattice"
            );
            let result = run_blocking(move || binomial::price(&params)).await??;
            PriceResponse::Binomial(BinomialPriceResponse {
                result,
                model: PricingModel::Binomial,
            })
        }
        PricingPlan::Compare(params) => {
            debug!(
                option_type = %params.contract.option_type,
                steps = params.steps,
                "Comparing american and european exercise"
            );
            let comparison = run_blocking(move || binomial::compare(&params)).await??;
            PriceResponse::Compare(ComparisonResponse {
                comparison,
                model: PricingModel::Binomial,
                note: COMPARISON_NOTE.to_string(),
            })
        }
    };

    Ok(Json(response))
}

/// Price calls and puts across a ladder of strikes around the money.
#[utoipa::path(
    post,
    path = "/api/options/chain",
    request_body = ChainRequest,
    responses(
        (status = 200, description = "Option chain", body = OptionChain),
        (status = 400, description = "Invalid or missing input", body = crate::error::ErrorResponse),
        (status = 429, description = "Rate limit exceeded")
    ),
    tag = "Pricing"
)]
pub async fn price_chain(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ChainRequest>, JsonRejection>,
) -> Result<Json<OptionChain>, ApiError> {
    let Json(request) = payload.inspect_err(|e| warn!("Rejected chain request: {}", e))?;

    let params = request.validate(&state.pricing).inspect_err(|e| {
        warn!(field = e.field(), "Chain request failed validation: {}", e);
    })?;

    debug!(
        spot = params.spot,
        strikes_per_side = params.strikes_per_side,
        strike_interval = params.strike_interval,
        "Building option chain"
    );

    Ok(Json(chain::build_chain(&params)))
}
