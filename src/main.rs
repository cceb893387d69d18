//! Option Pricer Backend Server
//!
//! REST API server for Black-Scholes and binomial option pricing.

use anyhow::Context;
use axum::http::HeaderValue;
use option_pricer_backend::api::create_router;
use option_pricer_backend::config::{Config, CorsConfig};
use option_pricer_backend::rate_limit::WINDOW_MS;
use option_pricer_backend::state::AppState;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use option_pricer_backend::error::ErrorResponse;
use option_pricer_backend::models::{
    AnalyticPriceResponse, BinomialPriceResponse, ChainRequest, ComparisonResponse,
    HealthResponse, PriceRequest, PriceResponse, PricingModel,
};
use option_pricer_backend::pricing::{
    BinomialResult, ChainRow, ConvergenceInfo, ExerciseComparison, ExerciseStyle, Greeks,
    OptionChain, OptionType, PricingResult,
};

/// Configuration file used when `CONFIG_PATH` is not set.
const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// OpenAPI documentation.
#[derive(OpenApi)]
#[openapi(
    paths(
        option_pricer_backend::api::handlers::health_check,
        option_pricer_backend::api::handlers::price_option,
        option_pricer_backend::api::handlers::price_chain,
    ),
    components(
        schemas(
            HealthResponse,
            ErrorResponse,
            PriceRequest,
            PriceResponse,
            AnalyticPriceResponse,
            BinomialPriceResponse,
            ComparisonResponse,
            PricingModel,
            ChainRequest,
            OptionChain,
            ChainRow,
            OptionType,
            ExerciseStyle,
            Greeks,
            PricingResult,
            BinomialResult,
            ConvergenceInfo,
            ExerciseComparison,
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Pricing", description = "Option pricing and Greeks"),
    ),
    info(
        title = "Option Pricer API",
        version = "0.1.0",
        description = "REST API for Black-Scholes and binomial option pricing",
        license(name = "MIT"),
        contact(name = "Joaquin Bejar", email = "jb@taunais.com")
    )
)]
struct ApiDoc;

/// Loads configuration from `CONFIG_PATH`, then `config.toml`, then defaults.
fn load_config() -> anyhow::Result<Config> {
    let config = match std::env::var("CONFIG_PATH") {
        Ok(path) => {
            info!("Loading configuration from {}", path);
            Config::load(&path).with_context(|| format!("loading {path}"))?
        }
        Err(_) if Path::new(DEFAULT_CONFIG_PATH).exists() => {
            info!("Loading configuration from {}", DEFAULT_CONFIG_PATH);
            Config::load(DEFAULT_CONFIG_PATH)
                .with_context(|| format!("loading {DEFAULT_CONFIG_PATH}"))?
        }
        Err(_) => {
            info!("No configuration file found, using defaults");
            Config::default()
        }
    };

    Ok(config.apply_env_overrides()?)
}

/// Builds the CORS layer from the configured origins.
fn cors_layer(cors: &CorsConfig) -> anyhow::Result<CorsLayer> {
    let origin = if cors.allows_any() {
        AllowOrigin::from(Any)
    } else {
        let origins = cors
            .allowed_origins
            .iter()
            .map(|origin| {
                origin
                    .parse::<HeaderValue>()
                    .with_context(|| format!("invalid CORS origin: {origin}"))
            })
            .collect::<anyhow::Result<Vec<_>>>()?;
        AllowOrigin::list(origins)
    };

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(Any)
        .allow_headers(Any))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = load_config()?;

    // Create application state
    let state = Arc::new(AppState::from_config(&config));

    // Drop idle rate limit windows
    let limiter = state.rate_limiter.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_millis(WINDOW_MS));
        loop {
            interval.tick().await;
            limiter.prune();
            debug!(clients = limiter.tracked_clients(), "Pruned rate limit windows");
        }
    });

    let host = &config.server.host;
    let port = config.server.port;

    info!("Starting Option Pricer Backend on {}:{}", host, port);
    info!("Swagger UI available at http://{}:{}/swagger-ui/", host, port);

    // Build the router
    let app = create_router(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(cors_layer(&config.cors)?)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http());

    // Start the server
    let addr = format!("{}:{}", host, port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
