//! # Option Pricer Backend - REST API Server
//!
//! A REST API backend that prices European and American options and their
//! Greeks. Built with [Axum](https://crates.io/crates/axum) for async HTTP
//! handling and provides OpenAPI/Swagger documentation via
//! [utoipa](https://crates.io/crates/utoipa).
//!
//! ## Key Features
//!
//! - **Black-Scholes-Merton**: Closed-form prices with delta, gamma, theta,
//!   vega and rho for European calls and puts.
//!
//! - **Binomial Lattice**: Cox-Ross-Rubinstein pricing for American exercise,
//!   with continuous dividend yield and an early exercise premium comparison.
//!
//! - **Option Chains**: Calls and puts priced across a ladder of strikes
//!   centred on the money.
//!
//! - **Field-Level Validation**: Missing or out-of-domain inputs are reported
//!   by field name with a 400 response.
//!
//! - **Rate Limiting**: Sliding one-minute window per client address.
//!
//! - **OpenAPI Documentation**: Auto-generated Swagger UI at `/swagger-ui/`.
//!
//! ## Module Structure
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`api`] | Route handlers, middleware and router configuration |
//! | [`config`] | TOML configuration with environment overrides |
//! | [`error`] | API error types with `IntoResponse` implementation |
//! | [`models`] | Request/response DTOs with OpenAPI schemas |
//! | [`pricing`] | Pricing models, independent of HTTP |
//! | [`rate_limit`] | Sliding window request counter |
//! | [`state`] | Application state management |
//!
//! ## API Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/health` | Health check |
//! | POST | `/api/options/price` | Price one option |
//! | POST | `/api/options/chain` | Price a strike ladder |
//!
//! ## Example Usage
//!
//! ### Starting the Server
//!
//! ```bash
//! # Development mode
//! cargo run
//!
//! # With custom host/port
//! HOST=127.0.0.1 PORT=3000 cargo run
//!
//! # With a configuration file
//! CONFIG_PATH=config.toml cargo run
//! ```
//!
//! ### API Requests
//!
//! ```bash
//! # European call with Black-Scholes
//! curl -X POST http://localhost:8080/api/options/price \
//!   -H "Content-Type: application/json" \
//!   -d '{"spotPrice": 100, "strikePrice": 100, "timeToExpiry": 1,
//!        "riskFreeRate": 0.05, "volatility": 0.2, "optionType": "call"}'
//!
//! # American put on a 200-step lattice
//! curl -X POST http://localhost:8080/api/options/price \
//!   -H "Content-Type: application/json" \
//!   -d '{"spotPrice": 100, "strikePrice": 100, "timeToExpiry": 1,
//!        "riskFreeRate": 0.05, "volatility": 0.2, "optionType": "put",
//!        "optionStyle": "american", "steps": 200}'
//!
//! # Chain of five strikes on each side
//! curl -X POST http://localhost:8080/api/options/chain \
//!   -H "Content-Type: application/json" \
//!   -d '{"spotPrice": 102, "timeToExpiry": 0.25, "riskFreeRate": 0.05,
//!        "volatility": 0.2, "strikesPerSide": 5}'
//! ```
//!
//! ## Swagger UI
//!
//! Once the server is running, access the interactive API documentation at:
//!
//! ```text
//! http://localhost:8080/swagger-ui/
//! ```
//!
//! ## Dependencies
//!
//! - **axum** (0.8): Async web framework
//! - **tower-http** (0.6): HTTP middleware (CORS, tracing, compression)
//! - **statrs** (0.18): Complementary error function for the normal CDF
//! - **utoipa** (5.4): OpenAPI documentation generation
//! - **utoipa-swagger-ui** (9.0): Swagger UI integration
//! - **tokio** (1.49): Async runtime
//! - **serde** (1.0): Serialization/deserialization
//! - **tracing** (0.1): Structured logging

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod pricing;
pub mod rate_limit;
pub mod state;
