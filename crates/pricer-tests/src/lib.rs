//! Integration tests for the Option Pricer API.
//!
//! Each test starts the router in-process on an ephemeral port and talks to
//! it through [`pricer_client::PricerClient`].

use option_pricer_backend::api::create_router;
use option_pricer_backend::config::Config;
use option_pricer_backend::state::AppState;
use pricer_client::{ClientConfig, PricerClient};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

/// Starts a server with the given configuration and returns a client for it.
///
/// The server runs on the current Tokio runtime and stops with it.
///
/// # Errors
/// Returns error if the listener cannot be bound or the client built.
pub async fn spawn_test_server(config: Config) -> anyhow::Result<PricerClient> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;

    let app = create_router(Arc::new(AppState::from_config(&config)));
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    Ok(PricerClient::new(ClientConfig {
        base_url: format!("http://{addr}"),
        timeout: Duration::from_secs(10),
    })?)
}

/// Starts a server with rate limiting disabled.
///
/// # Errors
/// Returns error if the server cannot be started.
pub async fn create_test_client() -> anyhow::Result<PricerClient> {
    let mut config = Config::default();
    config.rate_limit.enabled = false;
    spawn_test_server(config).await
}
