//! HTTP client for the pricer API.

use crate::error::Error;
use crate::types::*;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use url::Url;


/// Error code the API uses for field validation failures.
const VALIDATION_ERROR_CODE: &str = "VALIDATION_ERROR";

/// Client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the API (e.g., "http://localhost:8080").
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// HTTP client for the Option Pricer API.
#[derive(Debug, Clone)]
pub struct PricerClient {
    client: Client,
    base_url: String,
}

impl PricerClient {
    /// Creates a new client with the given configuration.
    ///
    /// # Errors
    /// Returns error if the base URL is invalid or the HTTP client cannot
    /// be built.
    pub fn new(config: ClientConfig) -> Result<Self, Error> {
        Url::parse(&config.base_url)?;
        let client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Creates a new client with default configuration.
    ///
    /// # Errors
    /// Returns error if the base URL is invalid or the HTTP client cannot
    /// be built.
    pub fn with_base_url(base_url: &str) -> Result<Self, Error> {
        Self::new(ClientConfig {
            base_url: base_url.to_string(),
            ..Default::default()
        })
    }

    /// Base URL without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ========================================================================
    // Health
    // ========================================================================

    /// Performs a health check.
    ///
    /// # Errors
    /// Returns error if the request fails.
    pub async fn health_check(&self) -> Result<HealthResponse, Error> {
        let url = format!("{}/health", self.base_url);
        let resp = self.client.get(&url).send().await?;
        self.handle_response(resp).await
    }

    // ========================================================================
    // Pricing
    // ========================================================================

    /// Prices a single option.
    ///
    /// # Errors
    /// Returns [`Error::Validation`] naming the offending field when the
    /// inputs are rejected, or another error if the request fails.
    pub async fn price_option(&self, request: &PriceRequest) -> Result<PriceResponse, Error> {
        self.post("/api/options/price", request).await
    }

    /// Sends an arbitrary JSON body to the pricing endpoint.
    ///
    /// # Errors
    /// Returns error if the request fails or the API rejects the body.
    pub async fn price_option_raw(
        &self,
        body: &serde_json::Value,
    ) -> Result<PriceResponse, Error> {
        self.post("/api/options/price", body).await
    }

    /// Prices a chain of strikes around the money.
    ///
    /// # Errors
    /// Returns [`Error::Validation`] naming the offending field when the
    /// inputs are rejected, or another error if the request fails.
    pub async fn price_chain(&self, request: &ChainRequest) -> Result<OptionChain, Error> {
        self.post("/api/options/chain", request).await
    }

    async fn post<B: Serialize + ?Sized, T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let url = format!("{}{}", self.base_url, path);
        let resp = self.client.post(&url).json(body).send().await?;
        self.handle_response(resp).await
    }

    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, Error> {
        let status = resp.status();

        if status.is_success() {
            return Ok(resp.json().await?);
        }

        if status.as_u16() == 429 {
            let retry_after = resp
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok())
                .unwrap_or(0);
            return Err(Error::RateLimited { retry_after });
        }

        let text = resp.text().await.unwrap_or_default();
        Err(error_from_body(status.as_u16(), text))
    }
}

/// Maps an error response body to a client error.
fn error_from_body(status: u16, text: String) -> Error {
    match serde_json::from_str::<ErrorBody>(&text) {
        Ok(ErrorBody {
            error,
            code,
            field: Some(field),
        }) if code == VALIDATION_ERROR_CODE => Error::Validation {
            field,
            message: error,
        },
        Ok(body) => Error::Api {
            status,
            code: Some(body.code),
            message: body.error,
        },
        Err(_) => Error::Api {
            status,
            code: None,
            message: text,
        },
    }
}
