//! HTTP client library for the Option Pricer API.
//!
//! This crate provides a typed HTTP client for the option pricing backend.
//! Validation failures come back as [`Error::Validation`] carrying the name
//! of the offending request field.
//!
//! # Example
//!
//! ```no_run
//! use pricer_client::{ClientConfig, OptionType, PriceRequest, PricerClient};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), pricer_client::Error> {
//!     let client = PricerClient::new(ClientConfig {
//!         base_url: "http://localhost:8080".into(),
//!         timeout: Duration::from_secs(30),
//!     })?;
//!
//!     let request = PriceRequest::new(100.0, 100.0, 1.0, 0.05, 0.2, OptionType::Call);
//!     let response = client.price_option(&request).await?;
//!     println!("{:?}", response);
//!
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod types;

pub use client::{ClientConfig, PricerClient};
pub use error::Error;
pub use types::*;
