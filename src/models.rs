//! Request and response models for the REST API.
//!
//! Request bodies keep every field optional so that a missing field is
//! reported by name instead of as a generic deserialization failure.

use crate::config::PricingConfig;
use crate::pricing::chain::DEFAULT_STRIKES_PER_SIDE;
use crate::pricing::validation::required;
use crate::pricing::{
    BinomialParams, BinomialResult, ChainParams, ContractParams, ExerciseComparison,
    ExerciseStyle, Greeks, OptionType, PricingError, PricingResult,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Pricing model selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum PricingModel {
    /// Closed-form Black-Scholes-Merton.
    BlackScholes,
    /// Cox-Ross-Rubinstein lattice.
    Binomial,
}

impl std::fmt::Display for PricingModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlackScholes => write!(f, "black-scholes"),
            Self::Binomial => write!(f, "binomial"),
        }
    }
}

// ============================================================================
// Health
// ============================================================================

/// Health check response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Service version.
    pub version: String,
}

// ============================================================================
// Option Pricing
// ============================================================================

/// Request to price a single option.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PriceRequest {
    /// Current underlying price (> 0).
    pub spot_price: Option<f64>,
    /// Strike price (> 0).
    pub strike_price: Option<f64>,
    /// Time to expiry in years (>= 0).
    pub time_to_expiry: Option<f64>,
    /// Annualized risk-free rate as a decimal.
    pub risk_free_rate: Option<f64>,
    /// Annualized volatility as a decimal (> 0).
    pub volatility: Option<f64>,
    /// `call` or `put`.
    pub option_type: Option<OptionType>,
    /// Exercise style (default: european).
    #[serde(default)]
    pub option_style: Option<ExerciseStyle>,
    /// Model override.
    #[serde(default)]
    pub model: Option<PricingModel>,
    /// Binomial lattice depth.
    #[serde(default)]
    pub steps: Option<u32>,
    /// Continuous dividend yield (binomial only).
    #[serde(default)]
    pub dividend_yield: Option<f64>,
    /// Price both exercise styles and report the early exercise premium.
    #[serde(default)]
    pub compare: bool,
}

/// Validated pricing work for a [`PriceRequest`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PricingPlan {
    /// Closed-form pricing.
    Analytic(ContractParams),
    /// Lattice pricing.
    Binomial(BinomialParams),
    /// American against European lattice comparison.
    Compare(BinomialParams),
}

impl PriceRequest {
    /// Checks the request and chooses the pricing model.
    ///
    /// American exercise always uses the lattice. European exercise uses
    /// the closed form unless `model` asks for the lattice.
    ///
    /// # Errors
    /// Returns [`PricingError::MissingField`] for the first absent required
    /// field, or [`PricingError::InvalidField`] for an out-of-domain value or
    /// an unsupported model combination.
    pub fn validate(&self, config: &PricingConfig) -> Result<PricingPlan, PricingError> {
        let spot = required("spotPrice", self.spot_price)?;
        let strike = required("strikePrice", self.strike_price)?;
        let time_to_expiry = required("timeToExpiry", self.time_to_expiry)?;
        let risk_free_rate = required("riskFreeRate", self.risk_free_rate)?;
        let volatility = required("volatility", self.volatility)?;
        let option_type = required("optionType", self.option_type)?;

        let contract = ContractParams::new(
            spot,
            strike,
            time_to_expiry,
            risk_free_rate,
            volatility,
            option_type,
        )?;

        let style = self.option_style.unwrap_or_default();
        let dividend_yield = self.dividend_yield.unwrap_or(0.0);

        let use_lattice = self.compare
            || match (style, self.model) {
                (ExerciseStyle::American, Some(PricingModel::BlackScholes)) => {
                    return Err(PricingError::InvalidField {
                        field: "model",
                        reason: "black-scholes cannot price american exercise".to_string(),
                    });
                }
                (ExerciseStyle::American, _) => true,
                (ExerciseStyle::European, Some(PricingModel::Binomial)) => true,
                (ExerciseStyle::European, _) => false,
            };

        if !use_lattice {
            if dividend_yield != 0.0 {
                return Err(PricingError::InvalidField {
                    field: "dividendYield",
                    reason: "only supported by the binomial model".to_string(),
                });
            }
            return Ok(PricingPlan::Analytic(contract));
        }

        let steps = self.steps.unwrap_or(config.default_steps);
        if steps > config.max_steps {
            return Err(PricingError::InvalidField {
                field: "steps",
                reason: format!("must not exceed {}", config.max_steps),
            });
        }

        let params = BinomialParams::new(contract, style, steps, dividend_yield)?;
        Ok(if self.compare {
            PricingPlan::Compare(params)
        } else {
            PricingPlan::Binomial(params)
        })
    }
}

/// Closed-form pricing response.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticPriceResponse {
    /// Theoretical option value.
    pub price: f64,
    /// Annualized Greeks.
    pub greeks: Greeks,
    /// Always european.
    pub option_style: ExerciseStyle,
    /// Always black-scholes.
    pub model: PricingModel,
}

impl From<PricingResult> for AnalyticPriceResponse {
    fn from(result: PricingResult) -> Self {
        Self {
            price: result.price,
            greeks: result.greeks,
            option_style: ExerciseStyle::European,
            model: PricingModel::BlackScholes,
        }
    }
}

/// Lattice pricing response.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BinomialPriceResponse {
    /// Lattice result.
    #[serde(flatten)]
    pub result: BinomialResult,
    /// Always binomial.
    pub model: PricingModel,
}

/// Exercise style comparison response.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ComparisonResponse {
    /// Both results and the early exercise premium.
    #[serde(flatten)]
    pub comparison: ExerciseComparison,
    /// Always binomial.
    pub model: PricingModel,
    /// Explanation of the premium.
    pub note: String,
}

/// Response to a pricing request; the shape depends on the model used.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(untagged)]
pub enum PriceResponse {
    /// Closed-form result.
    Analytic(AnalyticPriceResponse),
    /// Lattice result.
    Binomial(BinomialPriceResponse),
    /// Exercise style comparison.
    Compare(ComparisonResponse),
}

// ============================================================================
// Option Chain
// ============================================================================

/// Request to price a strike ladder.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChainRequest {
    /// Current underlying price (> 0).
    pub spot_price: Option<f64>,
    /// Time to expiry in years (>= 0).
    pub time_to_expiry: Option<f64>,
    /// Annualized risk-free rate as a decimal.
    pub risk_free_rate: Option<f64>,
    /// Annualized volatility as a decimal (> 0).
    pub volatility: Option<f64>,
    /// Strikes on each side of the money (default: 10).
    #[serde(default)]
    pub strikes_per_side: Option<u32>,
    /// Strike spacing (default depends on spot).
    #[serde(default)]
    pub strike_interval: Option<f64>,
}

impl ChainRequest {
    /// Checks the request against the configured limits.
    ///
    /// # Errors
    /// Returns a [`PricingError`] naming the first missing or invalid field.
    pub fn validate(&self, config: &PricingConfig) -> Result<ChainParams, PricingError> {
        ChainParams::new(
            required("spotPrice", self.spot_price)?,
            required("timeToExpiry", self.time_to_expiry)?,
            required("riskFreeRate", self.risk_free_rate)?,
            required("volatility", self.volatility)?,
            self.strikes_per_side.unwrap_or(DEFAULT_STRIKES_PER_SIDE),
            self.strike_interval,
            config.max_strikes_per_side,
        )
    }
}
