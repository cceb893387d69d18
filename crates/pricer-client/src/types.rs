//! Request and response types for the pricer API.

use serde::{Deserialize, Serialize};

#[cfg(test)]
mod tests;

/// Call or put.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionType {
    /// Right to buy.
    Call,
    /// Right to sell.
    Put,
}

impl std::fmt::Display for OptionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Call => write!(f, "call"),
            Self::Put => write!(f, "put"),
        }
    }
}

/// Exercise style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExerciseStyle {
    /// Exercise at expiry only.
    European,
    /// Exercise at any time.
    American,
}

impl std::fmt::Display for ExerciseStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::European => write!(f, "european"),
            Self::American => write!(f, "american"),
        }
    }
}

/// Pricing model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
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
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Service version.
    pub version: String,
}

// ============================================================================
// Pricing
// ============================================================================

/// Request to price a single option.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceRequest {
    /// Current underlying price.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spot_price: Option<f64>,
    /// Strike price.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strike_price: Option<f64>,
    /// Time to expiry in years.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_to_expiry: Option<f64>,
    /// Annualized risk-free rate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk_free_rate: Option<f64>,
    /// Annualized volatility.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volatility: Option<f64>,
    /// Call or put.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub option_type: Option<OptionType>,
    /// Exercise style.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub option_style: Option<ExerciseStyle>,
    /// Model override.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<PricingModel>,
    /// Binomial lattice depth.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub steps: Option<u32>,
    /// Continuous dividend yield.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dividend_yield: Option<f64>,
    /// Compare american against european exercise.
    #[serde(skip_serializing_if = "std::ops::Not::not", default)]
    pub compare: bool,
}

impl PriceRequest {
    /// Creates a European request with every required field set.
    #[must_use]
    pub fn new(
        spot_price: f64,
        strike_price: f64,
        time_to_expiry: f64,
        risk_free_rate: f64,
        volatility: f64,
        option_type: OptionType,
    ) -> Self {
        Self {
            spot_price: Some(spot_price),
            strike_price: Some(strike_price),
            time_to_expiry: Some(time_to_expiry),
            risk_free_rate: Some(risk_free_rate),
            volatility: Some(volatility),
            option_type: Some(option_type),
            ..Self::default()
        }
    }

    /// Switches to american exercise.
    #[must_use]
    pub fn american(mut self) -> Self {
        self.option_style = Some(ExerciseStyle::American);
        self
    }

    /// Sets the lattice depth.
    #[must_use]
    pub fn with_steps(mut self, steps: u32) -> Self {
        self.steps = Some(steps);
        self
    }

    /// Requests an exercise style comparison.
    #[must_use]
    pub fn compared(mut self) -> Self {
        self.compare = true;
        self
    }
}

/// Option sensitivities, annualized.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Greeks {
    /// dV/dS.
    pub delta: f64,
    /// d2V/dS2.
    pub gamma: f64,
    /// dV/dt per year.
    pub theta: f64,
    /// dV/dsigma per unit of volatility.
    pub vega: f64,
    /// dV/dr per unit of rate.
    pub rho: f64,
}

/// Lattice price compared with the closed form.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConvergenceInfo {
    /// Closed-form price.
    pub black_scholes_price: f64,
    /// Lattice minus closed form.
    pub difference: f64,
    /// Difference as a percentage of the closed form.
    pub percent_diff: f64,
}

/// Price and Greeks of one option.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionPrice {
    /// Option value.
    pub price: f64,
    /// Sensitivities.
    pub greeks: Greeks,
    /// Exercise style priced.
    pub option_style: ExerciseStyle,
    /// Model used, absent inside comparisons.
    #[serde(default)]
    pub model: Option<PricingModel>,
    /// Lattice depth.
    #[serde(default)]
    pub steps: Option<u32>,
    /// Nodes where early exercise was optimal.
    #[serde(default)]
    pub early_exercise_nodes: Option<u32>,
    /// Closed-form comparison for european lattices.
    #[serde(default)]
    pub convergence_info: Option<ConvergenceInfo>,
}

/// American against european comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseComparison {
    /// American result.
    pub american: OptionPrice,
    /// European result.
    pub european: OptionPrice,
    /// American minus european price.
    pub early_exercise_premium: f64,
    /// Premium as a percentage of the european price.
    pub early_exercise_premium_percent: f64,
    /// Model used.
    pub model: PricingModel,
    /// Explanation of the premium.
    pub note: String,
}

/// Response to a pricing request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PriceResponse {
    /// Exercise style comparison.
    Comparison(ExerciseComparison),
    /// Single price.
    Priced(OptionPrice),
}

impl PriceResponse {
    /// The single price, if this is not a comparison.
    #[must_use]
    pub fn priced(&self) -> Option<&OptionPrice> {
        match self {
            Self::Priced(price) => Some(price),
            Self::Comparison(_) => None,
        }
    }

    /// The comparison, if one was requested.
    #[must_use]
    pub fn comparison(&self) -> Option<&ExerciseComparison> {
        match self {
            Self::Comparison(comparison) => Some(comparison),
            Self::Priced(_) => None,
        }
    }
}

// ============================================================================
// Chain
// ============================================================================

/// Request to price a strike ladder.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainRequest {
    /// Current underlying price.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spot_price: Option<f64>,
    /// Time to expiry in years.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_to_expiry: Option<f64>,
    /// Annualized risk-free rate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk_free_rate: Option<f64>,
    /// Annualized volatility.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volatility: Option<f64>,
    /// Strikes on each side of the money.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strikes_per_side: Option<u32>,
    /// Strike spacing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strike_interval: Option<f64>,
}

/// Closed-form price and Greeks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    /// Option value.
    pub price: f64,
    /// Sensitivities.
    pub greeks: Greeks,
}

/// One strike of a chain.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChainRow {
    /// Strike price.
    pub strike: f64,
    /// Call quote.
    pub call: Quote,
    /// Put quote.
    pub put: Quote,
}

/// Priced option chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionChain {
    /// Spot used for pricing.
    pub spot_price: f64,
    /// At-the-money strike.
    pub atm_strike: f64,
    /// Strike spacing.
    pub strike_interval: f64,
    /// Rows ordered by ascending strike.
    pub rows: Vec<ChainRow>,
}

// ============================================================================
// Errors
// ============================================================================

/// Error body returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Error message.
    pub error: String,
    /// Error code.
    pub code: String,
    /// Request field that failed validation.
    #[serde(default)]
    pub field: Option<String>,
}
