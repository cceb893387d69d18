//! Contract parameters and pricing results shared by every pricing model.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Right conveyed by the option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum OptionType {
    /// Right to buy the underlying at the strike.
    Call,
    /// Right to sell the underlying at the strike.
    Put,
}

impl OptionType {
    /// Payoff of immediate exercise at the given spot.
    #[must_use]
    pub fn intrinsic(self, spot: f64, strike: f64) -> f64 {
        match self {
            Self::Call => (spot - strike).max(0.0),
            Self::Put => (strike - spot).max(0.0),
        }
    }
}

impl std::fmt::Display for OptionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Call => write!(f, "call"),
            Self::Put => write!(f, "put"),
        }
    }
}

/// When the option may be exercised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ExerciseStyle {
    /// Exercise only at expiry.
    #[default]
    European,
    /// Exercise at any time up to expiry.
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

/// Validated market and contract inputs for a single option.
///
/// Construct through [`ContractParams::new`] so that the domain invariants
/// (positive spot, strike and volatility, non-negative expiry, finite values)
/// always hold for the pricers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContractParams {
    /// Current underlying price.
    pub spot: f64,
    /// Strike price.
    pub strike: f64,
    /// Time to expiry in years.
    pub time_to_expiry: f64,
    /// Annualized continuously compounded risk-free rate.
    pub risk_free_rate: f64,
    /// Annualized volatility.
    pub volatility: f64,
    /// Call or put.
    pub option_type: OptionType,
}

impl ContractParams {
    /// Builds contract parameters, checking every numeric domain.
    ///
    /// # Errors
    /// Returns [`PricingError::InvalidField`](super::PricingError::InvalidField)
    /// naming the first field outside its domain.
    pub fn new(
        spot: f64,
        strike: f64,
        time_to_expiry: f64,
        risk_free_rate: f64,
        volatility: f64,
        option_type: OptionType,
    ) -> Result<Self, super::PricingError> {
        use super::validation::{finite, non_negative, positive};

        Ok(Self {
            spot: positive("spotPrice", spot)?,
            strike: positive("strikePrice", strike)?,
            time_to_expiry: non_negative("timeToExpiry", time_to_expiry)?,
            risk_free_rate: finite("riskFreeRate", risk_free_rate)?,
            volatility: positive("volatility", volatility)?,
            option_type,
        })
    }

    /// Copy of these parameters for the other option type.
    #[must_use]
    pub fn with_option_type(self, option_type: OptionType) -> Self {
        Self {
            option_type,
            ..self
        }
    }

    /// Present value factor `e^(-rT)`.
    #[must_use]
    pub fn discount_factor(&self) -> f64 {
        (-self.risk_free_rate * self.time_to_expiry).exp()
    }
}

/// First-order sensitivities of the option price.
///
/// All values are annualized: theta is the price change per year of
/// calendar time, vega per 1.00 of volatility and rho per 1.00 of rate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Greeks {
    /// dV/dS.
    pub delta: f64,
    /// d²V/dS².
    pub gamma: f64,
    /// dV/dt per year; negative values are time decay.
    pub theta: f64,
    /// dV/dσ.
    pub vega: f64,
    /// dV/dr.
    pub rho: f64,
}

/// Theoretical price together with its sensitivities.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PricingResult {
    /// Theoretical option value.
    pub price: f64,
    /// Option sensitivities.
    pub greeks: Greeks,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::PricingError;

    #[test]
    fn test_intrinsic_values() {
        assert_eq!(OptionType::Call.intrinsic(110.0, 100.0), 10.0);
        assert_eq!(OptionType::Call.intrinsic(90.0, 100.0), 0.0);
        assert_eq!(OptionType::Put.intrinsic(90.0, 100.0), 10.0);
        assert_eq!(OptionType::Put.intrinsic(110.0, 100.0), 0.0);
    }

    #[test]
    fn test_option_type_wire_format() {
        assert_eq!(serde_json::to_string(&OptionType::Call).unwrap(), "\"call\"");
        let put: OptionType = serde_json::from_str("\"put\"").unwrap();
        assert_eq!(put, OptionType::Put);
        assert!(serde_json::from_str::<OptionType>("\"straddle\"").is_err());
    }

    #[test]
    fn test_exercise_style_default_is_european() {
        assert_eq!(ExerciseStyle::default(), ExerciseStyle::European);
        assert_eq!(ExerciseStyle::American.to_string(), "american");
    }

    #[test]
    fn test_contract_params_accepts_zero_expiry() {
        let params = ContractParams::new(100.0, 100.0, 0.0, 0.05, 0.2, OptionType::Call);
        assert!(params.is_ok());
    }

    #[test]
    fn test_contract_params_rejects_out_of_domain() {
        let cases = [
            ((0.0, 100.0, 1.0, 0.05, 0.2), "spotPrice"),
            ((100.0, -5.0, 1.0, 0.05, 0.2), "strikePrice"),
            ((100.0, 100.0, -0.1, 0.05, 0.2), "timeToExpiry"),
            ((100.0, 100.0, 1.0, f64::INFINITY, 0.2), "riskFreeRate"),
            ((100.0, 100.0, 1.0, 0.05, 0.0), "volatility"),
            ((100.0, 100.0, 1.0, 0.05, f64::NAN), "volatility"),
        ];

        for ((s, k, t, r, v), expected) in cases {
            let err = ContractParams::new(s, k, t, r, v, OptionType::Put).unwrap_err();
            match err {
                PricingError::InvalidField { field, .. } => assert_eq!(field, expected),
                other => panic!("unexpected error: {other:?}"),
            }
        }
    }

    #[test]
    fn test_with_option_type() {
        let call = ContractParams::new(100.0, 95.0, 0.5, 0.01, 0.3, OptionType::Call).unwrap();
        let put = call.with_option_type(OptionType::Put);
        assert_eq!(put.option_type, OptionType::Put);
        assert_eq!(put.strike, 95.0);
    }

    #[test]
    fn test_greeks_serialization() {
        let greeks = Greeks {
            delta: 0.5,
            gamma: 0.02,
            theta: -6.4,
            vega: 37.5,
            rho: 53.2,
        };
        let json = serde_json::to_string(&greeks).unwrap();
        assert!(json.contains("\"delta\":0.5"));
        assert!(json.contains("\"theta\":-6.4"));
    }
}
