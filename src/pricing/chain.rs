//! Option chain generation: a ladder of strikes around spot priced as calls
//! and puts with the closed-form model.

use super::black_scholes;
use super::types::{ContractParams, OptionType, PricingResult};
use super::validation::{finite, non_negative, positive};
use super::PricingError;
use serde::Serialize;
use utoipa::ToSchema;

/// Default number of strikes on each side of the at-the-money strike.
pub const DEFAULT_STRIKES_PER_SIDE: u32 = 10;

/// Market inputs and ladder shape for a chain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChainParams {
    /// Current underlying price.
    pub spot: f64,
    /// Time to expiry in years.
    pub time_to_expiry: f64,
    /// Annualized risk-free rate.
    pub risk_free_rate: f64,
    /// Annualized volatility.
    pub volatility: f64,
    /// Strikes on each side of the at-the-money strike.
    pub strikes_per_side: u32,
    /// Distance between adjacent strikes.
    pub strike_interval: f64,
}

impl ChainParams {
    /// Builds chain parameters. A missing interval falls back to
    /// [`default_strike_interval`].
    ///
    /// # Errors
    /// Returns an error naming the first out-of-domain field, including
    /// `strikesPerSide` when it exceeds `max_strikes_per_side` and
    /// `strikeInterval` when the outermost strike is not finite.
    pub fn new(
        spot: f64,
        time_to_expiry: f64,
        risk_free_rate: f64,
        volatility: f64,
        strikes_per_side: u32,
        strike_interval: Option<f64>,
        max_strikes_per_side: u32,
    ) -> Result<Self, PricingError> {
        let spot = positive("spotPrice", spot)?;

        if strikes_per_side > max_strikes_per_side {
            return Err(PricingError::invalid(
                "strikesPerSide",
                format!("must not exceed {max_strikes_per_side}"),
            ));
        }

        let strike_interval = match strike_interval {
            Some(interval) => positive("strikeInterval", interval)?,
            None => default_strike_interval(spot),
        };

        let atm = (spot / strike_interval).round() * strike_interval;
        if !(atm + f64::from(strikes_per_side) * strike_interval).is_finite() {
            return Err(PricingError::invalid(
                "strikeInterval",
                "strike ladder exceeds the floating-point range",
            ));
        }

        Ok(Self {
            spot,
            time_to_expiry: non_negative("timeToExpiry", time_to_expiry)?,
            risk_free_rate: finite("riskFreeRate", risk_free_rate)?,
            volatility: positive("volatility", volatility)?,
            strikes_per_side,
            strike_interval,
        })
    }

    /// Spot rounded to the nearest strike interval.
    #[must_use]
    pub fn atm_strike(&self) -> f64 {
        (self.spot / self.strike_interval).round() * self.strike_interval
    }

    /// Ascending strikes centred on the at-the-money strike. Non-positive
    /// strikes are skipped.
    #[must_use]
    pub fn strikes(&self) -> Vec<f64> {
        let atm = self.atm_strike();
        let side = i64::from(self.strikes_per_side);

        (-side..=side)
            .map(|offset| atm + offset as f64 * self.strike_interval)
            .filter(|&strike| strike > 0.0)
            .collect()
    }
}

/// Listed-market strike spacing for a given spot.
#[must_use]
pub fn default_strike_interval(spot: f64) -> f64 {
    if spot > 100.0 {
        5.0
    } else if spot > 50.0 {
        2.5
    } else {
        1.0
    }
}

/// One strike of the chain.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
pub struct ChainRow {
    /// Strike price.
    pub strike: f64,
    /// Call price and Greeks.
    pub call: PricingResult,
    /// Put price and Greeks.
    pub put: PricingResult,
}

/// Priced option chain.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
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

/// Prices every strike of the chain.
#[must_use]
pub fn build_chain(params: &ChainParams) -> OptionChain {
    let rows = params
        .strikes()
        .into_iter()
        .map(|strike| {
            let call = ContractParams {
                spot: params.spot,
                strike,
                time_to_expiry: params.time_to_expiry,
                risk_free_rate: params.risk_free_rate,
                volatility: params.volatility,
                option_type: OptionType::Call,
            };
            ChainRow {
                strike,
                call: black_scholes::price(&call),
                put: black_scholes::price(&call.with_option_type(OptionType::Put)),
            }
        })
        .collect();

    OptionChain {
        spot_price: params.spot,
        atm_strike: params.atm_strike(),
        strike_interval: params.strike_interval,
        rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn chain_params(spot: f64, per_side: u32, interval: Option<f64>) -> ChainParams {
        ChainParams::new(spot, 0.25, 0.05, 0.3, per_side, interval, 50).unwrap()
    }

    #[test]
    fn test_default_strike_interval() {
        assert_eq!(default_strike_interval(450.0), 5.0);
        assert_eq!(default_strike_interval(75.0), 2.5);
        assert_eq!(default_strike_interval(50.0), 1.0);
        assert_eq!(default_strike_interval(12.0), 1.0);
    }

    #[test]
    fn test_strikes_centred_on_atm() {
        let params = chain_params(101.7, 2, None);
        assert_eq!(params.atm_strike(), 100.0);
        assert_eq!(params.strikes(), vec![90.0, 95.0, 100.0, 105.0, 110.0]);
    }

    #[test]
    fn test_non_positive_strikes_skipped() {
        let params = chain_params(3.0, 5, Some(1.0));
        let strikes = params.strikes();
        assert_eq!(strikes.first().copied(), Some(1.0));
        assert_eq!(strikes.last().copied(), Some(8.0));
        assert!(strikes.iter().all(|&k| k > 0.0));
    }

    #[test]
    fn test_rejects_too_many_strikes() {
        let err = ChainParams::new(100.0, 0.25, 0.05, 0.3, 51, None, 50).unwrap_err();
        assert_eq!(err.field(), "strikesPerSide");
    }

    #[test]
    fn test_rejects_bad_interval_and_volatility() {
        let err = ChainParams::new(100.0, 0.25, 0.05, 0.3, 5, Some(0.0), 50).unwrap_err();
        assert_eq!(err.field(), "strikeInterval");

        let err = ChainParams::new(100.0, 0.25, 0.05, -0.3, 5, None, 50).unwrap_err();
        assert_eq!(err.field(), "volatility");
    }

    #[test]
    fn test_rejects_interval_overflowing_the_ladder() {
        let err = ChainParams::new(1.0, 0.25, 0.05, 0.3, 10, Some(1e308), 50).unwrap_err();
        assert_eq!(err.field(), "strikeInterval");
    }

    #[test]
    fn test_wide_interval_prices_stay_finite() {
        let chain = build_chain(&chain_params(1.0, 10, Some(1e300)));

        assert_eq!(chain.rows.len(), 10);
        for row in &chain.rows {
            assert!(row.strike.is_finite() && row.strike > 0.0);
            assert!(row.call.price.is_finite());
            assert!(row.put.price.is_finite());
            assert!(row.put.greeks.delta.is_finite());
        }
    }

    #[test]
    fn test_chain_rows_ascending_and_satisfy_parity() {
        let params = chain_params(250.0, 10, None);
        let chain = build_chain(&params);

        assert_eq!(chain.rows.len(), 21);
        assert_eq!(chain.atm_strike, 250.0);
        assert!(chain.rows.windows(2).all(|w| w[0].strike < w[1].strike));

        let discount = (-params.risk_free_rate * params.time_to_expiry).exp();
        for row in &chain.rows {
            let parity = params.spot - row.strike * discount;
            assert_abs_diff_eq!(row.call.price - row.put.price, parity, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_call_prices_decrease_with_strike() {
        let chain = build_chain(&chain_params(60.0, 6, None));
        assert!(chain.rows.windows(2).all(|w| w[0].call.price >= w[1].call.price));
        assert!(chain.rows.windows(2).all(|w| w[0].put.price <= w[1].put.price));
    }

    #[test]
    fn test_chain_serialization() {
        let chain = build_chain(&chain_params(100.0, 1, None));
        let json = serde_json::to_string(&chain).unwrap();
        assert!(json.contains("\"atmStrike\":100.0"));
        assert!(json.contains("\"strikeInterval\":2.5"));
        assert!(json.contains("\"rows\""));
    }
}
