//! Closed-form Black-Scholes-Merton pricing for European options.
//!
//! No dividend yield term: the underlying is assumed not to pay out during the
//! life of the option.
//!
//! ```text
//! d1 = (ln(S/K) + (r + σ²/2)·T) / (σ·√T)
//! d2 = d1 - σ·√T
//! call = S·N(d1) - K·e^(-rT)·N(d2)
//! put  = K·e^(-rT)·N(-d2) - S·N(-d1)
//! ```

use super::normal::{norm_cdf, norm_pdf};
use super::types::{ContractParams, Greeks, OptionType, PricingResult};

/// Prices an option and computes its analytic Greeks.
///
/// When `σ·√T` is zero (expired option, or a product that underflows) the
/// deterministic limit is returned instead of dividing by zero: the price is
/// the discounted forward intrinsic value, delta is a step function and the
/// remaining Greeks are zero. When `σ·√T` overflows, the infinite-variance
/// limit is returned: a call is worth the spot with delta 1, a put the
/// discounted strike with delta 0, and the remaining Greeks are zero.
#[must_use]
pub fn price(params: &ContractParams) -> PricingResult {
    let sqrt_t = params.time_to_expiry.sqrt();
    let vol_sqrt_t = params.volatility * sqrt_t;

    if vol_sqrt_t <= 0.0 {
        return boundary(params);
    }
    if vol_sqrt_t.is_infinite() {
        return unbounded_variance(params);
    }

    let ContractParams {
        spot: s,
        strike: k,
        time_to_expiry: t,
        risk_free_rate: r,
        volatility: sigma,
        option_type,
    } = *params;

    // σ²T/(σ√T) is folded into ½σ√T so that σ² never has to be formed.
    let drift = ((s / k).ln() + r * t) / vol_sqrt_t;
    let d1 = drift + 0.5 * vol_sqrt_t;
    let d2 = drift - 0.5 * vol_sqrt_t;
    let discounted_strike = k * params.discount_factor();
    let pdf_d1 = norm_pdf(d1);

    // Shared by calls and puts.
    let gamma = pdf_d1 / (s * vol_sqrt_t);
    let vega = s * pdf_d1 * sqrt_t;
    let decay = -s * pdf_d1 * sigma / (2.0 * sqrt_t);

    let (price, delta, theta, rho) = match option_type {
        OptionType::Call => {
            let nd2 = norm_cdf(d2);
            (
                s * norm_cdf(d1) - discounted_strike * nd2,
                norm_cdf(d1),
                decay - r * discounted_strike * nd2,
                t * discounted_strike * nd2,
            )
        }
        OptionType::Put => {
            let n_minus_d2 = norm_cdf(-d2);
            (
                discounted_strike * n_minus_d2 - s * norm_cdf(-d1),
                norm_cdf(d1) - 1.0,
                decay + r * discounted_strike * n_minus_d2,
                -t * discounted_strike * n_minus_d2,
            )
        }
    };

    PricingResult {
        // Cancellation can leave a deep out-of-the-money price a few ulps below zero.
        price: price.max(0.0),
        greeks: Greeks {
            delta,
            gamma,
            theta,
            vega,
            rho,
        },
    }
}

/// Zero-variance limit of the model.
fn boundary(params: &ContractParams) -> PricingResult {
    let forward_strike = params.strike * params.discount_factor();
    let price = params.option_type.intrinsic(params.spot, forward_strike);

    let delta = match params.option_type {
        OptionType::Call if params.spot > forward_strike => 1.0,
        OptionType::Put if params.spot < forward_strike => -1.0,
        _ => 0.0,
    };

    PricingResult {
        price,
        greeks: Greeks {
            delta,
            ..Greeks::default()
        },
    }
}

/// Infinite-variance limit of the model.
fn unbounded_variance(params: &ContractParams) -> PricingResult {
    let (price, delta) = match params.option_type {
        OptionType::Call => (params.spot, 1.0),
        OptionType::Put => (params.strike * params.discount_factor(), 0.0),
    };

    PricingResult {
        price,
        greeks: Greeks {
            delta,
            ..Greeks::default()
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn params(
        spot: f64,
        strike: f64,
        t: f64,
        r: f64,
        sigma: f64,
        option_type: OptionType,
    ) -> ContractParams {
        ContractParams::new(spot, strike, t, r, sigma, option_type).expect("valid params")
    }

    #[test]
    fn test_textbook_call_price() {
        let result = price(&params(100.0, 100.0, 1.0, 0.05, 0.2, OptionType::Call));
        assert_abs_diff_eq!(result.price, 10.4506, epsilon = 1e-3);
    }

    #[test]
    fn test_textbook_call_greeks() {
        let greeks = price(&params(100.0, 100.0, 1.0, 0.05, 0.2, OptionType::Call)).greeks;
        assert_abs_diff_eq!(greeks.delta, 0.636_831, epsilon = 1e-5);
        assert_abs_diff_eq!(greeks.gamma, 0.018_762, epsilon = 1e-5);
        assert_abs_diff_eq!(greeks.vega, 37.524_03, epsilon = 1e-3);
        assert_abs_diff_eq!(greeks.theta, -6.414_03, epsilon = 1e-3);
        assert_abs_diff_eq!(greeks.rho, 53.232_49, epsilon = 1e-3);
    }

    #[test]
    fn test_textbook_put() {
        let result = price(&params(100.0, 100.0, 1.0, 0.05, 0.2, OptionType::Put));
        assert_abs_diff_eq!(result.price, 5.5735, epsilon = 1e-3);
        assert_abs_diff_eq!(result.greeks.delta, -0.363_169, epsilon = 1e-5);
        assert_abs_diff_eq!(result.greeks.theta, -1.657_88, epsilon = 1e-3);
        assert_abs_diff_eq!(result.greeks.rho, -41.890_46, epsilon = 1e-3);
    }

    #[test]
    fn test_put_call_parity_at_the_money_zero_rate() {
        for t in [0.1, 0.5, 1.0, 3.0] {
            let call = price(&params(100.0, 100.0, t, 0.0, 0.25, OptionType::Call));
            let put = price(&params(100.0, 100.0, t, 0.0, 0.25, OptionType::Put));
            assert_abs_diff_eq!(call.price - put.price, 0.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_put_call_parity_general() {
        for (s, k, t, r, sigma) in [
            (100.0, 90.0, 0.5, 0.03, 0.3),
            (50.0, 70.0, 2.0, 0.08, 0.45),
            (250.0, 240.0, 0.02, -0.01, 0.15),
        ] {
            let call = price(&params(s, k, t, r, sigma, OptionType::Call));
            let put = price(&params(s, k, t, r, sigma, OptionType::Put));
            let expected = s - k * (-r * t).exp();
            assert_abs_diff_eq!(call.price - put.price, expected, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_near_expiry_converges_to_intrinsic() {
        let t = 1e-8;
        for (s, k) in [(110.0, 100.0), (90.0, 100.0), (100.0, 100.0)] {
            let call = price(&params(s, k, t, 0.05, 0.2, OptionType::Call));
            let put = price(&params(s, k, t, 0.05, 0.2, OptionType::Put));
            assert_abs_diff_eq!(call.price, (s - k).max(0.0), epsilon = 1e-3);
            assert_abs_diff_eq!(put.price, (k - s).max(0.0), epsilon = 1e-3);
        }
    }

    #[test]
    fn test_expired_option_is_intrinsic_with_step_delta() {
        let call = price(&params(110.0, 100.0, 0.0, 0.05, 0.2, OptionType::Call));
        assert_eq!(call.price, 10.0);
        assert_eq!(call.greeks.delta, 1.0);
        assert_eq!(call.greeks.gamma, 0.0);
        assert_eq!(call.greeks.vega, 0.0);
        assert_eq!(call.greeks.theta, 0.0);
        assert_eq!(call.greeks.rho, 0.0);

        let otm_call = price(&params(90.0, 100.0, 0.0, 0.05, 0.2, OptionType::Call));
        assert_eq!(otm_call.price, 0.0);
        assert_eq!(otm_call.greeks.delta, 0.0);

        let put = price(&params(90.0, 100.0, 0.0, 0.05, 0.2, OptionType::Put));
        assert_eq!(put.price, 10.0);
        assert_eq!(put.greeks.delta, -1.0);

        let atm_put = price(&params(100.0, 100.0, 0.0, 0.05, 0.2, OptionType::Put));
        assert_eq!(atm_put.price, 0.0);
        assert_eq!(atm_put.greeks.delta, 0.0);
    }

    #[test]
    fn test_underflowing_variance_uses_boundary() {
        let result = price(&params(120.0, 100.0, 1e-320, 0.05, 1e-200, OptionType::Call));
        assert!(result.price.is_finite());
        assert_abs_diff_eq!(result.price, 20.0, epsilon = 1e-9);
        assert_eq!(result.greeks.delta, 1.0);
    }

    #[test]
    fn test_huge_volatility_reaches_variance_limit() {
        // σ² overflows here while σ√T does not.
        let call = price(&params(100.0, 100.0, 1.0, 0.05, 1e155, OptionType::Call));
        let put = price(&params(100.0, 100.0, 1.0, 0.05, 1e155, OptionType::Put));

        assert_abs_diff_eq!(call.price, 100.0, epsilon = 1e-9);
        assert_abs_diff_eq!(call.greeks.delta, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(put.price, 100.0 * (-0.05f64).exp(), epsilon = 1e-9);
        assert_abs_diff_eq!(put.greeks.delta, 0.0, epsilon = 1e-12);
        assert!(call.greeks.theta.is_finite() && put.greeks.rho.is_finite());
    }

    #[test]
    fn test_overflowing_variance_uses_limit() {
        let call = price(&params(100.0, 100.0, 4.0, 0.05, 1.7e308, OptionType::Call));
        let put = price(&params(100.0, 100.0, 4.0, 0.05, 1.7e308, OptionType::Put));

        assert_eq!(call.price, 100.0);
        assert_eq!(call.greeks.delta, 1.0);
        assert_abs_diff_eq!(put.price, 100.0 * (-0.2f64).exp(), epsilon = 1e-12);
        assert_eq!(put.greeks.gamma, 0.0);
    }

    #[test]
    fn test_delta_bounds_and_shared_gamma_vega() {
        for s in [20.0, 80.0, 100.0, 120.0, 400.0] {
            for t in [1e-6, 0.01, 0.5, 5.0] {
                for sigma in [0.01, 0.2, 1.5] {
                    let call = price(&params(s, 100.0, t, 0.04, sigma, OptionType::Call));
                    let put = price(&params(s, 100.0, t, 0.04, sigma, OptionType::Put));

                    assert!((0.0..=1.0).contains(&call.greeks.delta));
                    assert!((-1.0..=0.0).contains(&put.greeks.delta));
                    assert!(call.greeks.gamma >= 0.0);
                    assert!(call.greeks.vega >= 0.0);
                    assert_abs_diff_eq!(call.greeks.gamma, put.greeks.gamma, epsilon = 1e-12);
                    assert_abs_diff_eq!(call.greeks.vega, put.greeks.vega, epsilon = 1e-12);
                    assert!(call.price >= 0.0);
                    assert!(put.price >= 0.0);
                }
            }
        }
    }

    #[test]
    fn test_price_non_decreasing_in_volatility() {
        for option_type in [OptionType::Call, OptionType::Put] {
            let mut previous = 0.0;
            for step in 1..=60 {
                let sigma = f64::from(step) * 0.025;
                let current = price(&params(100.0, 105.0, 0.75, 0.03, sigma, option_type)).price;
                assert!(
                    current >= previous - 1e-12,
                    "{option_type} price fell from {previous} to {current} at sigma {sigma}"
                );
                previous = current;
            }
        }
    }

    #[test]
    fn test_delta_matches_finite_difference() {
        let h = 1e-4;
        let up = price(&params(100.0 + h, 95.0, 0.4, 0.02, 0.3, OptionType::Call)).price;
        let down = price(&params(100.0 - h, 95.0, 0.4, 0.02, 0.3, OptionType::Call)).price;
        let analytic = price(&params(100.0, 95.0, 0.4, 0.02, 0.3, OptionType::Call)).greeks;
        assert_abs_diff_eq!(analytic.delta, (up - down) / (2.0 * h), epsilon = 1e-6);
    }
}
