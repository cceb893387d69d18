//! Standard normal distribution helpers.

use statrs::function::erf::erfc;
use std::f64::consts::{FRAC_1_SQRT_2, PI};

/// Standard normal CDF `N(x)`.
///
/// Evaluated as `0.5 * erfc(-x / sqrt(2))`, which keeps full double precision
/// in both tails instead of cancelling `1 - erf` for large `|x|`.
#[must_use]
pub fn norm_cdf(x: f64) -> f64 {
    0.5 * erfc(-x * FRAC_1_SQRT_2)
}

/// Standard normal PDF `φ(x)`.
#[must_use]
pub fn norm_pdf(x: f64) -> f64 {
    (-0.5 * x * x).exp() / (2.0 * PI).sqrt()
}
