//! Cox-Ross-Rubinstein binomial lattice for American and European options.
//!
//! Each step moves the underlying up by `u = e^(σ√Δt)` or down by `d = 1/u`,
//! with risk-neutral up probability `p = (e^((r-q)Δt) - d) / (u - d)`.
//! American exercise compares intrinsic and continuation value at every node.
//! Delta, gamma and theta are read off the first two lattice steps; vega and
//! rho are estimated by repricing with bumped inputs.

use super::PricingError;
use super::black_scholes;
use super::types::{ContractParams, ExerciseStyle, Greeks, OptionType};
use serde::Serialize;
use utoipa::ToSchema;

/// Default lattice depth.
pub const DEFAULT_STEPS: u32 = 100;

/// Absolute volatility bump for vega.
const VOL_BUMP: f64 = 0.01;
/// Floor for the lower volatility leg.
const MIN_VOLATILITY: f64 = 0.01;
/// Absolute rate bump for rho.
const RATE_BUMP: f64 = 0.01;

/// Lattice configuration on top of the contract parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BinomialParams {
    /// Contract being priced.
    pub contract: ContractParams,
    /// Exercise style.
    pub style: ExerciseStyle,
    /// Number of time steps in the lattice.
    pub steps: u32,
    /// Continuous dividend yield.
    pub dividend_yield: f64,
}

impl BinomialParams {
    /// Builds lattice parameters.
    ///
    /// # Errors
    /// Returns an error naming `steps` when it is zero, or `dividendYield`
    /// when it is negative or not finite.
    pub fn new(
        contract: ContractParams,
        style: ExerciseStyle,
        steps: u32,
        dividend_yield: f64,
    ) -> Result<Self, PricingError> {
        if steps == 0 {
            return Err(PricingError::invalid("steps", "must be at least 1"));
        }
        let dividend_yield = super::validation::non_negative("dividendYield", dividend_yield)?;

        Ok(Self {
            contract,
            style,
            steps,
            dividend_yield,
        })
    }

    fn with_contract(self, contract: ContractParams) -> Self {
        Self { contract, ..self }
    }

    fn with_style(self, style: ExerciseStyle) -> Self {
        Self { style, ..self }
    }
}

/// Analytic reference for a lattice price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConvergenceInfo {
    /// Black-Scholes price for the same contract.
    pub black_scholes_price: f64,
    /// Lattice price minus Black-Scholes price.
    pub difference: f64,
    /// Difference as a percentage of the Black-Scholes price.
    pub percent_diff: f64,
}

/// Lattice pricing output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BinomialResult {
    /// Theoretical option value.
    pub price: f64,
    /// Lattice Greeks.
    pub greeks: Greeks,
    /// Exercise style used.
    pub option_style: ExerciseStyle,
    /// Lattice depth used.
    pub steps: u32,
    /// Nodes where early exercise beat continuation (American only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub early_exercise_nodes: Option<u32>,
    /// Comparison against the closed form. Omitted when a dividend yield is
    /// set, since the analytic model carries no yield term.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub convergence_info: Option<ConvergenceInfo>,
}

/// American against European prices for identical inputs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseComparison {
    /// American exercise result.
    pub american: BinomialResult,
    /// European exercise result.
    pub european: BinomialResult,
    /// American price minus European price.
    pub early_exercise_premium: f64,
    /// Premium as a percentage of the European price.
    pub early_exercise_premium_percent: f64,
}

/// Prices an option on the lattice and estimates its Greeks.
///
/// # Errors
/// Returns an error naming `steps` if the step is too coarse for the
/// rate, yield and volatility combination (risk-neutral probability outside
/// `[0, 1]`).
pub fn price(params: &BinomialParams) -> Result<BinomialResult, PricingError> {
    let contract = &params.contract;

    if is_flat(params) {
        let intrinsic = contract
            .option_type
            .intrinsic(contract.spot, contract.strike);
        return Ok(BinomialResult {
            price: intrinsic,
            greeks: Greeks::default(),
            option_style: params.style,
            steps: params.steps,
            early_exercise_nodes: None,
            convergence_info: None,
        });
    }

    let lattice = roll_back(params)?;
    let value = lattice.value;
    let greeks = lattice_greeks(params, &lattice);

    let convergence_info = (params.dividend_yield == 0.0).then(|| {
        let analytic = black_scholes::price(contract).price;
        let difference = value - analytic;
        ConvergenceInfo {
            black_scholes_price: analytic,
            difference,
            percent_diff: if analytic > 0.0 {
                difference / analytic * 100.0
            } else {
                0.0
            },
        }
    });

    Ok(BinomialResult {
        price: value,
        greeks,
        option_style: params.style,
        steps: params.steps,
        early_exercise_nodes: match params.style {
            ExerciseStyle::American => Some(lattice.early_exercise),
            ExerciseStyle::European => None,
        },
        convergence_info,
    })
}

/// Prices the same contract with both exercise styles.
///
/// # Errors
/// Propagates lattice errors from [`price`].
pub fn compare(params: &BinomialParams) -> Result<ExerciseComparison, PricingError> {
    let american = price(&params.with_style(ExerciseStyle::American))?;
    let european = price(&params.with_style(ExerciseStyle::European))?;

    let premium = american.price - european.price;
    let premium_percent = if european.price > 0.0 {
        premium / european.price * 100.0
    } else {
        0.0
    };

    Ok(ExerciseComparison {
        american,
        european,
        early_exercise_premium: premium,
        early_exercise_premium_percent: premium_percent,
    })
}

/// True when the lattice cannot branch: an expired contract, or a step so
/// short that the up factor rounds to one.
fn is_flat(params: &BinomialParams) -> bool {
    let c = &params.contract;
    let dt = c.time_to_expiry / f64::from(params.steps);
    c.time_to_expiry <= 0.0 || (c.volatility * dt.sqrt()).exp() <= 1.0
}

/// Values retained from a backward induction.
struct Lattice {
    /// Root value.
    value: f64,
    /// Nodes where early exercise beat continuation.
    early_exercise: u32,
    /// Option values one step in, down node first.
    step_one: Option<[f64; 2]>,
    /// Option values two steps in, down node first.
    step_two: Option<[f64; 3]>,
    /// Up factor.
    u: f64,
    /// Step length in years.
    dt: f64,
}

fn roll_back(params: &BinomialParams) -> Result<Lattice, PricingError> {
    let ContractParams {
        spot,
        strike,
        time_to_expiry,
        risk_free_rate,
        volatility,
        option_type,
    } = params.contract;

    let n = params.steps as usize;
    let dt = time_to_expiry / f64::from(params.steps);
    let vol_sqrt_dt = volatility * dt.sqrt();
    let u = vol_sqrt_dt.exp();
    let d = 1.0 / u;
    let discount = (-risk_free_rate * dt).exp();
    let p = (((risk_free_rate - params.dividend_yield) * dt).exp() - d) / (u - d);

    if !(0.0..=1.0).contains(&p) {
        return Err(PricingError::invalid(
            "steps",
            format!("risk-neutral probability {p:.4} outside [0, 1]; increase the step count"),
        ));
    }

    // Every node spot must be finite.
    if !(spot * (vol_sqrt_dt * f64::from(params.steps)).exp()).is_finite() {
        return Err(PricingError::invalid(
            "steps",
            "lattice exceeds the floating-point range; reduce steps or volatility",
        ));
    }

    let node_spot = |up_moves: usize, total: usize| {
        spot * (vol_sqrt_dt * (2.0 * up_moves as f64 - total as f64)).exp()
    };

    let mut values: Vec<f64> = (0..=n)
        .map(|j| option_type.intrinsic(node_spot(j, n), strike))
        .collect();

    let snapshot = |values: &[f64], step: usize| -> (Option<[f64; 2]>, Option<[f64; 3]>) {
        match step {
            1 => (Some([values[0], values[1]]), None),
            2 => (None, Some([values[0], values[1], values[2]])),
            _ => (None, None),
        }
    };

    let (mut step_one, mut step_two) = snapshot(&values, n);
    let mut early_exercise = 0u32;

    for i in (0..n).rev() {
        for j in 0..=i {
            let continuation = discount * (p * values[j + 1] + (1.0 - p) * values[j]);
            values[j] = match params.style {
                ExerciseStyle::European => continuation,
                ExerciseStyle::American => {
                    let exercise = option_type.intrinsic(node_spot(j, i), strike);
                    if exercise > continuation {
                        early_exercise += 1;
                        exercise
                    } else {
                        continuation
                    }
                }
            };
        }

        let (one, two) = snapshot(&values, i);
        step_one = step_one.or(one);
        step_two = step_two.or(two);
    }

    Ok(Lattice {
        value: values[0],
        early_exercise,
        step_one,
        step_two,
        u,
        dt,
    })
}

fn reprice(params: &BinomialParams, contract: ContractParams) -> Option<f64> {
    roll_back(&params.with_contract(contract))
        .ok()
        .map(|lattice| lattice.value)
}

/// Slope of the lattice value across a bumped input. A bumped leg whose
/// lattice is invalid is replaced by the base point, giving a one-sided
/// difference; with both legs invalid the sensitivity is reported as zero.
fn bumped_slope(
    params: &BinomialParams,
    base: (f64, f64),
    low: (f64, ContractParams),
    high: (f64, ContractParams),
) -> f64 {
    let low = reprice(params, low.1).map(|value| (low.0, value));
    let high = reprice(params, high.1).map(|value| (high.0, value));

    let ((x0, v0), (x1, v1)) = match (low, high) {
        (Some(low), Some(high)) => (low, high),
        (None, Some(high)) => (base, high),
        (Some(low), None) => (low, base),
        (None, None) => return 0.0,
    };

    let dx = x1 - x0;
    if dx == 0.0 { 0.0 } else { (v1 - v0) / dx }
}

/// Delta, gamma and theta come from the first lattice nodes; vega and rho
/// from differences on bumped inputs.
fn lattice_greeks(params: &BinomialParams, lattice: &Lattice) -> Greeks {
    let c = params.contract;
    let s = c.spot;
    let u = lattice.u;
    let d = 1.0 / u;

    let delta = lattice
        .step_one
        .map(|[down, up]| (up - down) / (s * u - s * d))
        .unwrap_or_default();

    let (gamma, theta) = match lattice.step_two {
        Some([dd, ud, uu]) => {
            let (s_uu, s_dd) = (s * u * u, s * d * d);
            let delta_up = (uu - ud) / (s_uu - s);
            let delta_down = (ud - dd) / (s - s_dd);
            let gamma = (delta_up - delta_down) / (0.5 * (s_uu - s_dd));
            // The middle node two steps in sits at the current spot.
            let theta = (ud - lattice.value) / (2.0 * lattice.dt);
            (gamma, theta)
        }
        None => (0.0, 0.0),
    };

    let base_value = lattice.value;

    let vol_high = c.volatility + VOL_BUMP;
    let vol_low = (c.volatility - VOL_BUMP).max(MIN_VOLATILITY);
    let vega = bumped_slope(
        params,
        (c.volatility, base_value),
        (vol_low, ContractParams { volatility: vol_low, ..c }),
        (vol_high, ContractParams { volatility: vol_high, ..c }),
    );

    let rate_high = c.risk_free_rate + RATE_BUMP;
    let rate_low = c.risk_free_rate - RATE_BUMP;
    let rho = bumped_slope(
        params,
        (c.risk_free_rate, base_value),
        (rate_low, ContractParams { risk_free_rate: rate_low, ..c }),
        (rate_high, ContractParams { risk_free_rate: rate_high, ..c }),
    );

    // Lattice deltas can overshoot their range by rounding deep in the money.
    let delta = match c.option_type {
        OptionType::Call => delta.clamp(0.0, 1.0),
        OptionType::Put => delta.clamp(-1.0, 0.0),
    };

    Greeks {
        delta,
        gamma,
        theta,
        vega,
        rho,
    }
}
