//! Option pricing models.
//!
//! Every function here is pure: no I/O, no logging and no shared state, so
//! callers may price concurrently from any number of threads.
//!
//! | Module | Model |
//! |--------|-------|
//! | [`black_scholes`] | Closed-form Black-Scholes-Merton (European) |
//! | [`binomial`] | Cox-Ross-Rubinstein lattice (American and European) |
//! | [`chain`] | Strike ladder priced with the closed form |

pub mod binomial;
pub mod black_scholes;
pub mod chain;
mod error;
pub mod normal;
mod types;
pub(crate) mod validation;

pub use binomial::{BinomialParams, BinomialResult, ConvergenceInfo, ExerciseComparison};
pub use chain::{ChainParams, ChainRow, OptionChain};
pub use error::PricingError;
pub use types::{ContractParams, ExerciseStyle, Greeks, OptionType, PricingResult};
