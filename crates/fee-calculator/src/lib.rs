//! Dominance based deposit and redemption fees for multi-asset pools.
//!
//! Depositing an asset that already dominates a pool is expensive, redeeming
//! it is cheap; the opposite holds for under-represented assets. Fees follow
//! logarithmic curves evaluated in 18-decimal signed fixed point and are
//! split among a configured set of recipients.

pub mod calculator;
pub mod domain;
pub mod error;
pub mod infra;
pub mod math;
mod run;

pub use {
    calculator::FeeCalculator,
    error::{ConfigError, Error},
    run::{run_with, start},
};
