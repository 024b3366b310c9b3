//! The fee engine: dominance model, fee curves, fee parameters and the split
//! of fees among recipients. Everything in here is pure and synchronous.

pub mod asset;
pub mod config;
pub mod curve;
pub mod distribution;
pub mod dominance;
pub mod parameters;
pub mod setup;

#[cfg(test)]
mod proptest_properties;

pub use {
    asset::{AssetRef, PoolQuantities},
    config::FeeConfig,
    curve::Operation,
    distribution::FeeDistribution,
    dominance::Dominance,
    parameters::{FeeParameters, ParameterUpdate},
    setup::FeeSetup,
};
