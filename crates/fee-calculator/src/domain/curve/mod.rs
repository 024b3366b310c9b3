//! Fee curves. The deposit curve charges more the more dominant an asset
//! becomes, the redemption curve charges more the less dominant it becomes.

use {
    super::{asset::PoolQuantities, parameters::FeeParameters},
    crate::error::Error,
    primitive_types::U256,
    serde::Serialize,
};

pub mod deposit;
pub mod redemption;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Operation {
    Deposit,
    Redemption,
}

impl Operation {
    /// Evaluates the curve of this operation. The result is never negative
    /// but is not yet checked against the amount.
    pub fn fee(self, parameters: &FeeParameters, quantities: &PoolQuantities) -> Result<U256, Error> {
        match self {
            Self::Deposit => deposit::fee(parameters, quantities),
            Self::Redemption => redemption::fee(parameters, quantities),
        }
    }
}
