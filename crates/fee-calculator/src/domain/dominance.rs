//! Dominance of an asset: the fraction of the pool it makes up, before and
//! after an operation.

use {
    super::asset::PoolQuantities,
    crate::{error::Error, math::Sd59x18},
};

/// Dominance ratios in `[0, 1]` before (`a`) and after (`b`) an operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Dominance {
    pub a: Sd59x18,
    pub b: Sd59x18,
}

impl Dominance {
    pub fn deposit(quantities: &PoolQuantities) -> Result<Self, Error> {
        quantities.ensure_depositable()?;
        let amount = Sd59x18::from_u256(&quantities.amount)?;
        let current = Sd59x18::from_u256(&quantities.current)?;
        let total = Sd59x18::from_u256(&quantities.total)?;

        Ok(Self {
            a: ratio(&current, &total)?,
            b: ratio(&current.add(&amount)?, &total.add(&amount)?)?,
        })
    }

    pub fn redemption(quantities: &PoolQuantities) -> Result<Self, Error> {
        quantities.ensure_redeemable()?;
        let amount = Sd59x18::from_u256(&quantities.amount)?;
        let current = Sd59x18::from_u256(&quantities.current)?;
        let total = Sd59x18::from_u256(&quantities.total)?;

        Ok(Self {
            a: ratio(&current, &total)?,
            b: ratio(&current.sub(&amount)?, &total.sub(&amount)?)?,
        })
    }
}

/// `part / whole`, or zero for an empty whole.
fn ratio(part: &Sd59x18, whole: &Sd59x18) -> Result<Sd59x18, Error> {
    if whole.is_zero() {
        return Ok(Sd59x18::zero());
    }
    Ok(part.div(whole)?)
}
