use {
    crate::{
        domain::{asset::PoolQuantities, dominance::Dominance, parameters::FeeParameters},
        error::Error,
        math::Sd59x18,
    },
    primitive_types::U256,
};

/// Deposit fee:
///
/// `scale * (ta * log10(1 - a * N) - tb * log10(1 - b * N))`
///
/// where `ta` and `tb` are the asset balances before and after the deposit,
/// `a` and `b` the matching dominance ratios and `N` the ratio scale.
pub fn fee(parameters: &FeeParameters, quantities: &PoolQuantities) -> Result<U256, Error> {
    if quantities.amount.is_zero() {
        return Err(Error::ZeroAmount);
    }
    quantities.ensure_depositable()?;

    let amount = Sd59x18::from_u256(&quantities.amount)?;
    if quantities.is_single_asset() {
        return Ok(amount
            .mul(parameters.single_asset_deposit_relative_fee())?
            .to_u256()?);
    }

    let Dominance { a, b } = Dominance::deposit(quantities)?;
    let ratio_scale = parameters.deposit_fee_ratio_scale();
    let one_minus_an = Sd59x18::one().sub(&a.mul(ratio_scale)?)?;
    let one_minus_bn = Sd59x18::one().sub(&b.mul(ratio_scale)?)?;
    // b > a, so this also keeps `1 - a * N` positive.
    if !one_minus_bn.is_positive() {
        return Err(Error::DepositOutsideRange);
    }

    let ta = Sd59x18::from_u256(&quantities.current)?;
    let tb = ta.add(&amount)?;
    let before = ta.mul(&one_minus_an.log10()?)?;
    let after = tb.mul(&one_minus_bn.log10()?)?;
    let fee = parameters.deposit_fee_scale().mul(&before.sub(&after)?)?;

    // Only rounding can make the fee negative.
    if fee.is_negative() {
        return Ok(U256::zero());
    }
    Ok(fee.to_u256()?)
}
