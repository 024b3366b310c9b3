use {
    crate::{
        domain::{asset::PoolQuantities, dominance::Dominance, parameters::FeeParameters},
        error::Error,
        math::Sd59x18,
    },
    primitive_types::U256,
};

/// Redemption fee:
///
/// `scale * (tb * log10(b + shift) - ta * log10(a + shift)) + constant * amount`
///
/// where `ta` and `tb` are the asset balances before and after the
/// redemption and `a` and `b` the matching dominance ratios. A negative
/// result is replaced by the dust fee, `amount * dust_relative_fee`.
pub fn fee(parameters: &FeeParameters, quantities: &PoolQuantities) -> Result<U256, Error> {
    let fee = raw_fee(parameters, quantities)?;
    if fee.is_negative() {
        let amount = Sd59x18::from_u256(&quantities.amount)?;
        let dust = amount.mul(parameters.dust_asset_redemption_relative_fee())?;
        tracing::warn!(
            raw = %fee,
            amount = %quantities.amount,
            current = %quantities.current,
            total = %quantities.total,
            "negative redemption fee, charging dust fee"
        );
        return Ok(dust.to_u256()?);
    }
    Ok(fee.to_u256()?)
}

/// The redemption fee before the dust clamp. Can be negative.
pub fn raw_fee(parameters: &FeeParameters, quantities: &PoolQuantities) -> Result<Sd59x18, Error> {
    if quantities.amount.is_zero() {
        return Err(Error::ZeroAmount);
    }
    quantities.ensure_redeemable()?;

    let amount = Sd59x18::from_u256(&quantities.amount)?;
    if quantities.is_single_asset() {
        return Ok(amount.mul(parameters.single_asset_redemption_relative_fee())?);
    }

    let Dominance { a, b } = Dominance::redemption(quantities)?;
    let shift = parameters.redemption_fee_shift();
    let ta = Sd59x18::from_u256(&quantities.current)?;
    let tb = ta.sub(&amount)?;

    let before = weighted_log10(&ta, &a.add(shift)?)?;
    let after = weighted_log10(&tb, &b.add(shift)?)?;
    let curve = parameters.redemption_fee_scale().mul(&after.sub(&before)?)?;
    let flat = parameters.redemption_fee_constant().mul(&amount)?;
    Ok(curve.add(&flat)?)
}

/// `weight * log10(argument)`, zero for a zero weight without evaluating the
/// logarithm.
fn weighted_log10(weight: &Sd59x18, argument: &Sd59x18) -> Result<Sd59x18, Error> {
    if weight.is_zero() {
        return Ok(Sd59x18::zero());
    }
    if !argument.is_positive() {
        return Err(Error::RedemptionOutsideRange);
    }
    Ok(weight.mul(&argument.log10()?)?)
}

#[cfg(test)]
mod tests {
    use {super::*, crate::domain::parameters::ParameterUpdate};

    const E: u128 = 1_000_000_000_000_000_000;

    fn quantities(amount: u128, current: u128, total: u128) -> PoolQuantities {
        PoolQuantities::new(amount.into(), current.into(), total.into())
    }

    fn redeem(amount: u128, current: u128, total: u128) -> Result<U256, Error> {
        fee(&FeeParameters::default(), &quantities(amount, current, total))
    }

    fn parameters(update: ParameterUpdate) -> FeeParameters {
        FeeParameters::default().with(&update).unwrap()
    }

    #[test]
    fn regression_values() {
        for (amount, current, total, expected) in [
            (E, E, 1_000_000 * E, 312_416_502_670_536_172_u128),
            (100 * E, 500 * E, 1000 * E, 2_833_521_467_902_860_250),
            (500 * E, 500 * E, 1000 * E, 39_486_215_216_187_209_450),
            (E, E, 1000 * E, 311_121_393_412_674_736),
            (E, 500 * E, 1000 * E, 24_717_329_277_423_770),
            (E, 999 * E, 1000 * E, 64_712_973_828),
        ] {
            assert_eq!(
                redeem(amount, current, total).unwrap(),
                U256::from(expected),
                "redeem({amount}, {current}, {total})"
            );
        }
    }

    #[test]
    fn single_asset_pool_is_flat() {
        assert_eq!(redeem(100 * E, 500 * E, 500 * E).unwrap(), U256::from(10 * E));
    }

    #[test]
    fn rounds_small_redemptions_to_zero() {
        let big = 1_000_000_000 * E;
        assert_eq!(redeem(1, big / 10, big).unwrap(), U256::zero());
        assert_eq!(redeem(3, big / 10 * 9, big).unwrap(), U256::zero());
    }

    #[test]
    fn dust_clamp() {
        let amount = 999_999_999_999_999_999;
        let quantities = quantities(amount, amount, E);
        assert_eq!(
            raw_fee(&FeeParameters::default(), &quantities).unwrap(),
            Sd59x18::from_wei(-1)
        );
        assert_eq!(
            fee(&FeeParameters::default(), &quantities).unwrap(),
            U256::from(299_999_999_999_999_999_u128)
        );

        let total = U256::exp10(31);
        let amount = total - U256::from(1_000_000);
        let quantities = PoolQuantities::new(amount, amount, total);
        assert_eq!(
            raw_fee(&FeeParameters::default(), &quantities).unwrap(),
            Sd59x18::from_wei(-5_000_000_000_000)
        );
        assert_eq!(
            fee(&FeeParameters::default(), &quantities).unwrap(),
            U256::from_dec_str("2999999999999999999999999700000").unwrap()
        );
    }

    #[test]
    fn zero_shift() {
        let parameters = parameters(ParameterUpdate::RedemptionFeeShift(Sd59x18::zero()));
        assert_eq!(
            fee(&parameters, &quantities(500 * E, 500 * E, 1000 * E)).unwrap(),
            U256::from(45_154_499_349_597_179_250_u128)
        );
        assert!(matches!(
            fee(&parameters, &quantities(1, 1, 2 * E)),
            Err(Error::RedemptionOutsideRange)
        ));
    }

    #[test]
    fn scale() {
        let parameters = parameters(ParameterUpdate::RedemptionFeeScale("0.5".parse().unwrap()));
        assert_eq!(
            fee(&parameters, &quantities(100 * E, 500 * E, 1000 * E)).unwrap(),
            U256::from(4_722_535_779_838_100_550_u128)
        );
    }

    #[test]
    fn rejects_invalid_input() {
        assert!(matches!(redeem(0, 1, 2), Err(Error::ZeroAmount)));
        assert!(matches!(
            redeem(2, 1, 2),
            Err(Error::RedemptionExceedsBalance { .. })
        ));
        assert!(matches!(
            redeem(1, 3, 2),
            Err(Error::InvalidPoolState { .. })
        ));
    }
}
