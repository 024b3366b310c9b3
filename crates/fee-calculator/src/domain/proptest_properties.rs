//! Property-based tests of the fee curves and the fee split.
//!
//! 1. **Determinism**: the same quote twice yields the same distribution.
//! 2. **Exact split**: shares always add up to the fee.
//! 3. **Deposit monotonicity**: a more dominant asset pays a higher fee,
//!    strictly so once the amount is large enough that rounding cannot tie.
//! 4. **Redemption monotonicity**: a more dominant asset pays a lower fee,
//!    with the same strictness.
//! 5. **Fee bound**: fees never exceed the amount.
//! 6. **Single asset pools** pay the flat relative fee.

use {
    super::{
        asset::PoolQuantities,
        config::FeeConfig,
        curve::Operation,
        parameters::FeeParameters,
        setup::FeeSetup,
    },
    crate::error::Error,
    primitive_types::{H160, U256},
    proptest::prelude::*,
};

const MIN_TOTAL: u128 = 100_000_000_000_000_000_000;
const MAX_TOTAL: u128 = 1_000_000_000_000_000_000_000_000_000;

fn setup(shares: Vec<u64>) -> FeeSetup {
    let recipients = (0..shares.len())
        .map(|i| H160::from_low_u64_be(i as u64 + 1))
        .collect();
    let Ok(setup) = FeeSetup::new(recipients, shares) else {
        panic!("valid fee setup");
    };
    setup
}

fn config() -> FeeConfig {
    FeeConfig::new(FeeParameters::default(), setup(vec![15, 30, 50, 3, 2]))
}

fn fee(operation: Operation, amount: u128, current: u128, total: u128) -> Result<U256, Error> {
    operation.fee(
        &FeeParameters::default(),
        &PoolQuantities::new(amount.into(), current.into(), total.into()),
    )
}

/// Shares adding up to 100, split at random cut points.
fn shares_strategy() -> impl Strategy<Value = Vec<u64>> {
    prop::collection::vec(0_u64..=100, 0..10).prop_map(|mut cuts| {
        cuts.sort_unstable();
        cuts.push(100);
        let mut previous = 0;
        cuts.into_iter()
            .map(|cut| {
                let share = cut - previous;
                previous = cut;
                share
            })
            .collect()
    })
}

fn u256_strategy() -> impl Strategy<Value = U256> {
    (any::<u128>(), any::<u128>())
        .prop_map(|(high, low)| (U256::from(high) << 128) | U256::from(low))
}

/// `(total, amount, current, step)` for deposits into pools the asset does
/// not yet dominate.
fn deposit_strategy() -> impl Strategy<Value = (u128, u128, u128, u128)> {
    (MIN_TOTAL..=MAX_TOTAL).prop_flat_map(|total| {
        (
            Just(total),
            1..=total / 10,
            0..=total * 6 / 10,
            total / 1000..=total / 10,
        )
    })
}

/// `(total, current, step, amount)` for redemptions of at most 1% of the
/// asset balance.
fn redemption_strategy() -> impl Strategy<Value = (u128, u128, u128, u128)> {
    (MIN_TOTAL..=MAX_TOTAL)
        .prop_flat_map(|total| {
            (
                Just(total),
                total / 1000..=total * 9 / 10,
                total / 1000..=total / 10,
            )
        })
        .prop_flat_map(|(total, current, step)| {
            (Just(total), Just(current), Just(step), 1..=current / 100)
        })
}

/// `(total, amount, current, step)` like [`deposit_strategy`], with an
/// amount of at least 0.1% of the pool.
fn large_deposit_strategy() -> impl Strategy<Value = (u128, u128, u128, u128)> {
    (MIN_TOTAL..=MAX_TOTAL).prop_flat_map(|total| {
        (
            Just(total),
            total / 1000..=total / 10,
            0..=total * 6 / 10,
            total / 1000..=total / 10,
        )
    })
}

/// `(total, current, step, amount)` for redemptions of between 0.1% of the
/// pool and 1% of an asset holding at least a tenth of it.
fn large_redemption_strategy() -> impl Strategy<Value = (u128, u128, u128, u128)> {
    (MIN_TOTAL..=MAX_TOTAL)
        .prop_flat_map(|total| {
            (
                Just(total),
                total / 10..=total * 9 / 10,
                total / 1000..=total / 10,
            )
        })
        .prop_flat_map(|(total, current, step)| {
            (Just(total), Just(current), Just(step), total / 1000..=current / 100)
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_quotes_are_deterministic(
        (total, amount, current, _) in deposit_strategy(),
    ) {
        let quantities = PoolQuantities::new(amount.into(), current.into(), total.into());
        let config = config();
        for operation in [Operation::Deposit, Operation::Redemption] {
            let first = config.quote(operation, &quantities);
            let second = config.quote(operation, &quantities);
            prop_assert_eq!(first.ok(), second.ok());
        }
    }

    #[test]
    fn prop_split_is_exact(
        shares in shares_strategy(),
        fee in u256_strategy(),
    ) {
        let setup = setup(shares);
        let distribution = setup.distribute(fee);
        if fee.is_zero() {
            prop_assert!(distribution.is_empty());
        } else {
            prop_assert_eq!(distribution.total(), fee);
            prop_assert_eq!(distribution.shares().len(), setup.shares().len());
            prop_assert_eq!(distribution.recipients(), setup.recipients());
        }
    }

    #[test]
    fn prop_deposit_fee_increases_with_dominance(
        (total, amount, current, step) in deposit_strategy(),
    ) {
        let dominant = current + step;
        prop_assume!(dominant <= total * 7 / 10);

        let Ok(low) = fee(Operation::Deposit, amount, current, total) else {
            return Err(TestCaseError::fail("deposit fee"));
        };
        let Ok(high) = fee(Operation::Deposit, amount, dominant, total) else {
            return Err(TestCaseError::fail("deposit fee"));
        };
        prop_assert!(
            low <= high,
            "fee dropped from {} to {} when the balance rose from {} to {}",
            low, high, current, dominant
        );
        prop_assert!(high <= U256::from(amount));
    }

    #[test]
    fn prop_redemption_fee_decreases_with_dominance(
        (total, current, step, amount) in redemption_strategy(),
    ) {
        let dominant = current + step;
        prop_assume!(dominant < total);

        let Ok(high) = fee(Operation::Redemption, amount, current, total) else {
            return Err(TestCaseError::fail("redemption fee"));
        };
        let Ok(low) = fee(Operation::Redemption, amount, dominant, total) else {
            return Err(TestCaseError::fail("redemption fee"));
        };
        prop_assert!(
            low <= high,
            "fee rose from {} to {} when the balance rose from {} to {}",
            high, low, current, dominant
        );
    }

    #[test]
    fn prop_large_deposit_fee_strictly_increases_with_dominance(
        (total, amount, current, step) in large_deposit_strategy(),
    ) {
        let dominant = current + step;
        prop_assume!(dominant <= total * 7 / 10);

        let Ok(low) = fee(Operation::Deposit, amount, current, total) else {
            return Err(TestCaseError::fail("deposit fee"));
        };
        let Ok(high) = fee(Operation::Deposit, amount, dominant, total) else {
            return Err(TestCaseError::fail("deposit fee"));
        };
        prop_assert!(
            low < high,
            "fee {} did not rise to {} when the balance rose from {} to {}",
            low, high, current, dominant
        );
    }

    #[test]
    fn prop_large_redemption_fee_strictly_decreases_with_dominance(
        (total, current, step, amount) in large_redemption_strategy(),
    ) {
        let dominant = current + step;
        prop_assume!(dominant < total);

        let Ok(high) = fee(Operation::Redemption, amount, current, total) else {
            return Err(TestCaseError::fail("redemption fee"));
        };
        let Ok(low) = fee(Operation::Redemption, amount, dominant, total) else {
            return Err(TestCaseError::fail("redemption fee"));
        };
        prop_assert!(
            low < high,
            "fee {} did not drop to {} when the balance rose from {} to {}",
            high, low, current, dominant
        );
    }

    #[test]
    fn prop_redemption_fee_is_bounded(
        (total, current, amount) in (1..=MAX_TOTAL)
            .prop_flat_map(|total| (Just(total), 1..=total))
            .prop_flat_map(|(total, current)| (Just(total), Just(current), 1..=current)),
    ) {
        let Ok(fee) = fee(Operation::Redemption, amount, current, total) else {
            return Err(TestCaseError::fail("redemption fee"));
        };
        prop_assert!(fee <= U256::from(amount));
    }

    #[test]
    fn prop_deposit_quote_never_exceeds_amount(
        (total, current) in (0..=MAX_TOTAL).prop_flat_map(|total| (Just(total), 0..=total)),
        amount in 1..=MAX_TOTAL,
    ) {
        let quantities = PoolQuantities::new(amount.into(), current.into(), total.into());
        match config().quote(Operation::Deposit, &quantities) {
            Ok(distribution) => prop_assert!(distribution.total() <= U256::from(amount)),
            Err(Error::FeeExceedsAmount { fee, .. }) => prop_assert!(fee > U256::from(amount)),
            Err(Error::DepositOutsideRange) => {}
            Err(err) => return Err(TestCaseError::fail(format!("unexpected error: {err}"))),
        }
    }

    #[test]
    fn prop_single_asset_pools_pay_flat_fee(
        amount in 1..=MAX_TOTAL,
        balance in 0..=MAX_TOTAL,
    ) {
        for operation in [Operation::Deposit, Operation::Redemption] {
            let amount = match operation {
                Operation::Deposit => amount,
                Operation::Redemption => amount.min(balance),
            };
            if amount == 0 {
                continue;
            }
            let Ok(fee) = fee(operation, amount, balance, balance) else {
                return Err(TestCaseError::fail("single asset fee"));
            };
            prop_assert_eq!(fee, U256::from(amount / 10));
        }
    }
}
