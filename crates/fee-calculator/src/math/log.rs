//! Binary and decimal logarithms over [`Sd59x18`].
//!
//! Results are bit-for-bit what the on-chain fixed point library produces:
//! the binary logarithm is computed by iterative squaring and the decimal
//! logarithm derives from it, except for exact powers of ten.

use {
    super::{
        error::MathError,
        fixed_point::{Sd59x18, UNIT},
    },
    num::{BigInt, Zero},
    std::sync::LazyLock,
};

static UNIT_SQUARED: LazyLock<BigInt> = LazyLock::new(|| &*UNIT * &*UNIT);
static DOUBLE_UNIT: LazyLock<BigInt> = LazyLock::new(|| &*UNIT << 1_u32);
static LOG2_10: LazyLock<BigInt> = LazyLock::new(|| BigInt::from(3_321_928_094_887_362_347_u64));

/// Raw values `10^k` for which `log10` is exact, paired with `k - 18`.
static POWERS_OF_TEN: LazyLock<Vec<(BigInt, i64)>> = LazyLock::new(|| {
    (0..=76_u32)
        .map(|k| (BigInt::from(10).pow(k), i64::from(k) - 18))
        .collect()
});

impl Sd59x18 {
    /// Binary logarithm.
    pub fn log2(&self) -> Result<Self, MathError> {
        if !self.is_positive() {
            return Err(MathError::LogInputTooSmall);
        }

        let (negative, x) = if self.as_big_int() >= &*UNIT {
            (false, self.as_big_int().clone())
        } else {
            // log2(x) = -log2(1/x)
            (true, &*UNIT_SQUARED / self.as_big_int())
        };

        let integer = &x / &*UNIT;
        let n = integer.bits() - 1;
        let mut result = BigInt::from(n) * &*UNIT;

        let mut y = x >> n;
        if y != *UNIT {
            let mut delta = &*UNIT >> 1_u32;
            while !delta.is_zero() {
                y = &y * &y / &*UNIT;
                if y >= *DOUBLE_UNIT {
                    result += &delta;
                    y >>= 1_u32;
                }
                delta >>= 1_u32;
            }
        }

        if negative {
            result = -result;
        }
        Self::from_big_int(result)
    }

    /// Decimal logarithm.
    pub fn log10(&self) -> Result<Self, MathError> {
        if !self.is_positive() {
            return Err(MathError::LogInputTooSmall);
        }

        if let Some((_, exponent)) = POWERS_OF_TEN
            .iter()
            .find(|(power, _)| power == self.as_big_int())
        {
            return Self::from_big_int(BigInt::from(*exponent) * &*UNIT);
        }

        // `/` on `BigInt` truncates toward zero.
        let scaled = self.log2()?.as_big_int() * &*UNIT;
        Self::from_big_int(scaled / &*LOG2_10)
    }
}
