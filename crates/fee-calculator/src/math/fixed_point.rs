//! Signed fixed point numbers with exactly 18 decimals over the signed
//! 256-bit range, as used by on-chain pool contracts for fee math.
//!
//! Multiplication and division operate on magnitudes, floor the result and
//! re-apply the sign afterwards, i.e. they truncate toward zero. Fee quotes
//! are compared against on-chain results to the wei, so this rounding must
//! not be changed.

use {
    super::error::MathError,
    anyhow::{Context, bail, ensure},
    num::{BigInt, Signed, Zero},
    primitive_types::U256,
    serde_with::{DeserializeFromStr, SerializeDisplay},
    std::{
        fmt::{self, Debug, Display, Formatter},
        str::FromStr,
        sync::LazyLock,
    },
};

pub(super) const DECIMALS: usize = 18;

pub(super) static UNIT: LazyLock<BigInt> = LazyLock::new(|| BigInt::from(10).pow(18));
static MAX: LazyLock<BigInt> = LazyLock::new(|| (BigInt::from(1) << 255_u32) - 1);
static MIN: LazyLock<BigInt> = LazyLock::new(|| -(BigInt::from(1) << 255_u32));

/// Signed 59.18-decimal fixed point number.
///
/// The inner value is the raw scaled integer ("wei"): `1.0` is stored as
/// `10^18`. Pool balances and fee amounts are plain integers and enter the
/// fixed point domain unscaled, so `Sd59x18::from_u256(1)` is `1e-18`.
#[derive(Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, SerializeDisplay, DeserializeFromStr)]
pub struct Sd59x18(BigInt);

impl Sd59x18 {
    pub fn zero() -> Self {
        Self(BigInt::zero())
    }

    pub fn one() -> Self {
        Self(UNIT.clone())
    }

    /// Creates a value from its raw scaled representation. Any `i128` is
    /// within range.
    pub fn from_wei(wei: i128) -> Self {
        Self(BigInt::from(wei))
    }

    pub fn from_big_int(wei: BigInt) -> Result<Self, MathError> {
        if wei > *MAX || wei < *MIN {
            return Err(MathError::Overflow);
        }
        Ok(Self(wei))
    }

    pub fn from_u256(wei: &U256) -> Result<Self, MathError> {
        Self::from_big_int(number::conversions::u256_to_big_int(wei))
    }

    pub fn to_u256(&self) -> Result<U256, MathError> {
        if self.is_negative() {
            return Err(MathError::NegativeToUnsigned);
        }
        number::conversions::big_int_to_u256(&self.0).map_err(|_| MathError::Overflow)
    }

    pub fn as_big_int(&self) -> &BigInt {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_positive(&self) -> bool {
        self.0.is_positive()
    }

    pub fn is_negative(&self) -> bool {
        self.0.is_negative()
    }

    #[allow(clippy::should_implement_trait)]
    pub fn add(&self, other: &Self) -> Result<Self, MathError> {
        Self::from_big_int(&self.0 + &other.0)
    }

    #[allow(clippy::should_implement_trait)]
    pub fn sub(&self, other: &Self) -> Result<Self, MathError> {
        Self::from_big_int(&self.0 - &other.0)
    }

    /// Fixed point multiplication, truncating toward zero.
    #[allow(clippy::should_implement_trait)]
    pub fn mul(&self, other: &Self) -> Result<Self, MathError> {
        let magnitude = BigInt::from(self.0.magnitude() * other.0.magnitude()) / &*UNIT;
        Self::from_big_int(self.signed(other, magnitude))
    }

    /// Fixed point division, truncating toward zero.
    #[allow(clippy::should_implement_trait)]
    pub fn div(&self, other: &Self) -> Result<Self, MathError> {
        if other.is_zero() {
            return Err(MathError::ZeroDivision);
        }
        let magnitude = BigInt::from(self.0.magnitude() * UNIT.magnitude() / other.0.magnitude());
        Self::from_big_int(self.signed(other, magnitude))
    }

    fn signed(&self, other: &Self, magnitude: BigInt) -> BigInt {
        if self.is_negative() != other.is_negative() {
            -magnitude
        } else {
            magnitude
        }
    }
}

impl Display for Sd59x18 {
    fn fmt(&self, formatter: &mut Formatter) -> fmt::Result {
        let sign = if self.is_negative() { "-" } else { "" };
        let magnitude = self.0.magnitude();
        let integer = magnitude / UNIT.magnitude();
        let fraction = magnitude % UNIT.magnitude();
        if fraction.is_zero() {
            return write!(formatter, "{sign}{integer}");
        }
        let fraction = format!("{fraction:0>DECIMALS$}");
        write!(formatter, "{sign}{integer}.{}", fraction.trim_end_matches('0'))
    }
}

impl Debug for Sd59x18 {
    fn fmt(&self, formatter: &mut Formatter) -> fmt::Result {
        write!(formatter, "Sd59x18({self})")
    }
}

impl FromStr for Sd59x18 {
    type Err = anyhow::Error;

    /// Parses a decimal string such as `"0.15"`, `"1.25"` or `"-2"`. At most
    /// 18 fractional digits are accepted; nothing is rounded.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (negative, unsigned) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };
        let (integer, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));
        ensure!(
            !integer.is_empty() && integer.bytes().all(|b| b.is_ascii_digit()),
            "invalid integer part in {s:?}"
        );
        ensure!(
            fraction.bytes().all(|b| b.is_ascii_digit()),
            "invalid fractional part in {s:?}"
        );
        if fraction.len() > DECIMALS {
            bail!("{s:?} has more than {DECIMALS} fractional digits");
        }

        let digits = format!("{integer}{fraction:0<DECIMALS$}");
        let magnitude: BigInt = digits.parse().context("invalid decimal")?;
        let wei = if negative { -magnitude } else { magnitude };
        Ok(Self::from_big_int(wei)?)
    }
}
