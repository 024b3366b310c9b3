use {
    crate::math::{MathError, Sd59x18},
    primitive_types::U256,
};

/// Failure of a fee quote.
#[derive(Debug, thiserror::Error, strum::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum Error {
    #[error("amount must be greater than zero")]
    ZeroAmount,
    #[error("asset balance {current} exceeds pool total {total}")]
    InvalidPoolState { current: U256, total: U256 },
    #[error("pool quantities of {value} exceed the supported fixed point range")]
    QuantityOutOfRange { value: U256 },
    #[error("redemption amount {amount} exceeds asset balance {current}")]
    RedemptionExceedsBalance { amount: U256, current: U256 },
    #[error("deposit would push the asset outside of the fee curve domain")]
    DepositOutsideRange,
    #[error("redemption would push the asset outside of the fee curve domain")]
    RedemptionOutsideRange,
    #[error("{assets} assets but {amounts} amounts")]
    LengthMismatch { assets: usize, amounts: usize },
    #[error("batch redemption requires at least one asset")]
    EmptyBatch,
    #[error("failed to read pool balances")]
    Balances(#[source] anyhow::Error),
    #[error(transparent)]
    Math(#[from] MathError),
    #[error("fee {fee} exceeds amount {amount}")]
    FeeExceedsAmount { fee: U256, amount: U256 },
}

impl Error {
    /// Stable snake_case identifier of the error kind.
    pub fn code(&self) -> &'static str {
        self.into()
    }

    /// Whether the error indicates broken engine consistency rather than a
    /// request that can never be priced. Arithmetic overflow only follows
    /// from oversized inputs, so it is the caller's.
    pub fn is_internal(&self) -> bool {
        matches!(self, Self::FeeExceedsAmount { .. })
    }
}

/// Rejected configuration update.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, strum::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum ConfigError {
    #[error("{reason}, got {value}")]
    ParameterOutOfRange {
        parameter: &'static str,
        reason: &'static str,
        value: Sd59x18,
    },
    #[error("{recipients} recipients but {shares} shares")]
    LengthMismatch { recipients: usize, shares: usize },
    #[error("fee setup requires at least one recipient")]
    NoRecipients,
    #[error("shares must add up to 100, got {0}")]
    InvalidShareTotal(u128),
    #[error(transparent)]
    Math(#[from] MathError),
}

impl ConfigError {
    pub fn code(&self) -> &'static str {
        self.into()
    }
}
