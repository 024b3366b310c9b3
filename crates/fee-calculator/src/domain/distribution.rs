use {
    primitive_types::{H160, U256},
    serde::Serialize,
    serde_with::serde_as,
};

/// A fee split among recipients. Shares add up to the total fee exactly.
#[serde_as]
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeDistribution {
    recipients: Vec<H160>,
    #[serde_as(as = "Vec<number::serialization::HexOrDecimalU256>")]
    shares: Vec<U256>,
}

impl FeeDistribution {
    pub(super) fn new(recipients: Vec<H160>, shares: Vec<U256>) -> Self {
        debug_assert_eq!(recipients.len(), shares.len());
        Self { recipients, shares }
    }

    /// The distribution of a zero fee.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.recipients.is_empty()
    }

    pub fn recipients(&self) -> &[H160] {
        &self.recipients
    }

    pub fn shares(&self) -> &[U256] {
        &self.shares
    }

    pub fn total(&self) -> U256 {
        self.shares
            .iter()
            .fold(U256::zero(), |total, share| total.saturating_add(*share))
    }
}
