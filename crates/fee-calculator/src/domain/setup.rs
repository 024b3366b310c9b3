use {
    super::distribution::FeeDistribution,
    crate::error::ConfigError,
    primitive_types::{H160, U256},
    serde::{Deserialize, Serialize},
};

/// Recipients of collected fees and their integer percentage shares.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawFeeSetup")]
pub struct FeeSetup {
    recipients: Vec<H160>,
    shares: Vec<u64>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawFeeSetup {
    recipients: Vec<H160>,
    shares: Vec<u64>,
}

impl TryFrom<RawFeeSetup> for FeeSetup {
    type Error = ConfigError;

    fn try_from(raw: RawFeeSetup) -> Result<Self, Self::Error> {
        Self::new(raw.recipients, raw.shares)
    }
}

impl FeeSetup {
    pub fn new(recipients: Vec<H160>, shares: Vec<u64>) -> Result<Self, ConfigError> {
        if recipients.len() != shares.len() {
            return Err(ConfigError::LengthMismatch {
                recipients: recipients.len(),
                shares: shares.len(),
            });
        }
        if recipients.is_empty() {
            return Err(ConfigError::NoRecipients);
        }
        let total = shares.iter().map(|share| u128::from(*share)).sum::<u128>();
        if total != 100 {
            return Err(ConfigError::InvalidShareTotal(total));
        }
        Ok(Self { recipients, shares })
    }

    pub fn recipients(&self) -> &[H160] {
        &self.recipients
    }

    pub fn shares(&self) -> &[u64] {
        &self.shares
    }

    /// Splits `fee` proportionally to the shares, rounding each share down.
    /// The rounding remainder goes to the first recipient. A zero fee yields
    /// an empty distribution.
    pub fn distribute(&self, fee: U256) -> FeeDistribution {
        if fee.is_zero() {
            return FeeDistribution::empty();
        }

        // floor(fee * share / 100) without widening: since share <= 100,
        // neither term can overflow.
        let hundred = U256::from(100);
        let (quotient, remainder) = fee.div_mod(hundred);
        let mut amounts = self
            .shares
            .iter()
            .map(|share| {
                let share = U256::from(*share);
                quotient * share + remainder * share / hundred
            })
            .collect::<Vec<_>>();

        let distributed = amounts
            .iter()
            .fold(U256::zero(), |total, amount| total + *amount);
        amounts[0] += fee - distributed;

        FeeDistribution::new(self.recipients.clone(), amounts)
    }
}
