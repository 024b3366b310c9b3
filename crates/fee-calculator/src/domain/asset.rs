use {
    crate::{error::Error, math::Sd59x18},
    anyhow::{Context, anyhow, bail},
    primitive_types::{H160, U256},
    serde::{Deserialize, Serialize},
    serde_with::serde_as,
    std::{fmt, str::FromStr},
};

/// An asset held by a pool.
///
/// Pools either hold plain fungible tokens, tokens split into vintages
/// (project/vintage indexed pools) or ERC-1155 style multi tokens. The fee
/// engine never looks at the shape; it is only used to resolve balances.
#[serde_as]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case", deny_unknown_fields)]
pub enum AssetRef {
    Token {
        address: H160,
    },
    #[serde(rename_all = "kebab-case")]
    Vintage {
        token: H160,
        #[serde_as(as = "number::serialization::HexOrDecimalU256")]
        vintage_id: U256,
    },
    #[serde(rename_all = "kebab-case")]
    MultiToken {
        contract: H160,
        #[serde_as(as = "number::serialization::HexOrDecimalU256")]
        token_id: U256,
    },
}

impl AssetRef {
    /// The contract holding the asset.
    pub fn contract(&self) -> H160 {
        match self {
            Self::Token { address } => *address,
            Self::Vintage { token, .. } => *token,
            Self::MultiToken { contract, .. } => *contract,
        }
    }
}

impl fmt::Display for AssetRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Token { address } => write!(f, "{address:?}"),
            Self::Vintage { token, vintage_id } => write!(f, "{token:?}:vintage:{vintage_id}"),
            Self::MultiToken { contract, token_id } => {
                write!(f, "{contract:?}:erc1155:{token_id}")
            }
        }
    }
}

impl FromStr for AssetRef {
    type Err = anyhow::Error;

    /// Parses `0x<address>`, `0x<address>:vintage:<id>` or
    /// `0x<address>:erc1155:<id>`. Ids are decimal or `0x` hex.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split(':');
        let address = parse_address(parts.next().unwrap_or_default())?;
        let asset = match (parts.next(), parts.next()) {
            (None, _) => Self::Token { address },
            (Some("vintage"), Some(id)) => Self::Vintage {
                token: address,
                vintage_id: parse_id(id)?,
            },
            (Some("erc1155"), Some(id)) => Self::MultiToken {
                contract: address,
                token_id: parse_id(id)?,
            },
            _ => bail!("unsupported asset {s:?}"),
        };
        if parts.next().is_some() {
            bail!("unsupported asset {s:?}");
        }
        Ok(asset)
    }
}

pub fn parse_address(s: &str) -> anyhow::Result<H160> {
    let hex = s
        .strip_prefix("0x")
        .with_context(|| format!("address {s:?} is missing the 0x prefix"))?;
    if hex.len() != 40 {
        bail!("address {s:?} must have 40 hex digits");
    }
    hex.parse().with_context(|| format!("invalid address {s:?}"))
}

fn parse_id(s: &str) -> anyhow::Result<U256> {
    number::serialization::parse(s).map_err(|err| anyhow!("invalid id {s:?}: {err}"))
}

/// Quantities a single fee quote is computed from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PoolQuantities {
    /// Amount being deposited or redeemed.
    pub amount: U256,
    /// Pool balance of the asset before the operation.
    pub current: U256,
    /// Total pool balance before the operation.
    pub total: U256,
}

impl PoolQuantities {
    pub fn new(amount: U256, current: U256, total: U256) -> Self {
        Self {
            amount,
            current,
            total,
        }
    }

    pub fn ensure_consistent(&self) -> Result<(), Error> {
        if self.current > self.total {
            return Err(Error::InvalidPoolState {
                current: self.current,
                total: self.total,
            });
        }
        ensure_in_range(self.total)
    }

    /// Also requires the pool total after the deposit to be representable.
    pub fn ensure_depositable(&self) -> Result<(), Error> {
        self.ensure_consistent()?;
        ensure_in_range(self.total.saturating_add(self.amount))
    }

    pub fn ensure_redeemable(&self) -> Result<(), Error> {
        self.ensure_consistent()?;
        if self.amount > self.current {
            return Err(Error::RedemptionExceedsBalance {
                amount: self.amount,
                current: self.current,
            });
        }
        Ok(())
    }

    /// Whether the pool holds nothing but this asset, including the empty
    /// pool.
    pub fn is_single_asset(&self) -> bool {
        self.current == self.total
    }
}

fn ensure_in_range(value: U256) -> Result<(), Error> {
    match Sd59x18::from_u256(&value) {
        Ok(_) => Ok(()),
        Err(_) => Err(Error::QuantityOutOfRange { value }),
    }
}
