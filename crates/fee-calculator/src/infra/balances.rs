use {
    crate::domain::AssetRef,
    anyhow::{Context, Result, bail, ensure},
    primitive_types::{H160, U256},
    serde::Deserialize,
    serde_with::serde_as,
    std::collections::{HashMap, HashSet},
};

/// Source of pool balances.
///
/// Adapters map whatever shape a pool has (token pools, vintage indexed
/// pools, multi token pools) onto these two quantities.
#[cfg_attr(test, mockall::automock)]
pub trait PoolBalances: Send + Sync {
    /// Total balance of all assets in the pool.
    fn total_supply(&self, pool: H160) -> Result<U256>;

    /// Balance of one asset in the pool. Zero if the pool does not hold it.
    fn asset_balance(&self, pool: H160, asset: &AssetRef) -> Result<U256>;
}

/// Balances of a pool at one point in time.
#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct PoolSnapshot {
    pub address: H160,
    /// Defaults to the sum of the asset balances.
    #[serde_as(as = "Option<number::serialization::HexOrDecimalU256>")]
    pub total_supply: Option<U256>,
    #[serde(default)]
    pub assets: Vec<AssetBalance>,
}

#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct AssetBalance {
    pub asset: AssetRef,
    #[serde_as(as = "number::serialization::HexOrDecimalU256")]
    pub balance: U256,
}

impl PoolSnapshot {
    fn total(&self) -> Result<U256> {
        if let Some(total_supply) = self.total_supply {
            return Ok(total_supply);
        }
        self.assets.iter().try_fold(U256::zero(), |total, asset| {
            total
                .checked_add(asset.balance)
                .with_context(|| format!("total supply of pool {:?} overflows", self.address))
        })
    }
}

/// Pool balances held in memory, e.g. loaded from a config file.
#[derive(Clone, Debug, Default)]
pub struct InMemoryPools {
    pools: HashMap<H160, PoolSnapshot>,
}

impl InMemoryPools {
    pub fn new(snapshots: Vec<PoolSnapshot>) -> Result<Self> {
        let mut pools = HashMap::new();
        for snapshot in snapshots {
            let mut assets = HashSet::new();
            for asset in &snapshot.assets {
                ensure!(
                    assets.insert(asset.asset),
                    "asset {} listed twice in pool {:?}",
                    asset.asset,
                    snapshot.address
                );
            }
            let address = snapshot.address;
            if pools.insert(address, snapshot).is_some() {
                bail!("pool {address:?} listed twice");
            }
        }
        Ok(Self { pools })
    }

    fn pool(&self, pool: H160) -> Result<&PoolSnapshot> {
        self.pools
            .get(&pool)
            .with_context(|| format!("unknown pool {pool:?}"))
    }
}

impl PoolBalances for InMemoryPools {
    fn total_supply(&self, pool: H160) -> Result<U256> {
        self.pool(pool)?.total()
    }

    fn asset_balance(&self, pool: H160, asset: &AssetRef) -> Result<U256> {
        Ok(self
            .pool(pool)?
            .assets
            .iter()
            .find(|balance| balance.asset == *asset)
            .map(|balance| balance.balance)
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(byte: u8) -> AssetRef {
        AssetRef::Token {
            address: H160::repeat_byte(byte),
        }
    }

    fn snapshot(total_supply: Option<U256>) -> PoolSnapshot {
        PoolSnapshot {
            address: H160::repeat_byte(0xaa),
            total_supply,
            assets: vec![
                AssetBalance {
                    asset: token(1),
                    balance: 300.into(),
                },
                AssetBalance {
                    asset: token(2),
                    balance: 200.into(),
                },
            ],
        }
    }

    #[test]
    fn resolves_balances() {
        let pools = InMemoryPools::new(vec![snapshot(None)]).unwrap();
        let pool = H160::repeat_byte(0xaa);
        assert_eq!(pools.total_supply(pool).unwrap(), 500.into());
        assert_eq!(pools.asset_balance(pool, &token(1)).unwrap(), 300.into());
        assert_eq!(pools.asset_balance(pool, &token(3)).unwrap(), U256::zero());
        assert!(pools.total_supply(H160::zero()).is_err());
        assert!(pools.asset_balance(H160::zero(), &token(1)).is_err());
    }

    #[test]
    fn explicit_total_supply() {
        let pools = InMemoryPools::new(vec![snapshot(Some(1000.into()))]).unwrap();
        assert_eq!(
            pools.total_supply(H160::repeat_byte(0xaa)).unwrap(),
            1000.into()
        );
    }

    #[test]
    fn rejects_duplicates() {
        assert!(InMemoryPools::new(vec![snapshot(None), snapshot(None)]).is_err());

        let mut duplicate_asset = snapshot(None);
        duplicate_asset.assets.push(AssetBalance {
            asset: token(1),
            balance: 1.into(),
        });
        assert!(InMemoryPools::new(vec![duplicate_asset]).is_err());
    }

    #[test]
    fn total_supply_overflow() {
        let mut snapshot = snapshot(None);
        snapshot.assets[0].balance = U256::MAX;
        let pools = InMemoryPools::new(vec![snapshot]).unwrap();
        assert!(pools.total_supply(H160::repeat_byte(0xaa)).is_err());
    }
}
