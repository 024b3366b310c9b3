//! Entry points for fee quotes.
//!
//! Every quote loads one configuration snapshot up front and uses it until
//! the end, so concurrent configuration updates are either fully visible to
//! a quote or not at all.

use {
    crate::{
        domain::{
            AssetRef,
            FeeConfig,
            FeeDistribution,
            FeeParameters,
            FeeSetup,
            Operation,
            ParameterUpdate,
            PoolQuantities,
        },
        error::{ConfigError, Error},
        infra::balances::PoolBalances,
        math::MathError,
    },
    arc_swap::ArcSwap,
    primitive_types::{H160, U256},
    std::{
        collections::BTreeMap,
        sync::{Arc, Mutex, PoisonError},
    },
};

pub struct FeeCalculator {
    config: ArcSwap<FeeConfig>,
    /// Serializes configuration writers so no update gets lost.
    updates: Mutex<()>,
    balances: Arc<dyn PoolBalances>,
}

impl FeeCalculator {
    pub fn new(config: FeeConfig, balances: Arc<dyn PoolBalances>) -> Self {
        Self {
            config: ArcSwap::from_pointee(config),
            updates: Mutex::new(()),
            balances,
        }
    }

    /// The current configuration snapshot.
    pub fn config(&self) -> Arc<FeeConfig> {
        self.config.load_full()
    }

    pub fn parameters(&self) -> FeeParameters {
        self.config.load().parameters.clone()
    }

    pub fn fee_setup(&self) -> FeeSetup {
        self.config.load().setup.clone()
    }

    /// Validates and applies a single parameter change.
    pub fn update_parameter(&self, update: ParameterUpdate) -> Result<Arc<FeeConfig>, ConfigError> {
        self.update(|config| config.with_parameter(&update))
            .inspect(|config| {
                tracing::info!(
                    parameter = update.name(),
                    value = %update.value(),
                    version = config.version,
                    "updated fee parameter"
                );
            })
            .inspect_err(|err| {
                tracing::warn!(
                    parameter = update.name(),
                    value = %update.value(),
                    ?err,
                    "rejected fee parameter update"
                );
            })
    }

    /// Replaces the fee recipients and their shares.
    pub fn set_fee_setup(
        &self,
        recipients: Vec<H160>,
        shares: Vec<u64>,
    ) -> Result<Arc<FeeConfig>, ConfigError> {
        let setup = FeeSetup::new(recipients, shares).inspect_err(|err| {
            tracing::warn!(?err, "rejected fee setup");
        })?;
        let config = self.update(|config| Ok(config.with_setup(setup)))?;
        tracing::info!(
            recipients = ?config.setup.recipients(),
            shares = ?config.setup.shares(),
            version = config.version,
            "updated fee setup"
        );
        Ok(config)
    }

    fn update(
        &self,
        apply: impl FnOnce(&FeeConfig) -> Result<FeeConfig, ConfigError>,
    ) -> Result<Arc<FeeConfig>, ConfigError> {
        let _guard = self.updates.lock().unwrap_or_else(PoisonError::into_inner);
        let config = Arc::new(apply(&self.config.load())?);
        self.config.store(config.clone());
        Ok(config)
    }

    pub fn calculate_deposit_fees(
        &self,
        pool: H160,
        asset: &AssetRef,
        amount: U256,
    ) -> Result<FeeDistribution, Error> {
        let config = self.config.load_full();
        let quantities = self.single_asset_quantities(pool, asset, amount)?;
        let distribution = quote(&config, Operation::Deposit, pool, &quantities)?;
        log_quote(&config, Operation::Deposit, pool, asset, &quantities, &distribution);
        Ok(distribution)
    }

    pub fn calculate_redemption_fees(
        &self,
        pool: H160,
        asset: &AssetRef,
        amount: U256,
    ) -> Result<FeeDistribution, Error> {
        let config = self.config.load_full();
        let quantities = self.single_asset_quantities(pool, asset, amount)?;
        let distribution = quote(&config, Operation::Redemption, pool, &quantities)?;
        log_quote(&config, Operation::Redemption, pool, asset, &quantities, &distribution);
        Ok(distribution)
    }

    /// Quotes redeeming several assets of one pool at once. The curve is
    /// evaluated once, treating the listed assets as a single asset.
    pub fn calculate_batch_redemption_fees(
        &self,
        pool: H160,
        assets: &[AssetRef],
        amounts: &[U256],
    ) -> Result<FeeDistribution, Error> {
        let config = self.config.load_full();
        if assets.len() != amounts.len() {
            return Err(Error::LengthMismatch {
                assets: assets.len(),
                amounts: amounts.len(),
            });
        }
        if assets.is_empty() {
            return Err(Error::EmptyBatch);
        }

        let mut requested = BTreeMap::<AssetRef, U256>::new();
        for (asset, amount) in assets.iter().zip(amounts) {
            let total = requested.entry(*asset).or_default();
            *total = total.checked_add(*amount).ok_or(MathError::Overflow)?;
        }

        let total = self.balances.total_supply(pool).map_err(Error::Balances)?;
        let mut amount = U256::zero();
        let mut current = U256::zero();
        for (asset, requested) in &requested {
            let balance = self
                .balances
                .asset_balance(pool, asset)
                .map_err(Error::Balances)?;
            if *requested > balance {
                return Err(Error::RedemptionExceedsBalance {
                    amount: *requested,
                    current: balance,
                });
            }
            amount = amount.checked_add(*requested).ok_or(MathError::Overflow)?;
            current = current.checked_add(balance).ok_or(MathError::Overflow)?;
        }

        let quantities = PoolQuantities::new(amount, current, total);
        let distribution = quote(&config, Operation::Redemption, pool, &quantities)?;
        tracing::debug!(
            ?pool,
            assets = requested.len(),
            %amount,
            %current,
            %total,
            fee = %distribution.total(),
            version = config.version,
            "quoted batch redemption"
        );
        Ok(distribution)
    }

    fn single_asset_quantities(
        &self,
        pool: H160,
        asset: &AssetRef,
        amount: U256,
    ) -> Result<PoolQuantities, Error> {
        if amount.is_zero() {
            return Err(Error::ZeroAmount);
        }
        let current = self
            .balances
            .asset_balance(pool, asset)
            .map_err(Error::Balances)?;
        let total = self.balances.total_supply(pool).map_err(Error::Balances)?;
        Ok(PoolQuantities::new(amount, current, total))
    }
}

fn quote(
    config: &FeeConfig,
    operation: Operation,
    pool: H160,
    quantities: &PoolQuantities,
) -> Result<FeeDistribution, Error> {
    let result = config.quote(operation, quantities);
    match &result {
        Err(err) if err.is_internal() => tracing::error!(
            %operation,
            ?pool,
            ?quantities,
            version = config.version,
            ?err,
            "fee quote failed consistency check"
        ),
        Ok(distribution) if distribution.is_empty() => tracing::debug!(
            %operation,
            ?pool,
            ?quantities,
            "zero fee, nothing to distribute"
        ),
        _ => (),
    }
    result
}

fn log_quote(
    config: &FeeConfig,
    operation: Operation,
    pool: H160,
    asset: &AssetRef,
    quantities: &PoolQuantities,
    distribution: &FeeDistribution,
) {
    tracing::debug!(
        %operation,
        ?pool,
        %asset,
        amount = %quantities.amount,
        current = %quantities.current,
        total = %quantities.total,
        fee = %distribution.total(),
        version = config.version,
        "quoted fee"
    );
}
