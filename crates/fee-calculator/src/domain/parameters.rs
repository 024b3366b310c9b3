use {
    crate::{error::ConfigError, math::Sd59x18},
    serde::Serialize,
    std::sync::LazyLock,
};

/// Tunable fee curve parameters, all 18-decimal fixed point fractions.
///
/// Every parameter lies in `[0, 1]` except the deposit fee ratio scale, which
/// only has to be non-negative. Instances are only ever derived from the
/// defaults through validated [`ParameterUpdate`]s, so they are always
/// within bounds.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct FeeParameters {
    deposit_fee_scale: Sd59x18,
    deposit_fee_ratio_scale: Sd59x18,
    single_asset_deposit_relative_fee: Sd59x18,
    redemption_fee_scale: Sd59x18,
    redemption_fee_shift: Sd59x18,
    single_asset_redemption_relative_fee: Sd59x18,
    dust_asset_redemption_relative_fee: Sd59x18,
    redemption_fee_constant: Sd59x18,
}

static DEFAULT: LazyLock<FeeParameters> = LazyLock::new(|| FeeParameters {
    deposit_fee_scale: Sd59x18::from_wei(150_000_000_000_000_000),
    deposit_fee_ratio_scale: Sd59x18::from_wei(1_250_000_000_000_000_000),
    single_asset_deposit_relative_fee: Sd59x18::from_wei(100_000_000_000_000_000),
    redemption_fee_scale: Sd59x18::from_wei(300_000_000_000_000_000),
    redemption_fee_shift: Sd59x18::from_wei(100_000_000_000_000_000),
    single_asset_redemption_relative_fee: Sd59x18::from_wei(100_000_000_000_000_000),
    dust_asset_redemption_relative_fee: Sd59x18::from_wei(300_000_000_000_000_000),
    // 0.3 * log10(1.1)
    redemption_fee_constant: Sd59x18::from_wei(12_417_805_547_467_510),
});

impl Default for FeeParameters {
    fn default() -> Self {
        DEFAULT.clone()
    }
}

impl FeeParameters {
    pub fn deposit_fee_scale(&self) -> &Sd59x18 {
        &self.deposit_fee_scale
    }

    pub fn deposit_fee_ratio_scale(&self) -> &Sd59x18 {
        &self.deposit_fee_ratio_scale
    }

    pub fn single_asset_deposit_relative_fee(&self) -> &Sd59x18 {
        &self.single_asset_deposit_relative_fee
    }

    pub fn redemption_fee_scale(&self) -> &Sd59x18 {
        &self.redemption_fee_scale
    }

    pub fn redemption_fee_shift(&self) -> &Sd59x18 {
        &self.redemption_fee_shift
    }

    pub fn single_asset_redemption_relative_fee(&self) -> &Sd59x18 {
        &self.single_asset_redemption_relative_fee
    }

    pub fn dust_asset_redemption_relative_fee(&self) -> &Sd59x18 {
        &self.dust_asset_redemption_relative_fee
    }

    /// `redemption_fee_scale * log10(1 + redemption_fee_shift)`
    pub fn redemption_fee_constant(&self) -> &Sd59x18 {
        &self.redemption_fee_constant
    }

    /// Returns a copy with the update applied. The redemption fee constant is
    /// recomputed when the redemption scale or shift changes.
    pub fn with(&self, update: &ParameterUpdate) -> Result<Self, ConfigError> {
        update.validate()?;
        let mut parameters = self.clone();
        let value = update.value().clone();
        match update {
            ParameterUpdate::DepositFeeScale(_) => parameters.deposit_fee_scale = value,
            ParameterUpdate::DepositFeeRatioScale(_) => {
                parameters.deposit_fee_ratio_scale = value
            }
            ParameterUpdate::SingleAssetDepositRelativeFee(_) => {
                parameters.single_asset_deposit_relative_fee = value
            }
            ParameterUpdate::RedemptionFeeScale(_) => {
                parameters.redemption_fee_scale = value;
                parameters.redemption_fee_constant = parameters.compute_redemption_constant()?;
            }
            ParameterUpdate::RedemptionFeeShift(_) => {
                parameters.redemption_fee_shift = value;
                parameters.redemption_fee_constant = parameters.compute_redemption_constant()?;
            }
            ParameterUpdate::SingleAssetRedemptionRelativeFee(_) => {
                parameters.single_asset_redemption_relative_fee = value
            }
            ParameterUpdate::DustAssetRedemptionRelativeFee(_) => {
                parameters.dust_asset_redemption_relative_fee = value
            }
        }
        Ok(parameters)
    }

    fn compute_redemption_constant(&self) -> Result<Sd59x18, ConfigError> {
        let shifted = Sd59x18::one().add(&self.redemption_fee_shift)?;
        Ok(self.redemption_fee_scale.mul(&shifted.log10()?)?)
    }
}

/// A change to a single fee parameter.
#[derive(Clone, Debug, PartialEq, Eq, strum::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum ParameterUpdate {
    DepositFeeScale(Sd59x18),
    DepositFeeRatioScale(Sd59x18),
    SingleAssetDepositRelativeFee(Sd59x18),
    RedemptionFeeScale(Sd59x18),
    RedemptionFeeShift(Sd59x18),
    SingleAssetRedemptionRelativeFee(Sd59x18),
    DustAssetRedemptionRelativeFee(Sd59x18),
}

impl ParameterUpdate {
    /// Name of the updated parameter, e.g. `"deposit_fee_scale"`.
    pub fn name(&self) -> &'static str {
        self.into()
    }

    pub fn value(&self) -> &Sd59x18 {
        match self {
            Self::DepositFeeScale(value)
            | Self::DepositFeeRatioScale(value)
            | Self::SingleAssetDepositRelativeFee(value)
            | Self::RedemptionFeeScale(value)
            | Self::RedemptionFeeShift(value)
            | Self::SingleAssetRedemptionRelativeFee(value)
            | Self::DustAssetRedemptionRelativeFee(value) => value,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let value = self.value();
        let (in_range, reason) = match self {
            Self::DepositFeeScale(_) => (
                is_fraction(value),
                "deposit fee scale must be between 0 and 1",
            ),
            Self::DepositFeeRatioScale(_) => (
                !value.is_negative(),
                "deposit fee ratio scale must not be negative",
            ),
            Self::SingleAssetDepositRelativeFee(_) => (
                is_fraction(value),
                "single asset deposit relative fee must be between 0 and 1",
            ),
            Self::RedemptionFeeScale(_) => (
                is_fraction(value),
                "redemption fee scale must be between 0 and 1",
            ),
            Self::RedemptionFeeShift(_) => (
                is_fraction(value),
                "redemption fee shift must be between 0 and 1",
            ),
            Self::SingleAssetRedemptionRelativeFee(_) => (
                is_fraction(value),
                "single asset redemption relative fee must be between 0 and 1",
            ),
            Self::DustAssetRedemptionRelativeFee(_) => (
                is_fraction(value),
                "dust asset redemption relative fee must be between 0 and 1",
            ),
        };
        if !in_range {
            return Err(ConfigError::ParameterOutOfRange {
                parameter: self.name(),
                reason,
                value: value.clone(),
            });
        }
        Ok(())
    }
}

fn is_fraction(value: &Sd59x18) -> bool {
    !value.is_negative() && *value <= Sd59x18::one()
}
