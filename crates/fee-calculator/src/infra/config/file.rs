use {
    crate::{
        domain::{FeeSetup, ParameterUpdate},
        infra::balances::PoolSnapshot,
        math::Sd59x18,
    },
    serde::Deserialize,
};

/// Layout of the TOML configuration file.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ConfigFile {
    /// Overrides of the default fee parameters.
    #[serde(default)]
    pub parameters: ParametersFile,

    pub fee_setup: FeeSetup,

    /// Pool balances to quote against.
    #[serde(default)]
    pub pools: Vec<PoolSnapshot>,
}

/// Optional overrides of the fee parameters, as decimal strings.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ParametersFile {
    deposit_fee_scale: Option<Sd59x18>,
    deposit_fee_ratio_scale: Option<Sd59x18>,
    single_asset_deposit_relative_fee: Option<Sd59x18>,
    redemption_fee_scale: Option<Sd59x18>,
    redemption_fee_shift: Option<Sd59x18>,
    single_asset_redemption_relative_fee: Option<Sd59x18>,
    dust_asset_redemption_relative_fee: Option<Sd59x18>,
}

impl ParametersFile {
    /// The overrides as updates to apply on top of the defaults.
    pub fn updates(&self) -> Vec<ParameterUpdate> {
        let Self {
            deposit_fee_scale,
            deposit_fee_ratio_scale,
            single_asset_deposit_relative_fee,
            redemption_fee_scale,
            redemption_fee_shift,
            single_asset_redemption_relative_fee,
            dust_asset_redemption_relative_fee,
        } = self;
        [
            deposit_fee_scale
                .clone()
                .map(ParameterUpdate::DepositFeeScale),
            deposit_fee_ratio_scale
                .clone()
                .map(ParameterUpdate::DepositFeeRatioScale),
            single_asset_deposit_relative_fee
                .clone()
                .map(ParameterUpdate::SingleAssetDepositRelativeFee),
            redemption_fee_scale
                .clone()
                .map(ParameterUpdate::RedemptionFeeScale),
            redemption_fee_shift
                .clone()
                .map(ParameterUpdate::RedemptionFeeShift),
            single_asset_redemption_relative_fee
                .clone()
                .map(ParameterUpdate::SingleAssetRedemptionRelativeFee),
            dust_asset_redemption_relative_fee
                .clone()
                .map(ParameterUpdate::DustAssetRedemptionRelativeFee),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}
