use {
    super::{
        asset::PoolQuantities,
        curve::Operation,
        distribution::FeeDistribution,
        parameters::{FeeParameters, ParameterUpdate},
        setup::FeeSetup,
    },
    crate::error::{ConfigError, Error},
    serde::Serialize,
};

/// An immutable snapshot of everything a fee quote depends on.
///
/// Updates never modify a snapshot in place; they produce a new one with the
/// version incremented.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct FeeConfig {
    pub version: u64,
    pub parameters: FeeParameters,
    pub setup: FeeSetup,
}

impl FeeConfig {
    pub fn new(parameters: FeeParameters, setup: FeeSetup) -> Self {
        Self {
            version: 0,
            parameters,
            setup,
        }
    }

    pub fn with_parameter(&self, update: &ParameterUpdate) -> Result<Self, ConfigError> {
        Ok(Self {
            version: self.version + 1,
            parameters: self.parameters.with(update)?,
            setup: self.setup.clone(),
        })
    }

    pub fn with_setup(&self, setup: FeeSetup) -> Self {
        Self {
            version: self.version + 1,
            parameters: self.parameters.clone(),
            setup,
        }
    }

    /// Computes the fee of an operation and splits it among the fee
    /// recipients.
    pub fn quote(
        &self,
        operation: Operation,
        quantities: &PoolQuantities,
    ) -> Result<FeeDistribution, Error> {
        let fee = operation.fee(&self.parameters, quantities)?;
        if fee > quantities.amount {
            return Err(Error::FeeExceedsAmount {
                fee,
                amount: quantities.amount,
            });
        }
        Ok(self.setup.distribute(fee))
    }
}
