//! Loading of the TOML configuration file.
//!
//! ```toml
//! [parameters]
//! deposit-fee-scale = "0.15"
//!
//! [fee-setup]
//! recipients = ["0x0101010101010101010101010101010101010101"]
//! shares = [100]
//!
//! [[pools]]
//! address = "0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa"
//! total-supply = "1000000000000000000000"
//!
//! [[pools.assets]]
//! asset = { kind = "token", address = "0x1111111111111111111111111111111111111111" }
//! balance = "500000000000000000000"
//! ```

use {
    crate::{
        domain::{FeeConfig, FeeParameters},
        infra::balances::InMemoryPools,
    },
    anyhow::{Context, Result},
    std::path::Path,
};

mod file;

pub use file::{ConfigFile, ParametersFile};

/// A loaded configuration file.
#[derive(Debug)]
pub struct Loaded {
    pub config: FeeConfig,
    pub pools: InMemoryPools,
}

pub fn load(path: &Path) -> Result<Loaded> {
    let data = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    from_toml(&data).with_context(|| format!("invalid config file {}", path.display()))
}

pub fn from_toml(data: &str) -> Result<Loaded> {
    let file: ConfigFile = toml::from_str(data)?;

    // Overrides go through the same validation as runtime updates.
    let mut parameters = FeeParameters::default();
    for update in file.parameters.updates() {
        parameters = parameters
            .with(&update)
            .with_context(|| format!("invalid parameter {}", update.name()))?;
    }

    let pools = InMemoryPools::new(file.pools)?;
    tracing::debug!(?parameters, setup = ?file.fee_setup, "loaded configuration");
    Ok(Loaded {
        config: FeeConfig::new(parameters, file.fee_setup),
        pools,
    })
}
