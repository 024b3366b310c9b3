use {
    crate::domain::{AssetRef, asset::parse_address},
    clap::{Parser, Subcommand},
    primitive_types::{H160, U256},
    std::path::PathBuf,
};

/// Quote pool deposit and redemption fees. Pool balances, fee parameters and
/// fee recipients come from the config file.
#[derive(Debug, Parser)]
#[command(version)]
pub struct Args {
    /// Log filter directives, e.g. `warn,fee_calculator=debug`.
    #[clap(long, env, default_value = "warn,fee_calculator=info")]
    pub log: String,

    /// Whether to emit logs as JSON.
    #[clap(long, env, default_value = "false")]
    pub use_json_logs: bool,

    /// Path to the TOML config file.
    #[clap(long, env)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Quote the fee of depositing an asset into a pool.
    Deposit {
        #[clap(long, value_parser = parse_address)]
        pool: H160,

        /// `0x<address>`, `0x<address>:vintage:<id>` or
        /// `0x<address>:erc1155:<id>`.
        #[clap(long)]
        asset: AssetRef,

        /// Decimal or `0x` hex amount in the asset's smallest unit.
        #[clap(long, value_parser = parse_amount)]
        amount: U256,
    },
    /// Quote the fee of redeeming one or more assets from a pool. Pass
    /// `--asset` and `--amount` once per asset, in matching order.
    Redeem {
        #[clap(long, value_parser = parse_address)]
        pool: H160,

        #[clap(long = "asset", required = true)]
        assets: Vec<AssetRef>,

        #[clap(long = "amount", required = true, value_parser = parse_amount)]
        amounts: Vec<U256>,
    },
    /// Print the fee recipients and their shares.
    Setup,
    /// Print the fee parameters.
    Parameters,
}

fn parse_amount(s: &str) -> Result<U256, String> {
    number::serialization::parse(s)
}
