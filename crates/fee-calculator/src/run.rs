use {
    crate::{
        calculator::FeeCalculator,
        domain::{FeeDistribution, Operation},
        infra::{cli, config},
    },
    anyhow::Context,
    clap::Parser,
    primitive_types::{H160, U256},
    serde::Serialize,
    serde_with::serde_as,
    std::{process::ExitCode, sync::Arc},
};

pub fn start(args: impl IntoIterator<Item = String>) -> ExitCode {
    let args = cli::Args::parse_from(args);
    observe::tracing::initialize(&observe::Config::new(&args.log, args.use_json_logs));
    observe::panic_hook::install();
    tracing::info!("running fee calculator with {args:#?}");

    match run_with(args) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!(?err, "fee calculator failed");
            ExitCode::FAILURE
        }
    }
}

/// Executes the command and returns its JSON output.
pub fn run_with(args: cli::Args) -> anyhow::Result<String> {
    let loaded = config::load(&args.config)?;
    let calculator = FeeCalculator::new(loaded.config, Arc::new(loaded.pools));

    let output = match args.command {
        cli::Command::Deposit {
            pool,
            asset,
            amount,
        } => {
            let distribution = calculator
                .calculate_deposit_fees(pool, &asset, amount)
                .context("deposit fee quote failed")?;
            to_json(&Quote::new(Operation::Deposit, pool, amount, &distribution))?
        }
        cli::Command::Redeem {
            pool,
            assets,
            amounts,
        } => {
            let distribution = match (assets.as_slice(), amounts.as_slice()) {
                ([asset], [amount]) => calculator.calculate_redemption_fees(pool, asset, *amount),
                _ => calculator.calculate_batch_redemption_fees(pool, &assets, &amounts),
            }
            .context("redemption fee quote failed")?;
            let amount = amounts
                .iter()
                .try_fold(U256::zero(), |total, amount| total.checked_add(*amount))
                .context("total amount overflows")?;
            to_json(&Quote::new(Operation::Redemption, pool, amount, &distribution))?
        }
        cli::Command::Setup => to_json(&calculator.fee_setup())?,
        cli::Command::Parameters => to_json(&calculator.parameters())?,
    };
    Ok(output)
}

#[serde_as]
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Quote<'a> {
    operation: Operation,
    pool: H160,
    #[serde_as(as = "number::serialization::HexOrDecimalU256")]
    amount: U256,
    #[serde_as(as = "number::serialization::HexOrDecimalU256")]
    fee: U256,
    distribution: &'a FeeDistribution,
}

impl<'a> Quote<'a> {
    fn new(operation: Operation, pool: H160, amount: U256, distribution: &'a FeeDistribution) -> Self {
        Self {
            operation,
            pool,
            amount,
            fee: distribution.total(),
            distribution,
        }
    }
}

fn to_json(value: &impl Serialize) -> anyhow::Result<String> {
    serde_json::to_string_pretty(value).context("failed to serialize output")
}
