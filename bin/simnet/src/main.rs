use std::{
    env, process,
    time::{SystemTime, UNIX_EPOCH},
};

use clap::Parser;
use simnet::{
    artifacts::write_artifacts,
    cli::{Cli, Commands, DryRunConfig, PrepareConfig},
    dry_run::DryRunProvisioner,
    startup_message::startup_message,
};
use simnet_genesis::beacon_state::ValidatorRegistryGenesis;
use simnet_keystore::key_details::generate_validator_keys;
use simnet_network_spec::{config::TestnetConfig, producer::ProducerCredentials};
use simnet_testnet::prepared::PreparedTestnet;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Entry point for simnet. Initializes logging, parses CLI arguments and runs the selected
/// command.
fn main() {
    let cli = Cli::parse();

    // Set the default log level based on verbosity flag or RUST_LOG env var
    let rust_log = env::var(EnvFilter::DEFAULT_ENV).unwrap_or_default();
    let env_filter = match rust_log.is_empty() {
        true => EnvFilter::builder().parse_lossy(cli.directive()),
        false => EnvFilter::builder().parse_lossy(rust_log),
    };
    tracing_subscriber::fmt().with_env_filter(env_filter).init();
    info!("\n{}", startup_message());

    let result = match cli.command {
        Commands::Prepare(config) => run_prepare(config),
        Commands::DryRun(config) => run_dry_run(config),
    };

    if let Err(err) = result {
        error!("{err:?}");
        process::exit(1);
    }
}

fn prepare_testnet(config: &TestnetConfig, mnemonic: &str) -> anyhow::Result<PreparedTestnet> {
    let now = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs();
    let keys = generate_validator_keys(mnemonic, config.validator_count)?;
    info!("Generated {} validator keys", keys.len());

    Ok(PreparedTestnet::prepare(
        config,
        keys,
        &ValidatorRegistryGenesis,
        ProducerCredentials::default(),
        now,
    )?)
}

fn run_prepare(config: PrepareConfig) -> anyhow::Result<()> {
    let prepared = prepare_testnet(&config.config, &config.mnemonic)?;
    write_artifacts(&prepared, &config.output)?;
    Ok(())
}

fn run_dry_run(config: DryRunConfig) -> anyhow::Result<()> {
    let prepared = prepare_testnet(&config.config, &config.mnemonic)?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    let testnet = runtime.block_on(prepared.start_testnet(&DryRunProvisioner::new()))?;

    info!(
        "Dry run complete: genesis time {}, validators root {}",
        testnet.genesis_time(),
        testnet.genesis_validators_root()
    );
    Ok(())
}
