use simnet_network_spec::{
    chain_spec::ChainSpec,
    config::TestnetConfig,
    constants::{
        DEPOSIT_CONTRACT_ADDRESS, ETH1_FOLLOW_DISTANCE, EXECUTION_CHAIN_ID, EXECUTION_NETWORK_ID,
    },
    errors::ConfigError,
    producer::ProducerCredentials,
};
use tracing::info;

use crate::execution::ExecutionGenesis;

/// Derives the execution genesis and the matching consensus chain spec.
///
/// The execution genesis is timestamped `now`, the beacon chain starts
/// [`GENESIS_DELAY_SECONDS`](simnet_network_spec::constants::GENESIS_DELAY_SECONDS) later. The
/// chain spec is a copy of `baseline` with the testnet overrides applied; the deposit chain and
/// network ids are taken from the execution genesis so both layers always agree.
pub fn build_genesis(
    config: &TestnetConfig,
    baseline: &ChainSpec,
    producer: ProducerCredentials,
    now: u64,
) -> Result<(ExecutionGenesis, ChainSpec), ConfigError> {
    config.validate()?;

    let eth1_genesis = ExecutionGenesis {
        chain_id: EXECUTION_CHAIN_ID,
        network_id: EXECUTION_NETWORK_ID,
        consensus: config.eth1_consensus,
        terminal_total_difficulty: config.terminal_total_difficulty,
        timestamp: now,
        producer,
    };

    let mut spec = baseline.clone();
    spec.deposit_contract_address = DEPOSIT_CONTRACT_ADDRESS;
    spec.deposit_chain_id = eth1_genesis.chain_id;
    spec.deposit_network_id = eth1_genesis.network_id;
    spec.eth1_follow_distance = ETH1_FOLLOW_DISTANCE;
    for (fork, epoch) in config.fork_epochs() {
        spec.set_fork_epoch(fork, epoch);
    }
    spec.min_genesis_active_validator_count = config.validator_count;
    spec.seconds_per_slot = config.slot_time;
    spec.terminal_total_difficulty = eth1_genesis.terminal_total_difficulty;

    info!(
        "Derived genesis: execution timestamp {}, beacon genesis time {}, genesis fork {}",
        eth1_genesis.timestamp,
        eth1_genesis.beacon_genesis_time(),
        spec.genesis_fork()
    );

    Ok((eth1_genesis, spec))
}

#[cfg(test)]
mod tests {
    use alloy_primitives::U256;
    use rstest::rstest;
    use simnet_network_spec::{
        chain_spec::MAINNET,
        config::ConsensusType,
        constants::GENESIS_DELAY_SECONDS,
        fork_schedule::{Fork, ForkName},
        producer::DEFAULT_PRODUCER_CREDENTIALS,
    };

    use super::*;

    const NOW: u64 = 1_700_000_000;

    fn build(config: &TestnetConfig) -> Result<(ExecutionGenesis, ChainSpec), ConfigError> {
        build_genesis(config, &MAINNET, DEFAULT_PRODUCER_CREDENTIALS, NOW)
    }

    #[rstest]
    #[case(U256::ZERO, ConsensusType::Ethash)]
    #[case(U256::from(600_000), ConsensusType::Clique)]
    #[case(U256::from(58_750_000_000_000_000_000_000_u128), ConsensusType::Ethash)]
    fn test_layers_agree(#[case] terminal_total_difficulty: U256, #[case] consensus: ConsensusType) {
        let config = TestnetConfig {
            terminal_total_difficulty,
            eth1_consensus: consensus,
            ..Default::default()
        };
        let (eth1_genesis, spec) = build(&config).expect("config is valid");

        assert_eq!(
            spec.terminal_total_difficulty,
            eth1_genesis.terminal_total_difficulty
        );
        assert_eq!(spec.deposit_chain_id, eth1_genesis.chain_id);
        assert_eq!(spec.deposit_network_id, eth1_genesis.network_id);
        assert_eq!(eth1_genesis.consensus, consensus);
        assert_eq!(
            eth1_genesis.beacon_genesis_time(),
            eth1_genesis.timestamp + GENESIS_DELAY_SECONDS
        );
        assert_eq!(eth1_genesis.timestamp, NOW);
    }

    #[test]
    fn test_overrides() -> anyhow::Result<()> {
        let config = TestnetConfig {
            validator_count: 64,
            slot_time: 3,
            altair_fork_epoch: 0,
            bellatrix_fork_epoch: 2,
            ..Default::default()
        };
        let (_, spec) = build(&config)?;

        assert_eq!(spec.deposit_contract_address, DEPOSIT_CONTRACT_ADDRESS);
        assert_eq!(spec.eth1_follow_distance, ETH1_FOLLOW_DISTANCE);
        assert_eq!(spec.min_genesis_active_validator_count, 64);
        assert_eq!(spec.seconds_per_slot, 3);
        assert_eq!(spec.altair_fork_epoch, 0);
        assert_eq!(spec.bellatrix_fork_epoch, 2);
        assert_eq!(spec.capella_fork_epoch, Fork::UNSCHEDULED_EPOCH);
        assert_eq!(spec.genesis_fork(), ForkName::Altair);

        // Everything not overridden is carried over from the baseline.
        assert_eq!(spec.churn_limit_quotient, MAINNET.churn_limit_quotient);
        assert_eq!(spec.altair_fork_version, MAINNET.altair_fork_version);
        Ok(())
    }

    #[test]
    fn test_malformed_config_is_reported() {
        let config = TestnetConfig {
            validator_count: 0,
            ..Default::default()
        };
        assert!(matches!(build(&config), Err(ConfigError::ZeroValidatorCount)));
    }
}
