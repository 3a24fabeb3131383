use std::sync::Arc;

use alloy_primitives::hex;
use simnet_genesis::{
    beacon_state::{BeaconStateBuilder, GenesisState},
    builder::build_genesis,
    execution::ExecutionGenesis,
};
use simnet_keystore::{
    key_details::KeyDetails,
    tranche::{KeyTranche, key_tranches},
};
use simnet_network_spec::{
    chain_spec::{ChainSpec, MAINNET},
    config::{NodeDefinition, TestnetConfig},
    constants::{DEPOSIT_CONTRACT_ADDRESS, PORT_BEACON_API, PORT_BEACON_GRPC, PORT_METRICS},
    producer::ProducerCredentials,
};
use simnet_node_config::{
    bundle::{NodeConfig, bundle},
    keys::{
        BN_API_PORT, BN_GRPC_PORT, CHECK_LIVE_PORT, CONFIG_DEPOSIT_CONTRACT_ADDRESS,
        CONSENSUS_CONFIG_FILE, ETH1_GENESIS_TIME, GENESIS_FORK, MERGE_ENABLED, METRICS_PORT,
    },
};
use tracing::info;

use crate::{errors::TestnetError, testnet::Testnet};

/// Everything needed to start the nodes of a testnet. Built once per run and never mutated.
#[derive(Debug)]
pub struct PreparedTestnet {
    /// Consensus chain configuration.
    pub(crate) spec: Arc<ChainSpec>,

    /// Execution chain genesis.
    pub(crate) eth1_genesis: ExecutionGenesis,
    /// Consensus genesis state.
    pub(crate) eth2_genesis: GenesisState,
    /// Secret keys of all validators, for fabricating extra signed messages during a test.
    pub(crate) keys: Arc<[KeyDetails]>,

    /// Configuration applied to every node of the given role.
    pub(crate) execution_config: NodeConfig,
    pub(crate) beacon_config: NodeConfig,
    pub(crate) validator_config: NodeConfig,

    /// One tranche of validator keys per node definition.
    pub(crate) key_tranches: Vec<KeyTranche>,
    pub(crate) nodes: Vec<NodeDefinition>,
}

impl PreparedTestnet {
    /// Builds all artifacts required to start a testnet whose execution genesis is at `now`.
    pub fn prepare(
        config: &TestnetConfig,
        keys: Vec<KeyDetails>,
        state_builder: &impl BeaconStateBuilder,
        producer: ProducerCredentials,
        now: u64,
    ) -> Result<Self, TestnetError> {
        let (eth1_genesis, spec) = build_genesis(config, &MAINNET, producer, now)?;
        let execution_config = eth1_genesis.to_params(DEPOSIT_CONTRACT_ADDRESS)?;

        let key_tranches = key_tranches(&keys, config.nodes.len())?;

        let consensus_config = NodeConfig::new().with_file(
            CONSENSUS_CONFIG_FILE,
            spec.to_yaml()
                .map_err(TestnetError::ConsensusConfig)?
                .into_bytes(),
        );

        let eth2_genesis = state_builder.build_beacon_state(
            &spec,
            &eth1_genesis,
            eth1_genesis.beacon_genesis_time(),
            &keys,
        )?;

        let common_config = NodeConfig::new()
            .with_param(BN_API_PORT, PORT_BEACON_API)
            .with_param(BN_GRPC_PORT, PORT_BEACON_GRPC)
            .with_param(METRICS_PORT, PORT_METRICS)
            .with_param(
                CONFIG_DEPOSIT_CONTRACT_ADDRESS,
                hex::encode_prefixed(DEPOSIT_CONTRACT_ADDRESS),
            );

        let beacon_config = bundle([
            &common_config,
            &NodeConfig::new()
                .with_param(CHECK_LIVE_PORT, PORT_BEACON_API)
                .with_param(MERGE_ENABLED, 1)
                .with_param(ETH1_GENESIS_TIME, eth1_genesis.timestamp)
                .with_param(GENESIS_FORK, spec.genesis_fork().genesis_param()),
            &eth2_genesis.to_bundle(),
            &consensus_config,
        ]);

        let validator_config = bundle([
            &common_config,
            &NodeConfig::new().with_param(CHECK_LIVE_PORT, 0),
            &consensus_config,
        ]);

        info!(
            "Prepared testnet with {} validators in {} tranches, genesis time {}",
            keys.len(),
            key_tranches.len(),
            eth2_genesis.genesis_time
        );

        Ok(Self {
            spec: Arc::new(spec),
            eth1_genesis,
            eth2_genesis,
            keys: keys.into(),
            execution_config,
            beacon_config,
            validator_config,
            key_tranches,
            nodes: config.nodes.clone(),
        })
    }

    /// Starts an empty testnet sharing this preparation's genesis.
    pub fn create_testnet<H>(&self) -> Testnet<H> {
        Testnet::new(
            self.eth2_genesis.genesis_time,
            self.eth2_genesis.genesis_validators_root,
            self.spec.clone(),
            self.eth1_genesis.clone(),
        )
    }

    pub fn spec(&self) -> &ChainSpec {
        &self.spec
    }

    pub fn eth1_genesis(&self) -> &ExecutionGenesis {
        &self.eth1_genesis
    }

    pub fn eth2_genesis(&self) -> &GenesisState {
        &self.eth2_genesis
    }

    pub fn keys(&self) -> &[KeyDetails] {
        &self.keys
    }

    pub fn key_tranches(&self) -> &[KeyTranche] {
        &self.key_tranches
    }

    pub fn nodes(&self) -> &[NodeDefinition] {
        &self.nodes
    }

    pub fn execution_config(&self) -> &NodeConfig {
        &self.execution_config
    }

    pub fn beacon_config(&self) -> &NodeConfig {
        &self.beacon_config
    }

    pub fn validator_config(&self) -> &NodeConfig {
        &self.validator_config
    }
}

#[cfg(test)]
mod tests {
    use alloy_primitives::{B256, FixedBytes, U256};
    use simnet_genesis::beacon_state::ValidatorRegistryGenesis;
    use simnet_network_spec::{
        config::ClientDefinition, constants::GENESIS_DELAY_SECONDS,
        producer::DEFAULT_PRODUCER_CREDENTIALS,
    };
    use simnet_node_config::keys::{
        CHAIN_ID, EXECUTION_GENESIS_FILE, GENESIS_STATE_FILE, TERMINAL_TOTAL_DIFFICULTY,
    };

    use super::*;

    const NOW: u64 = 1_700_000_000;

    fn keys(count: usize) -> Vec<KeyDetails> {
        (0..count)
            .map(|index| KeyDetails {
                public_key: FixedBytes::with_last_byte(index as u8),
                secret_key: B256::with_last_byte(index as u8),
                withdrawal_credentials: B256::ZERO,
            })
            .collect()
    }

    fn node() -> NodeDefinition {
        NodeDefinition {
            execution_client: ClientDefinition::new("go-ethereum", ""),
            consensus_client: ClientDefinition::new("lighthouse-bn", ""),
            validator_client: ClientDefinition::new("lighthouse-vc", ""),
        }
    }

    fn config(validator_count: u64, nodes: usize) -> TestnetConfig {
        TestnetConfig {
            terminal_total_difficulty: U256::from(600_000),
            validator_count,
            nodes: vec![node(); nodes],
            ..Default::default()
        }
    }

    fn prepare(
        config: &TestnetConfig,
        keys: Vec<KeyDetails>,
    ) -> Result<PreparedTestnet, TestnetError> {
        PreparedTestnet::prepare(
            config,
            keys,
            &ValidatorRegistryGenesis,
            DEFAULT_PRODUCER_CREDENTIALS,
            NOW,
        )
    }

    #[test]
    fn test_prepare_testnet() -> anyhow::Result<()> {
        let prepared = prepare(&config(64, 2), keys(64))?;

        assert_eq!(
            prepared.key_tranches().iter().map(KeyTranche::len).collect::<Vec<_>>(),
            vec![32, 32]
        );
        assert_eq!(prepared.keys().len(), 64);
        assert_eq!(
            prepared.eth2_genesis().genesis_time,
            prepared.eth1_genesis().timestamp + GENESIS_DELAY_SECONDS
        );
        assert_eq!(
            prepared.spec().terminal_total_difficulty,
            prepared.eth1_genesis().terminal_total_difficulty
        );
        assert_eq!(prepared.spec().deposit_chain_id, prepared.eth1_genesis().chain_id);
        Ok(())
    }

    #[test]
    fn test_role_configs() -> anyhow::Result<()> {
        let prepared = prepare(&config(4, 1), keys(4))?;

        let beacon = prepared.beacon_config();
        assert_eq!(beacon.param(BN_API_PORT), Some("4000"));
        assert_eq!(beacon.param(BN_GRPC_PORT), Some("4001"));
        assert_eq!(beacon.param(METRICS_PORT), Some("8080"));
        assert_eq!(beacon.param(CHECK_LIVE_PORT), Some("4000"));
        assert_eq!(beacon.param(MERGE_ENABLED), Some("1"));
        assert_eq!(beacon.param(ETH1_GENESIS_TIME), Some("1700000000"));
        assert_eq!(beacon.param(GENESIS_FORK), Some("merge"));
        assert_eq!(
            beacon.param(CONFIG_DEPOSIT_CONTRACT_ADDRESS),
            Some("0x4242424242424242424242424242424242424242")
        );
        assert!(beacon.file(GENESIS_STATE_FILE).is_some());
        assert!(beacon.file(CONSENSUS_CONFIG_FILE).is_some());

        let validator = prepared.validator_config();
        assert_eq!(validator.param(CHECK_LIVE_PORT), Some("0"));
        assert_eq!(validator.param(MERGE_ENABLED), None);
        assert!(validator.file(CONSENSUS_CONFIG_FILE).is_some());
        assert!(validator.file(GENESIS_STATE_FILE).is_none());

        let execution = prepared.execution_config();
        assert_eq!(execution.param(CHAIN_ID), Some("1"));
        assert_eq!(execution.param(TERMINAL_TOTAL_DIFFICULTY), Some("600000"));
        assert_eq!(
            execution.param(CONFIG_DEPOSIT_CONTRACT_ADDRESS),
            beacon.param(CONFIG_DEPOSIT_CONTRACT_ADDRESS)
        );
        assert!(execution.file(EXECUTION_GENESIS_FILE).is_some());
        Ok(())
    }

    #[test]
    fn test_consensus_config_matches_spec() -> anyhow::Result<()> {
        let prepared = prepare(&config(4, 1), keys(4))?;

        let yaml = prepared
            .validator_config()
            .file(CONSENSUS_CONFIG_FILE)
            .expect("consensus config is bundled");
        let decoded: ChainSpec = serde_yaml::from_slice(yaml)?;
        assert_eq!(&decoded, prepared.spec());
        Ok(())
    }

    #[test]
    fn test_too_few_keys_is_a_genesis_error() {
        assert!(matches!(
            prepare(&config(8, 1), keys(4)),
            Err(TestnetError::Genesis(_))
        ));
    }

    #[test]
    fn test_no_nodes_is_a_config_error() {
        assert!(matches!(
            prepare(&config(4, 0), keys(4)),
            Err(TestnetError::Config(_))
        ));
    }

    #[test]
    fn test_testnet_copies_genesis() -> anyhow::Result<()> {
        let prepared = prepare(&config(4, 1), keys(4))?;
        let testnet = prepared.create_testnet::<()>();

        assert_eq!(testnet.genesis_time(), prepared.eth2_genesis().genesis_time);
        assert_eq!(
            testnet.genesis_validators_root(),
            prepared.eth2_genesis().genesis_validators_root
        );
        assert_eq!(testnet.spec(), prepared.spec());
        Ok(())
    }
}
