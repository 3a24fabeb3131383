use std::sync::Arc;

use alloy_primitives::B256;
use simnet_genesis::execution::ExecutionGenesis;
use simnet_keystore::tranche::KeyTranche;
use simnet_network_spec::{chain_spec::ChainSpec, constants::SLOTS_PER_EPOCH};

/// A validator client together with the keys it was started with.
#[derive(Debug)]
pub struct ValidatorClient<H> {
    pub handle: H,
    pub tranche: KeyTranche,
}

/// Nodes started so far in one test run.
///
/// Node lists only ever grow: the bootstrap operations in [`crate::bootstrap`] append exactly one
/// node on success and leave the lists untouched on failure.
#[derive(Debug)]
pub struct Testnet<H> {
    genesis_time: u64,
    genesis_validators_root: B256,
    spec: Arc<ChainSpec>,
    eth1_genesis: ExecutionGenesis,

    pub(crate) execution_nodes: Vec<H>,
    pub(crate) beacon_nodes: Vec<H>,
    pub(crate) validator_clients: Vec<ValidatorClient<H>>,
}

impl<H> Testnet<H> {
    pub(crate) fn new(
        genesis_time: u64,
        genesis_validators_root: B256,
        spec: Arc<ChainSpec>,
        eth1_genesis: ExecutionGenesis,
    ) -> Self {
        Self {
            genesis_time,
            genesis_validators_root,
            spec,
            eth1_genesis,
            execution_nodes: vec![],
            beacon_nodes: vec![],
            validator_clients: vec![],
        }
    }

    pub fn genesis_time(&self) -> u64 {
        self.genesis_time
    }

    pub fn genesis_validators_root(&self) -> B256 {
        self.genesis_validators_root
    }

    pub fn spec(&self) -> &ChainSpec {
        &self.spec
    }

    pub fn eth1_genesis(&self) -> &ExecutionGenesis {
        &self.eth1_genesis
    }

    pub fn execution_nodes(&self) -> &[H] {
        &self.execution_nodes
    }

    pub fn beacon_nodes(&self) -> &[H] {
        &self.beacon_nodes
    }

    pub fn validator_clients(&self) -> &[ValidatorClient<H>] {
        &self.validator_clients
    }

    /// Slot at `unix_time`, or `None` before genesis.
    pub fn slot_at(&self, unix_time: u64) -> Option<u64> {
        unix_time
            .checked_sub(self.genesis_time)
            .map(|elapsed| elapsed / self.spec.seconds_per_slot)
    }

    /// Epoch at `unix_time`, or `None` before genesis.
    pub fn epoch_at(&self, unix_time: u64) -> Option<u64> {
        self.slot_at(unix_time).map(|slot| slot / SLOTS_PER_EPOCH)
    }
}

#[cfg(test)]
mod tests {
    use alloy_primitives::U256;
    use simnet_network_spec::{
        chain_spec::MAINNET, config::ConsensusType, producer::DEFAULT_PRODUCER_CREDENTIALS,
    };

    use super::*;

    fn testnet(seconds_per_slot: u64) -> Testnet<()> {
        let mut spec = MAINNET.as_ref().clone();
        spec.seconds_per_slot = seconds_per_slot;
        Testnet::new(
            1_030,
            B256::ZERO,
            Arc::new(spec),
            ExecutionGenesis {
                chain_id: 1,
                network_id: 1,
                consensus: ConsensusType::Ethash,
                terminal_total_difficulty: U256::ZERO,
                timestamp: 1_000,
                producer: DEFAULT_PRODUCER_CREDENTIALS,
            },
        )
    }

    #[test]
    fn test_slot_and_epoch_at() {
        let testnet = testnet(6);

        assert_eq!(testnet.slot_at(1_029), None);
        assert_eq!(testnet.slot_at(1_030), Some(0));
        assert_eq!(testnet.slot_at(1_035), Some(0));
        assert_eq!(testnet.slot_at(1_036), Some(1));

        assert_eq!(testnet.epoch_at(1_030 + 6 * SLOTS_PER_EPOCH - 1), Some(0));
        assert_eq!(testnet.epoch_at(1_030 + 6 * SLOTS_PER_EPOCH), Some(1));
    }

    #[test]
    fn test_new_testnet_is_empty() {
        let testnet = testnet(12);

        assert!(testnet.execution_nodes().is_empty());
        assert!(testnet.beacon_nodes().is_empty());
        assert!(testnet.validator_clients().is_empty());
        assert_eq!(testnet.genesis_time(), 1_030);
    }
}
