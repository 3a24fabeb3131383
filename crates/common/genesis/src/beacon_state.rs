use alloy_primitives::{B256, Bytes, aliases::B32};
use simnet_keystore::key_details::KeyDetails;
use simnet_network_spec::chain_spec::ChainSpec;
use simnet_node_config::{bundle::NodeConfig, keys::GENESIS_STATE_FILE};
use ssz::Encode;
use ssz_derive::{Decode, Encode};
use tracing::info;

use crate::{
    errors::GenesisError,
    execution::ExecutionGenesis,
    validator::{ValidatorRegistry, genesis_registry, validators_root},
};

/// The beacon genesis state, as far as the testnet needs to know it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenesisState {
    pub genesis_time: u64,
    pub genesis_validators_root: B256,
    pub fork_version: B32,
    pub validators: ValidatorRegistry,
    /// Serialized state handed to beacon nodes unmodified.
    pub encoded: Bytes,
}

impl GenesisState {
    pub fn to_bundle(&self) -> NodeConfig {
        NodeConfig::new().with_file(GENESIS_STATE_FILE, self.encoded.clone())
    }
}

/// Builds the beacon genesis state for a validator set.
pub trait BeaconStateBuilder {
    fn build_beacon_state(
        &self,
        spec: &ChainSpec,
        eth1_genesis: &ExecutionGenesis,
        genesis_time: u64,
        keys: &[KeyDetails],
    ) -> Result<GenesisState, GenesisError>;
}

#[derive(Debug, Encode, Decode)]
struct EncodedGenesis {
    genesis_time: u64,
    genesis_validators_root: B256,
    fork_version: B32,
    validators: ValidatorRegistry,
}

/// Builds a registry-only genesis: every key becomes an active validator with a full deposit.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatorRegistryGenesis;

impl BeaconStateBuilder for ValidatorRegistryGenesis {
    fn build_beacon_state(
        &self,
        spec: &ChainSpec,
        eth1_genesis: &ExecutionGenesis,
        genesis_time: u64,
        keys: &[KeyDetails],
    ) -> Result<GenesisState, GenesisError> {
        if (keys.len() as u64) < spec.min_genesis_active_validator_count {
            return Err(GenesisError::InsufficientValidators {
                required: spec.min_genesis_active_validator_count,
                available: keys.len(),
            });
        }
        if genesis_time <= eth1_genesis.timestamp {
            return Err(GenesisError::GenesisTimeTooEarly {
                genesis_time,
                eth1_timestamp: eth1_genesis.timestamp,
            });
        }

        let validators = genesis_registry(keys)?;
        let genesis_validators_root = validators_root(&validators);
        let fork_version = spec.fork_schedule().active_at(0).version;

        info!(
            "Built beacon genesis state with {} validators, genesis time {genesis_time}, validators root {genesis_validators_root}",
            validators.len()
        );

        let encoded = EncodedGenesis {
            genesis_time,
            genesis_validators_root,
            fork_version,
            validators,
        };

        Ok(GenesisState {
            genesis_time,
            genesis_validators_root,
            fork_version,
            encoded: encoded.as_ssz_bytes().into(),
            validators: encoded.validators,
        })
    }
}
