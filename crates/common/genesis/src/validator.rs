use alloy_primitives::{B256, FixedBytes};
use serde::{Deserialize, Serialize};
use simnet_keystore::key_details::KeyDetails;
use simnet_network_spec::constants::{FAR_FUTURE_EPOCH, GENESIS_EPOCH, MAX_EFFECTIVE_BALANCE};
use ssz_derive::{Decode, Encode};
use ssz_types::{VariableList, typenum::U1099511627776};
use tree_hash::TreeHash;
use tree_hash_derive::TreeHash;

use crate::errors::GenesisError;

// VALIDATOR_REGISTRY_LIMIT
pub type ValidatorRegistryLimit = U1099511627776;

pub type ValidatorRegistry = VariableList<Validator, ValidatorRegistryLimit>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Encode, Decode, TreeHash)]
pub struct Validator {
    pub public_key: FixedBytes<48>,
    pub withdrawal_credentials: B256,
    pub effective_balance: u64,
    pub slashed: bool,
    pub activation_eligibility_epoch: u64,
    pub activation_epoch: u64,
    pub exit_epoch: u64,
    pub withdrawable_epoch: u64,
}

impl Validator {
    /// A validator that is already active in the genesis state with a full deposit.
    pub fn genesis(key: &KeyDetails) -> Self {
        Self {
            public_key: key.public_key,
            withdrawal_credentials: key.withdrawal_credentials,
            effective_balance: MAX_EFFECTIVE_BALANCE,
            slashed: false,
            activation_eligibility_epoch: GENESIS_EPOCH,
            activation_epoch: GENESIS_EPOCH,
            exit_epoch: FAR_FUTURE_EPOCH,
            withdrawable_epoch: FAR_FUTURE_EPOCH,
        }
    }
}

/// Builds the genesis registry with one active validator per key.
pub fn genesis_registry(keys: &[KeyDetails]) -> Result<ValidatorRegistry, GenesisError> {
    ValidatorRegistry::new(keys.iter().map(Validator::genesis).collect())
        .map_err(|err| GenesisError::RegistryOverflow(format!("{err:?}")))
}

pub fn validators_root(validators: &ValidatorRegistry) -> B256 {
    validators.tree_hash_root()
}
