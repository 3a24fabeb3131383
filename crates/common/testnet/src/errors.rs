use simnet_genesis::errors::GenesisError;
use simnet_keystore::errors::KeystoreError;
use simnet_network_spec::errors::ConfigError;
use simnet_node::{
    errors::{ProvisionError, Unavailable},
    role::NodeRole,
};
use thiserror::Error;

/// Every failure aborts the run; nothing is retried and started nodes are left to the caller.
#[derive(Error, Debug)]
pub enum TestnetError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Genesis(#[from] GenesisError),

    #[error(transparent)]
    Keystore(#[from] KeystoreError),

    #[error("failed to encode consensus config: {0}")]
    ConsensusConfig(#[source] serde_yaml::Error),

    #[error("only have {available} {dependency}, cannot find index {index} for {role} node")]
    Index {
        role: NodeRole,
        dependency: &'static str,
        index: usize,
        available: usize,
    },

    #[error("{role} node depends on {dependency} node {index}: {source}")]
    Dependency {
        role: NodeRole,
        dependency: NodeRole,
        index: usize,
        #[source]
        source: Unavailable,
    },

    #[error("failed to start {role} node {client}: {source}")]
    Provision {
        role: NodeRole,
        client: String,
        #[source]
        source: ProvisionError,
    },
}
