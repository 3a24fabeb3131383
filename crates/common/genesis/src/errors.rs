use alloy_primitives::U256;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenesisError {
    #[error("genesis needs at least {required} validators, only {available} keys are available")]
    InsufficientValidators { required: u64, available: usize },

    #[error("beacon genesis time {genesis_time} must be after the execution genesis timestamp {eth1_timestamp}")]
    GenesisTimeTooEarly {
        genesis_time: u64,
        eth1_timestamp: u64,
    },

    #[error("terminal total difficulty {0} does not fit the execution genesis document")]
    TerminalTotalDifficultyOverflow(U256),

    #[error("validator registry exceeds its list limit: {0}")]
    RegistryOverflow(String),

    #[error("failed to encode execution genesis: {0}")]
    Encode(#[from] serde_json::Error),
}
