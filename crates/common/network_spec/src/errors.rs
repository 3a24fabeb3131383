use std::{io, path::PathBuf};

use thiserror::Error;

use crate::fork_schedule::ForkName;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("validator count must be at least 1")]
    ZeroValidatorCount,

    #[error("slot time must be at least 1 second")]
    ZeroSlotTime,

    #[error("{later} fork epoch {later_epoch} is scheduled before {earlier} fork epoch {earlier_epoch}")]
    ForkOrder {
        earlier: ForkName,
        earlier_epoch: u64,
        later: ForkName,
        later_epoch: u64,
    },

    #[error("cannot split validator keys into {0} tranches, at least 1 is required")]
    InvalidTrancheCount(usize),

    #[error("failed to read testnet config {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse testnet config: {0}")]
    Parse(#[from] serde_yaml::Error),
}
