use std::{fmt, io};

use thiserror::Error;

/// Network interfaces a started node may expose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Interface {
    DiscoveryAddress,
    UserRpc,
    EngineRpc,
    BeaconApi,
    DiscoveryRecord,
}

impl fmt::Display for Interface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Interface::DiscoveryAddress => "discovery address",
            Interface::UserRpc => "user RPC address",
            Interface::EngineRpc => "engine RPC address",
            Interface::BeaconApi => "beacon API address",
            Interface::DiscoveryRecord => "discovery record",
        })
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{interface} is unavailable: {reason}")]
pub struct Unavailable {
    pub interface: Interface,
    pub reason: String,
}

impl Unavailable {
    pub fn new(interface: Interface, reason: impl Into<String>) -> Self {
        Self {
            interface,
            reason: reason.into(),
        }
    }
}

#[derive(Error, Debug)]
pub enum ProvisionError {
    #[error("unknown client {0}")]
    UnknownClient(String),

    #[error("node failed to start: {0}")]
    Startup(String),

    #[error("I/O error while starting node: {0}")]
    Io(#[from] io::Error),
}
