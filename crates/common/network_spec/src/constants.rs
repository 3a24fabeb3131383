use alloy_primitives::{Address, address};

/// Seconds between the execution genesis timestamp and the beacon genesis time.
pub const GENESIS_DELAY_SECONDS: u64 = 30;

pub const DEPOSIT_CONTRACT_ADDRESS: Address = address!("0x4242424242424242424242424242424242424242");

pub const EXECUTION_CHAIN_ID: u64 = 1;
pub const EXECUTION_NETWORK_ID: u64 = 1;
pub const ETH1_FOLLOW_DISTANCE: u64 = 1;

pub const SLOTS_PER_EPOCH: u64 = 32;
pub const MAX_EFFECTIVE_BALANCE: u64 = 32_000_000_000;
pub const FAR_FUTURE_EPOCH: u64 = u64::MAX;
pub const GENESIS_EPOCH: u64 = 0;

pub const PORT_USER_RPC: u16 = 8545;
pub const PORT_ENGINE_RPC: u16 = 8551;
pub const PORT_EXECUTION_P2P: u16 = 30303;
pub const PORT_BEACON_TCP: u16 = 9000;
pub const PORT_BEACON_UDP: u16 = 9000;
pub const PORT_BEACON_API: u16 = 4000;
pub const PORT_BEACON_GRPC: u16 = 4001;
pub const PORT_METRICS: u16 = 8080;
