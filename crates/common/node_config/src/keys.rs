//! Parameter names and file paths understood by the node images under test.

// Beacon node and validator client parameters
pub const BN_API_PORT: &str = "BN_API_PORT";
pub const BN_GRPC_PORT: &str = "BN_GRPC_PORT";
pub const METRICS_PORT: &str = "METRICS_PORT";
pub const CONFIG_DEPOSIT_CONTRACT_ADDRESS: &str = "CONFIG_DEPOSIT_CONTRACT_ADDRESS";
pub const CHECK_LIVE_PORT: &str = "CHECK_LIVE_PORT";
pub const MERGE_ENABLED: &str = "MERGE_ENABLED";
pub const ETH1_GENESIS_TIME: &str = "ETH1_GENESIS_TIME";
pub const GENESIS_FORK: &str = "GENESIS_FORK";
pub const ETH1_RPC_ADDRS: &str = "ETH1_RPC_ADDRS";
pub const ETH1_ENGINE_RPC_ADDRS: &str = "ETH1_ENGINE_RPC_ADDRS";
pub const BOOTNODE_ENRS: &str = "BOOTNODE_ENRS";
pub const BN_API_IP: &str = "BN_API_IP";

// Execution node parameters
pub const BOOTNODE: &str = "BOOTNODE";
pub const MINER: &str = "MINER";
pub const CLIQUE_PRIVATEKEY: &str = "CLIQUE_PRIVATEKEY";
pub const CLIQUE_PERIOD: &str = "CLIQUE_PERIOD";
pub const CHAIN_ID: &str = "CHAIN_ID";
pub const NETWORK_ID: &str = "NETWORK_ID";
pub const TERMINAL_TOTAL_DIFFICULTY: &str = "TERMINAL_TOTAL_DIFFICULTY";

// Files
pub const EXECUTION_GENESIS_FILE: &str = "/genesis.json";
pub const CONSENSUS_CONFIG_FILE: &str = "/config.yaml";
pub const GENESIS_STATE_FILE: &str = "/genesis.ssz";
pub const KEYS_FILE: &str = "/keys/keys.json";
