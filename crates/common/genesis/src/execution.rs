use std::collections::BTreeMap;

use alloy_primitives::{Address, Bytes, U256, hex};
use serde::Serialize;
use simnet_network_spec::{
    config::ConsensusType, constants::GENESIS_DELAY_SECONDS, producer::ProducerCredentials,
};
use simnet_node_config::{
    bundle::NodeConfig,
    keys::{
        CHAIN_ID, CLIQUE_PERIOD, CONFIG_DEPOSIT_CONTRACT_ADDRESS, EXECUTION_GENESIS_FILE,
        NETWORK_ID, TERMINAL_TOTAL_DIFFICULTY,
    },
};

use crate::errors::GenesisError;

const CLIQUE_PERIOD_SECONDS: u64 = 1;
const CLIQUE_EPOCH_LENGTH: u64 = 30_000;
const GAS_LIMIT: u64 = 30_000_000;
const ETHASH_DIFFICULTY: u64 = 0x20000;
const CLIQUE_DIFFICULTY: u64 = 1;
const CLIQUE_VANITY_LENGTH: usize = 32;
const CLIQUE_SEAL_LENGTH: usize = 65;
/// One million ether, in wei.
const PRODUCER_BALANCE: u128 = 1_000_000_000_000_000_000_000_000;

/// Genesis parameters of the execution chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionGenesis {
    pub chain_id: u64,
    pub network_id: u64,
    pub consensus: ConsensusType,
    pub terminal_total_difficulty: U256,
    /// Unix timestamp of the genesis block, in seconds.
    pub timestamp: u64,
    pub producer: ProducerCredentials,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenesisDocument {
    config: ChainConfig,
    nonce: String,
    timestamp: String,
    extra_data: Bytes,
    gas_limit: String,
    difficulty: String,
    alloc: BTreeMap<Address, GenesisAccount>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ChainConfig {
    chain_id: u64,
    homestead_block: u64,
    eip150_block: u64,
    eip155_block: u64,
    eip158_block: u64,
    byzantium_block: u64,
    constantinople_block: u64,
    petersburg_block: u64,
    istanbul_block: u64,
    berlin_block: u64,
    london_block: u64,
    terminal_total_difficulty: u128,
    #[serde(skip_serializing_if = "Option::is_none")]
    clique: Option<CliqueConfig>,
}

#[derive(Debug, Serialize)]
struct CliqueConfig {
    period: u64,
    epoch: u64,
}

#[derive(Debug, Serialize)]
struct GenesisAccount {
    balance: String,
}

impl ExecutionGenesis {
    /// Genesis time of the beacon chain built on top of this execution genesis.
    pub fn beacon_genesis_time(&self) -> u64 {
        self.timestamp + GENESIS_DELAY_SECONDS
    }

    /// Address of the account producing blocks before the merge.
    pub fn producer_address(&self) -> Address {
        match self.consensus {
            ConsensusType::Ethash => self.producer.miner,
            ConsensusType::Clique => self.producer.clique_signer,
        }
    }

    /// Clique genesis extra-data: 32 vanity bytes, the signer list and an empty seal.
    fn extra_data(&self) -> Bytes {
        match self.consensus {
            ConsensusType::Ethash => Bytes::new(),
            ConsensusType::Clique => {
                let mut extra_data = vec![0u8; CLIQUE_VANITY_LENGTH];
                extra_data.extend_from_slice(self.producer.clique_signer.as_slice());
                extra_data.extend_from_slice(&[0u8; CLIQUE_SEAL_LENGTH]);
                extra_data.into()
            }
        }
    }

    /// Renders the `genesis.json` loaded by execution clients.
    pub fn to_genesis_json(&self) -> Result<Vec<u8>, GenesisError> {
        let terminal_total_difficulty = u128::try_from(self.terminal_total_difficulty).map_err(
            |_| GenesisError::TerminalTotalDifficultyOverflow(self.terminal_total_difficulty),
        )?;

        let (clique, difficulty) = match self.consensus {
            ConsensusType::Ethash => (None, ETHASH_DIFFICULTY),
            ConsensusType::Clique => (
                Some(CliqueConfig {
                    period: CLIQUE_PERIOD_SECONDS,
                    epoch: CLIQUE_EPOCH_LENGTH,
                }),
                CLIQUE_DIFFICULTY,
            ),
        };

        let document = GenesisDocument {
            config: ChainConfig {
                chain_id: self.chain_id,
                homestead_block: 0,
                eip150_block: 0,
                eip155_block: 0,
                eip158_block: 0,
                byzantium_block: 0,
                constantinople_block: 0,
                petersburg_block: 0,
                istanbul_block: 0,
                berlin_block: 0,
                london_block: 0,
                terminal_total_difficulty,
                clique,
            },
            nonce: "0x0".to_string(),
            timestamp: format!("{:#x}", self.timestamp),
            extra_data: self.extra_data(),
            gas_limit: format!("{GAS_LIMIT:#x}"),
            difficulty: format!("{difficulty:#x}"),
            alloc: BTreeMap::from([(
                self.producer_address(),
                GenesisAccount {
                    balance: format!("{PRODUCER_BALANCE:#x}"),
                },
            )]),
        };

        Ok(serde_json::to_vec_pretty(&document)?)
    }

    /// Parameters and files every execution node starts with.
    pub fn to_params(&self, deposit_contract_address: Address) -> Result<NodeConfig, GenesisError> {
        let mut params = NodeConfig::new()
            .with_param(CHAIN_ID, self.chain_id)
            .with_param(NETWORK_ID, self.network_id)
            .with_param(TERMINAL_TOTAL_DIFFICULTY, self.terminal_total_difficulty)
            .with_param(
                CONFIG_DEPOSIT_CONTRACT_ADDRESS,
                hex::encode_prefixed(deposit_contract_address),
            )
            .with_file(EXECUTION_GENESIS_FILE, self.to_genesis_json()?);
        if self.consensus == ConsensusType::Clique {
            params = params.with_param(CLIQUE_PERIOD, CLIQUE_PERIOD_SECONDS);
        }
        Ok(params)
    }
}

#[cfg(test)]
mod tests {
    use simnet_network_spec::{
        constants::DEPOSIT_CONTRACT_ADDRESS, producer::DEFAULT_PRODUCER_CREDENTIALS,
    };

    use super::*;

    fn genesis(consensus: ConsensusType) -> ExecutionGenesis {
        ExecutionGenesis {
            chain_id: 1,
            network_id: 1,
            consensus,
            terminal_total_difficulty: U256::from(600_000),
            timestamp: 1_700_000_000,
            producer: DEFAULT_PRODUCER_CREDENTIALS,
        }
    }

    #[test]
    fn test_clique_genesis_document() -> anyhow::Result<()> {
        let document: serde_json::Value =
            serde_json::from_slice(&genesis(ConsensusType::Clique).to_genesis_json()?)?;

        assert_eq!(document["config"]["chainId"], 1);
        assert_eq!(document["config"]["terminalTotalDifficulty"], 600_000);
        assert_eq!(document["config"]["clique"]["period"], CLIQUE_PERIOD_SECONDS);
        assert_eq!(document["difficulty"], "0x1");
        assert_eq!(document["timestamp"], "0x6553f100");

        let extra_data = document["extraData"].as_str().expect("hex string");
        assert_eq!(
            extra_data.len(),
            2 + 2 * (CLIQUE_VANITY_LENGTH + 20 + CLIQUE_SEAL_LENGTH)
        );
        assert!(extra_data.contains("658bdf435d810c91414ec09147daa6db62406379"));
        Ok(())
    }

    #[test]
    fn test_ethash_genesis_document() -> anyhow::Result<()> {
        let document: serde_json::Value =
            serde_json::from_slice(&genesis(ConsensusType::Ethash).to_genesis_json()?)?;

        assert!(document["config"].get("clique").is_none());
        assert_eq!(document["extraData"], "0x");
        assert!(
            document["alloc"]
                .as_object()
                .expect("alloc is an object")
                .keys()
                .any(|account| account.to_lowercase().contains("1212121212"))
        );
        Ok(())
    }

    #[test]
    fn test_params() -> anyhow::Result<()> {
        let params = genesis(ConsensusType::Clique).to_params(DEPOSIT_CONTRACT_ADDRESS)?;

        assert_eq!(params.param(CHAIN_ID), Some("1"));
        assert_eq!(params.param(TERMINAL_TOTAL_DIFFICULTY), Some("600000"));
        assert_eq!(
            params.param(CONFIG_DEPOSIT_CONTRACT_ADDRESS),
            Some("0x4242424242424242424242424242424242424242")
        );
        assert_eq!(params.param(CLIQUE_PERIOD), Some("1"));
        assert!(params.file(EXECUTION_GENESIS_FILE).is_some());

        let ethash = genesis(ConsensusType::Ethash).to_params(DEPOSIT_CONTRACT_ADDRESS)?;
        assert_eq!(ethash.param(CLIQUE_PERIOD), None);
        Ok(())
    }

    #[test]
    fn test_terminal_total_difficulty_overflow() {
        let mut genesis = genesis(ConsensusType::Ethash);
        genesis.terminal_total_difficulty = U256::MAX;
        assert!(matches!(
            genesis.to_genesis_json(),
            Err(GenesisError::TerminalTotalDifficultyOverflow(_))
        ));
    }
}
