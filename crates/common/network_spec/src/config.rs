use std::fmt;

use alloy_primitives::U256;
use serde::{Deserialize, Serialize};

use crate::{
    errors::ConfigError,
    fork_schedule::{Fork, ForkName, MAINNET_FORK_SCHEDULE},
};

const DEFAULT_VALIDATOR_COUNT: u64 = 64;
const DEFAULT_SLOT_TIME: u64 = 6;

/// Block production scheme of the execution chain before the merge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsensusType {
    /// Proof-of-work, the first execution node mines.
    #[default]
    Ethash,
    /// Proof-of-authority, the first execution node seals.
    Clique,
}

impl fmt::Display for ConsensusType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConsensusType::Ethash => f.write_str("ethash"),
            ConsensusType::Clique => f.write_str("clique"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientDefinition {
    pub name: String,
    #[serde(default)]
    pub version: String,
}

impl ClientDefinition {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }
}

impl fmt::Display for ClientDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.version.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{} ({})", self.name, self.version)
        }
    }
}

/// Clients that together form one node of the testnet. Each node gets its own key tranche.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeDefinition {
    pub execution_client: ClientDefinition,
    pub consensus_client: ClientDefinition,
    pub validator_client: ClientDefinition,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestnetConfig {
    #[serde(with = "crate::decimal_u256", default)]
    pub terminal_total_difficulty: U256,

    #[serde(default = "default_validator_count")]
    pub validator_count: u64,

    /// Seconds per slot.
    #[serde(default = "default_slot_time")]
    pub slot_time: u64,

    #[serde(default)]
    pub altair_fork_epoch: u64,

    #[serde(default, alias = "merge_fork_epoch")]
    pub bellatrix_fork_epoch: u64,

    #[serde(default = "unscheduled")]
    pub capella_fork_epoch: u64,

    #[serde(default = "unscheduled")]
    pub deneb_fork_epoch: u64,

    #[serde(default)]
    pub eth1_consensus: ConsensusType,

    #[serde(default)]
    pub nodes: Vec<NodeDefinition>,
}

fn default_validator_count() -> u64 {
    DEFAULT_VALIDATOR_COUNT
}

fn default_slot_time() -> u64 {
    DEFAULT_SLOT_TIME
}

fn unscheduled() -> u64 {
    Fork::UNSCHEDULED_EPOCH
}

impl Default for TestnetConfig {
    fn default() -> Self {
        Self {
            terminal_total_difficulty: U256::ZERO,
            validator_count: DEFAULT_VALIDATOR_COUNT,
            slot_time: DEFAULT_SLOT_TIME,
            altair_fork_epoch: 0,
            bellatrix_fork_epoch: 0,
            capella_fork_epoch: Fork::UNSCHEDULED_EPOCH,
            deneb_fork_epoch: Fork::UNSCHEDULED_EPOCH,
            eth1_consensus: ConsensusType::default(),
            nodes: vec![],
        }
    }
}

impl TestnetConfig {
    /// Activation epochs of every fork after phase0, in activation order.
    pub fn fork_epochs(&self) -> [(ForkName, u64); 4] {
        [
            (ForkName::Altair, self.altair_fork_epoch),
            (ForkName::Bellatrix, self.bellatrix_fork_epoch),
            (ForkName::Capella, self.capella_fork_epoch),
            (ForkName::Deneb, self.deneb_fork_epoch),
        ]
    }

    /// Rejects parameters that cannot describe a working testnet. Nothing is clamped.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.validator_count == 0 {
            return Err(ConfigError::ZeroValidatorCount);
        }
        if self.slot_time == 0 {
            return Err(ConfigError::ZeroSlotTime);
        }

        let mut schedule = MAINNET_FORK_SCHEDULE;
        for (name, epoch) in self.fork_epochs() {
            schedule.set_epoch(name, epoch);
        }
        if let Some((earlier, later)) = schedule.first_out_of_order() {
            return Err(ConfigError::ForkOrder {
                earlier: earlier.name,
                earlier_epoch: earlier.epoch,
                later: later.name,
                later_epoch: later.epoch,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    const CONFIG: &str = r#"
terminal_total_difficulty: "600000"
validator_count: 64
slot_time: 3
merge_fork_epoch: 0
eth1_consensus: clique
nodes:
  - execution_client: { name: go-ethereum }
    consensus_client: { name: lighthouse-bn, version: v4.5.0 }
    validator_client: { name: lighthouse-vc, version: v4.5.0 }
"#;

    #[test]
    fn test_parse_testnet_config() -> anyhow::Result<()> {
        let config: TestnetConfig = serde_yaml::from_str(CONFIG)?;

        assert_eq!(config.terminal_total_difficulty, U256::from(600_000));
        assert_eq!(config.slot_time, 3);
        assert_eq!(config.bellatrix_fork_epoch, 0);
        assert_eq!(config.capella_fork_epoch, Fork::UNSCHEDULED_EPOCH);
        assert_eq!(config.eth1_consensus, ConsensusType::Clique);
        assert_eq!(config.nodes.len(), 1);
        assert_eq!(
            config.nodes[0].consensus_client.to_string(),
            "lighthouse-bn (v4.5.0)"
        );
        config.validate()?;

        Ok(())
    }

    #[test]
    fn test_numeric_terminal_total_difficulty() -> anyhow::Result<()> {
        let config: TestnetConfig = serde_yaml::from_str("terminal_total_difficulty: 0")?;
        assert_eq!(config.terminal_total_difficulty, U256::ZERO);
        assert_eq!(config.validator_count, DEFAULT_VALIDATOR_COUNT);
        Ok(())
    }

    #[rstest]
    #[case::unquoted("terminal_total_difficulty: 58750000000000000000000")]
    #[case::quoted("terminal_total_difficulty: \"58750000000000000000000\"")]
    fn test_mainnet_sized_terminal_total_difficulty(#[case] yaml: &str) -> anyhow::Result<()> {
        let config: TestnetConfig = serde_yaml::from_str(yaml)?;
        assert_eq!(
            config.terminal_total_difficulty,
            U256::from(58_750_000_000_000_000_000_000u128)
        );
        Ok(())
    }

    #[test]
    fn test_negative_terminal_total_difficulty() {
        assert!(serde_yaml::from_str::<TestnetConfig>("terminal_total_difficulty: -1").is_err());
    }

    #[rstest]
    #[case::no_validators(TestnetConfig { validator_count: 0, ..Default::default() })]
    #[case::no_slot_time(TestnetConfig { slot_time: 0, ..Default::default() })]
    #[case::merge_before_altair(TestnetConfig {
        altair_fork_epoch: 2,
        bellatrix_fork_epoch: 1,
        ..Default::default()
    })]
    #[case::deneb_without_capella(TestnetConfig { deneb_fork_epoch: 4, ..Default::default() })]
    fn test_validate_rejects_malformed(#[case] config: TestnetConfig) {
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_fork_order_names_both_forks() {
        let config = TestnetConfig {
            altair_fork_epoch: 2,
            bellatrix_fork_epoch: 1,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ForkOrder {
                earlier: ForkName::Altair,
                earlier_epoch: 2,
                later: ForkName::Bellatrix,
                later_epoch: 1,
            })
        ));
    }
}
