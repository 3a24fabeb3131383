use std::sync::{Arc, LazyLock};

use alloy_primitives::{Address, B256, U256, address, aliases::B32, fixed_bytes};
use serde::{Deserialize, Serialize};

use crate::fork_schedule::{Fork, ForkName, ForkSchedule, MAINNET_FORK_SCHEDULE};

/// Consensus layer runtime configuration, in the layout of a client `config.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct ChainSpec {
    pub preset_base: String,
    pub config_name: String,

    // Transition
    #[serde(with = "crate::decimal_u256")]
    pub terminal_total_difficulty: U256,
    pub terminal_block_hash: B256,
    #[serde(with = "serde_utils::quoted_u64")]
    pub terminal_block_hash_activation_epoch: u64,

    // Genesis
    #[serde(with = "serde_utils::quoted_u64")]
    pub min_genesis_active_validator_count: u64,
    #[serde(with = "serde_utils::quoted_u64")]
    pub min_genesis_time: u64,
    pub genesis_fork_version: B32,
    #[serde(with = "serde_utils::quoted_u64")]
    pub genesis_delay: u64,

    // Forking
    pub altair_fork_version: B32,
    #[serde(with = "serde_utils::quoted_u64")]
    pub altair_fork_epoch: u64,
    pub bellatrix_fork_version: B32,
    #[serde(with = "serde_utils::quoted_u64")]
    pub bellatrix_fork_epoch: u64,
    pub capella_fork_version: B32,
    #[serde(with = "serde_utils::quoted_u64")]
    pub capella_fork_epoch: u64,
    pub deneb_fork_version: B32,
    #[serde(with = "serde_utils::quoted_u64")]
    pub deneb_fork_epoch: u64,

    // Time parameters
    #[serde(with = "serde_utils::quoted_u64")]
    pub seconds_per_slot: u64,
    #[serde(with = "serde_utils::quoted_u64")]
    pub seconds_per_eth1_block: u64,
    #[serde(with = "serde_utils::quoted_u64")]
    pub min_validator_withdrawability_delay: u64,
    #[serde(with = "serde_utils::quoted_u64")]
    pub shard_committee_period: u64,
    #[serde(with = "serde_utils::quoted_u64")]
    pub eth1_follow_distance: u64,

    // Validator cycle
    #[serde(with = "serde_utils::quoted_u64")]
    pub inactivity_score_bias: u64,
    #[serde(with = "serde_utils::quoted_u64")]
    pub inactivity_score_recovery_rate: u64,
    #[serde(with = "serde_utils::quoted_u64")]
    pub ejection_balance: u64,
    #[serde(with = "serde_utils::quoted_u64")]
    pub min_per_epoch_churn_limit: u64,
    #[serde(with = "serde_utils::quoted_u64")]
    pub churn_limit_quotient: u64,

    // Fork choice
    #[serde(with = "serde_utils::quoted_u64")]
    pub proposer_score_boost: u64,

    // Deposit contract
    #[serde(with = "serde_utils::quoted_u64")]
    pub deposit_chain_id: u64,
    #[serde(with = "serde_utils::quoted_u64")]
    pub deposit_network_id: u64,
    pub deposit_contract_address: Address,
}

impl ChainSpec {
    pub fn fork_schedule(&self) -> ForkSchedule {
        let fork = |name, version, epoch| Fork {
            name,
            version,
            epoch,
        };
        ForkSchedule::new([
            fork(ForkName::Phase0, self.genesis_fork_version, 0),
            fork(
                ForkName::Altair,
                self.altair_fork_version,
                self.altair_fork_epoch,
            ),
            fork(
                ForkName::Bellatrix,
                self.bellatrix_fork_version,
                self.bellatrix_fork_epoch,
            ),
            fork(
                ForkName::Capella,
                self.capella_fork_version,
                self.capella_fork_epoch,
            ),
            fork(ForkName::Deneb, self.deneb_fork_version, self.deneb_fork_epoch),
        ])
    }

    /// Phase0 always activates at genesis, so only later forks can be moved.
    pub fn set_fork_epoch(&mut self, name: ForkName, epoch: u64) {
        match name {
            ForkName::Phase0 => {}
            ForkName::Altair => self.altair_fork_epoch = epoch,
            ForkName::Bellatrix => self.bellatrix_fork_epoch = epoch,
            ForkName::Capella => self.capella_fork_epoch = epoch,
            ForkName::Deneb => self.deneb_fork_epoch = epoch,
        }
    }

    /// Name of the fork that is already active in the genesis state.
    pub fn genesis_fork(&self) -> ForkName {
        self.fork_schedule().active_at(0).name
    }

    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }
}

pub static MAINNET: LazyLock<Arc<ChainSpec>> = LazyLock::new(|| {
    let forks = MAINNET_FORK_SCHEDULE;
    ChainSpec {
        preset_base: "mainnet".to_string(),
        config_name: "mainnet".to_string(),
        terminal_total_difficulty: U256::from(58_750_000_000_000_000_000_000_u128),
        terminal_block_hash: B256::ZERO,
        terminal_block_hash_activation_epoch: Fork::UNSCHEDULED_EPOCH,
        min_genesis_active_validator_count: 16_384,
        min_genesis_time: 1_606_824_000,
        genesis_fork_version: fixed_bytes!("0x00000000"),
        genesis_delay: 604_800,
        altair_fork_version: forks.get(ForkName::Altair).version,
        altair_fork_epoch: forks.get(ForkName::Altair).epoch,
        bellatrix_fork_version: forks.get(ForkName::Bellatrix).version,
        bellatrix_fork_epoch: forks.get(ForkName::Bellatrix).epoch,
        capella_fork_version: forks.get(ForkName::Capella).version,
        capella_fork_epoch: forks.get(ForkName::Capella).epoch,
        deneb_fork_version: forks.get(ForkName::Deneb).version,
        deneb_fork_epoch: forks.get(ForkName::Deneb).epoch,
        seconds_per_slot: 12,
        seconds_per_eth1_block: 14,
        min_validator_withdrawability_delay: 256,
        shard_committee_period: 256,
        eth1_follow_distance: 2_048,
        inactivity_score_bias: 4,
        inactivity_score_recovery_rate: 16,
        ejection_balance: 16_000_000_000,
        min_per_epoch_churn_limit: 4,
        churn_limit_quotient: 65_536,
        proposer_score_boost: 40,
        deposit_chain_id: 1,
        deposit_network_id: 1,
        deposit_contract_address: address!("0x00000000219ab540356cBB839Cbe05303d7705Fa"),
    }
    .into()
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mainnet_genesis_fork_is_phase0() {
        assert_eq!(MAINNET.genesis_fork(), ForkName::Phase0);
        assert!(MAINNET.fork_schedule().first_out_of_order().is_none());
    }

    #[test]
    fn test_yaml_uses_config_layout() -> anyhow::Result<()> {
        let yaml = MAINNET.to_yaml()?;

        assert!(yaml.contains("SECONDS_PER_SLOT: '12'"));
        assert!(yaml.contains("TERMINAL_TOTAL_DIFFICULTY: '58750000000000000000000'"));

        let decoded: ChainSpec = serde_yaml::from_str(&yaml)?;
        assert_eq!(&decoded, MAINNET.as_ref());

        Ok(())
    }

    #[test]
    fn test_set_fork_epoch_ignores_phase0() {
        let mut spec = MAINNET.as_ref().clone();
        spec.set_fork_epoch(ForkName::Phase0, 7);
        spec.set_fork_epoch(ForkName::Altair, 0);
        spec.set_fork_epoch(ForkName::Bellatrix, 0);

        let schedule = spec.fork_schedule();
        assert_eq!(schedule.get(ForkName::Phase0).epoch, 0);
        assert_eq!(spec.genesis_fork(), ForkName::Bellatrix);
    }
}
