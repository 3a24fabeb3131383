use std::path::PathBuf;

use clap::{Parser, Subcommand};
use simnet_network_spec::{cli::testnet_config_parser, config::TestnetConfig};

pub const DEFAULT_MNEMONIC: &str = "couple kiwi radio river setup fortune hunt grief buddy forward perfect empty slim wear bounce drift execute nation tobacco dutch chapter festival ice fog";
const DEFAULT_VERBOSITY: u8 = 3;
const DEFAULT_OUTPUT_DIR: &str = "testnet";

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level, 0 (errors only) to 5 (trace). Ignored when RUST_LOG is set
    #[arg(short, long, global = true, default_value_t = DEFAULT_VERBOSITY)]
    pub verbosity: u8,
}

impl Cli {
    pub fn directive(&self) -> &'static str {
        match self.verbosity {
            0 => "error",
            1 => "warn",
            2 | 3 => "info",
            4 => "debug",
            _ => "trace",
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Write the genesis, consensus config, role configs and key tranches of a testnet
    #[command(name = "prepare")]
    Prepare(PrepareConfig),

    /// Bootstrap the standard topology against loopback placeholder nodes
    #[command(name = "dry-run")]
    DryRun(DryRunConfig),
}

#[derive(Debug, Parser)]
pub struct PrepareConfig {
    /// Testnet description (YAML)
    #[arg(long, env = "SIMNET_CONFIG", value_parser = testnet_config_parser)]
    pub config: TestnetConfig,

    /// Mnemonic the validator keys are derived from
    #[arg(long, env = "SIMNET_MNEMONIC", default_value = DEFAULT_MNEMONIC)]
    pub mnemonic: String,

    /// Directory the artifacts are written to
    #[arg(long, default_value = DEFAULT_OUTPUT_DIR)]
    pub output: PathBuf,
}

#[derive(Debug, Parser)]
pub struct DryRunConfig {
    /// Testnet description (YAML)
    #[arg(long, env = "SIMNET_CONFIG", value_parser = testnet_config_parser)]
    pub config: TestnetConfig,

    /// Mnemonic the validator keys are derived from
    #[arg(long, env = "SIMNET_MNEMONIC", default_value = DEFAULT_MNEMONIC)]
    pub mnemonic: String,
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    const CONFIG: &str = "
validator_count: 8
slot_time: 3
nodes:
  - execution_client: { name: go-ethereum }
    consensus_client: { name: lighthouse-bn }
    validator_client: { name: lighthouse-vc }
";

    #[test]
    fn test_cli_prepare_command() -> anyhow::Result<()> {
        let mut file = tempfile::NamedTempFile::new()?;
        file.write_all(CONFIG.as_bytes())?;
        let path = file.path().to_string_lossy().to_string();

        let cli = Cli::parse_from([
            "simnet",
            "prepare",
            "--config",
            &path,
            "--output",
            "out",
            "--verbosity",
            "4",
        ]);

        assert_eq!(cli.directive(), "debug");
        match cli.command {
            Commands::Prepare(config) => {
                assert_eq!(config.config.validator_count, 8);
                assert_eq!(config.config.slot_time, 3);
                assert_eq!(config.config.nodes.len(), 1);
                assert_eq!(config.mnemonic, DEFAULT_MNEMONIC);
                assert_eq!(config.output, PathBuf::from("out"));
            }
            Commands::DryRun(_) => panic!("expected prepare"),
        }
        Ok(())
    }

    #[test]
    fn test_cli_rejects_invalid_config() -> anyhow::Result<()> {
        let mut file = tempfile::NamedTempFile::new()?;
        file.write_all(b"validator_count: 0\nnodes: []\n")?;
        let path = file.path().to_string_lossy().to_string();

        let result = Cli::try_parse_from(["simnet", "dry-run", "--config", &path]);

        assert!(result.is_err());
        Ok(())
    }
}
