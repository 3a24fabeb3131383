use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context;
use simnet_node_config::bundle::NodeConfig;
use simnet_testnet::prepared::PreparedTestnet;
use tracing::info;

/// Writes every role configuration and key tranche of `prepared` below `output`.
///
/// Each bundle gets its own directory holding a `params.env` file and its files at their in-image
/// paths:
///
/// ```text
/// output/execution/{params.env, genesis.json}
/// output/beacon/{params.env, config.yaml, genesis.ssz}
/// output/validator/{params.env, config.yaml}
/// output/tranche-<i>/keys/keys.json
/// ```
pub fn write_artifacts(prepared: &PreparedTestnet, output: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let mut written = vec![];

    for (name, config) in [
        ("execution", prepared.execution_config()),
        ("beacon", prepared.beacon_config()),
        ("validator", prepared.validator_config()),
    ] {
        written.extend(write_bundle(&output.join(name), config)?);
    }

    for tranche in prepared.key_tranches() {
        let bundle = tranche.to_bundle()?;
        written.extend(write_bundle(
            &output.join(format!("tranche-{}", tranche.index)),
            &bundle,
        )?);
    }

    info!("Wrote {} artifacts to {}", written.len(), output.display());
    Ok(written)
}

fn write_bundle(dir: &Path, config: &NodeConfig) -> anyhow::Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory {}", dir.display()))?;

    let mut written = vec![];
    if !config.params().is_empty() {
        let path = dir.join("params.env");
        fs::write(&path, config.to_env())
            .with_context(|| format!("Failed to write {}", path.display()))?;
        written.push(path);
    }

    for (file, contents) in config.files() {
        let path = dir.join(file.trim_start_matches('/'));
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
        fs::write(&path, contents).with_context(|| format!("Failed to write {}", path.display()))?;
        written.push(path);
    }

    Ok(written)
}
