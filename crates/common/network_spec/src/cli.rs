use std::{fs, path::Path};

use crate::{config::TestnetConfig, errors::ConfigError};

pub fn testnet_config_parser(path: &str) -> Result<TestnetConfig, String> {
    read_testnet_config(path).map_err(|err| err.to_string())
}

pub fn read_testnet_config<P: AsRef<Path>>(path: P) -> Result<TestnetConfig, ConfigError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let config = serde_yaml::from_str::<TestnetConfig>(&contents)?;
    config.validate()?;
    Ok(config)
}
