use serde::Serialize;
use simnet_network_spec::errors::ConfigError;
use simnet_node_config::{bundle::NodeConfig, keys::KEYS_FILE};

use crate::{errors::KeystoreError, key_details::KeyDetails};

/// A contiguous group of validator keys, run by a single validator client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyTranche {
    pub index: usize,
    pub keys: Vec<KeyDetails>,
}

impl KeyTranche {
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Serializes the tranche into the key file a validator client image loads on start-up.
    pub fn to_bundle(&self) -> Result<NodeConfig, KeystoreError> {
        let contents =
            serde_json::to_vec_pretty(self).map_err(|source| KeystoreError::Serialize {
                index: self.index,
                source,
            })?;
        Ok(NodeConfig::new().with_file(KEYS_FILE, contents))
    }
}

/// Splits `keys` into `count` tranches, keeping key order.
///
/// Tranche sizes differ by at most one; the first `keys.len() % count` tranches take the extra
/// key. More tranches than keys leaves the trailing tranches empty.
pub fn key_tranches(keys: &[KeyDetails], count: usize) -> Result<Vec<KeyTranche>, ConfigError> {
    if count == 0 {
        return Err(ConfigError::InvalidTrancheCount(count));
    }

    let base = keys.len() / count;
    let remainder = keys.len() % count;

    let mut offset = 0;
    let tranches = (0..count)
        .map(|index| {
            let size = base + usize::from(index < remainder);
            let tranche = KeyTranche {
                index,
                keys: keys[offset..offset + size].to_vec(),
            };
            offset += size;
            tranche
        })
        .collect();

    Ok(tranches)
}
