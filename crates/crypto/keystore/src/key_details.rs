use alloy_primitives::{B256, FixedBytes};
use bip39::Mnemonic;
use blst::min_pk::SecretKey;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::{debug, info};

use crate::errors::KeystoreError;

pub const BLS_WITHDRAWAL_PREFIX: u8 = 0x00;

/// Credentials of a single genesis validator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyDetails {
    pub public_key: FixedBytes<48>,
    pub secret_key: B256,
    pub withdrawal_credentials: B256,
}

impl KeyDetails {
    pub fn from_secret_key(secret_key: &SecretKey) -> Self {
        let public_key = FixedBytes::from(secret_key.sk_to_pk().compress());
        Self {
            public_key,
            secret_key: B256::from(secret_key.to_bytes()),
            withdrawal_credentials: bls_withdrawal_credentials(&public_key),
        }
    }
}

pub fn bls_withdrawal_credentials(public_key: &FixedBytes<48>) -> B256 {
    let mut credentials: [u8; 32] = Sha256::digest(public_key.as_slice()).into();
    credentials[0] = BLS_WITHDRAWAL_PREFIX;
    B256::from(credentials)
}

/// Derives `count` validator key pairs from a BIP-39 mnemonic.
///
/// Key material for validator `i` is `sha256(seed || i)`, so the same mnemonic always yields the
/// same validator set.
pub fn generate_validator_keys(mnemonic: &str, count: u64) -> Result<Vec<KeyDetails>, KeystoreError> {
    info!("Generating {count} validator keys");

    let seed = Mnemonic::parse_normalized(mnemonic)?.to_seed("");
    let keys = (0..count)
        .map(|index| {
            let mut hasher = Sha256::new();
            hasher.update(seed);
            hasher.update(index.to_le_bytes());
            let key_material: [u8; 32] = hasher.finalize().into();

            let secret_key = SecretKey::key_gen(&key_material, &[]).map_err(|err| {
                KeystoreError::KeyDerivation {
                    index,
                    reason: format!("{err:?}"),
                }
            })?;
            Ok(KeyDetails::from_secret_key(&secret_key))
        })
        .collect::<Result<Vec<_>, KeystoreError>>()?;

    debug!("Key generation complete");
    Ok(keys)
}
