use thiserror::Error;

#[derive(Error, Debug)]
pub enum KeystoreError {
    #[error("invalid mnemonic: {0}")]
    Mnemonic(#[from] bip39::Error),

    #[error("failed to derive BLS key for validator {index}: {reason}")]
    KeyDerivation { index: u64, reason: String },

    #[error("failed to serialize key tranche {index}: {source}")]
    Serialize {
        index: usize,
        #[source]
        source: serde_json::Error,
    },
}
