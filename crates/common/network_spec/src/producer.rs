use alloy_primitives::{Address, B256, address, b256};

/// Credentials the first execution node produces blocks with before the merge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProducerCredentials {
    /// Coinbase of the proof-of-work miner.
    pub miner: Address,
    /// Key the proof-of-authority sealer signs with.
    pub clique_private_key: B256,
    /// Address of `clique_private_key`, the only authorized signer at genesis.
    pub clique_signer: Address,
}

pub const DEFAULT_PRODUCER_CREDENTIALS: ProducerCredentials = ProducerCredentials {
    miner: address!("0x1212121212121212121212121212121212121212"),
    clique_private_key: b256!(
        "0x9c647b8b7c4e7c3490668fb6c11473619db80c93704c70893d3813af4090c39c"
    ),
    clique_signer: address!("0x658bdf435d810c91414ec09147daa6db62406379"),
};

impl Default for ProducerCredentials {
    fn default() -> Self {
        DEFAULT_PRODUCER_CREDENTIALS
    }
}
