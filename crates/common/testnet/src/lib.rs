pub mod bootstrap;
pub mod errors;
pub mod prepared;
pub mod testnet;
