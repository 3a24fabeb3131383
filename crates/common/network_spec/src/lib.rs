pub mod chain_spec;
pub mod cli;
pub mod config;
pub mod constants;
pub mod decimal_u256;
pub mod errors;
pub mod fork_schedule;
pub mod producer;
