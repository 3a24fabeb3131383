pub mod beacon_state;
pub mod builder;
pub mod errors;
pub mod execution;
pub mod validator;
