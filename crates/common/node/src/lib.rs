pub mod errors;
pub mod handle;
pub mod provisioner;
pub mod role;
