pub mod errors;
pub mod key_details;
pub mod tranche;
