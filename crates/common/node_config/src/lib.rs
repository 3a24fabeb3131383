pub mod bundle;
pub mod keys;
