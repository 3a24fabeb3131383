pub mod artifacts;
pub mod cli;
pub mod dry_run;
pub mod startup_message;
