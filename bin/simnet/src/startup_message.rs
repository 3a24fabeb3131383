use std::env::consts::{ARCH, OS};

const SIMNET_VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn startup_message() -> String {
    format!(
        "
  ███████ ██ ███    ███ ███    ██ ███████ ████████
  ██      ██ ████  ████ ████   ██ ██         ██
  ███████ ██ ██ ████ ██ ██ ██  ██ █████      ██
       ██ ██ ██  ██  ██ ██  ██ ██ ██         ██
  ███████ ██ ██      ██ ██   ████ ███████    ██

 Version          : {SIMNET_VERSION}
 Build Platform   : {OS}-{ARCH}
"
    )
}
