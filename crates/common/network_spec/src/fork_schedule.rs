use std::{fmt, slice::Iter};

use alloy_primitives::{aliases::B32, fixed_bytes};
use serde::{Deserialize, Serialize};

macro_rules! fork_array {
    // Entry
    (
        ( $first_name:expr , $first_ver:literal , $first_epoch:expr )
        $( , ( $rest_name:expr , $rest_ver:literal , $rest_epoch:expr ) )* $(,)?
    ) => {
        [
            Fork {
                name: $first_name,
                version: fixed_bytes!($first_ver),
                epoch: $first_epoch,
            }
            $( , Fork {
                name: $rest_name,
                version: fixed_bytes!($rest_ver),
                epoch: $rest_epoch,
            } )*
        ]
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ForkName {
    Phase0,
    Altair,
    Bellatrix,
    Capella,
    Deneb,
}

impl ForkName {
    /// Name clients expect for the fork active at genesis, where bellatrix is still `merge`.
    pub fn genesis_param(&self) -> &'static str {
        match self {
            ForkName::Bellatrix => "merge",
            _ => self.as_str(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ForkName::Phase0 => "phase0",
            ForkName::Altair => "altair",
            ForkName::Bellatrix => "bellatrix",
            ForkName::Capella => "capella",
            ForkName::Deneb => "deneb",
        }
    }
}

impl fmt::Display for ForkName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fork {
    pub name: ForkName,
    pub version: B32,
    pub epoch: u64,
}

impl Fork {
    pub const UNSCHEDULED_EPOCH: u64 = u64::MAX;
}

/// Forks in activation order, starting with phase0.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ForkSchedule(pub [Fork; ForkSchedule::TOTAL]);

impl ForkSchedule {
    pub const TOTAL: usize = 5;

    pub const fn new(forks: [Fork; ForkSchedule::TOTAL]) -> Self {
        Self(forks)
    }

    pub fn iter(&self) -> Iter<'_, Fork> {
        self.0.iter()
    }

    pub fn scheduled(&self) -> impl Iterator<Item = &Fork> {
        self.iter()
            .filter(|fork| fork.epoch != Fork::UNSCHEDULED_EPOCH)
    }

    pub fn get(&self, name: ForkName) -> &Fork {
        &self.0[name as usize]
    }

    pub fn set_epoch(&mut self, name: ForkName, epoch: u64) {
        self.0[name as usize].epoch = epoch;
    }

    /// The latest fork active at `epoch`.
    pub fn active_at(&self, epoch: u64) -> &Fork {
        self.scheduled()
            .filter(|fork| fork.epoch <= epoch)
            .last()
            .unwrap_or(&self.0[0])
    }

    /// First fork that activates before its predecessor, if any.
    pub fn first_out_of_order(&self) -> Option<(&Fork, &Fork)> {
        self.0
            .windows(2)
            .find(|pair| pair[1].epoch < pair[0].epoch)
            .map(|pair| (&pair[0], &pair[1]))
    }
}

pub const MAINNET_FORK_SCHEDULE: ForkSchedule = ForkSchedule::new(fork_array!(
    (ForkName::Phase0, "0x00000000", 0),          // Phase0
    (ForkName::Altair, "0x01000000", 74_240),     // Altair
    (ForkName::Bellatrix, "0x02000000", 144_896), // Bellatrix
    (ForkName::Capella, "0x03000000", 194_048),   // Capella
    (ForkName::Deneb, "0x04000000", 269_568),     // Deneb
));
