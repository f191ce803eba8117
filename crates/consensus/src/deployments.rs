//! Version-bits soft-fork deployment descriptors.

use crate::constants::{MAX_DEPLOYMENT_BIT, VERSION_BITS_TOP_BITS, VERSION_BITS_TOP_MASK};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Deployment {
    pub name: &'static str,
    /// Position in the block-version signaling bitfield.
    pub bit: u8,
    pub start_time: u64,
    pub timeout: u64,
    /// Treated as always active, bypassing the signaling state machine.
    pub force: bool,
}

impl Deployment {
    pub fn mask(&self) -> u32 {
        1u32 << self.bit
    }

    pub fn bit_in_range(&self) -> bool {
        self.bit <= MAX_DEPLOYMENT_BIT
    }

    /// Whether a block with `version` signals readiness for this deployment.
    pub fn is_signaled(&self, version: u32) -> bool {
        (version & VERSION_BITS_TOP_MASK) == VERSION_BITS_TOP_BITS && (version & self.mask()) != 0
    }

    /// Whether `time` (median time past) falls outside the signaling window.
    pub fn is_expired(&self, time: u64) -> bool {
        time >= self.timeout
    }

    pub fn has_started(&self, time: u64) -> bool {
        time >= self.start_time
    }
}
