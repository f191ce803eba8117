//! Consensus-wide constants shared by the registry and its consumers.

/// Height of the genesis block on every network.
pub const GENESIS_HEIGHT: u32 = 0;

/// Highest block-version bit a deployment may signal on.
///
/// Bits 29-31 are reserved for the version-bits top mask.
pub const MAX_DEPLOYMENT_BIT: u8 = 28;

/// Top bits that mark a block version as signaling deployments.
pub const VERSION_BITS_TOP_BITS: u32 = 0x2000_0000;
pub const VERSION_BITS_TOP_MASK: u32 = 0xe000_0000;

/// Sentinel activation height meaning "never activates".
pub const NO_ACTIVATION_HEIGHT: u32 = u32::MAX;

/// Sentinel deployment time meaning "no timeout" on test chains.
pub const NO_TIMEOUT: u64 = 0xffff_ffff;
