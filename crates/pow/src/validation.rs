use beryd_consensus::NetworkParams;
use beryd_primitives::block::BlockHeader;
use primitive_types::U256;

use crate::difficulty::{compact_to_u256, pow_limit, CompactError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PowError {
    InvalidBits(&'static str),
    BitsMismatch { expected: u32, actual: u32 },
    HashMismatch,
    Compact(CompactError),
}

impl std::fmt::Display for PowError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PowError::InvalidBits(message) => write!(f, "{message}"),
            PowError::BitsMismatch { expected, actual } => {
                write!(f, "bits {actual:#010x} differ from expected {expected:#010x}")
            }
            PowError::HashMismatch => write!(f, "pow hash does not meet target"),
            PowError::Compact(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for PowError {}

impl From<CompactError> for PowError {
    fn from(err: CompactError) -> Self {
        PowError::Compact(err)
    }
}

/// Decodes `bits` and requires a nonzero target no easier than the limit.
pub fn check_bits(bits: u32, params: &NetworkParams) -> Result<U256, PowError> {
    let target = compact_to_u256(bits)?;
    if target.is_zero() {
        return Err(PowError::InvalidBits("pow target is zero"));
    }
    if target > pow_limit(params) {
        return Err(PowError::InvalidBits("pow target above limit"));
    }
    Ok(target)
}

/// Checks the genesis descriptor's difficulty against the network's pow settings.
pub fn check_genesis_target(params: &NetworkParams) -> Result<(), PowError> {
    check_bits(params.genesis.bits, params)?;
    if params.genesis.bits != params.pow.bits {
        return Err(PowError::BitsMismatch {
            expected: params.pow.bits,
            actual: params.genesis.bits,
        });
    }
    Ok(())
}

/// Double-SHA256 header hash must not exceed the target its bits encode.
pub fn validate_pow_header(header: &BlockHeader, params: &NetworkParams) -> Result<(), PowError> {
    let target = check_bits(header.bits, params)?;
    let hash_value = U256::from_little_endian(&header.hash());
    if hash_value > target {
        return Err(PowError::HashMismatch);
    }
    Ok(())
}
