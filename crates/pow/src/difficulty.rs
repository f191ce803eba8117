//! Difficulty and compact target utilities.

use std::cmp::Ordering;

use beryd_consensus::{Hash256, NetworkParams};
use primitive_types::U256;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompactError {
    Negative,
    Overflow,
}

impl std::fmt::Display for CompactError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CompactError::Negative => write!(f, "compact target has negative sign bit"),
            CompactError::Overflow => write!(f, "compact target overflows 256-bit range"),
        }
    }
}

impl std::error::Error for CompactError {}

pub fn compact_to_u256(bits: u32) -> Result<U256, CompactError> {
    let size = bits >> 24;
    let mut word = bits & 0x007f_ffff;
    let negative = (bits & 0x0080_0000) != 0;

    if negative && word != 0 {
        return Err(CompactError::Negative);
    }

    let value = if size <= 3 {
        let shift = 8 * (3 - size);
        word >>= shift;
        U256::from(word)
    } else {
        if word != 0 {
            let overflow = size > 34 || (word > 0xff && size > 33) || (word > 0xffff && size > 32);
            if overflow {
                return Err(CompactError::Overflow);
            }
        }
        U256::from(word) << (8 * (size - 3))
    };

    Ok(value)
}

pub fn u256_to_compact(value: U256) -> u32 {
    if value.is_zero() {
        return 0;
    }

    let mut size = value.bits().div_ceil(8) as u32;
    let mut compact: u32;

    if size <= 3 {
        compact = value.low_u32() << (8 * (3 - size));
    } else {
        let shift = 8 * (size - 3);
        compact = (value >> shift).low_u32();
    }

    if (compact & 0x0080_0000) != 0 {
        compact >>= 8;
        size += 1;
    }

    (size << 24) | (compact & 0x007f_ffff)
}

pub fn compact_to_target(bits: u32) -> Result<Hash256, CompactError> {
    let value = compact_to_u256(bits)?;
    Ok(value.to_little_endian())
}

pub fn target_to_compact(target: &Hash256) -> u32 {
    u256_to_compact(U256::from_little_endian(target))
}

/// Compares a wire-order hash against a wire-order target as 256-bit integers.
pub fn hash_meets_target(hash: &Hash256, target: &Hash256) -> bool {
    cmp_le(hash, target) != Ordering::Greater
}

/// Expected number of hashes needed to meet `bits`.
pub fn block_proof(bits: u32) -> Result<U256, CompactError> {
    let target = compact_to_u256(bits)?;
    if target.is_zero() {
        return Ok(U256::zero());
    }
    let one = U256::from(1u64);
    Ok((!target / (target + one)) + one)
}

pub fn cmp_le(a: &Hash256, b: &Hash256) -> Ordering {
    let left = U256::from_little_endian(a);
    let right = U256::from_little_endian(b);
    left.cmp(&right)
}

pub fn pow_limit(params: &NetworkParams) -> U256 {
    U256::from_little_endian(&params.pow.limit)
}

pub fn minimum_chainwork(params: &NetworkParams) -> U256 {
    U256::from_little_endian(&params.pow.chainwork)
}

/// Retarget at an interval boundary from the interval's first and last block times.
///
/// The measured timespan is clamped to a factor of four either way and the
/// result never exceeds the network's limit.
pub fn next_target(
    params: &NetworkParams,
    last_bits: u32,
    first_time: i64,
    last_time: i64,
) -> Result<u32, CompactError> {
    if params.pow.no_retargeting {
        return Ok(last_bits);
    }

    let target_timespan = i64::from(params.pow.target_timespan);
    let actual_timespan =
        last_time.saturating_sub(first_time).clamp(target_timespan / 4, target_timespan * 4);

    let mut next = mul_div_u256(
        compact_to_u256(last_bits)?,
        actual_timespan as u64,
        target_timespan as u64,
    );
    let limit = pow_limit(params);
    if next > limit {
        next = limit;
    }
    Ok(u256_to_compact(next))
}

/// Whether a block may fall back to the easiest target after a long gap.
pub fn min_difficulty_allowed(params: &NetworkParams, block_time: i64, prev_time: i64) -> bool {
    params.pow.target_reset
        && block_time > prev_time.saturating_add(2 * i64::from(params.pow.target_spacing))
}

fn mul_div_u256(value: U256, mul: u64, div: u64) -> U256 {
    if div == 0 {
        return U256::max_value();
    }
    let div_u = U256::from(div);
    let q = value / div_u;
    let r = value - q * div_u;
    let (q_mul, overflow_q) = q.overflowing_mul(U256::from(mul));
    if overflow_q {
        return U256::max_value();
    }
    let r_mul = r * U256::from(mul);
    let (sum, overflow_sum) = q_mul.overflowing_add(r_mul / div_u);
    if overflow_sum {
        U256::max_value()
    } else {
        sum
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use beryd_consensus::{network_params, Network};

    #[test]
    fn compact_roundtrips_canonical_values() {
        for bits in [0x1d00ffff, 0x1e0ffd00, 0x1e0aff00, 0x1e0a1f44, 0x207fffff] {
            let value = compact_to_u256(bits).expect("decode bits");
            assert_eq!(u256_to_compact(value), bits, "{bits:#x}");
        }
    }

    #[test]
    fn compact_rejects_negative_and_overflow() {
        assert_eq!(compact_to_u256(0x0480_0001), Err(CompactError::Negative));
        assert_eq!(compact_to_u256(0x2301_0000), Err(CompactError::Overflow));
        assert_eq!(compact_to_u256(0x2201_0000), Err(CompactError::Overflow));
        // A set sign bit with a zero mantissa is just zero.
        assert_eq!(compact_to_u256(0x0180_0000), Ok(U256::zero()));
    }

    #[test]
    fn small_sizes_shift_mantissa_down() {
        assert_eq!(compact_to_u256(0x0112_3456), Ok(U256::from(0x12u64)));
        assert_eq!(compact_to_u256(0x0212_3456), Ok(U256::from(0x1234u64)));
        assert_eq!(u256_to_compact(U256::from(0x12u64)), 0x0112_0000);
        assert_eq!(u256_to_compact(U256::from(0x80u64)), 0x0200_8000);
    }

    #[test]
    fn block_proof_of_difficulty_one() {
        let proof = block_proof(0x1d00ffff).expect("proof");
        assert_eq!(proof, U256::from(0x1_0001_0001u64));
        assert_eq!(block_proof(0).expect("proof"), U256::zero());
    }

    #[test]
    fn retarget_on_schedule_keeps_bits() {
        let params = network_params(Network::Main);
        let timespan = i64::from(params.pow.target_timespan);
        let bits = next_target(params, 0x1e0ffd00, 0, timespan).expect("retarget");
        assert_eq!(bits, 0x1e0ffd00);

        let bits = next_target(params, 0x1e0ffd00, 0, timespan / 2).expect("retarget");
        assert_eq!(bits, 0x1e07fe80);
    }

    #[test]
    fn retarget_clamps_timespan() {
        let params = network_params(Network::Main);
        let timespan = i64::from(params.pow.target_timespan);

        let bits = next_target(params, 0x1d00ffff, 0, timespan * 10).expect("retarget");
        assert_eq!(bits, 0x1d03fffc);

        let bits = next_target(params, 0x1d00ffff, 0, 1).expect("retarget");
        assert_eq!(bits, 0x1c3fffc0);
    }

    #[test]
    fn retarget_saturates_extreme_times() {
        let params = network_params(Network::Main);
        let bits = next_target(params, 0x1d00ffff, i64::MIN, i64::MAX).expect("retarget");
        assert_eq!(bits, 0x1d03fffc);

        let bits = next_target(params, 0x1d00ffff, i64::MAX, i64::MIN).expect("retarget");
        assert_eq!(bits, 0x1c3fffc0);
    }

    #[test]
    fn retarget_is_capped_at_limit() {
        let params = network_params(Network::Main);
        let timespan = i64::from(params.pow.target_timespan);
        let bits = next_target(params, 0x1e0ffd00, 0, timespan * 10).expect("retarget");
        assert_eq!(bits, u256_to_compact(pow_limit(params)));
        assert_eq!(bits, 0x1e0fffff);
    }

    #[test]
    fn regtest_never_retargets() {
        let params = network_params(Network::Regtest);
        assert_eq!(next_target(params, 0x1e0a1f44, 0, 1), Ok(0x1e0a1f44));
    }

    #[test]
    fn min_difficulty_after_long_gap() {
        let testnet = network_params(Network::Testnet);
        let spacing = i64::from(testnet.pow.target_spacing);
        assert!(!min_difficulty_allowed(testnet, 1_000 + 2 * spacing, 1_000));
        assert!(min_difficulty_allowed(testnet, 1_001 + 2 * spacing, 1_000));

        assert!(!min_difficulty_allowed(testnet, i64::MAX, i64::MAX));

        let main = network_params(Network::Main);
        assert!(!min_difficulty_allowed(main, 1_000_000, 0));
    }
}
