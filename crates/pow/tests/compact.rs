use beryd_consensus::{hex_to_bytes, network_params, Network};
use beryd_pow::difficulty::{
    compact_to_target, compact_to_u256, hash_meets_target, minimum_chainwork, pow_limit,
    target_to_compact,
};
use beryd_pow::validation::{check_genesis_target, validate_pow_header, PowError};
use beryd_primitives::Block;
use primitive_types::U256;

#[test]
fn compact_to_target_roundtrip() {
    let bits = 0x1d00ffff;
    let target = compact_to_target(bits).expect("target");
    let back = target_to_compact(&target);
    assert_eq!(back, bits);
}

#[test]
fn compact_target_layout() {
    let bits = 0x207fffff;
    let target = compact_to_target(bits).expect("target");
    assert!(target[..29].iter().all(|b| *b == 0));
    assert_eq!(target[29], 0xff);
    assert_eq!(target[30], 0xff);
    assert_eq!(target[31], 0x7f);
}

#[test]
fn hash_meets_target_cmp() {
    let target = [0x10u8; 32];
    let smaller = [0x00u8; 32];
    let larger = [0xffu8; 32];
    assert!(hash_meets_target(&smaller, &target));
    assert!(hash_meets_target(&target, &target));
    assert!(!hash_meets_target(&larger, &target));
}

#[test]
fn every_genesis_target_is_within_limit() {
    for network in Network::ALL {
        let params = network_params(network);
        let target = compact_to_u256(params.genesis.bits).expect("genesis bits");
        assert!(target <= pow_limit(params), "{network}");
        check_genesis_target(params).expect("genesis target");
    }
}

#[test]
fn chainwork_floor_is_zero_on_main() {
    assert!(minimum_chainwork(network_params(Network::Main)).is_zero());
    assert_eq!(
        minimum_chainwork(network_params(Network::Simnet)),
        U256::from(2u64)
    );
}

#[test]
fn simnet_genesis_satisfies_its_target() {
    let params = network_params(Network::Simnet);
    let raw = hex_to_bytes(params.genesis_block).expect("genesis hex");
    let block = Block::consensus_decode(&raw).expect("genesis block");
    validate_pow_header(&block.header, params).expect("simnet genesis pow");

    let mut header = block.header.clone();
    header.nonce = 0;
    assert_eq!(
        validate_pow_header(&header, params),
        Err(PowError::HashMismatch)
    );
}

#[test]
fn bits_easier_than_limit_are_rejected() {
    let params = network_params(Network::Main);
    let raw = hex_to_bytes(params.genesis_block).expect("genesis hex");
    let mut header = Block::consensus_decode(&raw).expect("genesis block").header;
    header.bits = 0x207fffff;
    assert_eq!(
        validate_pow_header(&header, params),
        Err(PowError::InvalidBits("pow target above limit"))
    );
}
