use beryd_consensus::{hash256_to_hex, hex_to_bytes, network_params, Network, NetworkParams};
use beryd_log::{log_error, log_info};
use beryd_primitives::Block;

use crate::builder::{build, GenesisBlock};
use crate::error::GenesisError;
use crate::options::GenesisOptions;

/// Rebuilds the network's genesis block and compares it with the registry.
///
/// Checks the hash first, then the merkle root, then the full serialization,
/// and reports the first field that differs.
pub fn verify_network(params: &NetworkParams) -> Result<GenesisBlock, GenesisError> {
    let genesis = build(&GenesisOptions::for_network(params)?)?;

    let recorded_raw = hex_to_bytes(params.genesis_block).map_err(|error| GenesisError::Hex {
        field: "genesis block",
        error,
    })?;

    let checks = [
        (
            "hash",
            hash256_to_hex(&params.genesis.hash),
            genesis.hash_hex(),
        ),
        (
            "merkle root",
            hash256_to_hex(&params.genesis.merkle_root),
            genesis.merkle_root_hex(),
        ),
    ];
    for (field, expected, actual) in checks {
        if expected != actual {
            return Err(mismatch(params.network, field, expected, actual));
        }
    }
    if recorded_raw != genesis.raw {
        return Err(mismatch(
            params.network,
            "serialization",
            params.genesis_block.to_ascii_lowercase(),
            genesis.raw_hex(),
        ));
    }

    log_info!("{} genesis block verified: {}", params.network, genesis.hash_hex());
    Ok(genesis)
}

/// Verifies every registered network, collecting each outcome.
pub fn verify_all() -> Vec<(Network, Result<GenesisBlock, GenesisError>)> {
    Network::ALL
        .into_iter()
        .map(|network| (network, verify_network(network_params(network))))
        .collect()
}

/// Decodes the registry's recorded genesis block.
pub fn decode_recorded(params: &NetworkParams) -> Result<Block, GenesisError> {
    let raw = hex_to_bytes(params.genesis_block).map_err(|error| GenesisError::Hex {
        field: "genesis block",
        error,
    })?;
    Ok(Block::consensus_decode(&raw)?)
}

fn mismatch(network: Network, field: &'static str, expected: String, actual: String) -> GenesisError {
    log_error!("{network} genesis {field} mismatch: expected {expected}, got {actual}");
    GenesisError::Mismatch {
        network,
        field,
        expected,
        actual,
    }
}
