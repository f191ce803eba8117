//! Network parameter registry, deployments, and consensus constants.

pub mod constants;
pub mod deployments;
pub mod hex;
pub mod money;
pub mod params;

pub use deployments::Deployment;
pub use hex::{bytes_to_hex, hash256_from_hex, hash256_to_hex, hex_to_bytes, Hash256, HexError};
pub use params::{
    check_registry, lookup, network_params, AddressPrefix, BlockParams, GenesisCoinbase,
    GenesisParams, KeyPrefix, LookupError, Network, NetworkParams, ParamsError, PowParams,
};
