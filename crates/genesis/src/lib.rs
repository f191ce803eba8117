//! Deterministic genesis block construction and registry verification.

mod builder;
mod error;
mod options;
mod verify;

pub use builder::{build, coinbase_script_sig, GenesisBlock};
pub use error::GenesisError;
pub use options::{
    GenesisOptions, DEFAULT_MESSAGE, DEFAULT_PUBKEY_HEX, DEFAULT_REWARD, MAX_MESSAGE_SIZE,
};
pub use verify::{decode_recorded, verify_all, verify_network};
