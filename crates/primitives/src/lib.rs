//! Core block/transaction types and consensus serialization.

pub mod address;
pub mod block;
pub mod encoding;
pub mod hash;
pub mod outpoint;
pub mod script;
pub mod transaction;

pub use address::{
    address_to_script_pubkey, base58check_decode, base58check_encode, script_pubkey_to_address,
    secret_key_to_wif, wif_to_secret_key, AddressError,
};
pub use block::{Block, BlockDecodeError, BlockHeader, BLOCK_HEADER_SIZE};
pub use hash::{hash160, sha256, sha256d};
pub use outpoint::OutPoint;
pub use transaction::{Transaction, TransactionDecodeError, TxIn, TxOut};
