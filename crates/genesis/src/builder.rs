use beryd_consensus::{bytes_to_hex, hash256_to_hex, hex_to_bytes, Hash256};
use beryd_log::log_debug;
use beryd_primitives::script::{pay_to_pubkey, push_data, push_int};
use beryd_primitives::transaction::SEQUENCE_FINAL;
use beryd_primitives::{Block, BlockHeader, OutPoint, Transaction, TxIn, TxOut};

use crate::error::GenesisError;
use crate::options::{GenesisOptions, DEFAULT_MESSAGE, DEFAULT_PUBKEY_HEX, DEFAULT_REWARD};

const COINBASE_TX_VERSION: i32 = 1;
/// Pushed after the bits; kept for hash compatibility with existing chains.
const COINBASE_MARKER: u8 = 4;

#[derive(Clone, Debug, PartialEq)]
pub struct GenesisBlock {
    pub block: Block,
    /// Full block serialization.
    pub raw: Vec<u8>,
    /// Header hash, wire order.
    pub hash: Hash256,
}

impl GenesisBlock {
    pub fn hash_hex(&self) -> String {
        hash256_to_hex(&self.hash)
    }

    pub fn raw_hex(&self) -> String {
        bytes_to_hex(&self.raw)
    }

    pub fn merkle_root_hex(&self) -> String {
        hash256_to_hex(&self.block.header.merkle_root)
    }
}

/// `<bits> <marker 4> <message>`
pub fn coinbase_script_sig(bits: u32, message: &[u8]) -> Vec<u8> {
    let mut script = Vec::with_capacity(message.len() + 10);
    push_int(&mut script, i64::from(bits));
    push_data(&mut script, &[COINBASE_MARKER]);
    push_data(&mut script, message);
    script
}

pub fn build(options: &GenesisOptions) -> Result<GenesisBlock, GenesisError> {
    options.validate()?;

    let message = options
        .message
        .clone()
        .unwrap_or_else(|| DEFAULT_MESSAGE.as_bytes().to_vec());
    let script = match &options.script {
        Some(script) => script.clone(),
        None => default_script()?,
    };
    let reward = options.reward.unwrap_or(DEFAULT_REWARD);
    let coinbase_bits = options.coinbase_bits.unwrap_or(options.bits);

    log_debug!(
        "building genesis block: version {} time {} bits {:#010x} nonce {} coinbase bits {:#010x} message {} bytes script {} bytes reward {}",
        options.version,
        options.time,
        options.bits,
        options.nonce,
        coinbase_bits,
        message.len(),
        script.len(),
        reward
    );

    let coinbase = Transaction {
        version: COINBASE_TX_VERSION,
        vin: vec![TxIn {
            prevout: OutPoint::null(),
            script_sig: coinbase_script_sig(coinbase_bits, &message),
            sequence: SEQUENCE_FINAL,
        }],
        vout: vec![TxOut {
            value: reward,
            script_pubkey: script,
        }],
        lock_time: 0,
    };

    let header = BlockHeader {
        version: options.version,
        prev_block: [0u8; 32],
        merkle_root: coinbase.txid(),
        time: options.time,
        bits: options.bits,
        nonce: options.nonce,
    };
    let hash = header.hash();
    let block = Block {
        header,
        transactions: vec![coinbase],
    };
    let raw = block.consensus_encode();

    let genesis = GenesisBlock { block, raw, hash };
    log_debug!(
        "genesis block {} merkle root {} ({} bytes)",
        genesis.hash_hex(),
        genesis.merkle_root_hex(),
        genesis.raw.len()
    );
    Ok(genesis)
}

fn default_script() -> Result<Vec<u8>, GenesisError> {
    let pubkey = hex_to_bytes(DEFAULT_PUBKEY_HEX).map_err(|error| GenesisError::Hex {
        field: "default public key",
        error,
    })?;
    Ok(pay_to_pubkey(&pubkey))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coinbase_script_layout() {
        let script = coinbase_script_sig(0x1d00ffff, b"hi");
        assert_eq!(
            script,
            vec![0x04, 0xff, 0xff, 0x00, 0x1d, 0x01, 0x04, 0x02, b'h', b'i']
        );
    }

    #[test]
    fn small_bits_use_opcode_push() {
        let script = coinbase_script_sig(3, b"x");
        assert_eq!(script, vec![0x53, 0x01, 0x04, 0x01, b'x']);
    }

    #[test]
    fn long_messages_use_pushdata1() {
        let message = [b'a'; 100];
        let script = coinbase_script_sig(0x207fffff, &message);
        assert_eq!(&script[..7], &[0x04, 0xff, 0xff, 0x7f, 0x20, 0x01, 0x04]);
        assert_eq!(&script[7..9], &[0x4c, 100]);
        assert_eq!(script.len(), 9 + 100);
    }

    #[test]
    fn default_script_pays_historical_key() {
        let script = default_script().expect("default script");
        assert_eq!(script.len(), 67);
        assert_eq!(script[0], 65);
        assert_eq!(script[66], 0xac);
    }
}
