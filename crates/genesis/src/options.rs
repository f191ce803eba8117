use beryd_consensus::money::{money_range, Amount, COIN};
use beryd_consensus::{hex_to_bytes, NetworkParams};

use crate::error::GenesisError;

/// Coinbase message used when none is supplied.
pub const DEFAULT_MESSAGE: &str =
    "The Times 03/Jan/2009 Chancellor on brink of second bailout for banks";

/// Uncompressed public key paid by the default output script.
pub const DEFAULT_PUBKEY_HEX: &str = "04678afdb0fe5548271967f1a67130b7105cd6a828e03909a67962e0ea1f61deb649f6bc3f4cef38c4f35504e51ec112de5c384df7ba0b8d578a4c702b6bf11d5f";

pub const DEFAULT_REWARD: Amount = 50 * COIN;

/// Largest message a single script push may carry.
pub const MAX_MESSAGE_SIZE: usize = 520;

/// Inputs to [`crate::build`].
///
/// Optional fields fall back to the historical defaults. A field that is
/// present is validated as given and never replaced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenesisOptions {
    pub version: i32,
    pub time: u32,
    pub bits: u32,
    pub nonce: u32,
    /// Compact value pushed at the start of the coinbase script; defaults to `bits`.
    pub coinbase_bits: Option<u32>,
    pub message: Option<Vec<u8>>,
    pub script: Option<Vec<u8>>,
    pub reward: Option<Amount>,
}

impl GenesisOptions {
    pub fn new(version: i32, time: u32, bits: u32, nonce: u32) -> Self {
        Self {
            version,
            time,
            bits,
            nonce,
            coinbase_bits: None,
            message: None,
            script: None,
            reward: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<Vec<u8>>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_script(mut self, script: impl Into<Vec<u8>>) -> Self {
        self.script = Some(script.into());
        self
    }

    pub fn with_reward(mut self, reward: Amount) -> Self {
        self.reward = Some(reward);
        self
    }

    pub fn with_coinbase_bits(mut self, bits: u32) -> Self {
        self.coinbase_bits = Some(bits);
        self
    }

    /// Options that reproduce the network's recorded genesis block.
    pub fn for_network(params: &NetworkParams) -> Result<Self, GenesisError> {
        let genesis = &params.genesis;
        let coinbase = &genesis.coinbase;
        let script = coinbase
            .output_script
            .map(hex_to_bytes)
            .transpose()
            .map_err(|error| GenesisError::Hex {
                field: "genesis output script",
                error,
            })?;

        Ok(Self {
            version: genesis.version,
            time: genesis.time,
            bits: genesis.bits,
            nonce: genesis.nonce,
            coinbase_bits: coinbase.bits,
            message: coinbase.message.map(|message| message.as_bytes().to_vec()),
            script,
            reward: coinbase.reward,
        })
    }

    pub(crate) fn validate(&self) -> Result<(), GenesisError> {
        if let Some(reward) = self.reward {
            if reward < 0 {
                return Err(invalid(format!("reward {reward} is negative")));
            }
            if !money_range(reward) {
                return Err(invalid(format!("reward {reward} exceeds the money supply")));
            }
        }
        if matches!(&self.script, Some(script) if script.is_empty()) {
            return Err(invalid("output script is empty".to_string()));
        }
        if let Some(message) = &self.message {
            if message.is_empty() {
                return Err(invalid("coinbase message is empty".to_string()));
            }
            if message.len() > MAX_MESSAGE_SIZE {
                return Err(invalid(format!(
                    "coinbase message is {} bytes (max {MAX_MESSAGE_SIZE})",
                    message.len()
                )));
            }
        }
        Ok(())
    }
}

fn invalid(message: String) -> GenesisError {
    GenesisError::InvalidOptions(message)
}
