use beryd_consensus::{HexError, Network};
use beryd_primitives::BlockDecodeError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenesisError {
    InvalidOptions(String),
    /// A hex field in the registry could not be decoded.
    Hex {
        field: &'static str,
        error: HexError,
    },
    Decode(BlockDecodeError),
    Mismatch {
        network: Network,
        field: &'static str,
        expected: String,
        actual: String,
    },
}

impl std::fmt::Display for GenesisError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GenesisError::InvalidOptions(message) => {
                write!(f, "invalid genesis options: {message}")
            }
            GenesisError::Hex { field, error } => write!(f, "invalid {field} hex: {error}"),
            GenesisError::Decode(error) => write!(f, "recorded genesis block: {error}"),
            GenesisError::Mismatch {
                network,
                field,
                expected,
                actual,
            } => write!(
                f,
                "{network} genesis {field} mismatch: expected {expected}, got {actual}"
            ),
        }
    }
}

impl std::error::Error for GenesisError {}

impl From<BlockDecodeError> for GenesisError {
    fn from(error: BlockDecodeError) -> Self {
        GenesisError::Decode(error)
    }
}
