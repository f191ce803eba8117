//! Hash type and hexadecimal conversions.
//!
//! Hashes are stored in wire order (little-endian). Their display form is the
//! byte-reversed hex string used by block explorers and the registry literals.

pub type Hash256 = [u8; 32];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HexError {
    InvalidLength,
    InvalidHex,
}

impl std::fmt::Display for HexError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HexError::InvalidLength => write!(f, "invalid hex length"),
            HexError::InvalidHex => write!(f, "invalid hex character"),
        }
    }
}

impl std::error::Error for HexError {}

/// Parses a display-order hash and returns it in wire order.
pub fn hash256_from_hex(input: &str) -> Result<Hash256, HexError> {
    let mut hex = input.trim();
    if let Some(stripped) = hex.strip_prefix("0x").or_else(|| hex.strip_prefix("0X")) {
        hex = stripped;
    }
    if hex.len() != 64 {
        return Err(HexError::InvalidLength);
    }

    let bytes = hex_to_bytes(hex)?;
    let mut hash = [0u8; 32];
    hash.copy_from_slice(&bytes);
    hash.reverse();
    Ok(hash)
}

/// Formats a wire-order hash in display order.
pub fn hash256_to_hex(hash: &Hash256) -> String {
    let mut reversed = *hash;
    reversed.reverse();
    bytes_to_hex(&reversed)
}

pub fn bytes_to_hex(bytes: &[u8]) -> String {
    const HEX: &[u8; 16] = b"0123456789abcdef";
    let mut out = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        out.push(HEX[(byte >> 4) as usize] as char);
        out.push(HEX[(byte & 0x0f) as usize] as char);
    }
    out
}

pub fn hex_to_bytes(input: &str) -> Result<Vec<u8>, HexError> {
    let hex = input.trim();
    if hex.len() % 2 == 1 {
        return Err(HexError::InvalidLength);
    }
    let mut bytes = Vec::with_capacity(hex.len() / 2);
    let mut iter = hex.as_bytes().iter().copied();
    while let (Some(high), Some(low)) = (iter.next(), iter.next()) {
        let high = decode_hex_digit(high).ok_or(HexError::InvalidHex)?;
        let low = decode_hex_digit(low).ok_or(HexError::InvalidHex)?;
        bytes.push(high << 4 | low);
    }
    Ok(bytes)
}

fn decode_hex_digit(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_hex_is_reversed_wire_order() {
        let hash = hash256_from_hex(
            "000000000019d6689c085ae165831e934ff763ae46a2a6c172b3f1b60a8ce26f",
        )
        .expect("hash");
        assert_eq!(hash[0], 0x6f);
        assert_eq!(hash[31], 0x00);
        assert_eq!(
            hash256_to_hex(&hash),
            "000000000019d6689c085ae165831e934ff763ae46a2a6c172b3f1b60a8ce26f"
        );
    }

    #[test]
    fn reversing_twice_is_identity() {
        let original: Hash256 = std::array::from_fn(|i| i as u8);
        let mut hash = original;
        hash.reverse();
        assert_ne!(hash, original);
        hash.reverse();
        assert_eq!(hash, original);
    }

    #[test]
    fn rejects_bad_hashes() {
        assert_eq!(hash256_from_hex("00"), Err(HexError::InvalidLength));
        assert_eq!(
            hash256_from_hex(&"zz".repeat(32)),
            Err(HexError::InvalidHex)
        );
        assert_eq!(hex_to_bytes("abc"), Err(HexError::InvalidLength));
    }

    #[test]
    fn hex_bytes_roundtrip() {
        let bytes = hex_to_bytes("00ffA0").expect("hex");
        assert_eq!(bytes, vec![0x00, 0xff, 0xa0]);
        assert_eq!(bytes_to_hex(&bytes), "00ffa0");
        assert_eq!(hex_to_bytes("").expect("empty"), Vec::<u8>::new());
    }
}
