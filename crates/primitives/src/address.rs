//! Base58Check and bech32 address encoding, plus WIF private keys.

use bech32::segwit;
use bech32::Hrp;
use beryd_consensus::NetworkParams;

use crate::hash::sha256d;
use crate::script::{
    p2pkh_hash, p2pkh_script, p2sh_hash, p2sh_script, witness_v0_program, witness_v0_script,
};

const BASE58_ALPHABET: &[u8; 58] = b"123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddressError {
    InvalidLength,
    InvalidCharacter,
    InvalidChecksum,
    UnknownPrefix,
    InvalidBech32,
    UnsupportedWitnessVersion,
}

impl std::fmt::Display for AddressError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AddressError::InvalidLength => write!(f, "invalid address length"),
            AddressError::InvalidCharacter => write!(f, "invalid base58 character"),
            AddressError::InvalidChecksum => write!(f, "invalid checksum"),
            AddressError::UnknownPrefix => write!(f, "address prefix does not match network"),
            AddressError::InvalidBech32 => write!(f, "invalid bech32 address"),
            AddressError::UnsupportedWitnessVersion => write!(f, "unsupported witness version"),
        }
    }
}

impl std::error::Error for AddressError {}

pub fn address_to_script_pubkey(
    address: &str,
    params: &NetworkParams,
) -> Result<Vec<u8>, AddressError> {
    let prefix = &params.address_prefix;
    let looks_bech32 = address
        .to_ascii_lowercase()
        .starts_with(&format!("{}1", prefix.bech32));
    if looks_bech32 {
        return bech32_to_script_pubkey(address, params);
    }
    if segwit::decode(address).is_ok() {
        return Err(AddressError::UnknownPrefix);
    }

    let payload = base58check_decode(address)?;
    let (&version, hash) = payload.split_first().ok_or(AddressError::InvalidLength)?;
    let hash: &[u8; 20] = hash.try_into().map_err(|_| AddressError::InvalidLength)?;
    if version == prefix.pubkeyhash {
        return Ok(p2pkh_script(hash));
    }
    if version == prefix.scripthash {
        return Ok(p2sh_script(hash));
    }
    Err(AddressError::UnknownPrefix)
}

fn bech32_to_script_pubkey(address: &str, params: &NetworkParams) -> Result<Vec<u8>, AddressError> {
    let (hrp, version, program) =
        segwit::decode(address).map_err(|_| AddressError::InvalidBech32)?;
    if hrp.to_lowercase() != params.address_prefix.bech32 {
        return Err(AddressError::UnknownPrefix);
    }
    if version != segwit::VERSION_0 {
        return Err(AddressError::UnsupportedWitnessVersion);
    }
    if program.len() != 20 && program.len() != 32 {
        return Err(AddressError::InvalidLength);
    }
    Ok(witness_v0_script(&program))
}

pub fn script_pubkey_to_address(script: &[u8], params: &NetworkParams) -> Option<String> {
    let prefix = &params.address_prefix;
    if let Some(hash) = p2pkh_hash(script) {
        return Some(versioned_base58(prefix.pubkeyhash, hash));
    }
    if let Some(hash) = p2sh_hash(script) {
        return Some(versioned_base58(prefix.scripthash, hash));
    }
    if let Some(program) = witness_v0_program(script) {
        let hrp = Hrp::parse(prefix.bech32).ok()?;
        return segwit::encode_v0(hrp, program).ok();
    }
    None
}

fn versioned_base58(version: u8, hash: &[u8]) -> String {
    let mut payload = Vec::with_capacity(1 + hash.len());
    payload.push(version);
    payload.extend_from_slice(hash);
    base58check_encode(&payload)
}

pub fn secret_key_to_wif(secret: &[u8; 32], params: &NetworkParams, compressed: bool) -> String {
    let mut payload = Vec::with_capacity(1 + secret.len() + usize::from(compressed));
    payload.push(params.key_prefix.privkey);
    payload.extend_from_slice(secret);
    if compressed {
        payload.push(0x01);
    }
    base58check_encode(&payload)
}

/// Returns the secret and whether it was marked as compressed.
pub fn wif_to_secret_key(
    wif: &str,
    params: &NetworkParams,
) -> Result<([u8; 32], bool), AddressError> {
    let payload = base58check_decode(wif)?;
    let (&prefix, rest) = payload.split_first().ok_or(AddressError::InvalidLength)?;
    if prefix != params.key_prefix.privkey {
        return Err(AddressError::UnknownPrefix);
    }

    let compressed = match rest.len() {
        32 => false,
        33 if rest[32] == 0x01 => true,
        _ => return Err(AddressError::InvalidLength),
    };
    let mut secret = [0u8; 32];
    secret.copy_from_slice(&rest[..32]);
    Ok((secret, compressed))
}

pub fn base58check_decode(input: &str) -> Result<Vec<u8>, AddressError> {
    let bytes = base58_decode(input)?;
    if bytes.len() < 4 {
        return Err(AddressError::InvalidLength);
    }
    let (payload, checksum) = bytes.split_at(bytes.len() - 4);
    let digest = sha256d(payload);
    if checksum != &digest[..4] {
        return Err(AddressError::InvalidChecksum);
    }
    Ok(payload.to_vec())
}

pub fn base58check_encode(payload: &[u8]) -> String {
    let mut data = Vec::with_capacity(payload.len() + 4);
    data.extend_from_slice(payload);
    let checksum = sha256d(payload);
    data.extend_from_slice(&checksum[..4]);
    base58_encode(&data)
}

fn base58_decode(input: &str) -> Result<Vec<u8>, AddressError> {
    if input.is_empty() {
        return Err(AddressError::InvalidLength);
    }
    let mut bytes: Vec<u8> = Vec::new();
    for ch in input.bytes() {
        let mut carry = u32::from(base58_value(ch).ok_or(AddressError::InvalidCharacter)?);
        for byte in bytes.iter_mut().rev() {
            let value = u32::from(*byte) * 58 + carry;
            *byte = (value & 0xff) as u8;
            carry = value >> 8;
        }
        while carry > 0 {
            bytes.insert(0, (carry & 0xff) as u8);
            carry >>= 8;
        }
    }

    let leading_zeros = input.bytes().take_while(|b| *b == b'1').count();
    let mut out = vec![0u8; leading_zeros];
    out.extend_from_slice(&bytes);
    Ok(out)
}

fn base58_encode(data: &[u8]) -> String {
    let mut digits: Vec<u8> = Vec::new();
    for byte in data {
        let mut carry = u32::from(*byte);
        for digit in digits.iter_mut().rev() {
            let value = u32::from(*digit) * 256 + carry;
            *digit = (value % 58) as u8;
            carry = value / 58;
        }
        while carry > 0 {
            digits.insert(0, (carry % 58) as u8);
            carry /= 58;
        }
    }
    let leading_zeros = data.iter().take_while(|b| **b == 0).count();
    let mut out = String::with_capacity(leading_zeros + digits.len());
    out.extend(std::iter::repeat('1').take(leading_zeros));
    out.extend(digits.iter().map(|digit| BASE58_ALPHABET[usize::from(*digit)] as char));
    out
}

fn base58_value(byte: u8) -> Option<u8> {
    BASE58_ALPHABET
        .iter()
        .position(|value| *value == byte)
        .map(|pos| pos as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base58_keeps_leading_zero_bytes() {
        assert_eq!(base58_encode(&[0, 0, 1]), "112");
        assert_eq!(base58_decode("112").unwrap(), vec![0, 0, 1]);
        assert_eq!(base58_encode(&[]), "");
    }

    #[test]
    fn corrupted_checksum_is_rejected() {
        let mut encoded = base58check_encode(b"bery").into_bytes();
        let last = encoded.len() - 1;
        encoded[last] = if encoded[last] == b'2' { b'3' } else { b'2' };
        let encoded = String::from_utf8(encoded).unwrap();
        assert_eq!(
            base58check_decode(&encoded),
            Err(AddressError::InvalidChecksum)
        );
    }

    #[test]
    fn invalid_characters_are_rejected() {
        assert_eq!(base58check_decode("0OIl"), Err(AddressError::InvalidCharacter));
    }
}
