//! Script construction and standard output templates.
//!
//! Only building and pattern matching live here; nothing is executed.

pub const OP_0: u8 = 0x00;
pub const OP_PUSHDATA1: u8 = 0x4c;
pub const OP_PUSHDATA2: u8 = 0x4d;
pub const OP_PUSHDATA4: u8 = 0x4e;
pub const OP_1NEGATE: u8 = 0x4f;
pub const OP_1: u8 = 0x51;
pub const OP_16: u8 = 0x60;
pub const OP_DUP: u8 = 0x76;
pub const OP_EQUAL: u8 = 0x87;
pub const OP_EQUALVERIFY: u8 = 0x88;
pub const OP_HASH160: u8 = 0xa9;
pub const OP_CHECKSIG: u8 = 0xac;

const MAX_DIRECT_PUSH: usize = 75;

/// Appends `data` with the shortest push opcode that fits its length.
pub fn push_data(script: &mut Vec<u8>, data: &[u8]) {
    match data.len() {
        0..=MAX_DIRECT_PUSH => script.push(data.len() as u8),
        76..=0xff => {
            script.push(OP_PUSHDATA1);
            script.push(data.len() as u8);
        }
        0x100..=0xffff => {
            script.push(OP_PUSHDATA2);
            script.extend_from_slice(&(data.len() as u16).to_le_bytes());
        }
        _ => {
            script.push(OP_PUSHDATA4);
            script.extend_from_slice(&(data.len() as u32).to_le_bytes());
        }
    }
    script.extend_from_slice(data);
}

/// Minimal little-endian sign-magnitude encoding used by script numbers.
pub fn script_num_to_vec(value: i64) -> Vec<u8> {
    if value == 0 {
        return Vec::new();
    }
    let mut abs = value.unsigned_abs();
    let mut result = Vec::new();
    while abs > 0 {
        result.push((abs & 0xff) as u8);
        abs >>= 8;
    }
    let sign_bit = 0x80u8;
    if let Some(last) = result.last_mut() {
        if (*last & sign_bit) != 0 {
            result.push(if value < 0 { sign_bit } else { 0 });
        } else if value < 0 {
            *last |= sign_bit;
        }
    }
    result
}

/// Pushes an integer, using the small-integer opcodes where they exist.
pub fn push_int(script: &mut Vec<u8>, value: i64) {
    match value {
        0 => script.push(OP_0),
        -1 => script.push(OP_1NEGATE),
        1..=16 => script.push(OP_1 + (value as u8 - 1)),
        _ => push_data(script, &script_num_to_vec(value)),
    }
}

pub fn pay_to_pubkey(pubkey: &[u8]) -> Vec<u8> {
    let mut script = Vec::with_capacity(pubkey.len() + 2);
    push_data(&mut script, pubkey);
    script.push(OP_CHECKSIG);
    script
}

/// Matches `<33 or 65 byte key> OP_CHECKSIG`.
pub fn is_pay_to_pubkey(script: &[u8]) -> bool {
    match script.first() {
        Some(&len) if len == 33 || len == 65 => {
            script.len() == usize::from(len) + 2 && script[script.len() - 1] == OP_CHECKSIG
        }
        _ => false,
    }
}

pub fn p2pkh_script(hash: &[u8; 20]) -> Vec<u8> {
    let mut script = Vec::with_capacity(25);
    script.push(OP_DUP);
    script.push(OP_HASH160);
    push_data(&mut script, hash);
    script.push(OP_EQUALVERIFY);
    script.push(OP_CHECKSIG);
    script
}

pub fn p2sh_script(hash: &[u8; 20]) -> Vec<u8> {
    let mut script = Vec::with_capacity(23);
    script.push(OP_HASH160);
    push_data(&mut script, hash);
    script.push(OP_EQUAL);
    script
}

/// Version 0 witness program: `OP_0 <20 or 32 bytes>`.
pub fn witness_v0_script(program: &[u8]) -> Vec<u8> {
    let mut script = Vec::with_capacity(program.len() + 2);
    script.push(OP_0);
    push_data(&mut script, program);
    script
}

pub fn p2pkh_hash(script: &[u8]) -> Option<&[u8]> {
    let matches = script.len() == 25
        && script[0] == OP_DUP
        && script[1] == OP_HASH160
        && script[2] == 0x14
        && script[23] == OP_EQUALVERIFY
        && script[24] == OP_CHECKSIG;
    matches.then(|| &script[3..23])
}

pub fn p2sh_hash(script: &[u8]) -> Option<&[u8]> {
    let matches = script.len() == 23
        && script[0] == OP_HASH160
        && script[1] == 0x14
        && script[22] == OP_EQUAL;
    matches.then(|| &script[2..22])
}

pub fn witness_v0_program(script: &[u8]) -> Option<&[u8]> {
    match script {
        [OP_0, len @ (0x14 | 0x20), program @ ..] if program.len() == usize::from(*len) => {
            Some(program)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn script_numbers_are_minimal() {
        assert!(script_num_to_vec(0).is_empty());
        assert_eq!(script_num_to_vec(4), vec![0x04]);
        assert_eq!(script_num_to_vec(-1), vec![0x81]);
        assert_eq!(script_num_to_vec(0x80), vec![0x80, 0x00]);
        assert_eq!(script_num_to_vec(-0x80), vec![0x80, 0x80]);
        assert_eq!(script_num_to_vec(486_604_799), vec![0xff, 0xff, 0x00, 0x1d]);
    }

    #[test]
    fn small_integers_use_opcodes() {
        let mut script = Vec::new();
        push_int(&mut script, 0);
        push_int(&mut script, -1);
        push_int(&mut script, 1);
        push_int(&mut script, 16);
        push_int(&mut script, 17);
        assert_eq!(script, vec![OP_0, OP_1NEGATE, OP_1, OP_16, 0x01, 0x11]);
    }

    #[test]
    fn compact_bits_push_matches_coinbase_prefix() {
        let mut script = Vec::new();
        push_int(&mut script, 486_604_799);
        push_data(&mut script, &[4]);
        assert_eq!(script, vec![0x04, 0xff, 0xff, 0x00, 0x1d, 0x01, 0x04]);
    }

    #[test]
    fn push_data_switches_opcodes_at_boundaries() {
        let mut script = Vec::new();
        push_data(&mut script, &[0u8; 75]);
        assert_eq!(script[0], 75);

        let mut script = Vec::new();
        push_data(&mut script, &[0u8; 76]);
        assert_eq!(&script[..2], &[OP_PUSHDATA1, 76]);

        let mut script = Vec::new();
        push_data(&mut script, &[0u8; 256]);
        assert_eq!(&script[..3], &[OP_PUSHDATA2, 0x00, 0x01]);
        assert_eq!(script.len(), 259);
    }

    #[test]
    fn pay_to_pubkey_roundtrip() {
        let script = pay_to_pubkey(&[0x04; 65]);
        assert_eq!(script.len(), 67);
        assert!(is_pay_to_pubkey(&script));
        assert!(is_pay_to_pubkey(&pay_to_pubkey(&[0x02; 33])));
        assert!(!is_pay_to_pubkey(&pay_to_pubkey(&[0x02; 20])));
        assert!(!is_pay_to_pubkey(&[]));
    }

    #[test]
    fn templates_are_recognized() {
        let hash = [0x11u8; 20];
        assert_eq!(p2pkh_hash(&p2pkh_script(&hash)), Some(&hash[..]));
        assert_eq!(p2sh_hash(&p2sh_script(&hash)), Some(&hash[..]));
        assert_eq!(p2pkh_hash(&p2sh_script(&hash)), None);
        assert_eq!(witness_v0_program(&witness_v0_script(&hash)), Some(&hash[..]));
        assert_eq!(witness_v0_program(&witness_v0_script(&[0u8; 32])), Some(&[0u8; 32][..]));
        assert_eq!(witness_v0_program(&witness_v0_script(&[0u8; 21])), None);
    }
}
