use beryd_consensus::{network_params, Network};
use beryd_primitives::script::{p2pkh_script, p2sh_script, witness_v0_script};
use beryd_primitives::{
    address_to_script_pubkey, script_pubkey_to_address, secret_key_to_wif, wif_to_secret_key,
    AddressError,
};

const HASH: [u8; 20] = [0x11; 20];

#[test]
fn main_base58_addresses() {
    let params = network_params(Network::Main);

    let p2pkh = p2pkh_script(&HASH);
    let address = script_pubkey_to_address(&p2pkh, params).expect("p2pkh address");
    assert_eq!(address, "B61KYnjpfXHN2w2e1nR869HneK4P1Gz4va");
    assert_eq!(address_to_script_pubkey(&address, params).unwrap(), p2pkh);

    let p2sh = p2sh_script(&HASH);
    let address = script_pubkey_to_address(&p2sh, params).expect("p2sh address");
    assert_eq!(address, "MYo19cVK8DL9JCeteh5QhQNF1RkuUiY9Hi");
    assert_eq!(address_to_script_pubkey(&address, params).unwrap(), p2sh);
}

#[test]
fn testnet_uses_its_own_version_byte() {
    let params = network_params(Network::Testnet);
    let address = script_pubkey_to_address(&p2pkh_script(&HASH), params).expect("address");
    assert_eq!(address, "5TGsmGZnizo6as5RfukfJPUmqFTB3KyfdL");
}

#[test]
fn witness_addresses_use_network_hrp() {
    let main = network_params(Network::Main);
    let p2wpkh = witness_v0_script(&HASH);
    let address = script_pubkey_to_address(&p2wpkh, main).expect("p2wpkh address");
    assert_eq!(address, "lc1qzyg3zyg3zyg3zyg3zyg3zyg3zyg3zyg3aflrk4");
    assert_eq!(address_to_script_pubkey(&address, main).unwrap(), p2wpkh);
    assert_eq!(
        address_to_script_pubkey(&address.to_uppercase(), main).unwrap(),
        p2wpkh
    );

    let p2wsh = witness_v0_script(&[0x22; 32]);
    let address = script_pubkey_to_address(&p2wsh, main).expect("p2wsh address");
    assert_eq!(
        address,
        "lc1qyg3zyg3zyg3zyg3zyg3zyg3zyg3zyg3zyg3zyg3zyg3zyg3zyg3qdaxxr0"
    );

    let regtest = network_params(Network::Regtest);
    let address = script_pubkey_to_address(&p2wpkh, regtest).expect("regtest address");
    assert_eq!(address, "rb1qzyg3zyg3zyg3zyg3zyg3zyg3zyg3zyg328fddy");
}

#[test]
fn foreign_addresses_are_rejected() {
    let main = network_params(Network::Main);
    let testnet = network_params(Network::Testnet);

    let err = address_to_script_pubkey("5TGsmGZnizo6as5RfukfJPUmqFTB3KyfdL", main).unwrap_err();
    assert_eq!(err, AddressError::UnknownPrefix);

    let err = address_to_script_pubkey("lc1qzyg3zyg3zyg3zyg3zyg3zyg3zyg3zyg3aflrk4", testnet)
        .unwrap_err();
    assert_eq!(err, AddressError::UnknownPrefix);
}

#[test]
fn non_standard_scripts_have_no_address() {
    let params = network_params(Network::Simnet);
    assert_eq!(script_pubkey_to_address(&[0x6a, 0x01, 0x00], params), None);
}

#[test]
fn wif_roundtrips_main() {
    let params = network_params(Network::Main);
    let secret = [0x11u8; 32];

    let wif_uncompressed = secret_key_to_wif(&secret, params, false);
    assert_eq!(
        wif_uncompressed,
        "8F1K3uF6nrs4jXAPYP3MxDsvbiKxbMLs26mbSqE6PBn8Rh4Ndj8"
    );
    let (decoded, compressed) = wif_to_secret_key(&wif_uncompressed, params).expect("decode wif");
    assert_eq!(decoded, secret);
    assert!(!compressed);

    let wif_compressed = secret_key_to_wif(&secret, params, true);
    assert_eq!(
        wif_compressed,
        "YxpNfobEZR5yUg8SVWHRUjqmaDQgNcnfmrTq31rnkvaBmh2yyEym"
    );
    let (decoded, compressed) = wif_to_secret_key(&wif_compressed, params).expect("decode wif");
    assert_eq!(decoded, secret);
    assert!(compressed);
}

#[test]
fn wif_roundtrips_on_every_network() {
    for network in Network::ALL {
        let params = network_params(network);
        let secret = [0x22u8; 32];
        let wif = secret_key_to_wif(&secret, params, true);
        let (decoded, compressed) = wif_to_secret_key(&wif, params).expect("decode");
        assert_eq!(decoded, secret, "{network}");
        assert!(compressed);
    }
}

#[test]
fn wif_rejects_wrong_network() {
    let secret = [0x33u8; 32];
    let wif = secret_key_to_wif(&secret, network_params(Network::Main), false);
    let err = wif_to_secret_key(&wif, network_params(Network::Testnet)).unwrap_err();
    assert!(matches!(err, AddressError::UnknownPrefix));
}
