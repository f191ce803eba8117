//! Network parameter definitions.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use crate::constants::{GENESIS_HEIGHT, NO_TIMEOUT};
use crate::deployments::Deployment;
use crate::hex::{hash256_from_hex, hash256_to_hex, Hash256};
use crate::money::{Amount, COIN};

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub enum Network {
    Main,
    Testnet,
    Regtest,
    Simnet,
}

impl Network {
    pub const ALL: [Network; 4] = [
        Network::Main,
        Network::Testnet,
        Network::Regtest,
        Network::Simnet,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Network::Main => "main",
            Network::Testnet => "testnet",
            Network::Regtest => "regtest",
            Network::Simnet => "simnet",
        }
    }

    const fn index(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for Network {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Network {
    type Err = LookupError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim() {
            "main" | "mainnet" => Ok(Network::Main),
            "testnet" => Ok(Network::Testnet),
            "regtest" => Ok(Network::Regtest),
            "simnet" => Ok(Network::Simnet),
            other => Err(LookupError::UnknownNetwork(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    UnknownNetwork(String),
}

impl std::fmt::Display for LookupError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LookupError::UnknownNetwork(name) => write!(f, "unknown network '{name}'"),
        }
    }
}

impl std::error::Error for LookupError {}

/// Inputs the genesis coinbase was built from.
///
/// `None` means the builder default was used when the block was created.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct GenesisCoinbase {
    /// Compact target pushed at the start of the coinbase script.
    pub bits: Option<u32>,
    pub message: Option<&'static str>,
    /// Output script, hex encoded.
    pub output_script: Option<&'static str>,
    pub reward: Option<Amount>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct GenesisParams {
    pub version: i32,
    pub hash: Hash256,
    pub prev_block: Hash256,
    pub merkle_root: Hash256,
    pub time: u32,
    pub bits: u32,
    pub nonce: u32,
    pub height: u32,
    pub coinbase: GenesisCoinbase,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PowParams {
    /// Highest allowed target, wire order.
    pub limit: Hash256,
    /// Compact encoding of the initial target.
    pub bits: u32,
    /// Minimum cumulative work to trust a chain, wire order.
    pub chainwork: Hash256,
    pub target_timespan: u32,
    pub target_spacing: u32,
    pub retarget_interval: u32,
    /// Allow a minimum-difficulty block after a long gap.
    pub target_reset: bool,
    pub no_retargeting: bool,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct BlockParams {
    pub bip34_height: u32,
    pub bip34_hash: Option<Hash256>,
    pub bip65_height: u32,
    pub bip65_hash: Option<Hash256>,
    pub bip66_height: u32,
    pub bip66_hash: Option<Hash256>,
    pub prune_after_height: u32,
    pub keep_blocks: u32,
    /// Seconds after which the tip is considered stale.
    pub max_tip_age: u32,
    pub slow_height: u32,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct KeyPrefix {
    pub privkey: u8,
    pub xpubkey: u32,
    pub xprivkey: u32,
    pub xpubkey58: &'static str,
    pub xprivkey58: &'static str,
    pub coin_type: u32,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct AddressPrefix {
    pub pubkeyhash: u8,
    pub scripthash: u8,
    pub witnesspubkeyhash: u8,
    pub witnessscripthash: u8,
    pub bech32: &'static str,
}

#[derive(Clone, Debug)]
pub struct NetworkParams {
    pub network: Network,
    pub seeds: &'static [&'static str],
    pub magic: u32,
    pub port: u16,
    pub checkpoints: BTreeMap<u32, Hash256>,
    pub last_checkpoint: u32,
    pub halving_interval: u32,
    pub genesis: GenesisParams,
    /// Canonical serialization of the genesis block, hex encoded.
    pub genesis_block: &'static str,
    pub pow: PowParams,
    pub block: BlockParams,
    pub bip30: BTreeMap<u32, Hash256>,
    pub activation_threshold: u32,
    pub miner_window: u32,
    pub deployments: BTreeMap<&'static str, Deployment>,
    /// Deployments in evaluation order.
    pub deploys: Vec<Deployment>,
    pub key_prefix: KeyPrefix,
    pub address_prefix: AddressPrefix,
    pub require_standard: bool,
    pub rpc_port: u16,
    pub min_relay: Amount,
    pub fee_rate: Amount,
    pub max_fee_rate: Amount,
    pub self_connect: bool,
    pub request_mempool: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamsError {
    MissingGenesisCheckpoint,
    GenesisCheckpointMismatch { checkpoint: String, genesis: String },
    LastCheckpointMissing(u32),
    GenesisHeight(u32),
    GenesisPrevBlock,
    HalvingInterval,
    DeploymentName { key: &'static str, name: &'static str },
    DeploymentBitRange { name: &'static str, bit: u8 },
    DuplicateDeploymentBit { bit: u8, first: &'static str, second: &'static str },
    DeploysMismatch,
    ActivationThreshold { threshold: u32, window: u32 },
    NetworkMismatch { key: Network, found: Network },
    DuplicateMagic { magic: u32, first: Network, second: Network },
}

impl std::fmt::Display for ParamsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParamsError::MissingGenesisCheckpoint => write!(f, "no checkpoint at height 0"),
            ParamsError::GenesisCheckpointMismatch {
                checkpoint,
                genesis,
            } => write!(
                f,
                "checkpoint at height 0 ({checkpoint}) differs from genesis hash ({genesis})"
            ),
            ParamsError::LastCheckpointMissing(height) => {
                write!(f, "last checkpoint {height} is not a checkpoint height")
            }
            ParamsError::GenesisHeight(height) => write!(f, "genesis height is {height}, not 0"),
            ParamsError::GenesisPrevBlock => write!(f, "genesis previous block is not null"),
            ParamsError::HalvingInterval => write!(f, "halving interval must be positive"),
            ParamsError::DeploymentName { key, name } => {
                write!(f, "deployment keyed '{key}' is named '{name}'")
            }
            ParamsError::DeploymentBitRange { name, bit } => {
                write!(f, "deployment '{name}' uses reserved bit {bit}")
            }
            ParamsError::DuplicateDeploymentBit { bit, first, second } => write!(
                f,
                "deployments '{first}' and '{second}' share bit {bit}"
            ),
            ParamsError::DeploysMismatch => {
                write!(f, "deploy order is not a permutation of the deployments")
            }
            ParamsError::ActivationThreshold { threshold, window } => write!(
                f,
                "activation threshold {threshold} exceeds miner window {window}"
            ),
            ParamsError::NetworkMismatch { key, found } => {
                write!(f, "registry entry for {key} describes {found}")
            }
            ParamsError::DuplicateMagic {
                magic,
                first,
                second,
            } => write!(f, "{first} and {second} share magic {magic:#010x}"),
        }
    }
}

impl std::error::Error for ParamsError {}

impl NetworkParams {
    pub fn deployment(&self, name: &str) -> Option<&Deployment> {
        self.deployments.get(name)
    }

    pub fn checkpoint(&self, height: u32) -> Option<&Hash256> {
        self.checkpoints.get(&height)
    }

    pub fn genesis_hash(&self) -> &Hash256 {
        &self.genesis.hash
    }

    /// Checks the entry's internal invariants and returns every violation.
    pub fn check(&self) -> Result<(), Vec<ParamsError>> {
        let mut errors = Vec::new();

        match self.checkpoint(GENESIS_HEIGHT) {
            None => errors.push(ParamsError::MissingGenesisCheckpoint),
            Some(hash) if *hash != self.genesis.hash => {
                errors.push(ParamsError::GenesisCheckpointMismatch {
                    checkpoint: hash256_to_hex(hash),
                    genesis: hash256_to_hex(&self.genesis.hash),
                })
            }
            Some(_) => {}
        }
        if !self.checkpoints.contains_key(&self.last_checkpoint) {
            errors.push(ParamsError::LastCheckpointMissing(self.last_checkpoint));
        }
        if self.genesis.height != GENESIS_HEIGHT {
            errors.push(ParamsError::GenesisHeight(self.genesis.height));
        }
        if self.genesis.prev_block != [0u8; 32] {
            errors.push(ParamsError::GenesisPrevBlock);
        }
        if self.halving_interval == 0 {
            errors.push(ParamsError::HalvingInterval);
        }
        if self.activation_threshold > self.miner_window {
            errors.push(ParamsError::ActivationThreshold {
                threshold: self.activation_threshold,
                window: self.miner_window,
            });
        }

        for (&key, deployment) in &self.deployments {
            if key != deployment.name {
                errors.push(ParamsError::DeploymentName {
                    key,
                    name: deployment.name,
                });
            }
        }

        let mut seen_bits: BTreeMap<u8, &'static str> = BTreeMap::new();
        for deployment in &self.deploys {
            if !deployment.bit_in_range() {
                errors.push(ParamsError::DeploymentBitRange {
                    name: deployment.name,
                    bit: deployment.bit,
                });
            }
            if let Some(first) = seen_bits.insert(deployment.bit, deployment.name) {
                errors.push(ParamsError::DuplicateDeploymentBit {
                    bit: deployment.bit,
                    first,
                    second: deployment.name,
                });
            }
        }

        let is_permutation = self.deploys.len() == self.deployments.len()
            && self
                .deploys
                .iter()
                .all(|deploy| self.deployments.get(deploy.name) == Some(deploy));
        if !is_permutation {
            errors.push(ParamsError::DeploysMismatch);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

static REGISTRY: OnceLock<[NetworkParams; 4]> = OnceLock::new();

fn registry() -> &'static [NetworkParams; 4] {
    REGISTRY.get_or_init(|| {
        [
            main_params(),
            testnet_params(),
            regtest_params(),
            simnet_params(),
        ]
    })
}

pub fn network_params(network: Network) -> &'static NetworkParams {
    &registry()[network.index()]
}

/// Resolves a registry key. Unknown identifiers are an error, never a default.
pub fn lookup(name: &str) -> Result<&'static NetworkParams, LookupError> {
    let network: Network = name.parse()?;
    Ok(network_params(network))
}

/// Checks every entry plus the cross-network invariants.
pub fn check_registry() -> Result<(), Vec<ParamsError>> {
    check_entries(registry())
}

/// Checks entries laid out in `Network::ALL` order.
fn check_entries(entries: &[NetworkParams]) -> Result<(), Vec<ParamsError>> {
    let mut errors = Vec::new();
    let mut magics: BTreeMap<u32, Network> = BTreeMap::new();

    for (network, params) in Network::ALL.into_iter().zip(entries) {
        if params.network != network {
            errors.push(ParamsError::NetworkMismatch {
                key: network,
                found: params.network,
            });
        }
        if let Err(mut entry_errors) = params.check() {
            errors.append(&mut entry_errors);
        }
        if let Some(first) = magics.insert(params.magic, network) {
            errors.push(ParamsError::DuplicateMagic {
                magic: params.magic,
                first,
                second: network,
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn hash(hex: &str, what: &str) -> Hash256 {
    hash256_from_hex(hex).expect(what)
}

fn deployment_map(deployments: &[Deployment]) -> BTreeMap<&'static str, Deployment> {
    deployments
        .iter()
        .map(|deployment| (deployment.name, *deployment))
        .collect()
}

const BERY_GENESIS_MESSAGE: &str =
    "Trump\u{2019}s tough talk may help Pakistan keep top talent February 5, 2018";
const BERY_GENESIS_SCRIPT: &str = "410482fae82061c1400ca141ccb3831ee91bbb054495b75bd13a44c83e6bdff949eb69c76cce3d8957328cec83513f3a1f40d15b4f8a0dcbdd14555bdd3fe45649b4ac";
const BERY_GENESIS_REWARD: Amount = 760 * COIN;
const LEGACY_GENESIS_BITS: u32 = 486_604_799;

const BERY_GENESIS_COINBASE: GenesisCoinbase = GenesisCoinbase {
    bits: Some(LEGACY_GENESIS_BITS),
    message: Some(BERY_GENESIS_MESSAGE),
    output_script: Some(BERY_GENESIS_SCRIPT),
    reward: Some(BERY_GENESIS_REWARD),
};

const BERY_MERKLE_ROOT: &str = "0943c43bae650f17b8e0f16e46bdb4da40a20f35a31dc6b6d952d04da2d255f9";
const NULL_HASH: Hash256 = [0u8; 32];

const MAIN_SEEDS: [&str; 3] = [
    "dnsseed.berycoin.com",
    "seed1.berycoin.com",
    "seed2.berycoin.com",
];
const TESTNET_SEEDS: [&str; 2] = ["testnet.berycoin.com", "testnet.berycoin.org"];
const LOCAL_SEEDS: [&str; 1] = ["127.0.0.1"];

const MAIN_GENESIS_HASH: &str = "62d4ee455f9850e354f5c85d42fba5852581877e032826dc07c0eb21545fff66";
const TESTNET_GENESIS_HASH: &str =
    "c362aad8c1f4323f7d8ca29d6763874ec9122b55262bfbb02905ceb2adec55b5";
const REGTEST_GENESIS_HASH: &str =
    "22a9444f2bd4b8c3551467fc369f5cfe6c2fa29dd94500f435fb5f7e492b1beb";
const SIMNET_GENESIS_HASH: &str =
    "683e86bd5c6d110d91b94b97137ba6bfe02dbbdb8e3dff722a669b5d69d77af6";

const MAIN_GENESIS_BLOCK: &str = concat!(
    "0100000000000000000000000000000000000000000000000000000000000000000000",
    "00f955d2a24dd052d9b6c61da3350fa240dab4bd466ef1e0b8170f65ae3bc443090c8d",
    "805a00fd0f1e5a050b0001010000000100000000000000000000000000000000000000",
    "00000000000000000000000000ffffffff4f04ffff001d0104475472756d70e2809973",
    "20746f7567682074616c6b206d61792068656c702050616b697374616e206b65657020",
    "746f702074616c656e7420466562727561727920352c2032303138ffffffff0100f8f3",
    "b11100000043410482fae82061c1400ca141ccb3831ee91bbb054495b75bd13a44c83e",
    "6bdff949eb69c76cce3d8957328cec83513f3a1f40d15b4f8a0dcbdd14555bdd3fe456",
    "49b4ac00000000",
);

const TESTNET_GENESIS_BLOCK: &str = concat!(
    "0100000000000000000000000000000000000000000000000000000000000000000000",
    "00f955d2a24dd052d9b6c61da3350fa240dab4bd466ef1e0b8170f65ae3bc443090d92",
    "805a00ff0a1e410a390001010000000100000000000000000000000000000000000000",
    "00000000000000000000000000ffffffff4f04ffff001d0104475472756d70e2809973",
    "20746f7567682074616c6b206d61792068656c702050616b697374616e206b65657020",
    "746f702074616c656e7420466562727561727920352c2032303138ffffffff0100f8f3",
    "b11100000043410482fae82061c1400ca141ccb3831ee91bbb054495b75bd13a44c83e",
    "6bdff949eb69c76cce3d8957328cec83513f3a1f40d15b4f8a0dcbdd14555bdd3fe456",
    "49b4ac00000000",
);

const REGTEST_GENESIS_BLOCK: &str = concat!(
    "0100000000000000000000000000000000000000000000000000000000000000000000",
    "00f955d2a24dd052d9b6c61da3350fa240dab4bd466ef1e0b8170f65ae3bc443093799",
    "805a441f0a1e4202050001010000000100000000000000000000000000000000000000",
    "00000000000000000000000000ffffffff4f04ffff001d0104475472756d70e2809973",
    "20746f7567682074616c6b206d61792068656c702050616b697374616e206b65657020",
    "746f702074616c656e7420466562727561727920352c2032303138ffffffff0100f8f3",
    "b11100000043410482fae82061c1400ca141ccb3831ee91bbb054495b75bd13a44c83e",
    "6bdff949eb69c76cce3d8957328cec83513f3a1f40d15b4f8a0dcbdd14555bdd3fe456",
    "49b4ac00000000",
);

const SIMNET_GENESIS_BLOCK: &str = concat!(
    "0100000000000000000000000000000000000000000000000000000000000000000000",
    "003ba3edfd7a7b12b27ac72c3e67768f617fc81bc3888a51323a9fb8aa4b1e5e4a4506",
    "8653ffff7f200200000001010000000100000000000000000000000000000000000000",
    "00000000000000000000000000ffffffff4d04ffff001d0104455468652054696d6573",
    "2030332f4a616e2f32303039204368616e63656c6c6f72206f6e206272696e6b206f66",
    "207365636f6e64206261696c6f757420666f722062616e6b73ffffffff0100f2052a01",
    "000000434104678afdb0fe5548271967f1a67130b7105cd6a828e03909a67962e0ea1f",
    "61deb649f6bc3f4cef38c4f35504e51ec112de5c384df7ba0b8d578a4c702b6bf11d5f",
    "ac00000000",
);

const FAR_FUTURE: u64 = 7_258_118_400;

fn main_params() -> NetworkParams {
    let genesis_hash = hash(MAIN_GENESIS_HASH, "main genesis hash");
    let csv = Deployment {
        name: "csv",
        bit: 0,
        start_time: 0,
        timeout: FAR_FUTURE,
        force: true,
    };
    let segwit = Deployment {
        name: "segwit",
        bit: 1,
        start_time: 0,
        timeout: FAR_FUTURE,
        force: false,
    };
    let testdummy = Deployment {
        name: "testdummy",
        bit: 28,
        start_time: 0,
        timeout: FAR_FUTURE,
        force: true,
    };

    NetworkParams {
        network: Network::Main,
        seeds: &MAIN_SEEDS,
        magic: 0xfdd3_3eac,
        port: 9947,
        checkpoints: BTreeMap::from([(0, genesis_hash)]),
        last_checkpoint: 0,
        halving_interval: 52_631_579,
        genesis: GenesisParams {
            version: 1,
            hash: genesis_hash,
            prev_block: NULL_HASH,
            merkle_root: hash(BERY_MERKLE_ROOT, "main merkle root"),
            time: 1_518_374_156,
            bits: 0x1e0f_fd00,
            nonce: 722_266,
            height: 0,
            coinbase: BERY_GENESIS_COINBASE,
        },
        genesis_block: MAIN_GENESIS_BLOCK,
        pow: PowParams {
            limit: hash(
                "00000fffffffffffffffffffffffffffffffffffffffffffffffffffffffffff",
                "main pow limit",
            ),
            bits: 0x1e0f_fd00,
            chainwork: NULL_HASH,
            target_timespan: 36 * 60 * 60,
            target_spacing: 60,
            retarget_interval: 2160,
            target_reset: false,
            no_retargeting: false,
        },
        block: BlockParams {
            bip34_height: 0,
            bip34_hash: Some(genesis_hash),
            bip65_height: 0,
            bip65_hash: Some(genesis_hash),
            bip66_height: 0,
            bip66_hash: Some(genesis_hash),
            prune_after_height: 1000,
            keep_blocks: 288,
            max_tip_age: 24 * 60 * 60,
            slow_height: 900_000,
        },
        bip30: BTreeMap::new(),
        activation_threshold: 6480,
        miner_window: 8640,
        deployments: deployment_map(&[testdummy, csv, segwit]),
        deploys: vec![csv, segwit, testdummy],
        key_prefix: KeyPrefix {
            privkey: 0xd8,
            xpubkey: 0x0586_c22e,
            xprivkey: 0x0586_dcf1,
            xpubkey58: "xpub",
            xprivkey58: "xprv",
            coin_type: 0,
        },
        address_prefix: AddressPrefix {
            pubkeyhash: 0x19,
            scripthash: 0x33,
            witnesspubkeyhash: 0x06,
            witnessscripthash: 0x0a,
            bech32: "lc",
        },
        require_standard: true,
        rpc_port: 9432,
        min_relay: 1000,
        fee_rate: 100_000,
        max_fee_rate: 400_000,
        self_connect: false,
        request_mempool: false,
    }
}

fn testnet_params() -> NetworkParams {
    let genesis_hash = hash(TESTNET_GENESIS_HASH, "testnet genesis hash");
    let csv = Deployment {
        name: "csv",
        bit: 0,
        start_time: 0,
        timeout: FAR_FUTURE,
        force: true,
    };
    let segwit = Deployment {
        name: "segwit",
        bit: 1,
        start_time: 0,
        timeout: FAR_FUTURE,
        force: false,
    };
    let testdummy = Deployment {
        name: "testdummy",
        bit: 28,
        start_time: 0,
        timeout: FAR_FUTURE,
        force: true,
    };

    NetworkParams {
        network: Network::Testnet,
        seeds: &TESTNET_SEEDS,
        magic: 0x2cd5_b2ac,
        port: 19947,
        checkpoints: BTreeMap::from([(0, genesis_hash)]),
        last_checkpoint: 0,
        halving_interval: 52_631_579,
        genesis: GenesisParams {
            version: 1,
            hash: genesis_hash,
            prev_block: NULL_HASH,
            merkle_root: hash(BERY_MERKLE_ROOT, "testnet merkle root"),
            time: 1_518_375_437,
            bits: 0x1e0a_ff00,
            nonce: 3_738_177,
            height: 0,
            coinbase: BERY_GENESIS_COINBASE,
        },
        genesis_block: TESTNET_GENESIS_BLOCK,
        pow: PowParams {
            limit: hash(
                "00000fffffffffffffffffffffffffffffffffffffffffffffffffffffffffff",
                "testnet pow limit",
            ),
            bits: 0x1e0a_ff00,
            chainwork: NULL_HASH,
            target_timespan: 84 * 60 * 60,
            target_spacing: 150,
            retarget_interval: 2016,
            target_reset: true,
            no_retargeting: false,
        },
        block: BlockParams {
            bip34_height: u32::MAX,
            bip34_hash: None,
            bip65_height: 0,
            bip65_hash: Some(genesis_hash),
            bip66_height: 0,
            bip66_hash: Some(genesis_hash),
            prune_after_height: 1000,
            keep_blocks: 10_000,
            max_tip_age: 24 * 60 * 60,
            slow_height: 950_000,
        },
        bip30: BTreeMap::new(),
        activation_threshold: 1512,
        miner_window: 2016,
        deployments: deployment_map(&[testdummy, csv, segwit]),
        deploys: vec![csv, segwit, testdummy],
        key_prefix: KeyPrefix {
            privkey: 0xe5,
            xpubkey: 0x0537_82bf,
            xprivkey: 0x0537_84a4,
            xpubkey58: "tpub",
            xprivkey58: "tprv",
            coin_type: 1,
        },
        address_prefix: AddressPrefix {
            pubkeyhash: 0x0b,
            scripthash: 0x6a,
            witnesspubkeyhash: 0x03,
            witnessscripthash: 0x28,
            bech32: "tb",
        },
        require_standard: false,
        rpc_port: 19336,
        min_relay: 1000,
        fee_rate: 20_000,
        max_fee_rate: 60_000,
        self_connect: false,
        request_mempool: false,
    }
}

fn regtest_params() -> NetworkParams {
    let genesis_hash = hash(REGTEST_GENESIS_HASH, "regtest genesis hash");
    let csv = Deployment {
        name: "csv",
        bit: 0,
        start_time: 0,
        timeout: NO_TIMEOUT,
        force: true,
    };
    let segwit = Deployment {
        name: "segwit",
        bit: 1,
        start_time: 0,
        timeout: NO_TIMEOUT,
        force: false,
    };
    let testdummy = Deployment {
        name: "testdummy",
        bit: 28,
        start_time: 0,
        timeout: NO_TIMEOUT,
        force: true,
    };

    NetworkParams {
        network: Network::Regtest,
        seeds: &LOCAL_SEEDS,
        magic: 0xd1af_bdaa,
        port: 19447,
        checkpoints: BTreeMap::from([(0, genesis_hash)]),
        last_checkpoint: 0,
        halving_interval: 150,
        genesis: GenesisParams {
            version: 1,
            hash: genesis_hash,
            prev_block: NULL_HASH,
            merkle_root: hash(BERY_MERKLE_ROOT, "regtest merkle root"),
            time: 1_518_377_271,
            bits: 0x1e0a_1f44,
            nonce: 328_258,
            height: 0,
            coinbase: BERY_GENESIS_COINBASE,
        },
        genesis_block: REGTEST_GENESIS_BLOCK,
        pow: PowParams {
            limit: hash(
                "7fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff",
                "regtest pow limit",
            ),
            bits: 0x1e0a_1f44,
            chainwork: hash(
                "0000000000000000000000000000000000000000000000000000000000000002",
                "regtest chainwork",
            ),
            target_timespan: 84 * 60 * 60,
            target_spacing: 150,
            retarget_interval: 2016,
            target_reset: true,
            no_retargeting: true,
        },
        block: BlockParams {
            bip34_height: u32::MAX,
            bip34_hash: None,
            bip65_height: 1351,
            bip65_hash: None,
            bip66_height: 1251,
            bip66_hash: None,
            prune_after_height: 1000,
            keep_blocks: 10_000,
            max_tip_age: u32::MAX,
            slow_height: 0,
        },
        bip30: BTreeMap::new(),
        activation_threshold: 108,
        miner_window: 144,
        deployments: deployment_map(&[testdummy, csv, segwit]),
        deploys: vec![csv, segwit, testdummy],
        key_prefix: KeyPrefix {
            privkey: 0x5a,
            xpubkey: 0xeab4_fa05,
            xprivkey: 0xeab4_04c7,
            xpubkey58: "rpub",
            xprivkey58: "rprv",
            coin_type: 1,
        },
        address_prefix: AddressPrefix {
            pubkeyhash: 0x3c,
            scripthash: 0x26,
            witnesspubkeyhash: 0x7a,
            witnessscripthash: 0x14,
            bech32: "rb",
        },
        require_standard: false,
        rpc_port: 19445,
        min_relay: 1000,
        fee_rate: 20_000,
        max_fee_rate: 60_000,
        self_connect: true,
        request_mempool: true,
    }
}

fn simnet_params() -> NetworkParams {
    let genesis_hash = hash(SIMNET_GENESIS_HASH, "simnet genesis hash");
    let testdummy = Deployment {
        name: "testdummy",
        bit: 28,
        start_time: 1_199_145_601,
        timeout: 1_230_767_999,
        force: true,
    };
    let csv = Deployment {
        name: "csv",
        bit: 0,
        start_time: 0,
        timeout: NO_TIMEOUT,
        force: true,
    };
    let segwit = Deployment {
        name: "segwit",
        bit: 1,
        start_time: 0,
        timeout: NO_TIMEOUT,
        force: false,
    };
    let mast = Deployment {
        name: "mast",
        bit: 2,
        start_time: NO_TIMEOUT,
        timeout: NO_TIMEOUT,
        force: false,
    };

    NetworkParams {
        network: Network::Simnet,
        seeds: &LOCAL_SEEDS,
        magic: 0x1214_1c16,
        port: 18555,
        checkpoints: BTreeMap::from([(0, genesis_hash)]),
        last_checkpoint: 0,
        halving_interval: 210_000,
        genesis: GenesisParams {
            version: 1,
            hash: genesis_hash,
            prev_block: NULL_HASH,
            merkle_root: hash(
                "4a5e1e4baab89f3a32518a88c31bc87f618f76673e2cc77ab2127b7afdeda33b",
                "simnet merkle root",
            ),
            time: 1_401_292_357,
            bits: 0x207f_ffff,
            nonce: 2,
            height: 0,
            coinbase: GenesisCoinbase {
                bits: Some(LEGACY_GENESIS_BITS),
                message: None,
                output_script: None,
                reward: None,
            },
        },
        genesis_block: SIMNET_GENESIS_BLOCK,
        pow: PowParams {
            limit: hash(
                "7fffff0000000000000000000000000000000000000000000000000000000000",
                "simnet pow limit",
            ),
            bits: 0x207f_ffff,
            chainwork: hash(
                "0000000000000000000000000000000000000000000000000000000000000002",
                "simnet chainwork",
            ),
            target_timespan: 84 * 60 * 60,
            target_spacing: 150,
            retarget_interval: 2016,
            target_reset: true,
            no_retargeting: false,
        },
        block: BlockParams {
            bip34_height: 0,
            bip34_hash: Some(genesis_hash),
            bip65_height: 0,
            bip65_hash: Some(genesis_hash),
            bip66_height: 0,
            bip66_hash: Some(genesis_hash),
            prune_after_height: 1000,
            keep_blocks: 10_000,
            max_tip_age: u32::MAX,
            slow_height: 0,
        },
        bip30: BTreeMap::new(),
        activation_threshold: 75,
        miner_window: 100,
        deployments: deployment_map(&[testdummy, csv, segwit, mast]),
        // Declaration order, not sorted by bit.
        deploys: vec![csv, segwit, mast, testdummy],
        key_prefix: KeyPrefix {
            privkey: 0x64,
            xpubkey: 0x0420_bd3a,
            xprivkey: 0x0420_b900,
            xpubkey58: "spub",
            xprivkey58: "sprv",
            coin_type: 115,
        },
        address_prefix: AddressPrefix {
            pubkeyhash: 0x3f,
            scripthash: 0x7b,
            witnesspubkeyhash: 0x19,
            witnessscripthash: 0x28,
            bech32: "sc",
        },
        require_standard: false,
        rpc_port: 18556,
        min_relay: 1000,
        fee_rate: 20_000,
        max_fee_rate: 60_000,
        self_connect: false,
        request_mempool: false,
    }
}
