//! Command line and config file handling for `beryd-genesis`.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use beryd_consensus::money::Amount;
use beryd_consensus::{hex_to_bytes, Network};
use beryd_genesis::GenesisOptions;
use beryd_log::{Format, Level, LogConfig};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Command {
    Networks,
    Params,
    Genesis,
    Verify,
}

#[derive(Debug)]
pub enum CliAction {
    Run(Config),
    PrintHelp,
    PrintVersion,
}

/// Genesis inputs that replace the network's recorded values.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct GenesisOverrides {
    pub version: Option<i32>,
    pub time: Option<u32>,
    pub bits: Option<u32>,
    pub nonce: Option<u32>,
    pub coinbase_bits: Option<u32>,
    pub message: Option<String>,
    pub script: Option<Vec<u8>>,
    pub reward: Option<Amount>,
}

impl GenesisOverrides {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn apply(&self, mut options: GenesisOptions) -> GenesisOptions {
        if let Some(version) = self.version {
            options.version = version;
        }
        if let Some(time) = self.time {
            options.time = time;
        }
        if let Some(bits) = self.bits {
            options.bits = bits;
        }
        if let Some(nonce) = self.nonce {
            options.nonce = nonce;
        }
        if let Some(bits) = self.coinbase_bits {
            options.coinbase_bits = Some(bits);
        }
        if let Some(message) = &self.message {
            options.message = Some(message.as_bytes().to_vec());
        }
        if let Some(script) = &self.script {
            options.script = Some(script.clone());
        }
        if let Some(reward) = self.reward {
            options.reward = Some(reward);
        }
        options
    }

    /// Fills every field the other set has and this one does not.
    fn fill_from(&mut self, other: GenesisOverrides) {
        self.version = self.version.or(other.version);
        self.time = self.time.or(other.time);
        self.bits = self.bits.or(other.bits);
        self.nonce = self.nonce.or(other.nonce);
        self.coinbase_bits = self.coinbase_bits.or(other.coinbase_bits);
        self.message = self.message.take().or(other.message);
        self.script = self.script.take().or(other.script);
        self.reward = self.reward.or(other.reward);
    }
}

#[derive(Debug)]
pub struct Config {
    pub command: Command,
    pub network: Network,
    /// Whether a network was chosen explicitly; `verify` checks all otherwise.
    pub network_set: bool,
    pub overrides: GenesisOverrides,
    pub json: bool,
    pub log: LogConfig,
    pub conf_path: Option<PathBuf>,
    pub unsupported_conf_keys: Vec<String>,
}

pub fn parse_args_from<I>(raw_args: I) -> Result<CliAction, String>
where
    I: IntoIterator<Item = String>,
{
    let mut command = Command::Genesis;
    let mut network = Network::Main;
    let mut network_set = false;
    let mut conf_path: Option<PathBuf> = None;
    let mut overrides = GenesisOverrides::default();
    let mut json = false;
    let mut log = LogConfig::default();
    let mut log_level_set = false;
    let mut log_format_set = false;
    let mut args = raw_args.into_iter().peekable();

    if let Some(first) = args.peek().map(|value| value.as_str()) {
        match first {
            "help" => return Ok(CliAction::PrintHelp),
            "version" => return Ok(CliAction::PrintVersion),
            "networks" | "params" | "genesis" | "verify" => {
                command = match first {
                    "networks" => Command::Networks,
                    "params" => Command::Params,
                    "verify" => Command::Verify,
                    _ => Command::Genesis,
                };
                let _ = args.next();
            }
            _ => {}
        }
    }

    while let Some(arg) = args.next() {
        let mut value_for = |flag: &str| {
            args.next()
                .ok_or_else(|| format!("missing value for {flag}\n{}", usage()))
        };
        match arg.as_str() {
            "--help" | "-h" => return Ok(CliAction::PrintHelp),
            "--network" => {
                let value = value_for("--network")?;
                network = value
                    .parse()
                    .map_err(|err| format!("{err}\n{}", usage()))?;
                network_set = true;
            }
            "--testnet" => {
                network = Network::Testnet;
                network_set = true;
            }
            "--regtest" => {
                network = Network::Regtest;
                network_set = true;
            }
            "--simnet" => {
                network = Network::Simnet;
                network_set = true;
            }
            "--conf" => {
                conf_path = Some(PathBuf::from(value_for("--conf")?));
            }
            "--version" => {
                let value = value_for("--version")?;
                overrides.version = Some(parse_number(&value, "--version")?);
            }
            "--time" => {
                let value = value_for("--time")?;
                overrides.time = Some(parse_number(&value, "--time")?);
            }
            "--bits" => {
                let value = value_for("--bits")?;
                overrides.bits = Some(parse_number(&value, "--bits")?);
            }
            "--nonce" => {
                let value = value_for("--nonce")?;
                overrides.nonce = Some(parse_number(&value, "--nonce")?);
            }
            "--coinbase-bits" => {
                let value = value_for("--coinbase-bits")?;
                overrides.coinbase_bits = Some(parse_number(&value, "--coinbase-bits")?);
            }
            "--message" => {
                overrides.message = Some(value_for("--message")?);
            }
            "--script" => {
                let value = value_for("--script")?;
                overrides.script = Some(parse_script(&value, "--script")?);
            }
            "--reward" => {
                let value = value_for("--reward")?;
                overrides.reward = Some(parse_number(&value, "--reward")?);
            }
            "--json" => {
                json = true;
            }
            "--log-level" => {
                let value = value_for("--log-level")?;
                log.level = value.parse().map_err(|err| format!("{err}\n{}", usage()))?;
                log_level_set = true;
            }
            "--log-format" => {
                let value = value_for("--log-format")?;
                log.format = value.parse().map_err(|err| format!("{err}\n{}", usage()))?;
                log_format_set = true;
            }
            "--no-log-timestamps" => {
                log.timestamps = false;
            }
            other => {
                return Err(format!("unknown argument '{other}'\n{}", usage()));
            }
        }
    }

    let mut unsupported_conf_keys = Vec::new();
    if let Some(path) = &conf_path {
        let conf = load_conf(path)?;
        let file = apply_conf(&conf, path)?;
        if !network_set {
            if let Some(conf_network) = file.network {
                network = conf_network;
                network_set = true;
            }
        }
        if !log_level_set {
            if let Some(level) = file.log_level {
                log.level = level;
            }
        }
        if !log_format_set {
            if let Some(format) = file.log_format {
                log.format = format;
            }
        }
        overrides.fill_from(file.overrides);
        unsupported_conf_keys = file.unsupported_keys;
    }

    Ok(CliAction::Run(Config {
        command,
        network,
        network_set,
        overrides,
        json,
        log,
        conf_path,
        unsupported_conf_keys,
    }))
}

#[derive(Default)]
struct ConfValues {
    network: Option<Network>,
    log_level: Option<Level>,
    log_format: Option<Format>,
    overrides: GenesisOverrides,
    unsupported_keys: Vec<String>,
}

fn apply_conf(conf: &HashMap<String, Vec<String>>, path: &Path) -> Result<ConfValues, String> {
    let mut values = ConfValues::default();
    let where_ = path.display();
    let mut network_keys: Vec<(&str, Network)> = Vec::new();

    let mut keys: Vec<&String> = conf.keys().collect();
    keys.sort();
    for key in keys {
        let Some(raw) = conf[key].last() else {
            continue;
        };
        let context = format!("{key} in {where_}");
        match key.as_str() {
            "network" => {
                let network = raw.parse().map_err(|err| format!("{err} ({context})"))?;
                network_keys.push(("network", network));
            }
            "testnet" | "regtest" | "simnet" => {
                let enabled = parse_conf_bool(raw)
                    .ok_or_else(|| format!("invalid {key} value '{raw}' in {where_}"))?;
                if enabled {
                    let network = key.parse().map_err(|err| format!("{err} ({context})"))?;
                    network_keys.push((key.as_str(), network));
                }
            }
            "version" => values.overrides.version = Some(parse_number(raw, &context)?),
            "time" => values.overrides.time = Some(parse_number(raw, &context)?),
            "bits" => values.overrides.bits = Some(parse_number(raw, &context)?),
            "nonce" => values.overrides.nonce = Some(parse_number(raw, &context)?),
            "coinbase-bits" | "coinbasebits" => {
                values.overrides.coinbase_bits = Some(parse_number(raw, &context)?)
            }
            "message" => values.overrides.message = Some(raw.clone()),
            "script" => values.overrides.script = Some(parse_script(raw, &context)?),
            "reward" => values.overrides.reward = Some(parse_number(raw, &context)?),
            "log-level" | "loglevel" => {
                values.log_level = Some(raw.parse().map_err(|err| format!("{err} ({context})"))?);
            }
            "log-format" | "logformat" => {
                values.log_format =
                    Some(raw.parse().map_err(|err| format!("{err} ({context})"))?);
            }
            _ => values.unsupported_keys.push(key.clone()),
        }
    }
    if let Some(&(_, network)) = network_keys.first() {
        if network_keys.iter().any(|&(_, other)| other != network) {
            let keys: Vec<&str> = network_keys.iter().map(|&(key, _)| key).collect();
            return Err(format!(
                "conflicting network keys {} in {where_}",
                keys.join(", ")
            ));
        }
        values.network = Some(network);
    }
    values.unsupported_keys.sort();
    Ok(values)
}

/// Reads a `key=value` file. Later occurrences of a key are kept after earlier ones.
pub fn load_conf(path: &Path) -> Result<HashMap<String, Vec<String>>, String> {
    let contents = fs::read_to_string(path)
        .map_err(|err| format!("failed to read config {}: {err}", path.display()))?;

    let mut out: HashMap<String, Vec<String>> = HashMap::new();
    for raw_line in contents.lines() {
        let mut line = raw_line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
            continue;
        }
        if let Some(idx) = line.find(" #") {
            line = &line[..idx];
        }
        if let Some(idx) = line.find(" ;") {
            line = &line[..idx];
        }
        let (key, value) = match line.split_once('=') {
            Some((key, value)) => (key.trim(), value.trim()),
            None => (line.trim(), "1"),
        };
        if key.is_empty() {
            continue;
        }
        out.entry(key.to_ascii_lowercase())
            .or_default()
            .push(value.to_string());
    }
    Ok(out)
}

pub fn parse_conf_bool(value: &str) -> Option<bool> {
    let value = value.trim();
    if value.is_empty() {
        return Some(true);
    }
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Some(true),
        "0" | "false" | "no" => Some(false),
        _ => None,
    }
}

/// Parses a decimal or `0x`-prefixed hexadecimal integer.
pub fn parse_number<T>(value: &str, what: &str) -> Result<T, String>
where
    T: TryFrom<i128>,
{
    let trimmed = value.trim();
    let (negative, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed),
    };
    let parsed = match digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
    {
        Some(hex) => i128::from_str_radix(hex, 16),
        None => digits.parse::<i128>(),
    }
    .map_err(|_| format!("invalid number '{value}' for {what}"))?;
    let parsed = if negative { -parsed } else { parsed };
    T::try_from(parsed).map_err(|_| format!("number '{value}' out of range for {what}"))
}

fn parse_script(value: &str, what: &str) -> Result<Vec<u8>, String> {
    let hex = value.trim();
    let hex = hex
        .strip_prefix("0x")
        .or_else(|| hex.strip_prefix("0X"))
        .unwrap_or(hex);
    hex_to_bytes(hex).map_err(|err| format!("invalid script hex for {what}: {err}"))
}

pub fn usage() -> String {
    [
        "Usage:",
        "  beryd-genesis [command] [options]",
        "",
        "Commands:",
        "  genesis   Build a genesis block (default)",
        "  verify    Rebuild recorded genesis blocks and compare with the registry",
        "  params    Print the parameters of one network",
        "  networks  List the supported networks",
        "  help      Print this help and exit",
        "  version   Print version and exit",
        "",
        "Options:",
        "  --help, -h               Print this help and exit",
        "  --network <name>         main|testnet|regtest|simnet (default: main)",
        "  --testnet, --regtest, --simnet",
        "                           Shorthand for --network",
        "  --conf <path>            Read key=value settings; flags take precedence",
        "  --version <n>            Block version",
        "  --time <n>               Block timestamp (unix seconds)",
        "  --bits <n>               Compact difficulty target",
        "  --nonce <n>              Header nonce",
        "  --coinbase-bits <n>      Value pushed first in the coinbase script (default: --bits)",
        "  --message <text>         Coinbase message",
        "  --script <hex>           Coinbase output script",
        "  --reward <n>             Coinbase output value in base units",
        "  --json                   Print machine readable output",
        "  --log-level <level>      error|warn|info|debug|trace (default: info)",
        "  --log-format <format>    text|json (default: text)",
        "  --no-log-timestamps      Omit timestamps from text logs",
        "",
        "Numbers accept decimal or 0x-prefixed hex.",
    ]
    .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|value| value.to_string()).collect()
    }

    fn run_config(list: &[&str]) -> Config {
        match parse_args_from(args(list)).expect("parse args") {
            CliAction::Run(config) => config,
            other => panic!("unexpected action {other:?}"),
        }
    }

    #[test]
    fn defaults_build_main_genesis() {
        let config = run_config(&[]);
        assert_eq!(config.command, Command::Genesis);
        assert_eq!(config.network, Network::Main);
        assert!(!config.network_set);
        assert!(config.overrides.is_empty());
        assert!(!config.json);
        assert_eq!(config.log, LogConfig::default());
    }

    #[test]
    fn commands_and_help() {
        assert!(matches!(
            parse_args_from(args(&["help"])),
            Ok(CliAction::PrintHelp)
        ));
        assert!(matches!(
            parse_args_from(args(&["verify", "--help"])),
            Ok(CliAction::PrintHelp)
        ));
        assert!(matches!(
            parse_args_from(args(&["version"])),
            Ok(CliAction::PrintVersion)
        ));
        assert_eq!(run_config(&["networks"]).command, Command::Networks);
        assert_eq!(run_config(&["params", "--simnet"]).network, Network::Simnet);
    }

    #[test]
    fn genesis_flags_are_parsed() {
        let config = run_config(&[
            "genesis",
            "--network",
            "regtest",
            "--version",
            "2",
            "--time",
            "1231006505",
            "--bits",
            "0x1d00ffff",
            "--nonce",
            "7",
            "--coinbase-bits",
            "486604799",
            "--message",
            "hello",
            "--script",
            "51",
            "--reward",
            "100",
            "--json",
            "--log-level",
            "debug",
            "--log-format",
            "json",
            "--no-log-timestamps",
        ]);
        assert_eq!(config.network, Network::Regtest);
        assert!(config.network_set);
        assert_eq!(
            config.overrides,
            GenesisOverrides {
                version: Some(2),
                time: Some(1_231_006_505),
                bits: Some(0x1d00_ffff),
                nonce: Some(7),
                coinbase_bits: Some(0x1d00_ffff),
                message: Some("hello".to_string()),
                script: Some(vec![0x51]),
                reward: Some(100),
            }
        );
        assert!(config.json);
        assert_eq!(
            config.log,
            LogConfig {
                level: Level::Debug,
                format: Format::Json,
                timestamps: false,
            }
        );
    }

    #[test]
    fn bad_arguments_are_rejected() {
        let err = parse_args_from(args(&["--network", "bitcoin"])).unwrap_err();
        assert!(err.contains("bitcoin"), "{err}");
        let err = parse_args_from(args(&["--bits"])).unwrap_err();
        assert!(err.starts_with("missing value for --bits"), "{err}");
        let err = parse_args_from(args(&["--nonce", "-1"])).unwrap_err();
        assert!(err.contains("out of range"), "{err}");
        let err = parse_args_from(args(&["--script", "abc"])).unwrap_err();
        assert!(err.contains("invalid script hex"), "{err}");
        let err = parse_args_from(args(&["--frobnicate"])).unwrap_err();
        assert!(err.starts_with("unknown argument"), "{err}");
    }

    #[test]
    fn numbers_accept_hex_and_sign() {
        assert_eq!(parse_number::<u32>("0x1e0ffd00", "bits"), Ok(0x1e0f_fd00));
        assert_eq!(parse_number::<i64>("-5", "reward"), Ok(-5));
        assert_eq!(parse_number::<i32>(" 4 ", "version"), Ok(4));
        assert!(parse_number::<u32>("0x1_0000_0000", "bits").is_err());
        assert!(parse_number::<u32>("4294967296", "bits").is_err());
    }

    #[test]
    fn conf_file_fills_unset_values() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("beryd.conf");
        let mut file = fs::File::create(&path).expect("create conf");
        writeln!(file, "# genesis overrides").unwrap();
        writeln!(file, "network=testnet").unwrap();
        writeln!(file, "nonce = 11").unwrap();
        writeln!(file, "nonce = 12 # last one wins").unwrap();
        writeln!(file, "time=1000").unwrap();
        writeln!(file, "message=from file").unwrap();
        writeln!(file, "loglevel=warn").unwrap();
        writeln!(file, "rpcport=1234").unwrap();
        drop(file);

        let conf = path.to_string_lossy().into_owned();
        let config = run_config(&["--conf", &conf, "--time", "2000"]);
        assert_eq!(config.network, Network::Testnet);
        assert!(config.network_set);
        assert_eq!(config.overrides.nonce, Some(12));
        assert_eq!(config.overrides.time, Some(2000));
        assert_eq!(config.overrides.message.as_deref(), Some("from file"));
        assert_eq!(config.log.level, Level::Warn);
        assert_eq!(config.unsupported_conf_keys, vec!["rpcport".to_string()]);

        let config = run_config(&["--conf", &conf, "--network", "simnet", "--log-level", "error"]);
        assert_eq!(config.network, Network::Simnet);
        assert_eq!(config.log.level, Level::Error);
    }

    #[test]
    fn conf_network_flags() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("beryd.conf");
        fs::write(&path, "regtest=1\n").expect("write conf");
        let conf = path.to_string_lossy().into_owned();
        assert_eq!(run_config(&["--conf", &conf]).network, Network::Regtest);

        fs::write(&path, "network=regtest\nregtest=1\ntestnet=0\n").expect("write conf");
        assert_eq!(run_config(&["--conf", &conf]).network, Network::Regtest);

        fs::write(&path, "regtest=maybe\n").expect("write conf");
        let err = parse_args_from(args(&["--conf", &conf])).unwrap_err();
        assert!(err.contains("invalid regtest value"), "{err}");
    }

    #[test]
    fn conflicting_conf_networks_are_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("beryd.conf");
        let conf = path.to_string_lossy().into_owned();

        fs::write(&path, "testnet=1\nregtest=1\nsimnet=1\n").expect("write conf");
        for _ in 0..50 {
            let err = parse_args_from(args(&["--conf", &conf])).unwrap_err();
            assert!(
                err.starts_with("conflicting network keys regtest, simnet, testnet"),
                "{err}"
            );
        }

        fs::write(&path, "network=main\nsimnet=1\n").expect("write conf");
        let err = parse_args_from(args(&["--conf", &conf])).unwrap_err();
        assert!(err.starts_with("conflicting network keys network, simnet"), "{err}");
    }

    #[test]
    fn missing_conf_file_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("absent.conf");
        let conf = path.to_string_lossy().into_owned();
        let err = parse_args_from(args(&["--conf", &conf])).unwrap_err();
        assert!(err.starts_with("failed to read config"), "{err}");
    }

    #[test]
    fn overrides_replace_recorded_inputs() {
        let base = GenesisOptions::new(1, 10, 0x207fffff, 2);
        let overrides = GenesisOverrides {
            nonce: Some(3),
            message: Some("m".to_string()),
            ..GenesisOverrides::default()
        };
        let options = overrides.apply(base.clone());
        assert_eq!(options.nonce, 3);
        assert_eq!(options.message, Some(b"m".to_vec()));
        assert_eq!(options.time, base.time);
        assert_eq!(options.script, None);
    }

    #[test]
    fn conf_bool_values() {
        assert_eq!(parse_conf_bool(""), Some(true));
        assert_eq!(parse_conf_bool("YES"), Some(true));
        assert_eq!(parse_conf_bool("0"), Some(false));
        assert_eq!(parse_conf_bool("maybe"), None);
    }
}
