//! `beryd-genesis`: inspect the network registry and build or verify genesis blocks.

pub mod config;

use beryd_consensus::money::COIN;
use beryd_consensus::{
    check_registry, hash256_to_hex, network_params, Network, NetworkParams, ParamsError,
};
use beryd_genesis::{build, verify_all, verify_network, GenesisBlock, GenesisOptions};
use beryd_log::{self as logging, log_debug, log_error, log_info, log_warn};
use beryd_pow::validation::{check_genesis_target, validate_pow_header};
use serde::Serialize;
use serde_json::json;

pub use config::{parse_args_from, usage, CliAction, Command, Config, GenesisOverrides};

pub fn run_entry() -> Result<(), String> {
    let cli = parse_args_from(std::env::args().skip(1))?;
    match cli {
        CliAction::PrintHelp => {
            println!("{}", usage());
            Ok(())
        }
        CliAction::PrintVersion => {
            println!("beryd-genesis {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        CliAction::Run(config) => {
            logging::init(config.log);
            if let Some(path) = &config.conf_path {
                log_debug!("loaded config {}", path.display());
            }
            if !config.unsupported_conf_keys.is_empty() {
                log_warn!(
                    "ignoring unsupported config keys: {}",
                    config.unsupported_conf_keys.join(", ")
                );
            }
            let output = run_command(&config)?;
            println!("{output}");
            Ok(())
        }
    }
}

/// Executes the configured command and returns what should be printed.
pub fn run_command(config: &Config) -> Result<String, String> {
    if config.command != Command::Genesis && !config.overrides.is_empty() {
        log_warn!("genesis overrides are ignored by this command");
    }
    match config.command {
        Command::Networks => Ok(networks_output(config.json)),
        Command::Params => params_output(network_params(config.network), config.json),
        Command::Genesis => genesis_output(config),
        Command::Verify => verify_output(config),
    }
}

#[derive(Serialize)]
struct NetworkSummary {
    network: &'static str,
    magic: String,
    port: u16,
    rpc_port: u16,
    genesis_hash: String,
}

fn network_summary(params: &NetworkParams) -> NetworkSummary {
    NetworkSummary {
        network: params.network.as_str(),
        magic: format!("{:#010x}", params.magic),
        port: params.port,
        rpc_port: params.rpc_port,
        genesis_hash: hash256_to_hex(params.genesis_hash()),
    }
}

fn networks_output(as_json: bool) -> String {
    let summaries: Vec<NetworkSummary> = Network::ALL
        .into_iter()
        .map(|network| network_summary(network_params(network)))
        .collect();
    if as_json {
        return json!(summaries).to_string();
    }
    summaries
        .iter()
        .map(|summary| {
            format!(
                "{:<8} magic {} port {:<5} rpc {:<5} genesis {}",
                summary.network, summary.magic, summary.port, summary.rpc_port, summary.genesis_hash
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn params_output(params: &NetworkParams, as_json: bool) -> Result<String, String> {
    let genesis = &params.genesis;
    let pow = &params.pow;
    let prefixes = &params.address_prefix;
    let checkpoints: Vec<_> = params
        .checkpoints
        .iter()
        .map(|(height, hash)| json!({ "height": height, "hash": hash256_to_hex(hash) }))
        .collect();
    let deployments: Vec<_> = params
        .deploys
        .iter()
        .map(|deployment| {
            json!({
                "name": deployment.name,
                "bit": deployment.bit,
                "start_time": deployment.start_time,
                "timeout": deployment.timeout,
                "force": deployment.force,
            })
        })
        .collect();

    let value = json!({
        "network": params.network.as_str(),
        "magic": format!("{:#010x}", params.magic),
        "port": params.port,
        "rpc_port": params.rpc_port,
        "seeds": params.seeds,
        "halving_interval": params.halving_interval,
        "genesis": {
            "hash": hash256_to_hex(&genesis.hash),
            "merkle_root": hash256_to_hex(&genesis.merkle_root),
            "version": genesis.version,
            "time": genesis.time,
            "bits": format!("{:#010x}", genesis.bits),
            "nonce": genesis.nonce,
        },
        "pow": {
            "limit": hash256_to_hex(&pow.limit),
            "bits": format!("{:#010x}", pow.bits),
            "target_timespan": pow.target_timespan,
            "target_spacing": pow.target_spacing,
            "retarget_interval": pow.retarget_interval,
            "target_reset": pow.target_reset,
            "no_retargeting": pow.no_retargeting,
        },
        "checkpoints": checkpoints,
        "deployments": deployments,
        "address_prefix": {
            "pubkeyhash": prefixes.pubkeyhash,
            "scripthash": prefixes.scripthash,
            "witnesspubkeyhash": prefixes.witnesspubkeyhash,
            "witnessscripthash": prefixes.witnessscripthash,
            "bech32": prefixes.bech32,
        },
        "privkey_prefix": params.key_prefix.privkey,
        "min_relay": params.min_relay,
        "require_standard": params.require_standard,
    });
    if as_json {
        return serde_json::to_string_pretty(&value).map_err(|err| err.to_string());
    }

    let mut lines = vec![
        format!("network: {}", params.network),
        format!("magic: {:#010x}", params.magic),
        format!("port: {} (rpc {})", params.port, params.rpc_port),
        format!("seeds: {}", params.seeds.join(", ")),
        format!("genesis hash: {}", hash256_to_hex(&genesis.hash)),
        format!("genesis merkle root: {}", hash256_to_hex(&genesis.merkle_root)),
        format!(
            "genesis header: version {} time {} bits {:#010x} nonce {}",
            genesis.version, genesis.time, genesis.bits, genesis.nonce
        ),
        format!("pow limit: {}", hash256_to_hex(&pow.limit)),
        format!(
            "pow retarget: every {} blocks, timespan {}s, spacing {}s{}",
            pow.retarget_interval,
            pow.target_timespan,
            pow.target_spacing,
            if pow.no_retargeting { " (disabled)" } else { "" }
        ),
        format!("halving interval: {}", params.halving_interval),
        format!(
            "address prefixes: pubkeyhash {} scripthash {} bech32 {}",
            prefixes.pubkeyhash, prefixes.scripthash, prefixes.bech32
        ),
        format!("privkey prefix: {}", params.key_prefix.privkey),
        format!(
            "min relay fee: {} ({}.{:08} per kB)",
            params.min_relay,
            params.min_relay / COIN,
            params.min_relay % COIN
        ),
    ];
    for (height, hash) in &params.checkpoints {
        lines.push(format!("checkpoint {height}: {}", hash256_to_hex(hash)));
    }
    for deployment in &params.deploys {
        lines.push(format!(
            "deployment {}: bit {} start {} timeout {}",
            deployment.name, deployment.bit, deployment.start_time, deployment.timeout
        ));
    }
    Ok(lines.join("\n"))
}

fn genesis_output(config: &Config) -> Result<String, String> {
    let params = network_params(config.network);
    let recorded = GenesisOptions::for_network(params).map_err(|err| err.to_string())?;
    let options = config.overrides.apply(recorded);
    let genesis = build(&options).map_err(|err| err.to_string())?;

    let meets_target = validate_pow_header(&genesis.block.header, params).is_ok();
    if !meets_target {
        log_debug!(
            "{} genesis hash {} does not meet target {:#010x}",
            params.network,
            genesis.hash_hex(),
            genesis.block.header.bits
        );
    }
    let matches_registry = genesis.hash == params.genesis.hash;
    if config.overrides.is_empty() && !matches_registry {
        log_error!(
            "{} genesis rebuilt as {}, registry records {}",
            params.network,
            genesis.hash_hex(),
            hash256_to_hex(&params.genesis.hash)
        );
    }

    if config.json {
        return Ok(json!({
            "network": params.network.as_str(),
            "hash": genesis.hash_hex(),
            "merkle_root": genesis.merkle_root_hex(),
            "raw": genesis.raw_hex(),
            "size": genesis.raw.len(),
            "meets_target": meets_target,
            "matches_registry": matches_registry,
        })
        .to_string());
    }
    Ok(genesis_lines(params.network, &genesis))
}

fn genesis_lines(network: Network, genesis: &GenesisBlock) -> String {
    [
        format!("{network} hash: {}", genesis.hash_hex()),
        format!("{network} merkle root: {}", genesis.merkle_root_hex()),
        format!("{network} raw: {}", genesis.raw_hex()),
    ]
    .join("\n")
}

fn verify_output(config: &Config) -> Result<String, String> {
    let results = if config.network_set {
        let params = network_params(config.network);
        vec![(config.network, verify_network(params))]
    } else {
        verify_all()
    };

    let mut failures = 0usize;
    let mut entries = Vec::with_capacity(results.len());
    for (network, result) in results {
        let params = network_params(network);
        let mut problems: Vec<String> = Vec::new();
        if let Err(err) = &result {
            problems.push(err.to_string());
        }
        if let Err(errors) = params.check() {
            problems.extend(errors.iter().map(|err| err.to_string()));
        }
        if let Err(err) = check_genesis_target(params) {
            problems.push(format!("genesis target: {err}"));
        }
        if !problems.is_empty() {
            failures += 1;
        }
        entries.push((network, result.ok(), problems));
    }

    // Cross-network rules only make sense over the whole registry.
    let registry = if config.network_set {
        None
    } else {
        Some(registry_problems(check_registry()))
    };
    if matches!(&registry, Some(problems) if !problems.is_empty()) {
        failures += 1;
    }

    let output = if config.json {
        let values: Vec<_> = entries
            .iter()
            .map(|(network, genesis, problems)| {
                json!({
                    "network": network.as_str(),
                    "ok": problems.is_empty(),
                    "hash": genesis.as_ref().map(GenesisBlock::hash_hex),
                    "errors": problems,
                })
            })
            .collect();
        let registry = registry.as_ref().map(|problems| {
            json!({ "ok": problems.is_empty(), "errors": problems })
        });
        json!({ "networks": values, "registry": registry }).to_string()
    } else {
        let mut lines: Vec<String> = entries
            .iter()
            .map(|(network, genesis, problems)| match (genesis, problems.is_empty()) {
                (Some(genesis), true) => format!("{network}: ok {}", genesis.hash_hex()),
                _ => format!("{network}: FAILED {}", problems.join("; ")),
            })
            .collect();
        match &registry {
            Some(problems) if problems.is_empty() => lines.push("registry: ok".to_string()),
            Some(problems) => lines.push(format!("registry: FAILED {}", problems.join("; "))),
            None => {}
        }
        lines.join("\n")
    };

    if failures > 0 {
        return Err(format!("{output}\n{failures} check(s) failed verification"));
    }
    log_info!("verified {} network(s)", entries.len());
    Ok(output)
}

/// Keeps the cross-network registry errors; per-entry errors are reported per network.
fn registry_problems(result: Result<(), Vec<ParamsError>>) -> Vec<String> {
    result
        .err()
        .unwrap_or_default()
        .iter()
        .filter(|err| {
            matches!(
                err,
                ParamsError::NetworkMismatch { .. } | ParamsError::DuplicateMagic { .. }
            )
        })
        .map(ToString::to_string)
        .collect()
}
