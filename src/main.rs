//! hdkeys - derive private keys from a BIP-39 mnemonic
//!
//! The mnemonic is read from the first line of stdin so it never shows up in
//! the process list or shell history.

use std::io::{self, BufRead};

use anyhow::{bail, Context};
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use hdkeys::{compute_master, derive_for_path, hd::segments, Bip44Params, DerivationConfig, Seed};

/// Subcommand selected on the command line
enum Command {
    /// Derive the key at the configured path
    Derive,
    /// Validate BIP-44 parameters
    Params(String),
    /// Print usage
    Help,
}

/// Parsed command line
struct Args {
    command: Command,
    path: Option<String>,
    config: Option<String>,
    chain_code: bool,
}

fn parse_args() -> anyhow::Result<Args> {
    let args: Vec<String> = std::env::args().collect();
    let mut command = None;
    let mut path = None;
    let mut config = None;
    let mut chain_code = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--path" | "-p" => {
                i += 1;
                path = Some(args.get(i).context("--path needs a value")?.clone());
            }
            "--config" | "-c" => {
                i += 1;
                config = Some(args.get(i).context("--config needs a value")?.clone());
            }
            "--chain-code" => chain_code = true,
            "--help" | "-h" => command = Some(Command::Help),
            "derive" if command.is_none() => command = Some(Command::Derive),
            "params" if command.is_none() => {
                i += 1;
                let text = args.get(i).context("params needs a path argument")?;
                command = Some(Command::Params(text.clone()));
            }
            other => bail!("unexpected argument {other:?}, see --help"),
        }
        i += 1;
    }

    Ok(Args {
        command: command.unwrap_or(Command::Help),
        path,
        config,
        chain_code,
    })
}

fn print_help() {
    println!("hdkeys v{}", hdkeys::VERSION);
    println!();
    println!("USAGE:");
    println!("    hdkeys derive [OPTIONS] < mnemonic.txt");
    println!("    hdkeys params <PATH>");
    println!();
    println!("OPTIONS:");
    println!("    -p, --path <PATH>       Derivation path (default: 44'/714'/0'/0/0)");
    println!("    -c, --config <FILE>     JSON config file");
    println!("    --chain-code            Also print the chain code");
    println!("    -h, --help              Print help");
    println!();
    println!("ENVIRONMENT:");
    println!("    HDKEYS_PATH, HDKEYS_PASSPHRASE, HDKEYS_LOG");
}

fn init_logging(level: &str) -> anyhow::Result<()> {
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

fn derive(config: &DerivationConfig, chain_code: bool) -> anyhow::Result<()> {
    let mut phrase = String::new();
    io::stdin()
        .lock()
        .read_line(&mut phrase)
        .context("failed to read mnemonic from stdin")?;

    let seed = Seed::from_mnemonic(phrase.trim(), &config.passphrase)?;
    let master = compute_master(seed.as_bytes());

    info!(path = %config.path, depth = segments(&config.path).len(), "deriving key");
    let node = derive_for_path(master.key(), master.chain_code(), &config.path);

    println!("{}", hex::encode(node.key()));
    if chain_code {
        println!("{}", hex::encode(node.chain_code()));
    }
    Ok(())
}

fn params(path: &str) -> anyhow::Result<()> {
    let params = Bip44Params::parse(path).with_context(|| format!("invalid BIP-44 path {path:?}"))?;
    let indices: Vec<String> = params
        .derivation_path()
        .iter()
        .map(|index| format!("{index:#010x}"))
        .collect();

    println!("{}", serde_json::to_string_pretty(&params)?);
    println!("{}", indices.join("/"));
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = parse_args()?;

    let mut config = match &args.config {
        Some(file) => DerivationConfig::load(file)?,
        None => DerivationConfig::default(),
    }
    .apply_env();
    if let Some(path) = args.path {
        config.path = path;
    }

    init_logging(&config.log_level)?;

    match args.command {
        Command::Help => {
            print_help();
            Ok(())
        }
        Command::Derive => derive(&config, args.chain_code),
        Command::Params(path) => params(&path),
    }
}
