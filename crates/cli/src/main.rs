//! `callcache` command-line front end.
//!
//! ```text
//! callcache store hello                 # prints the new key
//! callcache store 42 --kind int
//! callcache get <key> --as int
//! callcache replay                      # history of Cache.store
//! callcache reset
//! callcache demo
//! ```
//!
//! The store comes from `--config <file.toml>` or, without it, from the
//! `CALLCACHE_*` environment variables. With the default in-memory backend
//! nothing outlives a single invocation; point it at Redis to keep data.

use callcache_core::repr::{bytes_literal, float_literal};
use callcache_core::{Error, OperationName, Result, Value};
use callcache_engine::Cache;
use callcache_storage::StoreConfig;
use clap::{Parser, Subcommand, ValueEnum};
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "callcache", version, about = "Instrumented scalar cache over a key-value store")]
struct Cli {
    /// TOML configuration file (defaults to CALLCACHE_* environment variables)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Store a value under a fresh key and print the key
    Store {
        /// Value to store
        value: String,
        /// How to interpret the value
        #[arg(long, value_enum, default_value_t = Kind::Text)]
        kind: Kind,
    },
    /// Read the value under a key
    Get {
        /// Key returned by `store`
        key: String,
        /// Conversion applied on read
        #[arg(long = "as", value_enum, default_value_t = Format::Raw)]
        format: Format,
    },
    /// Print the recorded call history of an operation
    Replay {
        /// Operation name
        #[arg(default_value = "Cache.store")]
        operation: String,
    },
    /// Remove everything from the store
    Reset,
    /// Store b"hello" and read it back
    Demo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Kind {
    Text,
    Int,
    Float,
    Bytes,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Raw,
    Text,
    Int,
    Float,
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();
    let mut stdout = std::io::stdout().lock();
    match run(cli, &mut stdout) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&PathBuf>) -> Result<StoreConfig> {
    match path {
        Some(path) => StoreConfig::from_file(path),
        None => StoreConfig::from_env(),
    }
}

fn run(cli: Cli, out: &mut impl Write) -> Result<()> {
    let config = load_config(cli.config.as_ref())?;
    let cache = Cache::open(&config)?;
    debug!(target: "callcache::cli", command = ?cli.command, backend = config.backend.name(), "running");

    match cli.command {
        Command::Store { value, kind } => {
            let key = cache.store(parse_value(value, kind)?)?;
            writeln!(out, "{}", key)?;
        }
        Command::Get { key, format } => {
            let rendered = match format {
                Format::Raw => cache.retrieve(&key)?.map(|raw| bytes_literal(&raw)),
                Format::Text => cache.retrieve_text(&key)?,
                Format::Int => cache.retrieve_integer(&key)?.map(|n| n.to_string()),
                Format::Float => cache.retrieve_float(&key)?.map(float_literal),
            };
            writeln!(out, "{}", rendered.as_deref().unwrap_or("(nil)"))?;
        }
        Command::Replay { operation } => {
            let operation = OperationName::new(operation)?;
            cache.replay_reporter().replay(&operation, out)?;
        }
        Command::Reset => {
            cache.reset_all()?;
            writeln!(out, "OK")?;
        }
        Command::Demo => {
            let key = cache.store(b"hello")?;
            writeln!(out, "{}", key)?;
            let raw = cache.store_handle().get(&key)?;
            writeln!(out, "{}", raw.map(|b| bytes_literal(&b)).as_deref().unwrap_or("(nil)"))?;
        }
    }
    Ok(())
}

fn parse_value(raw: String, kind: Kind) -> Result<Value> {
    match kind {
        Kind::Text => Ok(Value::Text(raw)),
        Kind::Bytes => Ok(Value::Bytes(raw.into_bytes())),
        Kind::Int => raw.trim().parse().map(Value::Int).map_err(|_| Error::Parse {
            input: raw,
            target: "integer",
        }),
        Kind::Float => raw.trim().parse().map(Value::Float).map_err(|_| Error::Parse {
            input: raw,
            target: "float",
        }),
    }
}
