//! # Repair-Track Scan Runtime
//!
//! Reads scans (one per line) from stdin and applies them to the entity
//! store. Snapshots are flushed on a timer, on `:flush` and on shutdown.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use rt_01_token_codec::{CodecKey, TokenCodec};
use rt_02_entity_store::Identifier;
use scan_runtime::{console, RuntimeConfig, ScanHost};

/// Repair-Track scan console
#[derive(Parser, Debug)]
#[command(name = "scan-runtime")]
#[command(about = "Barcode scan console for repair asset tracking")]
struct Args {
    /// Snapshot directory
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    /// Seconds between snapshot flushes
    #[arg(short, long)]
    flush_secs: Option<u64>,

    /// Class registry file (JSON lines)
    #[arg(long)]
    classes: Option<PathBuf>,

    /// Codec key, 48 hex chars (overrides RT_CODEC_KEY)
    #[arg(long)]
    codec_key: Option<String>,

    /// Allow the default all-zero codec key (development only)
    #[arg(long)]
    insecure: bool,

    #[command(subcommand)]
    command: Option<Cmd>,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Run the scan console (default)
    Run,
    /// Print label tokens for identifiers
    Mint {
        /// Identifiers, e.g. b000000000000000007
        ids: Vec<String>,
    },
    /// Generate a random codec key
    Keygen,
}

/// Apply CLI flags over the environment configuration.
fn load_config(args: &Args) -> Result<RuntimeConfig> {
    let mut config = RuntimeConfig::from_env();

    if let Some(dir) = &args.data_dir {
        config.data_dir = dir.clone();
    }
    if let Some(secs) = args.flush_secs {
        config.flush_interval_secs = secs;
    }
    if let Some(path) = &args.classes {
        config.class_file = Some(path.clone());
    }
    if let Some(key) = &args.codec_key {
        config.codec.key = CodecKey::from_hex(key).context("Invalid --codec-key")?;
    }

    if args.insecure {
        warn!("Running with --insecure: default codec key accepted");
        config.validate()?;
    } else {
        config.validate_for_production()?;
    }
    Ok(config)
}

async fn run(config: RuntimeConfig) -> Result<()> {
    info!("===========================================");
    info!("  Repair-Track Scan Runtime v{}", env!("CARGO_PKG_VERSION"));
    info!("===========================================");
    info!("Data Dir: {:?}", config.data_dir);

    let host = ScanHost::open(&config)?;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut ticker = tokio::time::interval(Duration::from_secs(config.flush_interval_secs));
    ticker.tick().await;

    info!("Ready. One scan per line; Ctrl+C to stop.");

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("Failed to read stdin")? else {
                    break;
                };
                match console::parse(&line) {
                    Ok(Some(command)) => match host.handle(command).await {
                        Ok(reply) if reply.is_empty() => {}
                        Ok(reply) => println!("{}", reply),
                        Err(e) => println!("! {:#}", e),
                    },
                    Ok(None) => {}
                    Err(e) => println!("? {}", e),
                }
            }
            _ = ticker.tick() => {
                // Inline so no flush outlives the loop; the write itself runs
                // on the blocking pool.
                if let Err(e) = host.flush().await {
                    error!("Periodic flush failed: {:#}", e);
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Shutdown signal received");
                break;
            }
        }
    }

    let written = host.flush().await.context("Final snapshot flush failed")?;
    info!("Shutdown complete ({} records flushed)", written);
    Ok(())
}

fn mint(config: &RuntimeConfig, ids: &[String]) -> Result<()> {
    let codec = TokenCodec::new(config.codec.clone())?;
    for raw in ids {
        let id: Identifier = raw
            .parse()
            .with_context(|| format!("Invalid identifier {}", raw))?;
        println!("{}\t{}", id, codec.mint(&id.to_payload())?);
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();

    if let Some(Cmd::Keygen) = args.command {
        println!("{}", hex::encode(CodecKey::generate().as_bytes()));
        return Ok(());
    }

    let config = load_config(&args)?;

    match &args.command {
        Some(Cmd::Mint { ids }) => mint(&config, ids),
        Some(Cmd::Run) | None => run(config).await,
        Some(Cmd::Keygen) => Ok(()),
    }
}
