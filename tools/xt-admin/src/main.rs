//! XT-Admin: CrossTalk operator CLI
//!
//! Reads a JSON document (a file path, or `-` for stdin) and prints the
//! canonical encoding and digests as JSON.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::de::DeserializeOwned;
use shared_types::{ChainIdentity, ChainType, CrossTalkAckPayload, CrossTalkPayload};
use std::io::Read;
use std::path::PathBuf;
use tracing::debug;
use xt_01_signature_verification::ValidatorSet;
use xt_admin::{ack_digest, checkpoint_digest, request_digest};
use xt_telemetry::{init_logging, TelemetryConfig};

/// XT-Admin: CrossTalk operator CLI
#[derive(Parser, Debug)]
#[command(name = "xt-admin")]
#[command(about = "Compute the digests CrossTalk validators sign")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Digest of a `requestFromSource` payload for a destination gateway
    RequestHash {
        /// CrossTalkPayload JSON
        input: PathBuf,
        /// Chain type of the executing gateway
        #[arg(long)]
        chain_type: u64,
        /// Chain id of the executing gateway
        #[arg(long)]
        chain_id: String,
    },
    /// Digest of a `crossTalkAck` payload for the origin gateway
    AckHash {
        /// CrossTalkAckPayload JSON
        input: PathBuf,
        /// Chain type of the origin gateway
        #[arg(long)]
        chain_type: u64,
        /// Chain id of the origin gateway
        #[arg(long)]
        chain_id: String,
    },
    /// Checkpoint of a validator set
    Checkpoint {
        /// ValidatorSet JSON
        input: PathBuf,
    },
}

fn read_json<T: DeserializeOwned>(path: &PathBuf) -> Result<T> {
    let mut raw = String::new();
    if path.as_os_str() == "-" {
        std::io::stdin()
            .read_to_string(&mut raw)
            .context("reading stdin")?;
    } else {
        raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
    }
    debug!(bytes = raw.len(), "input read");
    serde_json::from_str(&raw).with_context(|| format!("parsing {}", path.display()))
}

fn main() -> Result<()> {
    let telemetry = TelemetryConfig {
        service_name: "xt-admin".to_string(),
        log_level: "warn".to_string(),
        ..TelemetryConfig::from_env()
    };
    init_logging(&telemetry)?;

    let args = Args::parse();
    let digest = match args.command {
        Command::RequestHash {
            input,
            chain_type,
            chain_id,
        } => {
            let payload: CrossTalkPayload = read_json(&input)?;
            request_digest(&payload, &ChainIdentity::new(ChainType(chain_type), chain_id))
        }
        Command::AckHash {
            input,
            chain_type,
            chain_id,
        } => {
            let ack: CrossTalkAckPayload = read_json(&input)?;
            ack_digest(&ack, &ChainIdentity::new(ChainType(chain_type), chain_id))
        }
        Command::Checkpoint { input } => {
            let set: ValidatorSet = read_json(&input)?;
            checkpoint_digest(&set)
        }
    };

    println!("{}", serde_json::to_string_pretty(&digest)?);
    Ok(())
}
