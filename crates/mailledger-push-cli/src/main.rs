//! `push-inspect`: reads IMAP push notifications as JSON lines on stdin and
//! prints the normalized events as JSON lines on stdout.
//!
//! ```text
//! push-inspect [--config <path>] < notifications.jsonl
//! ```
//!
//! Logs go to stderr and follow `RUST_LOG`.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser as _;
use mailledger_push::{Parser, ParserConfig};
use tracing::{debug, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(clap::Parser, Debug)]
#[command(name = "push-inspect")]
#[command(about = "Normalize IMAP push notifications read as JSON lines", long_about = None)]
struct Args {
    /// Parser configuration file (JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "push_inspect=info,mailledger_push=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let config = match args.config {
        Some(path) => load_config(&path)?,
        None => ParserConfig::default(),
    };

    let parser = Parser::new(config);
    debug!(prefixes = ?parser.config().vendor_prefixes, "Parser configured");

    let stdin = io::stdin().lock();
    let mut stdout = io::stdout().lock();

    let (mut parsed, mut dropped, mut invalid) = (0_u64, 0_u64, 0_u64);
    for (index, line) in stdin.lines().enumerate() {
        let line = line.context("Failed to read stdin")?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match parser.parse_json(line) {
            Ok(Some(event)) => {
                serde_json::to_writer(&mut stdout, &event).context("Failed to write event")?;
                writeln!(stdout).context("Failed to write event")?;
                parsed += 1;
            }
            Ok(None) => {
                debug!(line = index + 1, "Notification dropped");
                dropped += 1;
            }
            Err(e) => {
                warn!(line = index + 1, %e, "Invalid notification");
                invalid += 1;
            }
        }
    }

    info!(parsed, dropped, invalid, "Done");
    Ok(())
}

fn load_config(path: &Path) -> anyhow::Result<ParserConfig> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let config = ParserConfig::from_json(&json)
        .with_context(|| format!("Invalid config {}", path.display()))?;
    info!(path = %path.display(), "Loaded config");
    Ok(config)
}
