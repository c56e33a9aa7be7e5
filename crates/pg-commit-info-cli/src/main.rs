//! pg-commit-info - replay decoding events through the commit-info plugin
//!
//! Usage:
//!   # Read events from stdin, default options
//!   pg-commit-info < events.jsonl
//!
//!   # Suppress empty transactions, emulate a PostgreSQL 10 host
//!   pg-commit-info --input events.jsonl -o skip-empty-xacts=true --server-version 100023
//!
//! Summary lines go to stdout; logs go to stderr.

use anyhow::Context;
use clap::Parser;
use pg_commit_info::{
    replay_script, DecodingSession, HostCapabilities, IoSink, PluginOption, ReplayDriver,
};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Replay a decoding-event script and print one summary line per transaction
#[derive(Parser, Debug)]
#[command(name = "pg-commit-info")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON-lines event script (reads stdin when omitted)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Plugin option as NAME=VALUE, or a bare NAME (repeatable)
    #[arg(short = 'o', long = "option", value_name = "NAME[=VALUE]")]
    options: Vec<PluginOption>,

    /// Emulated server_version_num; truncate support needs 110000 or later
    #[arg(long, default_value = "170000", env = "PG_COMMIT_INFO_SERVER_VERSION")]
    server_version: u32,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "warn", env = "RUST_LOG")]
    log_level: String,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| cli.log_level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let capabilities = HostCapabilities::for_server_version(cli.server_version);
    let session = DecodingSession::initialize(&cli.options, capabilities)
        .context("failed to initialize decoding session")?;
    tracing::debug!(
        callbacks = ?session.callbacks().iter().map(|c| c.to_string()).collect::<Vec<_>>(),
        "Registered callbacks"
    );

    let reader: Box<dyn BufRead> = match &cli.input {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("failed to open {}", path.display()))?,
        )),
        None => Box::new(io::stdin().lock()),
    };

    let mut driver = ReplayDriver::new(session);
    let mut sink = IoSink::new(io::stdout().lock());

    let events = replay_script(reader, &mut driver, &mut sink).context("replay failed")?;
    driver.finish().context("replay failed")?;

    tracing::info!(
        events,
        lines = sink.lines_written(),
        "Replay complete"
    );
    Ok(())
}
