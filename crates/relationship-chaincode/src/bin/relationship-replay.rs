//! Replays a JSON transaction log against an in-memory ledger.
//!
//! Prints one line per transaction (index, function, status, payload or
//! message) followed by the final state root. Two replicas fed the same log
//! must print the same root.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use relationship_chaincode::ReplayLog;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Transaction log to replay
    log: PathBuf,

    /// Default log filter when RUST_LOG is unset
    #[arg(short, long, default_value = "warn")]
    log_level: String,

    /// Emit logs as JSON lines
    #[arg(long)]
    json_logs: bool,

    /// Exit non-zero if any transaction was rejected
    #[arg(long)]
    strict: bool,
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let args = Args::parse();

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(true);
    if args.json_logs {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    let (log, base_dir) = ReplayLog::load(&args.log)?;
    tracing::info!(path = %args.log.display(), transactions = log.transactions.len(), "Loaded log");

    let report = log.run(&base_dir)?;
    for (index, outcome) in report.outcomes.iter().enumerate() {
        let response = &outcome.response;
        let body = if response.is_ok() {
            response.payload_str()
        } else {
            response.message.as_str().into()
        };
        println!("{index}\t{}\t{}\t{body}", outcome.function, response.status);
    }
    println!("state_root\t{}", hex::encode(report.state_root));

    if args.strict && report.rejected() > 0 {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}
