//! Smart Ledger CLI
//!
//! Command-line interface over a persisted double-entry ledger.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- accounts > accounts.csv
//! cargo run -- ledger --account 1.1.2 --from 2024-03-01 > bank.csv
//! cargo run -- summary
//! cargo run -- delete-transaction tx-009
//! cargo run -- --data-dir /srv/ledger --storage-key books_2024 audit
//! ```
//!
//! Reports are written to stdout as CSV. Diagnostics go to stderr and are
//! filtered with `RUST_LOG` (default `smart_ledger=info`).
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (unreadable config or snapshot, rejected mutation, audit findings)

use smart_ledger::cli;
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("smart_ledger=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let args = cli::parse_args();

    let mut output = std::io::stdout();
    if let Err(e) = cli::run(&args, &mut output) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
