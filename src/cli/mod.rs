// CLI module
// Command-line interface, argument parsing and command dispatch

mod args;

pub use args::{CliArgs, Command};

use crate::core::{audit, FinancialSummary};
use crate::io::{
    write_accounts_csv, write_ledger_csv, write_summary_csv, JsonFileStore, SnapshotStore,
};
use crate::session::LedgerSession;
use crate::types::{LedgerError, StoreError};
use clap::Parser;
use std::io::{self, Write};
use thiserror::Error;

/// Failure of a CLI invocation
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),

    #[error("audit found {0} problem(s)")]
    AuditFindings(usize),
}

/// Parse command-line arguments using clap
///
/// On invalid arguments or `--help`, clap prints the message and exits the
/// process.
pub fn parse_args() -> CliArgs {
    CliArgs::parse()
}

/// Open the configured snapshot and run the selected command
///
/// # Errors
///
/// Returns an error if the configuration or snapshot cannot be loaded, the
/// command is rejected, or output cannot be written.
pub fn run(args: &CliArgs, output: &mut dyn Write) -> Result<(), CliError> {
    let config = args.to_config()?;
    let store = JsonFileStore::from_config(&config);
    tracing::debug!(path = %store.path().display(), "opening ledger");

    let mut session = LedgerSession::open(store, config.seed_when_missing)?;
    execute(&mut session, &args.command, output)
}

/// Run one command against an open session
///
/// Reports are written to `output` as CSV. Mutators write a one-line
/// confirmation.
pub fn execute<S: SnapshotStore>(
    session: &mut LedgerSession<S>,
    command: &Command,
    output: &mut dyn Write,
) -> Result<(), CliError> {
    match command {
        Command::Accounts { all: true } => {
            write_accounts_csv(session.engine().all_accounts(), output)?;
        }
        Command::Accounts { all: false } => {
            write_accounts_csv(session.engine().accounts(), output)?;
        }
        Command::Ledger { .. } => {
            let engine = session.engine();
            let transactions = command.ledger_filter().apply(engine.transactions());
            write_ledger_csv(transactions, engine.all_accounts(), output)?;
        }
        Command::Summary => {
            let summary = FinancialSummary::from_accounts(session.engine().accounts());
            write_summary_csv(&summary, output)?;
        }
        Command::Trash => {
            let engine = session.engine();
            write_ledger_csv(engine.deleted_transactions(), engine.all_accounts(), output)?;
        }
        Command::DeleteAccount { id } => {
            session.delete_account(id)?;
            writeln!(output, "account {id} deleted")?;
        }
        Command::DeleteTransaction { id } => {
            session.delete_transaction(id)?;
            writeln!(output, "transaction {id} moved to trash")?;
        }
        Command::RestoreTransaction { id } => {
            session.restore_transaction(id)?;
            writeln!(output, "transaction {id} restored")?;
        }
        Command::PurgeTransaction { id } => {
            session.permanent_delete_transaction(id)?;
            writeln!(output, "transaction {id} permanently deleted")?;
        }
        Command::Audit => {
            let engine = session.engine();
            let findings = audit(engine.all_accounts(), engine.all_transactions());
            for finding in &findings {
                writeln!(output, "{finding}")?;
            }
            if !findings.is_empty() {
                return Err(CliError::AuditFindings(findings.len()));
            }
        }
    }

    Ok(())
}
