use crate::config::LedgerConfig;
use crate::core::LedgerFilter;
use crate::types::StoreError;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Double-entry ledger with a hierarchical chart of accounts
#[derive(Parser, Debug)]
#[command(name = "smart-ledger")]
#[command(about = "Double-entry ledger with a hierarchical chart of accounts", long_about = None)]
pub struct CliArgs {
    /// TOML configuration file
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory holding the snapshot file (overrides the config file)
    #[arg(long = "data-dir", value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Snapshot file stem (overrides the config file)
    #[arg(long = "storage-key", value_name = "KEY")]
    pub storage_key: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Chart of accounts with balances, as CSV
    Accounts {
        /// Include soft-deleted accounts
        #[arg(long)]
        all: bool,
    },

    /// Journal lines, newest first, as CSV
    Ledger {
        /// Case-insensitive text in the description
        #[arg(long, value_name = "TEXT")]
        search: Option<String>,

        /// Only transactions posting to this account
        #[arg(long, value_name = "ID")]
        account: Option<String>,

        /// Earliest date, inclusive (YYYY-MM-DD)
        #[arg(long, value_name = "DATE")]
        from: Option<String>,

        /// Latest date, inclusive (YYYY-MM-DD)
        #[arg(long, value_name = "DATE")]
        to: Option<String>,
    },

    /// Root totals per account type, as CSV
    Summary,

    /// Soft-deleted transactions, as CSV
    Trash,

    /// Soft-delete an account with no active children or transactions
    DeleteAccount { id: String },

    /// Move a transaction to the trash
    DeleteTransaction { id: String },

    /// Bring a transaction back from the trash
    RestoreTransaction { id: String },

    /// Remove a transaction for good
    PurgeTransaction { id: String },

    /// Report dangling references, unbalanced transactions and parent cycles
    Audit,
}

impl CliArgs {
    /// Build the effective configuration
    ///
    /// Starts from the config file when one is given, or the defaults
    /// otherwise, then applies `--data-dir` and `--storage-key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be read or parsed.
    pub fn to_config(&self) -> Result<LedgerConfig, StoreError> {
        let mut config = match &self.config {
            Some(path) => LedgerConfig::from_file(path)?,
            None => LedgerConfig::default(),
        };

        if let Some(data_dir) = &self.data_dir {
            config.data_dir = data_dir.clone();
        }
        if let Some(storage_key) = &self.storage_key {
            config.storage_key = storage_key.clone();
        }

        Ok(config)
    }
}

impl Command {
    /// Journal filter for the `ledger` command; matches everything otherwise
    pub fn ledger_filter(&self) -> LedgerFilter {
        match self {
            Command::Ledger {
                search,
                account,
                from,
                to,
            } => LedgerFilter {
                search: search.clone(),
                account_id: account.clone(),
                date_from: from.clone(),
                date_to: to.clone(),
            },
            _ => LedgerFilter::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[rstest]
    #[case::accounts(&["prog", "accounts"], Command::Accounts { all: false })]
    #[case::accounts_all(&["prog", "accounts", "--all"], Command::Accounts { all: true })]
    #[case::summary(&["prog", "summary"], Command::Summary)]
    #[case::trash(&["prog", "trash"], Command::Trash)]
    #[case::audit(&["prog", "audit"], Command::Audit)]
    #[case::delete_account(
        &["prog", "delete-account", "1.1.3"],
        Command::DeleteAccount { id: "1.1.3".into() }
    )]
    #[case::delete_transaction(
        &["prog", "delete-transaction", "tx-001"],
        Command::DeleteTransaction { id: "tx-001".into() }
    )]
    #[case::restore_transaction(
        &["prog", "restore-transaction", "tx-001"],
        Command::RestoreTransaction { id: "tx-001".into() }
    )]
    #[case::purge_transaction(
        &["prog", "purge-transaction", "tx-001"],
        Command::PurgeTransaction { id: "tx-001".into() }
    )]
    #[case::ledger_filters(
        &["prog", "ledger", "--search", "rent", "--account", "5.1", "--from", "2024-03-01", "--to", "2024-03-31"],
        Command::Ledger {
            search: Some("rent".into()),
            account: Some("5.1".into()),
            from: Some("2024-03-01".into()),
            to: Some("2024-03-31".into()),
        }
    )]
    fn test_command_parsing(#[case] args: &[&str], #[case] expected: Command) {
        let parsed = CliArgs::try_parse_from(args).unwrap();
        assert_eq!(parsed.command, expected);
    }

    #[rstest]
    #[case::missing_command(&["prog"])]
    #[case::unknown_command(&["prog", "balance-sheet"])]
    #[case::missing_id(&["prog", "delete-account"])]
    fn test_parsing_errors(#[case] args: &[&str]) {
        assert!(CliArgs::try_parse_from(args).is_err());
    }

    #[test]
    fn test_to_config_defaults() {
        let parsed = CliArgs::try_parse_from(["prog", "summary"]).unwrap();
        assert_eq!(parsed.to_config().unwrap(), LedgerConfig::default());
    }

    #[test]
    fn test_flags_override_config_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "data_dir = \"/from/file\"\nstorage_key = \"file_key\"").unwrap();
        let path = file.path().to_str().unwrap();

        let parsed = CliArgs::try_parse_from([
            "prog",
            "--config",
            path,
            "--storage-key",
            "flag_key",
            "summary",
        ])
        .unwrap();
        let config = parsed.to_config().unwrap();

        assert_eq!(config.data_dir, PathBuf::from("/from/file"));
        assert_eq!(config.storage_key, "flag_key");
    }

    #[test]
    fn test_ledger_filter_from_command() {
        let parsed = CliArgs::try_parse_from(["prog", "ledger", "--account", "1.1.2"]).unwrap();

        let filter = parsed.command.ledger_filter();

        assert_eq!(filter.account_id.as_deref(), Some("1.1.2"));
        assert!(filter.search.is_none());
    }
}
