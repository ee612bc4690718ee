//! Persisted ledger snapshot
//!
//! The whole ledger is saved and loaded as one document; there are no deltas.

use super::account::Account;
use super::department::Department;
use super::transaction::Transaction;
use serde::{Deserialize, Serialize};

/// Full ledger state: all accounts and transactions, including soft-deleted
/// ones, plus departments
///
/// `departments` is optional on load because early snapshots did not carry it;
/// the session fills in the seed departments in that case.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Snapshot {
    pub accounts: Vec<Account>,
    pub transactions: Vec<Transaction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub departments: Option<Vec<Department>>,
}
