//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `account`: chart-of-accounts nodes and their typed updates
//! - `transaction`: journal transactions, entries and drafts
//! - `department`: flat department records
//! - `snapshot`: the persisted whole-ledger document
//! - `error`: error types for the ledger

pub mod account;
pub mod department;
pub mod error;
pub mod snapshot;
pub mod transaction;

pub use account::{Account, AccountDraft, AccountId, AccountType, AccountUpdate};
pub use department::{Department, DepartmentDraft, DepartmentId, DepartmentUpdate, Specialization};
pub use error::{LedgerError, StoreError, ValidationError};
pub use snapshot::Snapshot;
pub use transaction::{
    EntryTotals, Transaction, TransactionDraft, TransactionEntry, TransactionId,
};
