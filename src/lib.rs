//! Smart Ledger Library
//! # Overview
//!
//! This library provides an in-process double-entry bookkeeping engine over a
//! hierarchical chart of accounts, with soft deletion, a trash bin for
//! transactions, and whole-ledger snapshot persistence.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (Account, Transaction, Department, errors)
//! - [`core`] - Business logic components:
//!   - [`core::balance`] - Pure balance recomputation and parent roll-up
//!   - [`core::engine`] - Mutators, deletion guards and views
//!   - [`core::account_manager`] - Chart of accounts and parent validation
//!   - [`core::transaction_store`] - Journal with soft delete and purge
//!   - [`core::report`] - Financial summary, journal filter and audit
//! - [`session`] - Engine plus snapshot store, saving after every mutation
//! - [`io`] - Snapshot stores and CSV output
//! - [`seed`] - Starter chart of accounts, journal and departments
//! - [`config`] - TOML configuration
//! - [`cli`] - CLI arguments parsing and command dispatch
//!
//! # Balance Rules
//!
//! Balances are never stored authoritatively; they are recomputed from the
//! full journal after every structural mutation:
//!
//! - **Asset, Expense**: debits minus credits
//! - **Liability, Equity, Revenue**: credits minus debits
//! - Soft-deleted transactions contribute nothing
//! - A parent's balance is its own postings plus the balances of its active
//!   children
//!
//! # Deletion Rules
//!
//! - Accounts are only soft-deleted, and only when they have no active
//!   children and no active transactions posting to them
//! - Transactions are soft-deleted into the trash, can be restored, and can
//!   be permanently deleted

// Module declarations
pub mod cli;
pub mod config;
pub mod core;
pub mod io;
pub mod seed;
pub mod session;
pub mod types;

pub use crate::config::LedgerConfig;
pub use crate::core::{recompute_balances, FinancialSummary, LedgerEngine, LedgerFilter};
pub use crate::io::{JsonFileStore, MemoryStore, SnapshotStore};
pub use crate::session::LedgerSession;
pub use crate::types::{
    Account, AccountDraft, AccountId, AccountType, AccountUpdate, LedgerError, Snapshot,
    Transaction, TransactionDraft, TransactionEntry, TransactionId,
};
