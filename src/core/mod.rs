//! Core business logic module
//!
//! This module contains the ledger components:
//! - `balance` - Pure balance recomputation and tree roll-up
//! - `account_manager` - Chart-of-accounts arena and parent validation
//! - `transaction_store` - Journal storage with soft delete and purge
//! - `engine` - Mutators that keep balances fresh and enforce deletion guards
//! - `report` - Summaries, journal filtering and the audit pass

pub mod account_manager;
pub mod balance;
pub mod engine;
pub mod report;
pub mod transaction_store;

pub use account_manager::AccountManager;
pub use balance::{own_balances, recompute_balances, NormalBalance};
pub use engine::LedgerEngine;
pub use report::{audit, AuditFinding, FinancialSummary, LedgerFilter};
pub use transaction_store::TransactionStore;
