//! Error types for the ledger
//!
//! Errors come in three channels:
//!
//! - **Engine rejections** (`LedgerError`): a mutation was refused and no state
//!   changed. Deleting an account that still has active children or active
//!   transaction entries is the main case, and the two are kept distinct so the
//!   user knows what to remove first.
//! - **Authoring validation** (`ValidationError`): a journal draft is not
//!   postable (unbalanced, empty, ...). The engine itself never raises these.
//! - **Persistence** (`StoreError`): snapshot, CSV and configuration I/O.

use rust_decimal::Decimal;
use thiserror::Error;

/// Rejected engine mutation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LedgerError {
    /// Account still has active child accounts
    #[error("Account {account} has {children} active child account(s); remove its child accounts first")]
    HasChildren {
        /// The account that was to be deleted
        account: String,
        /// Number of active children found
        children: usize,
    },

    /// Account is still referenced by active transactions
    #[error("Account {account} is used by {transactions} active transaction(s); delete its transactions first")]
    HasTransactions {
        /// The account that was to be deleted
        account: String,
        /// Number of active transactions referencing it
        transactions: usize,
    },

    /// No account with this id
    #[error("Account {account} not found")]
    AccountNotFound { account: String },

    /// Parent id does not resolve to any account
    #[error("Parent account {parent} does not exist")]
    UnknownParent { parent: String },

    /// Parent id resolves to a soft-deleted account
    #[error("Parent account {parent} is deleted")]
    ParentDeleted { parent: String },

    /// Account named as its own parent
    #[error("Account {account} cannot be its own parent")]
    SelfParent { account: String },

    /// New parent is a descendant of the account
    #[error("Moving account {account} under {parent} would create a cycle")]
    ParentCycle { account: String, parent: String },

    /// No transaction with this id
    #[error("Transaction {tx} not found")]
    TransactionNotFound { tx: String },

    /// No department with this id
    #[error("Department {department} not found")]
    DepartmentNotFound { department: String },

    /// Draft failed authoring validation
    #[error("Invalid transaction: {0}")]
    Invalid(#[from] ValidationError),
}

impl LedgerError {
    pub fn has_children(account: &str, children: usize) -> Self {
        LedgerError::HasChildren {
            account: account.to_string(),
            children,
        }
    }

    pub fn has_transactions(account: &str, transactions: usize) -> Self {
        LedgerError::HasTransactions {
            account: account.to_string(),
            transactions,
        }
    }

    pub fn account_not_found(account: &str) -> Self {
        LedgerError::AccountNotFound {
            account: account.to_string(),
        }
    }

    pub fn unknown_parent(parent: &str) -> Self {
        LedgerError::UnknownParent {
            parent: parent.to_string(),
        }
    }

    pub fn parent_deleted(parent: &str) -> Self {
        LedgerError::ParentDeleted {
            parent: parent.to_string(),
        }
    }

    pub fn self_parent(account: &str) -> Self {
        LedgerError::SelfParent {
            account: account.to_string(),
        }
    }

    pub fn parent_cycle(account: &str, parent: &str) -> Self {
        LedgerError::ParentCycle {
            account: account.to_string(),
            parent: parent.to_string(),
        }
    }

    pub fn transaction_not_found(tx: &str) -> Self {
        LedgerError::TransactionNotFound { tx: tx.to_string() }
    }

    pub fn department_not_found(department: &str) -> Self {
        LedgerError::DepartmentNotFound {
            department: department.to_string(),
        }
    }
}

/// Journal draft is not postable
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("transaction must have at least one entry")]
    NoEntries,

    #[error("transaction description is required")]
    MissingDescription,

    #[error("entry for account {account_id} has a negative amount")]
    NegativeAmount { account_id: String },

    #[error("entry amounts are too large to total")]
    AmountOverflow,

    #[error("debit and credit totals are both zero")]
    ZeroTotal,

    #[error("transaction is unbalanced: debits {debits} != credits {credits}")]
    Unbalanced { debits: Decimal, credits: Decimal },
}

impl ValidationError {
    pub fn negative_amount(account_id: &str) -> Self {
        ValidationError::NegativeAmount {
            account_id: account_id.to_string(),
        }
    }

    pub fn unbalanced(debits: Decimal, credits: Decimal) -> Self {
        ValidationError::Unbalanced { debits, credits }
    }
}

/// Snapshot, CSV or configuration I/O failure
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("snapshot is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),
}
