//! Ledger engine
//!
//! This module provides the LedgerEngine that owns the chart of accounts, the
//! journal and the department list, and keeps every account balance fresh by
//! recomputing the whole tree after each structural mutation.
//!
//! The engine enforces business rules such as:
//! - Parent references must resolve to an active account and never form a cycle
//! - An account cannot be deleted while it has active children
//! - An account cannot be deleted while an active transaction posts to it
//! - Accounts are only ever soft-deleted; transactions can also be purged
//!
//! Journal drafts are accepted without a balance check here. Authoring-level
//! validation lives on `TransactionDraft::validate` and is applied by the
//! session before posting.

use crate::core::account_manager::AccountManager;
use crate::core::balance::recompute_balances;
use crate::core::transaction_store::TransactionStore;
use crate::types::{
    Account, AccountDraft, AccountId, AccountUpdate, Department, DepartmentDraft, DepartmentId,
    DepartmentUpdate, LedgerError, Snapshot, Transaction, TransactionDraft, TransactionId,
};
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Ledger engine
///
/// Single owner of all ledger state. Every mutator runs to completion,
/// including the full balance recompute, before returning.
#[derive(Debug, Clone, Default)]
pub struct LedgerEngine {
    accounts: AccountManager,
    transactions: TransactionStore,
    departments: Vec<Department>,
}

impl LedgerEngine {
    /// Create an empty engine with no accounts, transactions or departments
    pub fn new() -> Self {
        LedgerEngine::default()
    }

    /// Build an engine from a loaded snapshot
    ///
    /// Persisted balances are not trusted: they are recomputed immediately.
    /// A snapshot without departments yields an empty department list.
    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        let mut engine = LedgerEngine {
            accounts: AccountManager::from_accounts(snapshot.accounts),
            transactions: TransactionStore::from_transactions(snapshot.transactions),
            departments: snapshot.departments.unwrap_or_default(),
        };
        engine.recompute();
        tracing::info!(
            accounts = engine.accounts.len(),
            transactions = engine.transactions.len(),
            departments = engine.departments.len(),
            "ledger loaded"
        );
        engine
    }

    /// Full state for persistence, including soft-deleted records
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            accounts: self.accounts.all().to_vec(),
            transactions: self.transactions.all().to_vec(),
            departments: Some(self.departments.clone()),
        }
    }

    /// Recompute every balance from the complete transaction list
    fn recompute(&mut self) {
        let recomputed = recompute_balances(self.transactions.all(), self.accounts.all());
        self.accounts.replace_balances(recomputed);
    }

    /// Generate an id with `prefix` that no record of any kind already uses
    fn fresh_id(&self, prefix: &str) -> String {
        loop {
            let id = format!("{prefix}-{}", Uuid::now_v7());
            let taken = self.accounts.contains(&id)
                || self.transactions.contains(&id)
                || self.departments.iter().any(|d| d.id == id);
            if !taken {
                return id;
            }
        }
    }

    // ---- views -----------------------------------------------------------

    /// Active accounts in chart order
    pub fn accounts(&self) -> Vec<&Account> {
        self.accounts.active().collect()
    }

    /// Every account, including soft-deleted ones
    pub fn all_accounts(&self) -> &[Account] {
        self.accounts.all()
    }

    pub fn account(&self, id: &str) -> Option<&Account> {
        self.accounts.get(id)
    }

    /// Active transactions in insertion order
    pub fn transactions(&self) -> Vec<&Transaction> {
        self.transactions.active().collect()
    }

    /// Every transaction, including soft-deleted ones
    pub fn all_transactions(&self) -> &[Transaction] {
        self.transactions.all()
    }

    pub fn transaction(&self, id: &str) -> Option<&Transaction> {
        self.transactions.get(id)
    }

    /// Soft-deleted transactions, for the trash bin
    pub fn deleted_transactions(&self) -> Vec<&Transaction> {
        self.transactions.deleted().collect()
    }

    pub fn departments(&self) -> &[Department] {
        &self.departments
    }

    // ---- transactions ----------------------------------------------------

    /// Append a journal transaction
    ///
    /// The draft is stored as given, balanced or not.
    ///
    /// # Arguments
    ///
    /// * `draft` - Date, description, entries and optional voucher numbers
    ///
    /// # Returns
    ///
    /// The id assigned to the new transaction
    pub fn add_transaction(&mut self, draft: TransactionDraft) -> TransactionId {
        let id = self.fresh_id("tx");
        self.transactions
            .push(Transaction::from_draft(id.clone(), draft));
        self.recompute();

        tracing::info!(tx = %id, "transaction added");
        id
    }

    /// Soft-delete a transaction, stamping the current time
    ///
    /// # Errors
    ///
    /// Returns `TransactionNotFound` if the id is unknown.
    pub fn delete_transaction(&mut self, id: &str) -> Result<(), LedgerError> {
        self.delete_transaction_at(id, Utc::now())
    }

    /// Soft-delete a transaction with an explicit deletion time
    ///
    /// The time is only recorded for the trash bin; it never affects balances.
    ///
    /// # Errors
    ///
    /// Returns `TransactionNotFound` if the id is unknown.
    pub fn delete_transaction_at(
        &mut self,
        id: &str,
        at: DateTime<Utc>,
    ) -> Result<(), LedgerError> {
        self.transactions.mark_deleted(id, at)?;
        self.recompute();

        tracing::info!(tx = %id, "transaction moved to trash");
        Ok(())
    }

    /// Restore a soft-deleted transaction
    ///
    /// # Errors
    ///
    /// Returns `TransactionNotFound` if the id is unknown.
    pub fn restore_transaction(&mut self, id: &str) -> Result<(), LedgerError> {
        self.transactions.restore(id)?;
        self.recompute();

        tracing::info!(tx = %id, "transaction restored");
        Ok(())
    }

    /// Remove a transaction for good
    ///
    /// Allowed in any state; nothing else refers to a transaction by id.
    ///
    /// # Returns
    ///
    /// The removed transaction
    ///
    /// # Errors
    ///
    /// Returns `TransactionNotFound` if the id is unknown.
    pub fn permanent_delete_transaction(&mut self, id: &str) -> Result<Transaction, LedgerError> {
        let removed = self.transactions.remove(id)?;
        self.recompute();

        tracing::info!(tx = %id, "transaction permanently deleted");
        Ok(removed)
    }

    // ---- accounts --------------------------------------------------------

    /// Add an account to the chart
    ///
    /// The new account starts active with a zero balance.
    ///
    /// # Returns
    ///
    /// The id assigned to the new account
    ///
    /// # Errors
    ///
    /// Returns an error if the draft's parent does not exist or is deleted.
    pub fn add_account(&mut self, draft: AccountDraft) -> Result<AccountId, LedgerError> {
        let id = self.fresh_id("acc");
        if let Err(e) = self.accounts.insert(id.clone(), draft) {
            tracing::warn!(error = %e, "account rejected");
            return Err(e);
        }
        self.recompute();

        tracing::info!(account = %id, "account added");
        Ok(id)
    }

    /// Apply typed field updates to an account
    ///
    /// The tree is recomputed only when the batch contains a type or parent
    /// change, since name, code and budget edits leave every balance as is.
    ///
    /// # Errors
    ///
    /// Returns an error if the account does not exist or a parent move is
    /// invalid (self, missing, deleted, or a descendant). No update in the
    /// batch is applied in that case.
    pub fn update_account(
        &mut self,
        id: &str,
        updates: Vec<AccountUpdate>,
    ) -> Result<(), LedgerError> {
        let rebalance = updates.iter().any(AccountUpdate::affects_balances);
        if let Err(e) = self.accounts.update(id, updates) {
            tracing::warn!(account = %id, error = %e, "account update rejected");
            return Err(e);
        }
        if rebalance {
            self.recompute();
        }

        tracing::info!(account = %id, rebalance, "account updated");
        Ok(())
    }

    /// Soft-delete an account
    ///
    /// Both preconditions are checked against active records only, and the
    /// deletion does not cascade.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The account does not exist (`AccountNotFound`)
    /// - An active account has it as parent (`HasChildren`)
    /// - An active transaction has an entry on it (`HasTransactions`)
    pub fn delete_account(&mut self, id: &str) -> Result<(), LedgerError> {
        self.check_account_deletable(id).inspect_err(|e| {
            tracing::warn!(account = %id, error = %e, "account deletion rejected");
        })?;

        self.accounts.mark_deleted(id)?;
        self.recompute();

        tracing::info!(account = %id, "account deleted");
        Ok(())
    }

    fn check_account_deletable(&self, id: &str) -> Result<(), LedgerError> {
        if !self.accounts.contains(id) {
            return Err(LedgerError::account_not_found(id));
        }

        let children = self.accounts.active_children(id).count();
        if children > 0 {
            return Err(LedgerError::has_children(id, children));
        }

        let references = self.transactions.active_references(id);
        if references > 0 {
            return Err(LedgerError::has_transactions(id, references));
        }

        Ok(())
    }

    // ---- departments -----------------------------------------------------

    pub fn add_department(&mut self, draft: DepartmentDraft) -> DepartmentId {
        let id = self.fresh_id("dep");
        self.departments
            .push(Department::from_draft(id.clone(), draft));

        tracing::info!(department = %id, "department added");
        id
    }

    /// # Errors
    ///
    /// Returns `DepartmentNotFound` if the id is unknown.
    pub fn update_department(
        &mut self,
        id: &str,
        updates: Vec<DepartmentUpdate>,
    ) -> Result<(), LedgerError> {
        let department = self
            .departments
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or_else(|| LedgerError::department_not_found(id))?;
        for update in updates {
            update.apply(department);
        }

        tracing::info!(department = %id, "department updated");
        Ok(())
    }

    /// Remove a department
    ///
    /// # Errors
    ///
    /// Returns `DepartmentNotFound` if the id is unknown.
    pub fn delete_department(&mut self, id: &str) -> Result<Department, LedgerError> {
        let position = self
            .departments
            .iter()
            .position(|d| d.id == id)
            .ok_or_else(|| LedgerError::department_not_found(id))?;

        tracing::info!(department = %id, "department deleted");
        Ok(self.departments.remove(position))
    }
}
