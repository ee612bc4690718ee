//! Account management module
//!
//! This module provides the `AccountManager` struct which owns the chart of
//! accounts as a flat arena: an ordered list (insertion order is preserved for
//! output and snapshots) plus an id index for lookups.
//!
//! The AccountManager is responsible for:
//! - Creating accounts after validating their parent reference
//! - Applying typed field updates, re-validating parent moves
//! - Soft-deleting accounts (accounts are never removed)
//! - Answering tree questions (active children, ancestry)

use crate::types::{Account, AccountDraft, AccountId, AccountUpdate, LedgerError};
use std::collections::HashMap;

/// Owns every account, including soft-deleted ones
#[derive(Debug, Clone, Default)]
pub struct AccountManager {
    /// Accounts in insertion order
    accounts: Vec<Account>,

    /// Map of account ids to their position in `accounts`
    index: HashMap<AccountId, usize>,
}

impl AccountManager {
    /// Create a new AccountManager with no accounts
    pub fn new() -> Self {
        AccountManager::default()
    }

    /// Build a manager from a loaded account list
    ///
    /// Loaded data is accepted as-is: dangling or cyclic parent links are not
    /// rejected here (recompute tolerates them and the audit reports them). If
    /// an id appears twice, lookups resolve to the first occurrence.
    pub fn from_accounts(accounts: Vec<Account>) -> Self {
        let mut index = HashMap::with_capacity(accounts.len());
        for (position, account) in accounts.iter().enumerate() {
            index.entry(account.id.clone()).or_insert(position);
        }
        AccountManager { accounts, index }
    }

    /// All accounts, including soft-deleted ones, in insertion order
    pub fn all(&self) -> &[Account] {
        &self.accounts
    }

    /// Look up an account by id
    pub fn get(&self, id: &str) -> Option<&Account> {
        self.index.get(id).map(|&position| &self.accounts[position])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Accounts that are not soft-deleted
    pub fn active(&self) -> impl Iterator<Item = &Account> {
        self.accounts.iter().filter(|account| account.is_active())
    }

    /// Active accounts whose parent is `id`
    pub fn active_children<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a Account> + 'a {
        self.active()
            .filter(move |account| account.parent_id.as_deref() == Some(id))
    }

    /// Check that `parent_id` names an existing, active account
    ///
    /// # Errors
    ///
    /// * `UnknownParent` - no account has this id
    /// * `ParentDeleted` - the account exists but is soft-deleted
    pub fn validate_parent(&self, parent_id: &str) -> Result<(), LedgerError> {
        match self.get(parent_id) {
            None => Err(LedgerError::unknown_parent(parent_id)),
            Some(parent) if parent.is_deleted => Err(LedgerError::parent_deleted(parent_id)),
            Some(_) => Ok(()),
        }
    }

    /// Whether `candidate` sits somewhere below `ancestor` in the tree
    ///
    /// Walks parent links upward from `candidate`. The walk is bounded by the
    /// number of accounts so a cycle already present in loaded data cannot
    /// loop forever.
    pub fn is_descendant(&self, candidate: &str, ancestor: &str) -> bool {
        let mut current = self.get(candidate).and_then(|a| a.parent_id.as_deref());
        let mut steps = 0;

        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            steps += 1;
            if steps > self.accounts.len() {
                return false;
            }
            current = self.get(id).and_then(|a| a.parent_id.as_deref());
        }

        false
    }

    /// Insert a new account built from `draft`
    ///
    /// # Arguments
    ///
    /// * `id` - Freshly generated id, not yet present in the manager
    /// * `draft` - Caller-supplied fields
    ///
    /// # Returns
    ///
    /// A reference to the stored account
    ///
    /// # Errors
    ///
    /// Returns an error if the draft names a parent that does not exist or is
    /// soft-deleted. Nothing is inserted in that case.
    pub fn insert(&mut self, id: AccountId, draft: AccountDraft) -> Result<&Account, LedgerError> {
        if let Some(parent_id) = draft.parent_id.as_deref() {
            self.validate_parent(parent_id)?;
        }

        let position = self.accounts.len();
        self.accounts.push(Account::from_draft(id.clone(), draft));
        self.index.insert(id, position);

        Ok(&self.accounts[position])
    }

    /// Apply a set of typed updates to an account
    ///
    /// All updates are validated before any is applied, so a rejected batch
    /// leaves the account untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The account does not exist
    /// - A parent move names the account itself, a missing or deleted
    ///   account, or one of the account's own descendants
    pub fn update(&mut self, id: &str, updates: Vec<AccountUpdate>) -> Result<(), LedgerError> {
        let position = *self
            .index
            .get(id)
            .ok_or_else(|| LedgerError::account_not_found(id))?;

        for update in &updates {
            if let AccountUpdate::Parent(Some(parent_id)) = update {
                if parent_id == id {
                    return Err(LedgerError::self_parent(id));
                }
                self.validate_parent(parent_id)?;
                if self.is_descendant(parent_id, id) {
                    return Err(LedgerError::parent_cycle(id, parent_id));
                }
            }
        }

        let account = &mut self.accounts[position];
        for update in updates {
            update.apply(account);
        }

        Ok(())
    }

    /// Flag an account as soft-deleted
    ///
    /// Precondition checks (children, references) belong to the engine, which
    /// can see the transactions.
    ///
    /// # Errors
    ///
    /// Returns `AccountNotFound` if the id is unknown.
    pub fn mark_deleted(&mut self, id: &str) -> Result<(), LedgerError> {
        let position = *self
            .index
            .get(id)
            .ok_or_else(|| LedgerError::account_not_found(id))?;
        self.accounts[position].is_deleted = true;
        Ok(())
    }

    /// Replace the account list with a recomputed one of the same shape
    ///
    /// `recomputed` must come from `recompute_balances` over `self.all()`, so
    /// ids and order are unchanged and the index stays valid.
    pub fn replace_balances(&mut self, recomputed: Vec<Account>) {
        debug_assert_eq!(recomputed.len(), self.accounts.len());
        self.accounts = recomputed;
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}
