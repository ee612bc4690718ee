//! Journal transaction storage
//!
//! This module provides the TransactionStore component that keeps every
//! journal transaction, active or soft-deleted, in insertion order.
//!
//! # Lifecycle
//!
//! `Active ⇄ SoftDeleted → removed`. Soft deletion stamps `deleted_at` and
//! restore clears it. Permanent removal is always allowed because nothing
//! else refers to a transaction by id.

use crate::types::{LedgerError, Transaction};
use chrono::{DateTime, Utc};

/// Ordered list of all journal transactions
#[derive(Debug, Clone, Default)]
pub struct TransactionStore {
    transactions: Vec<Transaction>,
}

impl TransactionStore {
    /// Create a new empty transaction store
    pub fn new() -> Self {
        TransactionStore::default()
    }

    /// Build a store from a loaded transaction list
    pub fn from_transactions(transactions: Vec<Transaction>) -> Self {
        TransactionStore { transactions }
    }

    /// Every transaction, including soft-deleted ones
    pub fn all(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn get(&self, tx_id: &str) -> Option<&Transaction> {
        self.transactions.iter().find(|tx| tx.id == tx_id)
    }

    fn get_mut(&mut self, tx_id: &str) -> Result<&mut Transaction, LedgerError> {
        self.transactions
            .iter_mut()
            .find(|tx| tx.id == tx_id)
            .ok_or_else(|| LedgerError::transaction_not_found(tx_id))
    }

    pub fn active(&self) -> impl Iterator<Item = &Transaction> {
        self.transactions.iter().filter(|tx| tx.is_active())
    }

    pub fn deleted(&self) -> impl Iterator<Item = &Transaction> {
        self.transactions.iter().filter(|tx| tx.is_deleted)
    }

    /// Number of active transactions with at least one entry on `account_id`
    pub fn active_references(&self, account_id: &str) -> usize {
        self.active().filter(|tx| tx.references(account_id)).count()
    }

    /// Append a transaction
    pub fn push(&mut self, tx: Transaction) {
        self.transactions.push(tx);
    }

    /// Soft-delete a transaction, stamping the deletion time
    ///
    /// # Errors
    ///
    /// Returns `TransactionNotFound` if the id is unknown.
    pub fn mark_deleted(&mut self, tx_id: &str, at: DateTime<Utc>) -> Result<(), LedgerError> {
        let tx = self.get_mut(tx_id)?;
        tx.is_deleted = true;
        tx.deleted_at = Some(at);
        Ok(())
    }

    /// Bring a soft-deleted transaction back, clearing its deletion time
    ///
    /// # Errors
    ///
    /// Returns `TransactionNotFound` if the id is unknown.
    pub fn restore(&mut self, tx_id: &str) -> Result<(), LedgerError> {
        let tx = self.get_mut(tx_id)?;
        tx.is_deleted = false;
        tx.deleted_at = None;
        Ok(())
    }

    /// Remove a transaction from the list entirely
    ///
    /// # Returns
    ///
    /// The removed transaction
    ///
    /// # Errors
    ///
    /// Returns `TransactionNotFound` if the id is unknown.
    pub fn remove(&mut self, tx_id: &str) -> Result<Transaction, LedgerError> {
        let position = self
            .transactions
            .iter()
            .position(|tx| tx.id == tx_id)
            .ok_or_else(|| LedgerError::transaction_not_found(tx_id))?;
        Ok(self.transactions.remove(position))
    }

    pub fn contains(&self, tx_id: &str) -> bool {
        self.get(tx_id).is_some()
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}
