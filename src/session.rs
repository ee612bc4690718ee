//! Persistent ledger session
//!
//! `LedgerSession` pairs a `LedgerEngine` with a `SnapshotStore`. It loads the
//! saved snapshot (or the seed data when nothing was saved), and writes a full
//! snapshot after every successful mutation.
//!
//! Saving is fire-and-forget: a failed save is logged and the in-memory state
//! stays authoritative for the rest of the session. Rejected mutations change
//! nothing and therefore save nothing.

use crate::core::LedgerEngine;
use crate::io::SnapshotStore;
use crate::seed;
use crate::types::{
    AccountDraft, AccountId, AccountUpdate, Department, DepartmentDraft, DepartmentId,
    DepartmentUpdate, LedgerError, StoreError, Transaction, TransactionDraft, TransactionId,
};

pub struct LedgerSession<S: SnapshotStore> {
    engine: LedgerEngine,
    store: S,
}

impl<S: SnapshotStore> LedgerSession<S> {
    /// Open a session over `store`
    ///
    /// When the store holds no snapshot, the session starts from the seed
    /// chart and journal (dated in the current month) if `seed_when_missing`
    /// is set, or from an empty ledger otherwise. A saved snapshot without a
    /// department list gets the seed departments.
    ///
    /// # Errors
    ///
    /// Returns the store's error if an existing snapshot cannot be read.
    pub fn open(store: S, seed_when_missing: bool) -> Result<Self, StoreError> {
        let snapshot = match store.load()? {
            Some(mut snapshot) => {
                if snapshot.departments.is_none() {
                    snapshot.departments = Some(seed::default_departments());
                }
                Some(snapshot)
            }
            None if seed_when_missing => {
                tracing::info!("no saved ledger, starting from seed data");
                Some(seed::default_snapshot(&seed::current_month()))
            }
            None => None,
        };

        let engine = snapshot.map(LedgerEngine::from_snapshot).unwrap_or_default();
        let session = LedgerSession { engine, store };
        session.persist();
        Ok(session)
    }

    pub fn engine(&self) -> &LedgerEngine {
        &self.engine
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn persist(&self) {
        if let Err(e) = self.store.save(&self.engine.snapshot()) {
            tracing::error!(error = %e, "failed to save ledger snapshot");
        }
    }

    /// Validate a journal draft and post it
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::Invalid` if the draft is empty, has no
    /// description, has negative amounts, or does not balance.
    pub fn post_transaction(
        &mut self,
        draft: TransactionDraft,
    ) -> Result<TransactionId, LedgerError> {
        if let Err(e) = draft.validate() {
            tracing::warn!(error = %e, "transaction rejected");
            return Err(e.into());
        }
        let id = self.engine.add_transaction(draft);
        self.persist();
        Ok(id)
    }

    pub fn delete_transaction(&mut self, id: &str) -> Result<(), LedgerError> {
        self.engine.delete_transaction(id)?;
        self.persist();
        Ok(())
    }

    pub fn restore_transaction(&mut self, id: &str) -> Result<(), LedgerError> {
        self.engine.restore_transaction(id)?;
        self.persist();
        Ok(())
    }

    pub fn permanent_delete_transaction(&mut self, id: &str) -> Result<Transaction, LedgerError> {
        let removed = self.engine.permanent_delete_transaction(id)?;
        self.persist();
        Ok(removed)
    }

    pub fn add_account(&mut self, draft: AccountDraft) -> Result<AccountId, LedgerError> {
        let id = self.engine.add_account(draft)?;
        self.persist();
        Ok(id)
    }

    pub fn update_account(
        &mut self,
        id: &str,
        updates: Vec<AccountUpdate>,
    ) -> Result<(), LedgerError> {
        self.engine.update_account(id, updates)?;
        self.persist();
        Ok(())
    }

    pub fn delete_account(&mut self, id: &str) -> Result<(), LedgerError> {
        self.engine.delete_account(id)?;
        self.persist();
        Ok(())
    }

    pub fn add_department(&mut self, draft: DepartmentDraft) -> DepartmentId {
        let id = self.engine.add_department(draft);
        self.persist();
        id
    }

    pub fn update_department(
        &mut self,
        id: &str,
        updates: Vec<DepartmentUpdate>,
    ) -> Result<(), LedgerError> {
        self.engine.update_department(id, updates)?;
        self.persist();
        Ok(())
    }

    pub fn delete_department(&mut self, id: &str) -> Result<Department, LedgerError> {
        let removed = self.engine.delete_department(id)?;
        self.persist();
        Ok(removed)
    }
}
