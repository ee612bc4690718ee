//! Journal transaction types
//!
//! This module defines stored journal transactions, their entry lines, and the
//! draft the authoring layer submits, together with the balance check that the
//! journal form applies before posting.

use super::account::AccountId;
use super::error::ValidationError;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Transaction identifier
///
/// Seed data uses `tx-001` style ids, runtime ids are `tx-<uuid>`.
pub type TransactionId = String;

/// A single debit/credit line of a journal transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionEntry {
    /// Account the line posts to. May dangle in hand-edited data.
    pub account_id: AccountId,

    #[serde(default)]
    pub debit: Decimal,

    #[serde(default)]
    pub credit: Decimal,
}

impl TransactionEntry {
    pub fn debit(account_id: impl Into<AccountId>, amount: Decimal) -> Self {
        TransactionEntry {
            account_id: account_id.into(),
            debit: amount,
            credit: Decimal::ZERO,
        }
    }

    pub fn credit(account_id: impl Into<AccountId>, amount: Decimal) -> Self {
        TransactionEntry {
            account_id: account_id.into(),
            debit: Decimal::ZERO,
            credit: amount,
        }
    }
}

/// Debit and credit sums over a set of entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EntryTotals {
    pub debits: Decimal,
    pub credits: Decimal,
}

impl EntryTotals {
    /// Sum the debit and credit columns of `entries`
    ///
    /// `None` when either column overflows `Decimal`.
    pub fn of(entries: &[TransactionEntry]) -> Option<Self> {
        entries.iter().try_fold(EntryTotals::default(), |acc, entry| {
            Some(EntryTotals {
                debits: acc.debits.checked_add(entry.debit)?,
                credits: acc.credits.checked_add(entry.credit)?,
            })
        })
    }

    /// Debits equal credits and the total is positive
    pub fn is_balanced(&self) -> bool {
        self.debits == self.credits && self.debits > Decimal::ZERO
    }
}

/// A stored journal transaction
///
/// Lifecycle: `Active ⇄ SoftDeleted → removed`. `deleted_at` is set only while
/// soft-deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: TransactionId,

    /// ISO-sortable date (`YYYY-MM-DD`)
    pub date: String,

    pub description: String,

    pub entries: Vec<TransactionEntry>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receipt_number: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_number: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deposit_number: Option<String>,

    #[serde(default)]
    pub is_deleted: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Transaction {
    /// Build an active transaction from a draft
    pub fn from_draft(id: TransactionId, draft: TransactionDraft) -> Self {
        Transaction {
            id,
            date: draft.date,
            description: draft.description,
            entries: draft.entries,
            receipt_number: draft.receipt_number,
            check_number: draft.check_number,
            deposit_number: draft.deposit_number,
            is_deleted: false,
            deleted_at: None,
        }
    }

    pub fn is_active(&self) -> bool {
        !self.is_deleted
    }

    /// Whether any entry posts to `account_id`
    pub fn references(&self, account_id: &str) -> bool {
        self.entries.iter().any(|entry| entry.account_id == account_id)
    }

    pub fn totals(&self) -> Option<EntryTotals> {
        EntryTotals::of(&self.entries)
    }
}

/// Caller-supplied fields for a new transaction
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TransactionDraft {
    pub date: String,
    pub description: String,
    pub entries: Vec<TransactionEntry>,
    pub receipt_number: Option<String>,
    pub check_number: Option<String>,
    pub deposit_number: Option<String>,
}

impl TransactionDraft {
    pub fn new(
        date: impl Into<String>,
        description: impl Into<String>,
        entries: Vec<TransactionEntry>,
    ) -> Self {
        TransactionDraft {
            date: date.into(),
            description: description.into(),
            entries,
            ..TransactionDraft::default()
        }
    }

    /// Check the draft the way the journal form does before posting
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - There are no entries
    /// - The description is blank
    /// - Any debit or credit is negative
    /// - A column total overflows
    /// - Both columns total zero
    /// - Debits and credits differ
    pub fn validate(&self) -> Result<EntryTotals, ValidationError> {
        if self.entries.is_empty() {
            return Err(ValidationError::NoEntries);
        }

        if self.description.trim().is_empty() {
            return Err(ValidationError::MissingDescription);
        }

        if let Some(entry) = self
            .entries
            .iter()
            .find(|entry| entry.debit < Decimal::ZERO || entry.credit < Decimal::ZERO)
        {
            return Err(ValidationError::negative_amount(&entry.account_id));
        }

        let totals = EntryTotals::of(&self.entries).ok_or(ValidationError::AmountOverflow)?;

        if totals.debits == Decimal::ZERO && totals.credits == Decimal::ZERO {
            return Err(ValidationError::ZeroTotal);
        }

        if totals.debits != totals.credits {
            return Err(ValidationError::unbalanced(totals.debits, totals.credits));
        }

        Ok(totals)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    fn draft(entries: Vec<TransactionEntry>) -> TransactionDraft {
        TransactionDraft::new("2024-03-01", "Owner funding", entries)
    }

    #[test]
    fn test_validate_accepts_balanced_draft() {
        let draft = draft(vec![
            TransactionEntry::debit("1.1.2", dec!(500000)),
            TransactionEntry::credit("3.1", dec!(500000)),
        ]);

        let totals = draft.validate().unwrap();
        assert_eq!(totals.debits, dec!(500000));
        assert!(totals.is_balanced());
    }

    #[rstest]
    #[case::no_entries(vec![], ValidationError::NoEntries)]
    #[case::zero_total(
        vec![TransactionEntry::debit("1", dec!(0)), TransactionEntry::credit("2", dec!(0))],
        ValidationError::ZeroTotal
    )]
    #[case::unbalanced(
        vec![TransactionEntry::debit("1", dec!(100)), TransactionEntry::credit("2", dec!(90))],
        ValidationError::Unbalanced { debits: dec!(100), credits: dec!(90) }
    )]
    #[case::negative(
        vec![TransactionEntry::debit("1", dec!(-5)), TransactionEntry::credit("2", dec!(-5))],
        ValidationError::NegativeAmount { account_id: "1".to_string() }
    )]
    fn test_validate_rejects(
        #[case] entries: Vec<TransactionEntry>,
        #[case] expected: ValidationError,
    ) {
        assert_eq!(draft(entries).validate().unwrap_err(), expected);
    }

    #[test]
    fn test_validate_requires_description() {
        let mut draft = draft(vec![
            TransactionEntry::debit("1", dec!(10)),
            TransactionEntry::credit("2", dec!(10)),
        ]);
        draft.description = "   ".to_string();

        assert_eq!(draft.validate().unwrap_err(), ValidationError::MissingDescription);
    }

    #[test]
    fn test_validate_rejects_overflowing_totals() {
        let draft = draft(vec![
            TransactionEntry::debit("1", Decimal::MAX),
            TransactionEntry::debit("1", Decimal::MAX),
            TransactionEntry::credit("2", dec!(1)),
        ]);

        assert_eq!(EntryTotals::of(&draft.entries), None);
        assert_eq!(draft.validate().unwrap_err(), ValidationError::AmountOverflow);
    }

    #[test]
    fn test_totals_unbalanced() {
        let totals = EntryTotals::of(&[
            TransactionEntry::debit("1", dec!(100)),
            TransactionEntry::credit("2", dec!(140)),
        ])
        .unwrap();

        assert_eq!(totals, EntryTotals { debits: dec!(100), credits: dec!(140) });
        assert!(!totals.is_balanced());
    }

    #[test]
    fn test_references() {
        let tx = Transaction::from_draft(
            "tx-1".to_string(),
            draft(vec![
                TransactionEntry::debit("5.1", dec!(5000)),
                TransactionEntry::credit("1.1.2", dec!(5000)),
            ]),
        );

        assert!(tx.references("5.1"));
        assert!(!tx.references("5"));
    }

    #[test]
    fn test_legacy_transaction_json() {
        let json = r#"{"id":"tx-001","date":"2024-03-01","description":"Funding",
            "entries":[{"accountId":"1.1.2","debit":500000,"credit":0},
                       {"accountId":"3.1","debit":0,"credit":500000}]}"#;
        let tx: Transaction = serde_json::from_str(json).unwrap();

        assert!(tx.is_active());
        assert_eq!(tx.deleted_at, None);
        assert_eq!(tx.totals().unwrap().credits, dec!(500000));
    }
}
