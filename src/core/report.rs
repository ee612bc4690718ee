//! Read-only reports over recomputed ledger state
//!
//! - `FinancialSummary`: root-level totals per account type, as shown on the
//!   dashboard and balance sheet
//! - `LedgerFilter`: the journal listing filter (text, account, date range)
//! - `audit`: an explicit validation pass that reports data problems which the
//!   balance recompute tolerates

use crate::types::{Account, AccountType, EntryTotals, Transaction};
use rust_decimal::Decimal;
use std::collections::{HashMap, HashSet};

/// Totals of the root accounts of each type
///
/// Every total is the sum of `balance` over active root accounts of that type,
/// so it already includes the whole subtree under each root. Totals saturate
/// at the `Decimal` range instead of overflowing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FinancialSummary {
    pub total_assets: Decimal,
    pub total_liabilities: Decimal,
    pub total_equity: Decimal,
    pub total_revenue: Decimal,
    pub total_expenses: Decimal,
}

impl FinancialSummary {
    pub fn from_accounts<'a>(accounts: impl IntoIterator<Item = &'a Account>) -> Self {
        let mut summary = FinancialSummary::default();

        for account in accounts {
            if !account.is_root() || account.is_deleted {
                continue;
            }
            let total = match account.account_type {
                AccountType::Asset => &mut summary.total_assets,
                AccountType::Liability => &mut summary.total_liabilities,
                AccountType::Equity => &mut summary.total_equity,
                AccountType::Revenue => &mut summary.total_revenue,
                AccountType::Expense => &mut summary.total_expenses,
            };
            *total = total.saturating_add(account.balance);
        }

        summary
    }

    /// Revenue minus expenses
    pub fn net_income(&self) -> Decimal {
        self.total_revenue.saturating_sub(self.total_expenses)
    }

    /// Liabilities plus equity, before the period's net income is closed
    pub fn liabilities_and_equity(&self) -> Decimal {
        self.total_liabilities.saturating_add(self.total_equity)
    }

    /// Assets = Liabilities + Equity + (Revenue - Expenses)
    ///
    /// Holds whenever every active transaction is balanced and every entry
    /// lands in a tree that reaches a root.
    pub fn is_balanced(&self) -> bool {
        self.liabilities_and_equity()
            .checked_add(self.net_income())
            .map_or(false, |total| total == self.total_assets)
    }

    /// Label and value pairs in display order
    pub fn rows(&self) -> [(&'static str, Decimal); 7] {
        [
            ("total_assets", self.total_assets),
            ("total_liabilities", self.total_liabilities),
            ("total_equity", self.total_equity),
            ("total_revenue", self.total_revenue),
            ("total_expenses", self.total_expenses),
            ("net_income", self.net_income()),
            ("liabilities_and_equity", self.liabilities_and_equity()),
        ]
    }
}

/// Journal listing filter
///
/// Empty fields match everything. Date bounds are inclusive and compared as
/// ISO strings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LedgerFilter {
    /// Case-insensitive substring of the description
    pub search: Option<String>,
    /// Only transactions with an entry on this account
    pub account_id: Option<String>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
}

impl LedgerFilter {
    pub fn matches(&self, tx: &Transaction) -> bool {
        let matches_search = self.search.as_deref().map_or(true, |needle| {
            tx.description
                .to_lowercase()
                .contains(&needle.to_lowercase())
        });
        let matches_account = self
            .account_id
            .as_deref()
            .map_or(true, |account_id| tx.references(account_id));
        let matches_from = self
            .date_from
            .as_deref()
            .map_or(true, |from| tx.date.as_str() >= from);
        let matches_to = self
            .date_to
            .as_deref()
            .map_or(true, |to| tx.date.as_str() <= to);

        matches_search && matches_account && matches_from && matches_to
    }

    /// Matching transactions, newest date first
    ///
    /// Transactions sharing a date keep their input order.
    pub fn apply<'a>(&self, transactions: impl IntoIterator<Item = &'a Transaction>) -> Vec<&'a Transaction> {
        let mut matched: Vec<&Transaction> = transactions
            .into_iter()
            .filter(|tx| self.matches(tx))
            .collect();
        matched.sort_by(|a, b| b.date.cmp(&a.date));
        matched
    }
}

/// One problem found by `audit`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuditFinding {
    /// An active transaction posts to an account id that does not exist
    DanglingEntry { tx: String, account_id: String },
    /// An active transaction posts to a soft-deleted account
    EntryOnDeletedAccount { tx: String, account_id: String },
    /// An active transaction's debits and credits differ, or both are zero
    UnbalancedTransaction { tx: String, totals: EntryTotals },
    /// An active transaction's debit or credit column overflows `Decimal`
    AmountOverflow { tx: String },
    /// An account's parent id does not exist
    DanglingParent { account: String, parent: String },
    /// Following parent links from this account leads back to it
    ParentCycle { account: String },
}

impl std::fmt::Display for AuditFinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuditFinding::DanglingEntry { tx, account_id } => {
                write!(f, "transaction {tx} posts to unknown account {account_id}")
            }
            AuditFinding::EntryOnDeletedAccount { tx, account_id } => {
                write!(f, "transaction {tx} posts to deleted account {account_id}")
            }
            AuditFinding::UnbalancedTransaction { tx, totals } => write!(
                f,
                "transaction {tx} is unbalanced: debits {} credits {}",
                totals.debits, totals.credits
            ),
            AuditFinding::AmountOverflow { tx } => {
                write!(f, "transaction {tx} has amounts too large to total")
            }
            AuditFinding::DanglingParent { account, parent } => {
                write!(f, "account {account} has unknown parent {parent}")
            }
            AuditFinding::ParentCycle { account } => {
                write!(f, "account {account} is its own ancestor")
            }
        }
    }
}

/// Check loaded or hand-edited data for the problems recompute tolerates
///
/// Findings are reported in a stable order: transaction findings in journal
/// order, then account findings in chart order.
pub fn audit(accounts: &[Account], transactions: &[Transaction]) -> Vec<AuditFinding> {
    let by_id: HashMap<&str, &Account> = accounts
        .iter()
        .rev()
        .map(|account| (account.id.as_str(), account))
        .collect();
    let mut findings = Vec::new();

    for tx in transactions.iter().filter(|tx| tx.is_active()) {
        for entry in &tx.entries {
            match by_id.get(entry.account_id.as_str()) {
                None => findings.push(AuditFinding::DanglingEntry {
                    tx: tx.id.clone(),
                    account_id: entry.account_id.clone(),
                }),
                Some(account) if account.is_deleted => {
                    findings.push(AuditFinding::EntryOnDeletedAccount {
                        tx: tx.id.clone(),
                        account_id: entry.account_id.clone(),
                    })
                }
                Some(_) => {}
            }
        }

        match tx.totals() {
            None => findings.push(AuditFinding::AmountOverflow { tx: tx.id.clone() }),
            Some(totals) if !totals.is_balanced() => {
                findings.push(AuditFinding::UnbalancedTransaction {
                    tx: tx.id.clone(),
                    totals,
                })
            }
            Some(_) => {}
        }
    }

    for account in accounts {
        let Some(parent) = account.parent_id.as_deref() else {
            continue;
        };
        if !by_id.contains_key(parent) {
            findings.push(AuditFinding::DanglingParent {
                account: account.id.clone(),
                parent: parent.to_string(),
            });
            continue;
        }

        let mut seen = HashSet::new();
        let mut current = Some(parent);
        while let Some(id) = current {
            if id == account.id {
                findings.push(AuditFinding::ParentCycle {
                    account: account.id.clone(),
                });
                break;
            }
            if !seen.insert(id) {
                break;
            }
            current = by_id.get(id).and_then(|a| a.parent_id.as_deref());
        }
    }

    findings
}
