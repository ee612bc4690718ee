//! Account-related types for the ledger
//!
//! This module defines the chart-of-accounts node, its classification and the
//! restricted set of field updates the engine accepts for it.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Account identifier
///
/// Seed data uses dotted codes (`"1.1.2"`), accounts created at runtime get
/// `acc-<uuid>`. Either way the id is opaque and never reused.
pub type AccountId = String;

/// Account classification
///
/// Fixed at creation in normal use. Determines the sign convention applied
/// when entries are accumulated into a balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AccountType {
    /// Resources owned (debit-normal)
    Asset,
    /// Obligations owed (credit-normal)
    Liability,
    /// Owner's residual interest (credit-normal)
    Equity,
    /// Income earned (credit-normal)
    Revenue,
    /// Costs incurred (debit-normal)
    Expense,
}

impl AccountType {
    /// All account types in chart order
    pub const ALL: [AccountType; 5] = [
        AccountType::Asset,
        AccountType::Liability,
        AccountType::Equity,
        AccountType::Revenue,
        AccountType::Expense,
    ];

    /// Upper-case label used in snapshots and CSV output
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountType::Asset => "ASSET",
            AccountType::Liability => "LIABILITY",
            AccountType::Equity => "EQUITY",
            AccountType::Revenue => "REVENUE",
            AccountType::Expense => "EXPENSE",
        }
    }
}

impl std::fmt::Display for AccountType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A node in the chart of accounts
///
/// `balance` is derived: the engine overwrites it on every recompute and no
/// mutator writes it directly. A value read from a snapshot is stale until the
/// first recompute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// Stable identity
    pub id: AccountId,

    /// Display name
    pub name: String,

    /// Account classification
    #[serde(rename = "type")]
    pub account_type: AccountType,

    /// Parent account, `None` for a root of the forest
    #[serde(default)]
    pub parent_id: Option<AccountId>,

    /// Human-facing code used for ordering and search
    pub code: String,

    /// Own signed entries plus the rolled-up balances of active children
    #[serde(default)]
    pub balance: Decimal,

    /// Optional planning budget, carried through untouched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<Decimal>,

    /// Soft-delete flag
    #[serde(default)]
    pub is_deleted: bool,
}

impl Account {
    /// Build an active account with a zero balance from a draft
    pub fn from_draft(id: AccountId, draft: AccountDraft) -> Self {
        Account {
            id,
            name: draft.name,
            account_type: draft.account_type,
            parent_id: draft.parent_id,
            code: draft.code,
            balance: Decimal::ZERO,
            budget: draft.budget,
            is_deleted: false,
        }
    }

    /// Whether this account is a root of the chart
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    /// Whether this account is visible (not soft-deleted)
    pub fn is_active(&self) -> bool {
        !self.is_deleted
    }
}

/// Caller-supplied fields for a new account
#[derive(Debug, Clone, PartialEq)]
pub struct AccountDraft {
    pub name: String,
    pub code: String,
    pub account_type: AccountType,
    pub parent_id: Option<AccountId>,
    pub budget: Option<Decimal>,
}

impl AccountDraft {
    /// Draft for a root account of the given type
    pub fn root(name: impl Into<String>, code: impl Into<String>, account_type: AccountType) -> Self {
        AccountDraft {
            name: name.into(),
            code: code.into(),
            account_type,
            parent_id: None,
            budget: None,
        }
    }

    /// Draft for a child of `parent_id`
    pub fn child(
        name: impl Into<String>,
        code: impl Into<String>,
        account_type: AccountType,
        parent_id: impl Into<AccountId>,
    ) -> Self {
        AccountDraft {
            parent_id: Some(parent_id.into()),
            ..AccountDraft::root(name, code, account_type)
        }
    }
}

/// A single allowed field change on an existing account
///
/// Derived and lifecycle fields (`balance`, `is_deleted`, `id`) have no
/// variant, so they cannot be overwritten through the update path.
#[derive(Debug, Clone, PartialEq)]
pub enum AccountUpdate {
    Name(String),
    Code(String),
    Type(AccountType),
    /// Move under another parent, or to the root level with `None`
    Parent(Option<AccountId>),
    Budget(Option<Decimal>),
}

impl AccountUpdate {
    /// Whether applying this update can change any balance
    pub fn affects_balances(&self) -> bool {
        matches!(self, AccountUpdate::Type(_) | AccountUpdate::Parent(_))
    }

    /// Apply the change to `account`
    ///
    /// Parent validation happens in the account manager before this is called.
    pub fn apply(self, account: &mut Account) {
        match self {
            AccountUpdate::Name(name) => account.name = name,
            AccountUpdate::Code(code) => account.code = code,
            AccountUpdate::Type(account_type) => account.account_type = account_type,
            AccountUpdate::Parent(parent_id) => account.parent_id = parent_id,
            AccountUpdate::Budget(budget) => account.budget = budget,
        }
    }
}
