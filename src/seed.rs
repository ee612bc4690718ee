//! Default seed data
//!
//! Used when no snapshot has been saved yet: a starter chart of accounts in
//! five typed trees, ten example journal transactions for one month, and three
//! example departments. Balances in the seed are zero; the engine recomputes
//! them on load.

use crate::types::{
    Account, AccountType, Department, Snapshot, Specialization, Transaction, TransactionEntry,
};
use chrono::{Datelike, Utc};
use rust_decimal::Decimal;

fn account(id: &str, name: &str, account_type: AccountType, parent: Option<&str>, code: &str) -> Account {
    Account {
        id: id.to_string(),
        name: name.to_string(),
        account_type,
        parent_id: parent.map(str::to_string),
        code: code.to_string(),
        balance: Decimal::ZERO,
        budget: None,
        is_deleted: false,
    }
}

/// Starter chart of accounts
pub fn default_accounts() -> Vec<Account> {
    use AccountType::*;

    vec![
        account("1", "Assets", Asset, None, "1000"),
        account("1.1", "Current Assets", Asset, Some("1"), "1100"),
        account("1.1.1", "Cash on Hand", Asset, Some("1.1"), "1110"),
        account("1.1.2", "Commercial Bank", Asset, Some("1.1"), "1120"),
        account("1.1.3", "Accounts Receivable", Asset, Some("1.1"), "1130"),
        account("1.2", "Fixed Assets", Asset, Some("1"), "1200"),
        account("1.2.1", "Office Furniture & Equipment", Asset, Some("1.2"), "1210"),
        account("1.2.2", "Computer Hardware", Asset, Some("1.2"), "1220"),
        account("2", "Liabilities", Liability, None, "2000"),
        account("2.1", "Accounts Payable", Liability, Some("2"), "2100"),
        account("2.2", "Short-term Loans", Liability, Some("2"), "2200"),
        account("3", "Equity", Equity, None, "3000"),
        account("3.1", "Paid-in Capital", Equity, Some("3"), "3100"),
        account("3.2", "Retained Earnings", Equity, Some("3"), "3200"),
        account("4", "Revenue", Revenue, None, "4000"),
        account("4.1", "Service Sales", Revenue, Some("4"), "4100"),
        account("4.2", "Financial Consulting Income", Revenue, Some("4"), "4200"),
        account("5", "Expenses", Expense, None, "5000"),
        account("5.1", "Head Office Rent", Expense, Some("5"), "5100"),
        account("5.2", "Salaries & Wages", Expense, Some("5"), "5200"),
        account("5.3", "Utilities & Internet", Expense, Some("5"), "5300"),
        account("5.4", "Marketing & Advertising", Expense, Some("5"), "5400"),
    ]
}

fn transaction(id: &str, date: String, description: &str, debit: &str, credit: &str, amount: i64) -> Transaction {
    let amount = Decimal::from(amount);
    Transaction {
        id: id.to_string(),
        date,
        description: description.to_string(),
        entries: vec![
            TransactionEntry::debit(debit, amount),
            TransactionEntry::credit(credit, amount),
        ],
        receipt_number: None,
        check_number: None,
        deposit_number: None,
        is_deleted: false,
        deleted_at: None,
    }
}

/// Example journal for `month` (`YYYY-MM`)
///
/// Every transaction is balanced. Day 30 is kept as-is even for short
/// months: dates are opaque sortable strings here.
pub fn default_transactions(month: &str) -> Vec<Transaction> {
    let day = |d: u32| format!("{month}-{d:02}");

    vec![
        transaction("tx-001", day(1), "Company capital deposited at the bank", "1.1.2", "3.1", 500_000),
        transaction("tx-002", day(2), "Office rent for the month", "5.1", "1.1.2", 5_000),
        transaction("tx-003", day(5), "Computers purchased for staff", "1.2.2", "1.1.2", 12_000),
        transaction("tx-004", day(8), "Consulting income - client A", "1.1.2", "4.2", 15_000),
        transaction("tx-005", day(12), "Internet and electricity bill", "5.3", "1.1.1", 850),
        transaction("tx-006", day(15), "Social media advertising campaign", "5.4", "1.1.2", 2_500),
        transaction("tx-007", day(20), "Software services sales", "1.1.2", "4.1", 32_000),
        transaction("tx-008", day(25), "Office furniture bought on credit", "1.2.1", "2.1", 6_000),
        transaction("tx-009", day(28), "Staff salaries for the month", "5.2", "1.1.2", 45_000),
        transaction("tx-010", day(30), "Cash collected from debtors", "1.1.1", "1.1.3", 2_000),
    ]
}

fn specialization(id: &str, name: &str, active_students: u32, revenue: i64) -> Specialization {
    Specialization {
        id: id.to_string(),
        name: name.to_string(),
        description: None,
        active_students: Some(active_students),
        revenue: Decimal::from(revenue),
    }
}

/// Example departments
pub fn default_departments() -> Vec<Department> {
    vec![
        Department {
            id: "dep-1".to_string(),
            name: "Information Technology".to_string(),
            manager: "Eng. Ahmad Al-Salem".to_string(),
            description: "Infrastructure and software".to_string(),
            budget: Decimal::from(150_000),
            expenses: Decimal::from(85_000),
            specializations: vec![
                specialization("spec-1-1", "Software Engineering", 45, 120_000),
                specialization("spec-1-2", "Cyber Security", 30, 95_000),
                specialization("spec-1-3", "Artificial Intelligence", 25, 88_000),
            ],
            is_deleted: false,
        },
        Department {
            id: "dep-2".to_string(),
            name: "Human Resources".to_string(),
            manager: "Sara Al-Ali".to_string(),
            description: "Staff affairs and payroll".to_string(),
            budget: Decimal::from(80_000),
            expenses: Decimal::from(45_000),
            specializations: vec![
                specialization("spec-2-1", "Recruitment", 0, 0),
                specialization("spec-2-2", "Training & Development", 0, 15_000),
            ],
            is_deleted: false,
        },
        Department {
            id: "dep-3".to_string(),
            name: "Marketing & Sales".to_string(),
            manager: "Fahad Al-Mansour".to_string(),
            description: "Product marketing and sales growth".to_string(),
            budget: Decimal::from(120_000),
            expenses: Decimal::from(110_000),
            specializations: vec![
                specialization("spec-3-1", "Digital Marketing", 0, 250_000),
                specialization("spec-3-2", "Public Relations", 0, 0),
            ],
            is_deleted: false,
        },
    ]
}

/// Complete seed snapshot with the example journal dated in `month`
pub fn default_snapshot(month: &str) -> Snapshot {
    Snapshot {
        accounts: default_accounts(),
        transactions: default_transactions(month),
        departments: Some(default_departments()),
    }
}

/// `YYYY-MM` of the current UTC date
pub fn current_month() -> String {
    let today = Utc::now().date_naive();
    format!("{}-{:02}", today.year(), today.month())
}
