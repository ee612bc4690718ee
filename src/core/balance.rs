//! Balance recalculation
//!
//! Derives every account's displayed balance from the full transaction list
//! and the chart-of-accounts forest. The computation is a pure function of its
//! inputs and is rerun in full after every mutation; there is no cached or
//! incremental balance state anywhere in the crate.
//!
//! # Algorithm
//!
//! 1. Start an accumulator at zero for every account, deleted or not.
//! 2. For every active transaction, add each entry to its account's
//!    accumulator using the account's normal-balance sign. Entries that point
//!    at an unknown account id contribute nothing, and neither does an entry
//!    that would push the accumulator past the `Decimal` range.
//! 3. Roll up: an account's balance is its own accumulator plus the rolled-up
//!    balances of its active direct children, computed depth-first with an
//!    explicit stack so arbitrarily deep charts cannot overflow the call stack.
//!    A child balance that would overflow its parent is skipped the same way.
//! 4. Return the accounts with `balance` replaced and everything else intact.
//!
//! # Cycles
//!
//! Account creation and re-parenting reject cycles, but a hand-edited snapshot
//! can still contain one. The traversal visits accounts in list order and a
//! back edge (a child that is still on the stack) contributes zero, so the
//! result stays deterministic for a given input order.

use crate::types::{Account, AccountType, Transaction};
use rust_decimal::Decimal;
use std::collections::HashMap;

/// Which column increases an account's balance
///
/// - Asset/Expense: balance += debit - credit
/// - Liability/Equity/Revenue: balance += credit - debit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NormalBalance {
    Debit,
    Credit,
}

impl NormalBalance {
    pub fn of(account_type: AccountType) -> Self {
        match account_type {
            AccountType::Asset | AccountType::Expense => NormalBalance::Debit,
            AccountType::Liability | AccountType::Equity | AccountType::Revenue => {
                NormalBalance::Credit
            }
        }
    }

    /// Signed contribution of one entry line, `None` if it overflows
    pub fn apply(self, debit: Decimal, credit: Decimal) -> Option<Decimal> {
        match self {
            NormalBalance::Debit => debit.checked_sub(credit),
            NormalBalance::Credit => credit.checked_sub(debit),
        }
    }
}

/// Position of each account id in `accounts`; the first occurrence wins
fn index_accounts(accounts: &[Account]) -> HashMap<&str, usize> {
    let mut index = HashMap::with_capacity(accounts.len());
    for (position, account) in accounts.iter().enumerate() {
        index.entry(account.id.as_str()).or_insert(position);
    }
    index
}

/// Per-account accumulator of signed entries from active transactions
///
/// The result is aligned with `accounts`: element `i` belongs to `accounts[i]`.
/// Children are not rolled in.
pub fn own_balances(transactions: &[Transaction], accounts: &[Account]) -> Vec<Decimal> {
    let index = index_accounts(accounts);
    own_balances_indexed(transactions, accounts, &index)
}

fn own_balances_indexed(
    transactions: &[Transaction],
    accounts: &[Account],
    index: &HashMap<&str, usize>,
) -> Vec<Decimal> {
    let mut own = vec![Decimal::ZERO; accounts.len()];
    let mut dangling = 0usize;
    let mut overflowed = 0usize;

    for entry in transactions
        .iter()
        .filter(|tx| tx.is_active())
        .flat_map(|tx| tx.entries.iter())
    {
        match index.get(entry.account_id.as_str()) {
            Some(&position) => {
                let sign = NormalBalance::of(accounts[position].account_type);
                match sign
                    .apply(entry.debit, entry.credit)
                    .and_then(|delta| own[position].checked_add(delta))
                {
                    Some(total) => own[position] = total,
                    None => overflowed += 1,
                }
            }
            None => dangling += 1,
        }
    }

    if dangling > 0 {
        tracing::warn!(dangling, "skipped entries referencing unknown accounts");
    }
    if overflowed > 0 {
        tracing::warn!(overflowed, "skipped entries that overflow the account balance");
    }

    own
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Visit {
    Pending,
    OnStack,
    Done,
}

enum Frame {
    Enter(usize),
    Exit(usize),
}

/// Roll child balances into parents
///
/// `own` must be aligned with `accounts`. Returns the rolled-up balance of
/// every account, aligned the same way.
fn roll_up(accounts: &[Account], index: &HashMap<&str, usize>, own: &[Decimal]) -> Vec<Decimal> {
    let mut children: Vec<Vec<usize>> = vec![Vec::new(); accounts.len()];
    for (position, account) in accounts.iter().enumerate() {
        if account.is_deleted {
            continue;
        }
        if let Some(&parent) = account
            .parent_id
            .as_deref()
            .and_then(|parent_id| index.get(parent_id))
        {
            children[parent].push(position);
        }
    }

    let mut state = vec![Visit::Pending; accounts.len()];
    let mut rolled = vec![Decimal::ZERO; accounts.len()];
    let mut stack = Vec::new();
    let mut overflowed = 0usize;

    for start in 0..accounts.len() {
        if state[start] != Visit::Pending {
            continue;
        }
        stack.push(Frame::Enter(start));

        while let Some(frame) = stack.pop() {
            match frame {
                Frame::Enter(node) => {
                    if state[node] != Visit::Pending {
                        continue;
                    }
                    state[node] = Visit::OnStack;
                    stack.push(Frame::Exit(node));
                    for &child in children[node].iter().rev() {
                        if state[child] == Visit::Pending {
                            stack.push(Frame::Enter(child));
                        }
                    }
                }
                Frame::Exit(node) => {
                    // Children still on the stack are back edges of a cycle.
                    let mut balance = own[node];
                    for &child in &children[node] {
                        if state[child] != Visit::Done {
                            continue;
                        }
                        match balance.checked_add(rolled[child]) {
                            Some(total) => balance = total,
                            None => overflowed += 1,
                        }
                    }
                    rolled[node] = balance;
                    state[node] = Visit::Done;
                }
            }
        }
    }

    if overflowed > 0 {
        tracing::warn!(overflowed, "skipped child balances that overflow their parent");
    }

    rolled
}

/// Recompute every account's balance from the transactions
///
/// # Arguments
///
/// * `transactions` - The complete transaction list, including soft-deleted ones
/// * `accounts` - The complete account list, including soft-deleted ones
///
/// # Returns
///
/// A new account list in the same order with `balance` replaced by the
/// rolled-up value. Calling it twice on the same input yields the same output.
pub fn recompute_balances(transactions: &[Transaction], accounts: &[Account]) -> Vec<Account> {
    let index = index_accounts(accounts);
    let own = own_balances_indexed(transactions, accounts, &index);
    let rolled = roll_up(accounts, &index, &own);

    tracing::debug!(
        accounts = accounts.len(),
        transactions = transactions.len(),
        "recomputed balances"
    );

    accounts
        .iter()
        .zip(rolled)
        .map(|(account, balance)| Account {
            balance,
            ..account.clone()
        })
        .collect()
}
