//! Property-based tests for ledger invariants
//!
//! These tests use proptest to verify:
//! - Accounting identity: assets == liabilities + equity (+ net income) after
//!   any sequence of post/delete/restore/purge with balanced transactions
//! - Roll-up: parent balance == own postings + active children's balances
//! - Soft-delete exclusion: trashing a transaction only moves the accounts it
//!   touches and their ancestors, and restoring it is an exact round trip
//! - Deletion guards: outcome depends only on active children and references
//! - Determinism: recomputing twice gives the same output

use proptest::prelude::*;
use proptest::sample::Index;
use rust_decimal::Decimal;
use smart_ledger::core::{own_balances, recompute_balances};
use smart_ledger::types::{
    Account, AccountDraft, AccountType, LedgerError, Snapshot, Transaction, TransactionDraft,
    TransactionEntry,
};
use smart_ledger::{FinancialSummary, LedgerEngine};
use std::collections::HashSet;

const BALANCE_SHEET: &[AccountType] = &[
    AccountType::Asset,
    AccountType::Liability,
    AccountType::Equity,
];

/// One generated account: type choice, parent choice, whether it has a parent
type NodeSeed = (Index, Index, bool);

/// Build a forest where every parent precedes its children
///
/// With `inherit` set, children take their root's type so that every subtree
/// is single-typed, which is what the root-level identity relies on.
fn build_chart(nodes: &[NodeSeed], types: &[AccountType], inherit: bool) -> Vec<Account> {
    let mut accounts: Vec<Account> = Vec::with_capacity(nodes.len());

    for (i, (type_pick, parent_pick, has_parent)) in nodes.iter().enumerate() {
        let parent = (*has_parent && i > 0).then(|| parent_pick.index(i));
        let account_type = match parent {
            Some(p) if inherit => accounts[p].account_type,
            _ => types[type_pick.index(types.len())],
        };
        let id = format!("a{i}");
        let draft = match parent {
            Some(p) => AccountDraft::child(id.clone(), id.clone(), account_type, accounts[p].id.clone()),
            None => AccountDraft::root(id.clone(), id.clone(), account_type),
        };
        accounts.push(Account::from_draft(id, draft));
    }

    accounts
}

fn node_seeds(max: usize) -> impl Strategy<Value = Vec<NodeSeed>> {
    prop::collection::vec((any::<Index>(), any::<Index>(), any::<bool>()), 1..max)
}

/// Strategy for generating valid amounts (positive, two decimal places)
fn amount_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

fn pair_draft(accounts: &[Account], debit: Index, credit: Index, amount: Decimal) -> TransactionDraft {
    TransactionDraft::new(
        "2024-03-15",
        "generated",
        vec![
            TransactionEntry::debit(accounts[debit.index(accounts.len())].id.as_str(), amount),
            TransactionEntry::credit(accounts[credit.index(accounts.len())].id.as_str(), amount),
        ],
    )
}

fn journal(accounts: &[Account], pairs: &[(Index, Index, Decimal)]) -> Vec<Transaction> {
    pairs
        .iter()
        .enumerate()
        .map(|(i, (debit, credit, amount))| {
            Transaction::from_draft(format!("tx-{i}"), pair_draft(accounts, *debit, *credit, *amount))
        })
        .collect()
}

fn pairs(max: usize) -> impl Strategy<Value = Vec<(Index, Index, Decimal)>> {
    prop::collection::vec((any::<Index>(), any::<Index>(), amount_strategy()), 0..max)
}

#[derive(Debug, Clone)]
enum Op {
    Post(Index, Index, Decimal),
    Delete(Index),
    Restore(Index),
    Purge(Index),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (any::<Index>(), any::<Index>(), amount_strategy())
            .prop_map(|(debit, credit, amount)| Op::Post(debit, credit, amount)),
        2 => any::<Index>().prop_map(Op::Delete),
        2 => any::<Index>().prop_map(Op::Restore),
        1 => any::<Index>().prop_map(Op::Purge),
    ]
}

/// Id of an existing transaction chosen by `index`, if there are any
fn pick(engine: &LedgerEngine, index: &Index) -> Option<String> {
    let all = engine.all_transactions();
    (!all.is_empty()).then(|| all[index.index(all.len())].id.clone())
}

fn apply(engine: &mut LedgerEngine, accounts: &[Account], op: &Op) {
    match op {
        Op::Post(debit, credit, amount) => {
            engine.add_transaction(pair_draft(accounts, *debit, *credit, *amount));
        }
        Op::Delete(index) => {
            if let Some(id) = pick(engine, index) {
                engine.delete_transaction(&id).unwrap();
            }
        }
        Op::Restore(index) => {
            if let Some(id) = pick(engine, index) {
                engine.restore_transaction(&id).unwrap();
            }
        }
        Op::Purge(index) => {
            if let Some(id) = pick(engine, index) {
                engine.permanent_delete_transaction(&id).unwrap();
            }
        }
    }
}

fn engine_over(accounts: Vec<Account>, transactions: Vec<Transaction>) -> LedgerEngine {
    LedgerEngine::from_snapshot(Snapshot {
        accounts,
        transactions,
        departments: None,
    })
}

fn ancestors_of(accounts: &[Account], id: &str, into: &mut HashSet<String>) {
    let mut current = Some(id.to_string());
    while let Some(id) = current {
        if !into.insert(id.clone()) {
            break;
        }
        current = accounts
            .iter()
            .find(|a| a.id == id)
            .and_then(|a| a.parent_id.clone());
    }
}

proptest! {
    /// Balance-sheet-only books: assets == liabilities + equity exactly
    #[test]
    fn prop_identity_without_income_accounts(
        nodes in node_seeds(20),
        ops in prop::collection::vec(op_strategy(), 0..40),
    ) {
        let accounts = build_chart(&nodes, BALANCE_SHEET, true);
        let mut engine = engine_over(accounts.clone(), vec![]);

        for op in &ops {
            apply(&mut engine, &accounts, op);
            let summary = FinancialSummary::from_accounts(engine.accounts());
            prop_assert_eq!(summary.total_assets, summary.liabilities_and_equity());
        }
    }

    /// All five types: assets == liabilities + equity + net income
    #[test]
    fn prop_identity_with_net_income(
        nodes in node_seeds(25),
        ops in prop::collection::vec(op_strategy(), 0..40),
    ) {
        let accounts = build_chart(&nodes, &AccountType::ALL, true);
        let mut engine = engine_over(accounts.clone(), vec![]);

        for op in &ops {
            apply(&mut engine, &accounts, op);
            prop_assert!(FinancialSummary::from_accounts(engine.accounts()).is_balanced());
        }
    }

    #[test]
    fn prop_rollup_is_own_plus_active_children(
        nodes in node_seeds(30),
        deleted in prop::collection::vec(any::<bool>(), 30),
        postings in pairs(30),
    ) {
        let mut accounts = build_chart(&nodes, &AccountType::ALL, false);
        for (account, is_deleted) in accounts.iter_mut().zip(&deleted) {
            account.is_deleted = *is_deleted;
        }
        let transactions = journal(&accounts, &postings);

        let own = own_balances(&transactions, &accounts);
        let recomputed = recompute_balances(&transactions, &accounts);

        for (position, parent) in recomputed.iter().enumerate() {
            let from_children: Decimal = recomputed
                .iter()
                .filter(|c| !c.is_deleted && c.parent_id.as_deref() == Some(parent.id.as_str()))
                .map(|c| c.balance)
                .sum();
            prop_assert_eq!(parent.balance, own[position] + from_children);
        }
    }

    #[test]
    fn prop_soft_delete_is_local_and_reversible(
        nodes in node_seeds(20),
        postings in pairs(20),
        victim in any::<Index>(),
    ) {
        let accounts = build_chart(&nodes, &AccountType::ALL, false);
        let transactions = journal(&accounts, &postings);
        prop_assume!(!transactions.is_empty());
        let mut engine = engine_over(accounts, transactions);
        let before = engine.all_accounts().to_vec();
        let target = engine.all_transactions()[victim.index(engine.all_transactions().len())].clone();

        engine.delete_transaction(&target.id).unwrap();

        let mut touched = HashSet::new();
        for entry in &target.entries {
            ancestors_of(&before, &entry.account_id, &mut touched);
        }
        for (old, new) in before.iter().zip(engine.all_accounts()) {
            if old.balance != new.balance {
                prop_assert!(touched.contains(&old.id), "{} changed but is untouched", old.id);
            }
        }

        engine.restore_transaction(&target.id).unwrap();
        prop_assert_eq!(engine.all_accounts(), before.as_slice());
    }

    #[test]
    fn prop_delete_account_guards(
        nodes in node_seeds(15),
        postings in pairs(10),
        victim in any::<Index>(),
    ) {
        let accounts = build_chart(&nodes, &AccountType::ALL, false);
        let transactions = journal(&accounts, &postings);
        let mut engine = engine_over(accounts, transactions);
        let id = engine.all_accounts()[victim.index(engine.all_accounts().len())].id.clone();
        let has_children = engine
            .accounts()
            .iter()
            .any(|a| a.parent_id.as_deref() == Some(id.as_str()));
        let in_use = engine.transactions().iter().any(|tx| tx.references(&id));
        let before = engine.snapshot();

        let result = engine.delete_account(&id);

        if has_children {
            let is_expected = matches!(result, Err(LedgerError::HasChildren { .. }));
            prop_assert!(is_expected);
            prop_assert_eq!(engine.snapshot(), before);
        } else if in_use {
            let is_expected = matches!(result, Err(LedgerError::HasTransactions { .. }));
            prop_assert!(is_expected);
            prop_assert_eq!(engine.snapshot(), before);
        } else {
            prop_assert!(result.is_ok());
            prop_assert!(engine.accounts().iter().all(|a| a.id != id));
        }
    }

    #[test]
    fn prop_recompute_is_deterministic(
        nodes in node_seeds(30),
        postings in pairs(30),
    ) {
        let accounts = build_chart(&nodes, &AccountType::ALL, false);
        let transactions = journal(&accounts, &postings);

        let first = recompute_balances(&transactions, &accounts);
        let second = recompute_balances(&transactions, &first);

        prop_assert_eq!(first, second);
    }
}
