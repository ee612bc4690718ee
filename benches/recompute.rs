//! Benchmark suite for balance recomputation
//!
//! Every mutation recomputes the whole tree, so recompute cost bounds the
//! latency of every engine call.
//!
//! # Running Benchmarks
//!
//! ```bash
//! cargo bench
//! ```
//!
//! Charts are generated in memory: a balanced tree with the given branching
//! factor and depth, plus a journal of two-line transactions posting to leaf
//! accounts. A deep single chain checks the iterative roll-up.

use rust_decimal::Decimal;
use smart_ledger::core::recompute_balances;
use smart_ledger::types::{Account, AccountDraft, AccountType, Transaction, TransactionDraft, TransactionEntry};
use smart_ledger::LedgerEngine;

fn main() {
    divan::main();
}

/// Asset tree with `branching` children per node, `depth` levels below the root
fn tree(branching: usize, depth: usize) -> Vec<Account> {
    let mut accounts = vec![Account::from_draft(
        "1".to_string(),
        AccountDraft::root("Assets", "1", AccountType::Asset),
    )];
    let mut level = vec!["1".to_string()];

    for _ in 0..depth {
        let mut next = Vec::with_capacity(level.len() * branching);
        for parent in &level {
            for child in 1..=branching {
                let id = format!("{parent}.{child}");
                accounts.push(Account::from_draft(
                    id.clone(),
                    AccountDraft::child(id.clone(), id.clone(), AccountType::Asset, parent.clone()),
                ));
                next.push(id);
            }
        }
        level = next;
    }

    accounts.push(Account::from_draft(
        "3".to_string(),
        AccountDraft::root("Equity", "3", AccountType::Equity),
    ));
    accounts
}

fn journal(accounts: &[Account], count: usize) -> Vec<Transaction> {
    let leaves: Vec<&Account> = accounts
        .iter()
        .filter(|a| a.account_type == AccountType::Asset)
        .collect();

    (0..count)
        .map(|i| {
            let amount = Decimal::new(i as i64 % 10_000 + 1, 2);
            let draft = TransactionDraft::new(
                "2024-03-01",
                "bench",
                vec![
                    TransactionEntry::debit(leaves[i % leaves.len()].id.as_str(), amount),
                    TransactionEntry::credit("3", amount),
                ],
            );
            Transaction::from_draft(format!("tx-{i}"), draft)
        })
        .collect()
}

/// Seed-sized chart (~20 accounts, 100 transactions)
#[divan::bench]
fn recompute_small(bencher: divan::Bencher) {
    let accounts = tree(3, 2);
    let transactions = journal(&accounts, 100);

    bencher.bench(|| recompute_balances(divan::black_box(&transactions), divan::black_box(&accounts)));
}

/// ~1,500 accounts, 10,000 transactions
#[divan::bench]
fn recompute_medium(bencher: divan::Bencher) {
    let accounts = tree(6, 4);
    let transactions = journal(&accounts, 10_000);

    bencher.bench(|| recompute_balances(divan::black_box(&transactions), divan::black_box(&accounts)));
}

/// ~20,000 accounts, 100,000 transactions
#[divan::bench(sample_count = 10)]
fn recompute_large(bencher: divan::Bencher) {
    let accounts = tree(7, 5);
    let transactions = journal(&accounts, 100_000);

    bencher.bench(|| recompute_balances(divan::black_box(&transactions), divan::black_box(&accounts)));
}

/// 10,000-level chain, one posting at the bottom
#[divan::bench]
fn recompute_deep_chain(bencher: divan::Bencher) {
    let mut accounts = vec![Account::from_draft(
        "n0".to_string(),
        AccountDraft::root("n0", "n0", AccountType::Asset),
    )];
    for i in 1..10_000 {
        let parent = format!("n{}", i - 1);
        accounts.push(Account::from_draft(
            format!("n{i}"),
            AccountDraft::child(format!("n{i}"), format!("n{i}"), AccountType::Asset, parent),
        ));
    }
    let transactions = vec![Transaction::from_draft(
        "tx-0".to_string(),
        TransactionDraft::new(
            "2024-03-01",
            "bottom",
            vec![TransactionEntry::debit("n9999", Decimal::ONE)],
        ),
    )];

    bencher.bench(|| recompute_balances(divan::black_box(&transactions), divan::black_box(&accounts)));
}

/// Engine round trip: soft delete then restore, two full recomputes
#[divan::bench]
fn delete_and_restore_medium(bencher: divan::Bencher) {
    let accounts = tree(6, 4);
    let transactions = journal(&accounts, 10_000);
    let mut engine = LedgerEngine::from_snapshot(smart_ledger::Snapshot {
        accounts,
        transactions,
        departments: None,
    });

    bencher.bench_local(|| {
        engine.delete_transaction("tx-42").unwrap();
        engine.restore_transaction("tx-42").unwrap();
    });
}
