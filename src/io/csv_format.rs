//! CSV output for the chart of accounts, journal and summary
//!
//! All writers take any `Write` so the binary can stream to stdout and tests
//! can capture into a `Vec<u8>`. Amounts are written with two decimal places.

use crate::core::FinancialSummary;
use crate::types::{Account, StoreError, Transaction};
use csv::Writer;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::io::Write;

fn amount(value: Decimal) -> String {
    format!("{:.2}", value)
}

/// Write the chart of accounts with balances
///
/// Columns: id, code, name, type, parent_id, balance, deleted. Rows keep the
/// order given, which is chart order for engine output.
pub fn write_accounts_csv<'a>(
    accounts: impl IntoIterator<Item = &'a Account>,
    output: &mut dyn Write,
) -> Result<(), StoreError> {
    let mut writer = Writer::from_writer(output);

    writer.write_record(["id", "code", "name", "type", "parent_id", "balance", "deleted"])?;

    for account in accounts {
        writer.write_record([
            account.id.as_str(),
            account.code.as_str(),
            account.name.as_str(),
            account.account_type.as_str(),
            account.parent_id.as_deref().unwrap_or(""),
            amount(account.balance).as_str(),
            if account.is_deleted { "true" } else { "false" },
        ])?;
    }

    writer.flush()?;
    Ok(())
}

/// Write journal lines, one row per entry
///
/// Columns: tx, date, description, account_id, account_name, debit, credit,
/// deleted_at. Entries on unknown accounts get an empty account name.
pub fn write_ledger_csv<'a>(
    transactions: impl IntoIterator<Item = &'a Transaction>,
    accounts: &[Account],
    output: &mut dyn Write,
) -> Result<(), StoreError> {
    let names: HashMap<&str, &str> = accounts
        .iter()
        .rev()
        .map(|account| (account.id.as_str(), account.name.as_str()))
        .collect();
    let mut writer = Writer::from_writer(output);

    writer.write_record([
        "tx",
        "date",
        "description",
        "account_id",
        "account_name",
        "debit",
        "credit",
        "deleted_at",
    ])?;

    for tx in transactions {
        let deleted_at = tx
            .deleted_at
            .map(|at| at.to_rfc3339())
            .unwrap_or_default();
        for entry in &tx.entries {
            writer.write_record([
                tx.id.as_str(),
                tx.date.as_str(),
                tx.description.as_str(),
                entry.account_id.as_str(),
                names.get(entry.account_id.as_str()).copied().unwrap_or(""),
                amount(entry.debit).as_str(),
                amount(entry.credit).as_str(),
                deleted_at.as_str(),
            ])?;
        }
    }

    writer.flush()?;
    Ok(())
}

/// Write the financial summary as metric/value rows
pub fn write_summary_csv(
    summary: &FinancialSummary,
    output: &mut dyn Write,
) -> Result<(), StoreError> {
    let mut writer = Writer::from_writer(output);

    writer.write_record(["metric", "value"])?;
    for (metric, value) in summary.rows() {
        writer.write_record([metric, amount(value).as_str()])?;
    }
    writer.write_record(["balanced", if summary.is_balanced() { "true" } else { "false" }])?;

    writer.flush()?;
    Ok(())
}
