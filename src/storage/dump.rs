use std::{
    io::{self, BufRead, Write},
    sync::Arc,
};

use chrono::{TimeZone, Utc};

use crate::{
    errors::LedgerError,
    ledger::{ledger::check_totals, CategoryIndex, CategoryTotal, Ledger, Transaction},
    time::Clock,
};

const BALANCE_PREFIX: &str = "Balance: ";
const CATEGORIES_HEADER: &str = "Categories:";
const TRANSACTIONS_HEADER: &str = "Transactions:";

/// Writes balance, category totals (by name) and the full transaction history.
pub fn write_full_dump<W: Write>(ledger: &Ledger, out: &mut W) -> io::Result<()> {
    writeln!(out, "{}{}", BALANCE_PREFIX, ledger.balance())?;
    writeln!(out, "{}", CATEGORIES_HEADER)?;
    for entry in ledger.category_totals().sorted_by_name() {
        writeln!(out, "{}: {}", entry.name, entry.total)?;
    }
    writeln!(out, "{}", TRANSACTIONS_HEADER)?;
    for txn in ledger.transactions() {
        writeln!(
            out,
            "{} {} {}",
            txn.category,
            txn.amount,
            txn.unix_timestamp()
        )?;
    }
    Ok(())
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Section {
    Balance,
    CategoriesHeader,
    Categories,
    Transactions,
}

/// Parses a dump written by [`write_full_dump`].
///
/// Trailing fields are split from the right, so category names may contain spaces.
/// The category section must agree with the totals derived from the transaction
/// lines; the rebuilt ledger's index is always derived from the log.
pub fn read_full_dump<R: BufRead>(reader: R, clock: Arc<dyn Clock>) -> Result<Ledger, LedgerError> {
    let mut section = Section::Balance;
    let mut balance = None;
    let mut declared = Vec::new();
    let mut transactions = Vec::new();

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let number = idx + 1;
        if line.trim().is_empty() {
            continue;
        }
        match section {
            Section::Balance => {
                let raw = line
                    .strip_prefix(BALANCE_PREFIX)
                    .ok_or_else(|| LedgerError::parse(number, "expected `Balance: <amount>`"))?;
                balance = Some(parse_number(raw, number)?);
                section = Section::CategoriesHeader;
            }
            Section::CategoriesHeader if line == CATEGORIES_HEADER => {
                section = Section::Categories;
            }
            Section::CategoriesHeader => {
                return Err(LedgerError::parse(number, "expected `Categories:`"));
            }
            Section::Categories if line == TRANSACTIONS_HEADER => {
                section = Section::Transactions;
            }
            Section::Categories => {
                let (name, total) = line
                    .rsplit_once(": ")
                    .ok_or_else(|| LedgerError::parse(number, "expected `<category>: <total>`"))?;
                declared.push(CategoryTotal::new(name, parse_number(total, number)?));
            }
            Section::Transactions => transactions.push(parse_transaction(&line, number)?),
        }
    }

    let balance = balance.ok_or_else(|| LedgerError::parse(0, "dump is empty"))?;
    if section != Section::Transactions {
        return Err(LedgerError::parse(0, "missing `Transactions:` section"));
    }

    let derived = CategoryIndex::from_transactions(&transactions);
    check_totals(&declared, &derived)?;
    if declared.len() != derived.len() {
        return Err(LedgerError::Inconsistent(format!(
            "dump declares {} categories but transactions cover {}",
            declared.len(),
            derived.len()
        )));
    }

    Ok(Ledger::from_parts(balance, transactions, clock))
}

fn parse_transaction(line: &str, number: usize) -> Result<Transaction, LedgerError> {
    let mut fields = line.rsplitn(3, ' ');
    let (Some(timestamp), Some(amount), Some(category)) = (fields.next(), fields.next(), fields.next())
    else {
        return Err(LedgerError::parse(
            number,
            "expected `<category> <amount> <timestamp>`",
        ));
    };
    let seconds: i64 = timestamp
        .parse()
        .map_err(|_| LedgerError::parse(number, format!("invalid timestamp `{timestamp}`")))?;
    let timestamp = Utc
        .timestamp_opt(seconds, 0)
        .single()
        .ok_or_else(|| LedgerError::parse(number, format!("timestamp {seconds} out of range")))?;
    let amount = parse_number(amount, number)?;
    if !amount.is_finite() || amount <= 0.0 {
        return Err(LedgerError::parse(
            number,
            format!("transaction amount {amount} must be positive"),
        ));
    }
    Ok(Transaction::new(category, amount, timestamp))
}

fn parse_number(raw: &str, number: usize) -> Result<f64, LedgerError> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| LedgerError::parse(number, format!("invalid number `{}`", raw.trim())))
}
