use std::io::{self, Write};

use chrono::SecondsFormat;

use crate::report::{Period, ReportEngine};

/// Writes the formatted report for `report_type`.
///
/// The header and category breakdown are written for any report type; the
/// top-N sections only follow when the type supports rankings (week, month).
pub fn write_report<W: Write>(
    report_type: &str,
    engine: &ReportEngine<'_>,
    out: &mut W,
) -> io::Result<()> {
    let ledger = engine.ledger();
    let period = report_type.parse::<Period>().ok();
    let categories = match period {
        Some(period) => engine.period_report(period).categories,
        None => engine.summarize_by_category(),
    };

    writeln!(out, "Financial Report - {}", report_type)?;
    writeln!(out, "Balance: {}", ledger.balance())?;
    writeln!(
        out,
        "Generated at: {}",
        engine.now().to_rfc3339_opts(SecondsFormat::Secs, true)
    )?;
    writeln!(out, "Categories report:")?;
    for entry in &categories {
        writeln!(out, "{}: {}", entry.name, entry.total)?;
    }

    let top_n = engine.top_n();
    if let Some(expenses) = engine.top_expenses(report_type, top_n).into_items() {
        writeln!(out, "Top {} expenses:", top_n)?;
        for (rank, txn) in expenses.iter().enumerate() {
            writeln!(out, "{}. {}: {}", rank + 1, txn.category, txn.amount)?;
        }
    }
    if let Some(top) = engine.top_categories(report_type, top_n).into_items() {
        writeln!(out, "Top {} categories:", top_n)?;
        for (rank, entry) in top.iter().enumerate() {
            writeln!(out, "{}. {}: {}", rank + 1, entry.name, entry.total)?;
        }
    }
    Ok(())
}
