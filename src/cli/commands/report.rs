use crate::cli::core::{CommandError, CommandResult};
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::cli::shell_context::ShellContext;
use crate::ledger::CategoryTotal;
use crate::report::{Ranking, ReportOutcome};

use super::required;

const REPORT_USAGE: &str = "report <day|week|month>";
const TOP_EXPENSES_USAGE: &str = "top-expenses <week|month> [count]";
const TOP_CATEGORIES_USAGE: &str = "top-categories <week|month> [count]";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "report",
            "Show balance and spending by category for a period",
            REPORT_USAGE,
            cmd_report,
        ),
        CommandEntry::new(
            "top-expenses",
            "List the largest expenses",
            TOP_EXPENSES_USAGE,
            cmd_top_expenses,
        ),
        CommandEntry::new(
            "top-categories",
            "List the categories with the most spending",
            TOP_CATEGORIES_USAGE,
            cmd_top_categories,
        ),
        CommandEntry::new(
            "categories",
            "Show all-time totals per category",
            "categories",
            cmd_categories,
        ),
    ]
}

fn cmd_report(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let report_type = required(args, 0, REPORT_USAGE)?;
    match context.engine()?.generate_report(report_type) {
        ReportOutcome::Period(report) => {
            output::section(format!("{} REPORT", report.period.heading()));
            output::info(format!("Balance: {}", report.balance));
            print_categories(&report.categories);
        }
        ReportOutcome::Unknown(_) => output::warning("Unknown report type"),
    }
    Ok(())
}

fn cmd_top_expenses(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let report_type = required(args, 0, TOP_EXPENSES_USAGE)?;
    let count = parse_count(args.get(1).copied(), context)?;
    match context.engine()?.top_expenses(report_type, count) {
        Ranking::Ranked { period, items } => {
            output::section(format!("TOP {} {} EXPENSES", count, period.heading()));
            for (rank, txn) in items.iter().enumerate() {
                output::info(format!("  {}. {}: {}", rank + 1, txn.category, txn.amount));
            }
        }
        Ranking::Unknown(_) => output::warning("Unknown report type for top expenses"),
    }
    Ok(())
}

fn cmd_top_categories(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let report_type = required(args, 0, TOP_CATEGORIES_USAGE)?;
    let count = parse_count(args.get(1).copied(), context)?;
    match context.engine()?.top_categories(report_type, count) {
        Ranking::Ranked { period, items } => {
            output::section(format!("TOP {} {} CATEGORIES", count, period.heading()));
            for (rank, entry) in items.iter().enumerate() {
                output::info(format!("  {}. {}: {}", rank + 1, entry.name, entry.total));
            }
        }
        Ranking::Unknown(_) => output::warning("Unknown report type for top categories"),
    }
    Ok(())
}

fn cmd_categories(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let totals = context.engine()?.summarize_by_category();
    output::section("CATEGORIES");
    print_categories(&totals);
    Ok(())
}

fn print_categories(totals: &[CategoryTotal]) {
    output::info("Expenses by category:");
    if totals.is_empty() {
        output::info("  (no expenses recorded)");
    }
    for entry in totals {
        output::info(format!("  {}: {}", entry.name, entry.total));
    }
}

fn parse_count(raw: Option<&str>, context: &ShellContext) -> Result<usize, CommandError> {
    match raw {
        None => Ok(context.config.top_n),
        Some(raw) => raw.parse::<usize>().map_err(|_| {
            CommandError::InvalidArguments(format!("`{}` is not a valid count", raw))
        }),
    }
}
