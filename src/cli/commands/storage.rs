use std::sync::Arc;

use crate::cli::core::CommandResult;
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::cli::shell_context::ShellContext;
use crate::storage::{load_full_dump, save_full_dump, save_report};
use crate::time::SystemClock;

use super::required;

const SAVE_USAGE: &str = "save <file>";
const SAVE_REPORT_USAGE: &str = "save-report <day|week|month> <file>";
const LOAD_USAGE: &str = "load <file>";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "save",
            "Save balance, category totals and transactions to a file",
            SAVE_USAGE,
            cmd_save,
        ),
        CommandEntry::new(
            "save-report",
            "Save a formatted report to a file",
            SAVE_REPORT_USAGE,
            cmd_save_report,
        ),
        CommandEntry::new(
            "load",
            "Open a ledger from a file written by `save`",
            LOAD_USAGE,
            cmd_load,
        ),
    ]
}

fn cmd_save(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let path = context.config.resolve_path(required(args, 0, SAVE_USAGE)?);
    save_full_dump(context.ledger()?, &path)?;
    output::success(format!("All data saved to {}", path.display()));
    Ok(())
}

fn cmd_save_report(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let report_type = required(args, 0, SAVE_REPORT_USAGE)?;
    let path = context
        .config
        .resolve_path(required(args, 1, SAVE_REPORT_USAGE)?);
    save_report(report_type, &context.engine()?, &path)?;
    output::success(format!("Report saved to {}", path.display()));
    Ok(())
}

fn cmd_load(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let path = context.config.resolve_path(required(args, 0, LOAD_USAGE)?);
    let ledger = load_full_dump(&path, Arc::new(SystemClock))?;
    output::success(format!(
        "Loaded {} transactions from {}. Balance: {}",
        ledger.transactions().len(),
        path.display(),
        ledger.balance()
    ));
    context.open_ledger(ledger);
    Ok(())
}
