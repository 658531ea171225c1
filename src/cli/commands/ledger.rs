use crate::cli::core::{CommandError, CommandResult};
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::cli::shell_context::ShellContext;
use crate::ledger::{Ledger, Rejection, SpendOutcome};

use super::{parse_amount, required};

const NEW_USAGE: &str = "new <initial-balance>";
const DEPOSIT_USAGE: &str = "deposit <amount>";
const SPEND_USAGE: &str = "spend <amount> <category>";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "new",
            "Open a fresh ledger with an initial balance",
            NEW_USAGE,
            cmd_new,
        ),
        CommandEntry::new("deposit", "Add money to the balance", DEPOSIT_USAGE, cmd_deposit),
        CommandEntry::new(
            "spend",
            "Record an expense under a category",
            SPEND_USAGE,
            cmd_spend,
        ),
        CommandEntry::new("balance", "Show the current balance", "balance", cmd_balance),
    ]
}

fn cmd_new(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let initial = parse_amount(required(args, 0, NEW_USAGE)?)?;
    context.open_ledger(Ledger::new(initial));
    output::success(format!("New ledger opened with balance {}.", initial));
    Ok(())
}

fn cmd_deposit(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let amount = parse_amount(required(args, 0, DEPOSIT_USAGE)?)?;
    context.ledger_mut()?.deposit(amount)?;
    Ok(())
}

fn cmd_spend(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let amount = parse_amount(required(args, 0, SPEND_USAGE)?)?;
    if args.len() < 2 {
        return Err(CommandError::InvalidArguments(format!("Usage: {}", SPEND_USAGE)));
    }
    let category = args[1..].join(" ");
    match context.ledger_mut()?.spend(amount, &category) {
        SpendOutcome::Accepted(_) => output::success("Transaction successful."),
        SpendOutcome::Rejected(Rejection::InsufficientBalance { .. }) => {
            output::warning("Insufficient balance.")
        }
        SpendOutcome::Rejected(_) => output::warning("Transaction rejected."),
    }
    Ok(())
}

fn cmd_balance(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    output::info(format!("Balance: {}", context.ledger()?.balance()));
    Ok(())
}
