//! Command dispatch and error types for the shell.

use std::io;

use strsim::levenshtein;

use crate::errors::LedgerError;

use super::{output, shell::parse_command_line, shell_context::ShellContext};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<(), CommandError>;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Readline(#[from] rustyline::error::ReadlineError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("No ledger open. Use `new <balance>` or `load <file>` first.")]
    NoLedger,
    #[error("{0}")]
    InvalidArguments(String),
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error("exit requested")]
    ExitRequested,
}

const SUGGESTION_DISTANCE: usize = 3;

impl ShellContext {
    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        if let Some(handler) = self.registry.handler(command) {
            match handler(self, args) {
                Ok(()) => Ok(LoopControl::Continue),
                Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
                Err(err) => Err(err),
            }
        } else {
            self.suggest_command(raw);
            Ok(LoopControl::Continue)
        }
    }

    /// Tokenizes and runs one input line.
    pub(crate) fn process_line(&mut self, line: &str) -> Result<LoopControl, CommandError> {
        let tokens = match parse_command_line(line) {
            Ok(tokens) => tokens,
            Err(err) => {
                output::warning(err);
                return Ok(LoopControl::Continue);
            }
        };
        let Some(raw) = tokens.first() else {
            return Ok(LoopControl::Continue);
        };

        let command = raw.to_lowercase();
        let args: Vec<&str> = tokens.iter().skip(1).map(String::as_str).collect();
        self.last_command = Some(line.trim().to_string());

        match self.dispatch(&command, raw, &args) {
            Ok(LoopControl::Exit) => {
                self.running = false;
                Ok(LoopControl::Exit)
            }
            other => other,
        }
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        output::warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));
        if let Some(best) = self.closest_command(input) {
            output::info(format!("Suggestion: `{}`?", best));
        }
    }

    fn closest_command(&self, input: &str) -> Option<&'static str> {
        let needle = input.to_lowercase();
        self.registry
            .names()
            .map(|name| (levenshtein(name, &needle), name))
            .filter(|(distance, _)| *distance <= SUGGESTION_DISTANCE)
            .min_by_key(|(distance, _)| *distance)
            .map(|(_, name)| name)
    }

    pub(crate) fn report_error(&self, err: CommandError) {
        tracing::debug!(error = %err, command = ?self.last_command, "command failed");
        output::error(err);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{cli::shell_context::CliMode, config::Config};

    fn context() -> ShellContext {
        output::disable_colors();
        ShellContext::with_config(CliMode::Script, Config::default())
    }

    #[test]
    fn suggestions_pick_nearest_command() {
        let context = context();
        assert_eq!(context.closest_command("depost"), Some("deposit"));
        assert_eq!(context.closest_command("SPND"), Some("spend"));
        assert_eq!(context.closest_command("completely-unrelated"), None);
    }

    #[test]
    fn commands_require_an_open_ledger() {
        let mut context = context();
        assert!(matches!(
            context.process_line("deposit 10"),
            Err(CommandError::NoLedger)
        ));
    }

    #[test]
    fn scripted_session_updates_ledger() {
        let mut context = context();
        context.process_line("new 100").unwrap();
        context.process_line("spend 30 food").unwrap();
        context.process_line("spend 80 travel").unwrap();
        context.process_line("deposit 50").unwrap();
        context.process_line("spend 12.5 \"eating out\"").unwrap();

        let ledger = context.ledger().unwrap();
        assert_eq!(ledger.balance(), 107.5);
        assert_eq!(ledger.category_totals().get("food"), Some(30.0));
        assert_eq!(ledger.category_totals().get("eating out"), Some(12.5));
        assert_eq!(ledger.category_totals().get("travel"), None);
    }

    #[test]
    fn invalid_amounts_are_reported_as_argument_errors() {
        let mut context = context();
        context.process_line("new 10").unwrap();
        assert!(matches!(
            context.process_line("spend ten food"),
            Err(CommandError::InvalidArguments(_))
        ));
        assert!(matches!(
            context.process_line("deposit -5"),
            Err(CommandError::Ledger(LedgerError::InvalidAmount(_)))
        ));
    }

    #[test]
    fn exit_stops_the_loop() {
        let mut context = context();
        assert_eq!(context.process_line("exit").unwrap(), LoopControl::Exit);
        assert!(!context.running);
    }
}
