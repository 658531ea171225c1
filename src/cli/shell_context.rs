use crate::{
    config::{Config, ConfigManager},
    ledger::{Ledger, LedgerEvent},
    report::ReportEngine,
};

use super::{
    commands,
    core::{CliError, CommandError},
    output,
    registry::CommandRegistry,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub config: Config,
    pub ledger: Option<Ledger>,
    pub last_command: Option<String>,
    pub running: bool,
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let config = match ConfigManager::new().and_then(|manager| manager.load()) {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!(error = %err, "falling back to default configuration");
                Config::default()
            }
        };
        Ok(Self::with_config(mode, config))
    }

    pub fn with_config(mode: CliMode, config: Config) -> Self {
        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);
        Self {
            mode,
            registry,
            config,
            ledger: None,
            last_command: None,
            running: true,
        }
    }

    /// Installs `ledger` as the active ledger, echoing its events to the console.
    pub fn open_ledger(&mut self, mut ledger: Ledger) {
        ledger.set_observer(|event: &LedgerEvent| match event {
            LedgerEvent::SpendRejected { .. } => output::warning(event),
            _ => output::info(event),
        });
        self.ledger = Some(ledger);
    }

    pub fn ledger(&self) -> Result<&Ledger, CommandError> {
        self.ledger.as_ref().ok_or(CommandError::NoLedger)
    }

    pub fn ledger_mut(&mut self) -> Result<&mut Ledger, CommandError> {
        self.ledger.as_mut().ok_or(CommandError::NoLedger)
    }

    /// Report engine over the active ledger, configured from [`Config`].
    pub fn engine(&self) -> Result<ReportEngine<'_>, CommandError> {
        Ok(ReportEngine::new(self.ledger()?)
            .with_filter(self.config.period_filter)
            .with_top_n(self.config.top_n))
    }

    pub fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub fn prompt(&self) -> String {
        match &self.ledger {
            Some(ledger) => format!("wallet [{}]> ", ledger.balance()),
            None => "wallet> ".to_string(),
        }
    }
}
