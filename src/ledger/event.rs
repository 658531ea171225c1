use std::fmt;

use super::transaction::Transaction;

/// Why a spend was refused. Refusals leave the ledger untouched.
#[derive(Debug, Clone, PartialEq)]
pub enum Rejection {
    InsufficientBalance { requested: f64, balance: f64 },
    InvalidAmount { requested: f64 },
    EmptyCategory,
    /// Line breaks and other control characters cannot be stored in a dump line.
    InvalidCategory { category: String },
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::InsufficientBalance { requested, balance } => write!(
                f,
                "Failed to spend {requested}. Insufficient balance: {balance}"
            ),
            Rejection::InvalidAmount { requested } => {
                write!(f, "Failed to spend {requested}. Amount must be a positive number")
            }
            Rejection::EmptyCategory => write!(f, "Category must not be empty"),
            Rejection::InvalidCategory { category } => write!(
                f,
                "Category {category:?} must not contain control characters"
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DepositReceipt {
    pub amount: f64,
    pub balance: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpendReceipt {
    pub transaction: Transaction,
    pub balance: f64,
}

/// Result of [`Ledger::spend`](super::Ledger::spend).
#[derive(Debug, Clone, PartialEq)]
pub enum SpendOutcome {
    Accepted(SpendReceipt),
    Rejected(Rejection),
}

impl SpendOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, SpendOutcome::Accepted(_))
    }

    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            SpendOutcome::Accepted(_) => None,
            SpendOutcome::Rejected(rejection) => Some(rejection),
        }
    }
}

/// Notification emitted for every ledger mutation attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum LedgerEvent {
    Deposited(DepositReceipt),
    Spent(SpendReceipt),
    SpendRejected { rejection: Rejection, balance: f64 },
}

impl fmt::Display for LedgerEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LedgerEvent::Deposited(receipt) => write!(
                f,
                "Deposited: {}. New balance: {}",
                receipt.amount, receipt.balance
            ),
            LedgerEvent::Spent(receipt) => write!(
                f,
                "Spent: {} on {}. Remaining balance: {}",
                receipt.transaction.amount, receipt.transaction.category, receipt.balance
            ),
            LedgerEvent::SpendRejected { rejection, .. } => write!(f, "{rejection}"),
        }
    }
}

/// Receives ledger events; register one with [`Ledger::set_observer`](super::Ledger::set_observer).
pub trait LedgerObserver {
    fn on_event(&mut self, event: &LedgerEvent);
}

impl<F> LedgerObserver for F
where
    F: FnMut(&LedgerEvent),
{
    fn on_event(&mut self, event: &LedgerEvent) {
        self(event)
    }
}
