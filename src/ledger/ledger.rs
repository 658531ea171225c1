use std::{fmt, sync::Arc};

use crate::{
    errors::LedgerError,
    time::{truncate_to_seconds, Clock, SystemClock},
};

use super::{
    category::{CategoryIndex, CategoryTotal},
    event::{
        DepositReceipt, LedgerEvent, LedgerObserver, Rejection, SpendOutcome, SpendReceipt,
    },
    transaction::{Transaction, TransactionStore},
};

const CONSISTENCY_TOLERANCE: f64 = 1e-9;

/// Owns the running balance, the transaction log and the category totals
/// derived from it.
pub struct Ledger {
    balance: f64,
    transactions: TransactionStore,
    categories: CategoryIndex,
    clock: Arc<dyn Clock>,
    observer: Option<Box<dyn LedgerObserver>>,
}

impl Ledger {
    /// Creates a ledger stamped by the system clock. The opening balance is not validated.
    pub fn new(initial_balance: f64) -> Self {
        Self::with_clock(initial_balance, Arc::new(SystemClock))
    }

    pub fn with_clock(initial_balance: f64, clock: Arc<dyn Clock>) -> Self {
        Self {
            balance: initial_balance,
            transactions: TransactionStore::new(),
            categories: CategoryIndex::new(),
            clock,
            observer: None,
        }
    }

    /// Rebuilds a ledger from persisted state, deriving category totals from the log.
    pub fn from_parts(
        balance: f64,
        transactions: impl IntoIterator<Item = Transaction>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let transactions: TransactionStore = transactions.into_iter().collect();
        let categories = CategoryIndex::from_transactions(&transactions);
        Self {
            balance,
            transactions,
            categories,
            clock,
            observer: None,
        }
    }

    pub fn set_observer(&mut self, observer: impl LedgerObserver + 'static) {
        self.observer = Some(Box::new(observer));
    }

    pub fn balance(&self) -> f64 {
        self.balance
    }

    pub fn transactions(&self) -> &TransactionStore {
        &self.transactions
    }

    pub fn category_totals(&self) -> &CategoryIndex {
        &self.categories
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    pub fn deposit(&mut self, amount: f64) -> Result<DepositReceipt, LedgerError> {
        if !amount.is_finite() || amount <= 0.0 {
            tracing::warn!(amount, "rejected deposit with invalid amount");
            return Err(LedgerError::InvalidAmount(amount));
        }
        self.balance += amount;
        let receipt = DepositReceipt {
            amount,
            balance: self.balance,
        };
        tracing::info!(amount, balance = self.balance, "deposit recorded");
        self.emit(LedgerEvent::Deposited(receipt.clone()));
        Ok(receipt)
    }

    /// Debits `amount` under `category` when the balance covers it.
    ///
    /// A refusal is an ordinary outcome, not an error: callers branch on
    /// [`SpendOutcome::is_accepted`].
    pub fn spend(&mut self, amount: f64, category: &str) -> SpendOutcome {
        let outcome = match self.check_spend(amount, category) {
            Err(rejection) => {
                tracing::warn!(amount, category, balance = self.balance, %rejection, "spend rejected");
                SpendOutcome::Rejected(rejection)
            }
            Ok(()) => {
                let timestamp = truncate_to_seconds(self.clock.now());
                let transaction = Transaction::new(category, amount, timestamp);
                self.balance -= amount;
                self.categories.record(category, amount);
                self.transactions.push(transaction.clone());
                tracing::info!(amount, category, balance = self.balance, "spend recorded");
                SpendOutcome::Accepted(SpendReceipt {
                    transaction,
                    balance: self.balance,
                })
            }
        };

        let event = match &outcome {
            SpendOutcome::Accepted(receipt) => LedgerEvent::Spent(receipt.clone()),
            SpendOutcome::Rejected(rejection) => LedgerEvent::SpendRejected {
                rejection: rejection.clone(),
                balance: self.balance,
            },
        };
        self.emit(event);
        outcome
    }

    #[allow(clippy::neg_cmp_op_on_partial_ord)]
    fn check_spend(&self, amount: f64, category: &str) -> Result<(), Rejection> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(Rejection::InvalidAmount { requested: amount });
        }
        if category.trim().is_empty() {
            return Err(Rejection::EmptyCategory);
        }
        if category.chars().any(char::is_control) {
            return Err(Rejection::InvalidCategory {
                category: category.to_string(),
            });
        }
        // Written as a negation so a NaN balance never covers a spend.
        if !(self.balance >= amount) {
            return Err(Rejection::InsufficientBalance {
                requested: amount,
                balance: self.balance,
            });
        }
        Ok(())
    }

    /// Recomputes category totals from the log and compares them with the cached index.
    pub fn verify_consistency(&self) -> Result<(), LedgerError> {
        let expected = CategoryIndex::from_transactions(&self.transactions);
        check_totals(expected.iter(), &self.categories)?;
        if expected.len() != self.categories.len() {
            return Err(LedgerError::Inconsistent(format!(
                "expected {} categories, index holds {}",
                expected.len(),
                self.categories.len()
            )));
        }
        Ok(())
    }

    fn emit(&mut self, event: LedgerEvent) {
        if let Some(observer) = self.observer.as_mut() {
            observer.on_event(&event);
        }
    }
}

/// Checks every entry of `expected` against `index` within a relative tolerance.
pub(crate) fn check_totals<'a>(
    expected: impl IntoIterator<Item = &'a CategoryTotal>,
    index: &CategoryIndex,
) -> Result<(), LedgerError> {
    for entry in expected {
        let Some(actual) = index.get(&entry.name) else {
            return Err(LedgerError::Inconsistent(format!(
                "category `{}` is missing",
                entry.name
            )));
        };
        let scale = entry.total.abs().max(actual.abs()).max(1.0);
        if (entry.total - actual).abs() > CONSISTENCY_TOLERANCE * scale {
            return Err(LedgerError::Inconsistent(format!(
                "category `{}` totals {} but transactions sum to {}",
                entry.name, actual, entry.total
            )));
        }
    }
    Ok(())
}

impl fmt::Debug for Ledger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ledger")
            .field("balance", &self.balance)
            .field("transactions", &self.transactions)
            .field("categories", &self.categories)
            .field("observer", &self.observer.is_some())
            .finish()
    }
}
