//! Ledger state: balance, the append-only transaction log and the category index.

pub mod category;
pub mod event;
#[allow(clippy::module_inception)]
pub mod ledger;
pub mod transaction;

pub use category::{CategoryIndex, CategoryTotal};
pub use event::{
    DepositReceipt, LedgerEvent, LedgerObserver, Rejection, SpendOutcome, SpendReceipt,
};
pub use ledger::Ledger;
pub use transaction::{Transaction, TransactionStore};
