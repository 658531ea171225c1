#![doc(test(attr(deny(warnings))))]

//! Wallet Core keeps a single personal-finance ledger: deposits, categorized
//! expenditures against a running balance, period reports and top-N rankings,
//! and plain-text persistence of both the raw ledger and formatted reports.

pub mod cli;
pub mod config;
pub mod errors;
pub mod ledger;
pub mod report;
pub mod storage;
pub mod time;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Wallet Core tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
    }
}
