#![allow(dead_code)]

use std::{
    path::PathBuf,
    sync::{Arc, Mutex},
};

use once_cell::sync::Lazy;
use tempfile::TempDir;
use wallet_core::{ledger::Ledger, time::FixedClock};

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

pub const START: i64 = 1_700_000_000;

/// Creates an isolated directory that outlives the calling test.
pub fn scratch_dir() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let path = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    path
}

/// Ledger driven by a clock the test controls.
pub fn fixed_ledger(initial_balance: f64) -> (Ledger, Arc<FixedClock>) {
    let clock = Arc::new(FixedClock::at_unix(START));
    let ledger = Ledger::with_clock(initial_balance, clock.clone());
    (ledger, clock)
}

/// Small deterministic generator for replaying pseudo-random operation sequences.
pub struct Lcg(u64);

impl Lcg {
    pub fn new(seed: u64) -> Self {
        Self(seed)
    }

    pub fn next_u64(&mut self) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        self.0 >> 33
    }

    /// Whole-cent amount in `[0.01, max_cents / 100]`.
    pub fn amount(&mut self, max_cents: u64) -> f64 {
        (self.next_u64() % max_cents + 1) as f64 / 100.0
    }

    pub fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[(self.next_u64() % items.len() as u64) as usize]
    }
}
