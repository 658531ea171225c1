//! Period reports and top-N rankings computed from ledger state.

pub mod engine;
pub mod period;

pub use engine::{PeriodReport, Ranking, ReportEngine, ReportOutcome, DEFAULT_TOP_N};
pub use period::{Period, PeriodFilter, UnknownPeriod};
