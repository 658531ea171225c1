use std::borrow::Cow;

use chrono::{DateTime, Utc};

use crate::ledger::{CategoryIndex, CategoryTotal, Ledger, Transaction};

use super::period::{Period, PeriodFilter};

pub const DEFAULT_TOP_N: usize = 3;

/// Balance and category breakdown for one period.
#[derive(Debug, Clone, PartialEq)]
pub struct PeriodReport {
    pub period: Period,
    pub balance: f64,
    pub generated_at: DateTime<Utc>,
    pub categories: Vec<CategoryTotal>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ReportOutcome {
    Period(PeriodReport),
    /// The requested report type is not a known period; nothing was reported.
    Unknown(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Ranking<T> {
    Ranked { period: Period, items: Vec<T> },
    /// The requested report type does not support rankings.
    Unknown(String),
}

impl<T> Ranking<T> {
    pub fn into_items(self) -> Option<Vec<T>> {
        match self {
            Ranking::Ranked { items, .. } => Some(items),
            Ranking::Unknown(_) => None,
        }
    }
}

/// Read-only queries over a [`Ledger`].
pub struct ReportEngine<'a> {
    ledger: &'a Ledger,
    filter: PeriodFilter,
    top_n: usize,
}

impl<'a> ReportEngine<'a> {
    pub fn new(ledger: &'a Ledger) -> Self {
        Self {
            ledger,
            filter: PeriodFilter::default(),
            top_n: DEFAULT_TOP_N,
        }
    }

    pub fn with_filter(mut self, filter: PeriodFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    pub fn ledger(&self) -> &'a Ledger {
        self.ledger
    }

    /// Ranking length used by persisted reports.
    pub fn top_n(&self) -> usize {
        self.top_n
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.ledger.clock().now()
    }

    /// All-time category totals, ordered lexicographically by name.
    pub fn summarize_by_category(&self) -> Vec<CategoryTotal> {
        self.ledger.category_totals().sorted_by_name()
    }

    pub fn generate_report(&self, report_type: &str) -> ReportOutcome {
        match report_type.parse::<Period>() {
            Ok(period) => ReportOutcome::Period(self.period_report(period)),
            Err(_) => {
                tracing::debug!(report_type, "unknown report type");
                ReportOutcome::Unknown(report_type.to_string())
            }
        }
    }

    pub fn period_report(&self, period: Period) -> PeriodReport {
        PeriodReport {
            period,
            balance: self.ledger.balance(),
            generated_at: self.now(),
            categories: self.categories_for(period).sorted_by_name(),
        }
    }

    /// The `n` largest expenses; equal amounts keep their insertion order.
    pub fn top_expenses(&self, report_type: &str, n: usize) -> Ranking<Transaction> {
        let period = match ranking_period(report_type) {
            Some(period) => period,
            None => return Ranking::Unknown(report_type.to_string()),
        };
        let mut sorted: Vec<&Transaction> = self.transactions_for(period).collect();
        sorted.sort_by(|a, b| b.amount.total_cmp(&a.amount));
        let items = sorted.into_iter().take(n).cloned().collect();
        Ranking::Ranked { period, items }
    }

    /// The `n` categories with the largest totals; ties keep first-appearance order.
    pub fn top_categories(&self, report_type: &str, n: usize) -> Ranking<CategoryTotal> {
        let period = match ranking_period(report_type) {
            Some(period) => period,
            None => return Ranking::Unknown(report_type.to_string()),
        };
        let categories = self.categories_for(period);
        let mut sorted: Vec<&CategoryTotal> = categories.iter().collect();
        sorted.sort_by(|a, b| b.total.total_cmp(&a.total));
        let items = sorted.into_iter().take(n).cloned().collect();
        Ranking::Ranked { period, items }
    }

    fn transactions_for(&self, period: Period) -> Box<dyn Iterator<Item = &'a Transaction> + 'a> {
        let store = self.ledger.transactions();
        match self.filter {
            PeriodFilter::Unfiltered => Box::new(store.iter()),
            PeriodFilter::Trailing => Box::new(store.since(self.now() - period.window())),
        }
    }

    fn categories_for(&self, period: Period) -> Cow<'a, CategoryIndex> {
        match self.filter {
            PeriodFilter::Unfiltered => Cow::Borrowed(self.ledger.category_totals()),
            PeriodFilter::Trailing => {
                Cow::Owned(CategoryIndex::from_transactions(self.transactions_for(period)))
            }
        }
    }
}

fn ranking_period(report_type: &str) -> Option<Period> {
    report_type
        .parse::<Period>()
        .ok()
        .filter(|period| period.allows_ranking())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::Duration;

    use super::*;
    use crate::time::FixedClock;

    fn ledger_with(spends: &[(f64, &str)]) -> Ledger {
        let mut ledger = Ledger::with_clock(1_000.0, Arc::new(FixedClock::at_unix(1_700_000_000)));
        for (amount, category) in spends {
            assert!(ledger.spend(*amount, category).is_accepted());
        }
        ledger
    }

    fn amounts(ranking: Ranking<Transaction>) -> Vec<(String, f64)> {
        ranking
            .into_items()
            .expect("ranked")
            .into_iter()
            .map(|txn| (txn.category, txn.amount))
            .collect()
    }

    #[test]
    fn summary_is_lexicographic() {
        let ledger = ledger_with(&[(1.0, "zoo"), (2.0, "apple"), (3.0, "Mango")]);
        let names: Vec<String> = ReportEngine::new(&ledger)
            .summarize_by_category()
            .into_iter()
            .map(|entry| entry.name)
            .collect();
        assert_eq!(names, vec!["Mango", "apple", "zoo"]);
    }

    #[test]
    fn generate_report_accepts_day_and_flags_unknown_types() {
        let ledger = ledger_with(&[(10.0, "food")]);
        let engine = ReportEngine::new(&ledger);
        match engine.generate_report("day") {
            ReportOutcome::Period(report) => {
                assert_eq!(report.period, Period::Day);
                assert_eq!(report.balance, 990.0);
                assert_eq!(report.categories, vec![CategoryTotal::new("food", 10.0)]);
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
        assert_eq!(
            engine.generate_report("year"),
            ReportOutcome::Unknown("year".to_string())
        );
    }

    #[test]
    fn top_expenses_sorts_descending_with_stable_ties() {
        let ledger = ledger_with(&[(5.0, "a"), (20.0, "b"), (5.0, "c"), (7.0, "d")]);
        let engine = ReportEngine::new(&ledger);
        assert_eq!(
            amounts(engine.top_expenses("week", 3)),
            vec![
                ("b".to_string(), 20.0),
                ("d".to_string(), 7.0),
                ("a".to_string(), 5.0)
            ]
        );
        assert_eq!(amounts(engine.top_expenses("month", 10)).len(), 4);
    }

    #[test]
    fn rankings_reject_day() {
        let ledger = ledger_with(&[(5.0, "a")]);
        let engine = ReportEngine::new(&ledger);
        assert_eq!(
            engine.top_expenses("day", 3),
            Ranking::Unknown("day".to_string())
        );
        assert_eq!(
            engine.top_categories("day", 3),
            Ranking::Unknown("day".to_string())
        );
    }

    #[test]
    fn top_categories_ties_keep_first_appearance() {
        let ledger = ledger_with(&[(10.0, "x"), (4.0, "y"), (6.0, "y"), (1.0, "z")]);
        let items = ReportEngine::new(&ledger)
            .top_categories("month", 2)
            .into_items()
            .expect("ranked");
        assert_eq!(
            items,
            vec![CategoryTotal::new("x", 10.0), CategoryTotal::new("y", 10.0)]
        );
    }

    #[test]
    fn trailing_filter_drops_old_transactions() {
        let clock = Arc::new(FixedClock::at_unix(1_700_000_000));
        let mut ledger = Ledger::with_clock(1_000.0, clock.clone());
        ledger.spend(50.0, "old");
        clock.advance(Duration::days(10));
        ledger.spend(5.0, "new");

        let unfiltered = ReportEngine::new(&ledger);
        assert_eq!(amounts(unfiltered.top_expenses("week", 3)).len(), 2);

        let trailing = ReportEngine::new(&ledger).with_filter(PeriodFilter::Trailing);
        assert_eq!(
            amounts(trailing.top_expenses("week", 3)),
            vec![("new".to_string(), 5.0)]
        );
        assert_eq!(
            amounts(trailing.top_expenses("month", 3)).len(),
            2,
            "month window still covers both spends"
        );
        match trailing.generate_report("day") {
            ReportOutcome::Period(report) => {
                assert_eq!(report.categories, vec![CategoryTotal::new("new", 5.0)]);
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }
}
