mod common;

use std::{fs, sync::Arc};

use chrono::Duration;
use common::{fixed_ledger, scratch_dir, START};
use wallet_core::{
    errors::LedgerError,
    report::{PeriodFilter, ReportEngine},
    storage::{load_full_dump, save_full_dump, save_report},
    time::FixedClock,
};

#[test]
fn full_dump_round_trips_through_a_file() {
    let dir = scratch_dir();
    let path = dir.join("wallet.txt");
    let (mut ledger, clock) = fixed_ledger(250.0);
    ledger.spend(19.99, "groceries");
    clock.advance(Duration::hours(3));
    ledger.spend(60.0, "phone bill");
    ledger.deposit(10.0).unwrap();
    ledger.spend(4.5, "groceries");

    save_full_dump(&ledger, &path).expect("save dump");
    let text = fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("Balance: "));
    assert!(text.contains("\nphone bill 60 1700010800\n"));

    let restored = load_full_dump(&path, Arc::new(FixedClock::at_unix(START))).expect("load dump");
    assert_eq!(restored.balance(), ledger.balance());
    assert_eq!(
        restored.transactions().as_slice(),
        ledger.transactions().as_slice()
    );
    assert_eq!(
        restored.category_totals().sorted_by_name(),
        ledger.category_totals().sorted_by_name()
    );
}

#[test]
fn unwritable_sink_reports_the_path_and_keeps_existing_file() {
    let dir = scratch_dir();
    let (mut ledger, _clock) = fixed_ledger(10.0);
    ledger.spend(1.0, "tea");

    let missing = dir.join("no-such-dir").join("wallet.txt");
    match save_full_dump(&ledger, &missing) {
        Err(LedgerError::SinkUnavailable { path, .. }) => assert_eq!(path, missing),
        other => panic!("unexpected result: {other:?}"),
    }

    let target = dir.join("report.txt");
    fs::write(&target, "previous contents").unwrap();
    fs::create_dir_all(dir.join("report.txt.tmp")).unwrap();
    let engine = ReportEngine::new(&ledger);
    assert!(matches!(
        save_report("week", &engine, &target),
        Err(LedgerError::SinkUnavailable { .. })
    ));
    assert_eq!(fs::read_to_string(&target).unwrap(), "previous contents");
    assert_eq!(ledger.balance(), 9.0, "ledger is untouched by failed writes");
}

#[test]
fn saved_monthly_report_lists_rankings() {
    let dir = scratch_dir();
    let path = dir.join("month.txt");
    let (mut ledger, _clock) = fixed_ledger(500.0);
    for (amount, category) in [(40.0, "food"), (120.0, "rent"), (15.0, "fun"), (40.0, "fun")] {
        ledger.spend(amount, category);
    }

    save_report("month", &ReportEngine::new(&ledger), &path).expect("save report");
    let text = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "Financial Report - month");
    assert_eq!(lines[1], "Balance: 285");
    assert!(lines[2].starts_with("Generated at: 2023-11-14T22:13:20"));
    assert_eq!(
        &lines[3..],
        &[
            "Categories report:",
            "food: 40",
            "fun: 55",
            "rent: 120",
            "Top 3 expenses:",
            "1. rent: 120",
            "2. food: 40",
            "3. fun: 40",
            "Top 3 categories:",
            "1. rent: 120",
            "2. fun: 55",
            "3. food: 40",
        ]
    );
}

#[test]
fn trailing_filter_narrows_saved_reports() {
    let dir = scratch_dir();
    let path = dir.join("week.txt");
    let (mut ledger, clock) = fixed_ledger(500.0);
    ledger.spend(99.0, "holiday");
    clock.advance(Duration::days(8));
    ledger.spend(3.0, "coffee");

    let engine = ReportEngine::new(&ledger)
        .with_filter(PeriodFilter::Trailing)
        .with_top_n(2);
    save_report("week", &engine, &path).unwrap();
    let text = fs::read_to_string(&path).unwrap();
    assert!(text.contains("Categories report:\ncoffee: 3\nTop 2 expenses:\n1. coffee: 3\n"));
    assert!(!text.contains("holiday"));
}
