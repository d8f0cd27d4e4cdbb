use rworklog::models::DailyReport;
use rworklog::stats::Stats;
use rworklog::utils::mins2hm;

mod common;
use common::sample_record;

#[test]
fn test_stats_totals() {
    let a = sample_record("A社", "保守", "09:00", "12:00", 180);
    let b = sample_record("B社", "保守", "13:00", "17:00", 240);
    let c = sample_record("A社", "開発", "17:00", "18:00", 60);
    let records = vec![a.clone(), b, c];
    let reports = vec![DailyReport::shell("テスト太郎", a.date, &records)];

    let s = Stats::compute(&records, &reports);

    assert_eq!(s.records, 3);
    assert_eq!(s.total_minutes, 480);
    assert_eq!(s.clients, 2);
    assert_eq!(s.work_types, 2);
    assert_eq!(s.reports, 1);
}

#[test]
fn test_unknown_durations_count_as_zero() {
    let mut a = sample_record("A社", "保守", "09:00", "12:00", 180);
    a.duration = None;

    let s = Stats::compute(&[a], &[]);

    assert_eq!(s.total_minutes, 0);
    assert_eq!(s.reports, 0);
}

#[test]
fn test_minutes_formatting() {
    assert_eq!(mins2hm(480), "8h 0m");
    assert_eq!(mins2hm(135), "2h 15m");
    assert_eq!(mins2hm(-90), "-1h 30m");
}
