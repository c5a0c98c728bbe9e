//! End-to-end checks: CSV on disk → load → filter → aggregates → render.

use std::io::Write;
use std::path::PathBuf;

use bikeshare_dashboard::data::aggregate::{hourly_average, peak_hour, season_total, weekday_average};
use bikeshare_dashboard::data::filter::{filter_by_date, filter_by_season};
use bikeshare_dashboard::data::loader::load_file;
use bikeshare_dashboard::{render, DashboardError, DateRange, DayOfWeek, Season};
use chrono::NaiveDate;
use tempfile::TempDir;

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn write_dataset(dir: &TempDir, rows: &[&str]) -> PathBuf {
    let path = dir.path().join("main_data.csv");
    let mut f = std::fs::File::create(&path).unwrap();
    writeln!(f, "dteday,hr,cnt,weekday_day,workingday_day,season_day,temp").unwrap();
    for row in rows {
        writeln!(f, "{row},0.5").unwrap();
    }
    path
}

/// Two years of rows, deliberately out of order on disk.
fn fixture(dir: &TempDir) -> PathBuf {
    write_dataset(
        dir,
        &[
            "2012-10-02,8,500,2,1,4",
            "2011-09-23,8,300,5,1,3",
            "2011-09-23,17,450,5,1,3",
            "2011-09-24,13,200,6,0,3",
            "2011-01-01,0,16,6,0,1",
            "2011-01-01,1,40,6,0,1",
            "2011-06-01,12,150,3,1,2",
        ],
    )
}

#[test]
fn spec_scenario_weekday_mean_on_single_day() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_dataset(&dir, &["2024-01-01,5,10,1,1,1", "2024-01-01,5,20,1,1,1"]);
    let table = load_file(&path).unwrap();

    let range = DateRange::new(date("2024-01-01"), date("2024-01-01")).unwrap();
    let agg = weekday_average(&filter_by_date(&table, &range));

    assert_eq!(agg.len(), 1);
    assert_eq!(agg[&DayOfWeek::Monday], 15.0);
}

#[test]
fn spec_scenario_season_totals() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_dataset(
        &dir,
        &["2011-09-01,0,10,4,1,3", "2011-09-01,1,20,4,1,3", "2011-12-30,0,5,5,1,4"],
    );
    let table = load_file(&path).unwrap();
    let totals = season_total(&table);

    assert_eq!(totals.len(), 2);
    assert_eq!(totals[&Season::Fall], 30);
    assert_eq!(totals[&Season::Winter], 5);
}

#[test]
fn spec_scenario_empty_fall_subset_has_no_peak() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_dataset(&dir, &["2011-01-01,0,16,6,0,1"]);
    let table = load_file(&path).unwrap();

    let hourly = hourly_average(&filter_by_season(&table, Season::Fall));
    assert!(matches!(
        peak_hour(&hourly),
        Err(DashboardError::EmptyAggregate(_))
    ));
}

#[test]
fn loaded_table_is_sorted_by_date() {
    let dir = tempfile::tempdir().unwrap();
    let table = load_file(&fixture(&dir)).unwrap();
    assert!(table.records().windows(2).all(|w| w[0].date <= w[1].date));
    assert_eq!(
        table.date_bounds(),
        Some((date("2011-01-01"), date("2012-10-02")))
    );
}

#[test]
fn first_day_boundary_filter() {
    let dir = tempfile::tempdir().unwrap();
    let table = load_file(&fixture(&dir)).unwrap();
    let (min, _) = table.date_bounds().unwrap();

    let out = filter_by_date(&table, &DateRange::new(min, min).unwrap());
    assert_eq!(out.len(), 2);
    assert!(out.iter().all(|r| r.date == min));
    let hours: Vec<u8> = out.iter().map(|r| r.hour).collect();
    assert_eq!(hours, vec![0, 1]);
}

#[test]
fn aggregate_keys_stay_in_domain() {
    let dir = tempfile::tempdir().unwrap();
    let table = load_file(&fixture(&dir)).unwrap();

    assert!(weekday_average(&table).keys().all(|d| d.code() <= 6));
    assert!(hourly_average(&table).keys().all(|(h, _)| *h <= 23));
    assert!(season_total(&table)
        .keys()
        .all(|s| (1..=4).contains(&s.code())));
}

#[test]
fn render_first_year() {
    let dir = tempfile::tempdir().unwrap();
    let table = load_file(&fixture(&dir)).unwrap();
    let range = DateRange::new(date("2011-01-01"), date("2011-12-31")).unwrap();

    let view = render(&table, &range, Season::Fall).unwrap();
    assert_eq!(view.rows, 6);
    assert_eq!(view.metrics.total_usage, 16 + 40 + 150 + 300 + 450 + 200);
    assert_eq!(view.metrics.peak_hour, 17);
    assert_eq!(view.hourly[&(17, true)], 450.0);
    assert_eq!(view.hourly[&(13, false)], 200.0);
    assert!(!view.season.contains_key(&Season::Winter));
    assert_eq!(view.weekday[&DayOfWeek::Saturday], (16.0 + 40.0 + 200.0) / 3.0);
}

#[test]
fn render_range_without_fall_fails() {
    let dir = tempfile::tempdir().unwrap();
    let table = load_file(&fixture(&dir)).unwrap();
    let range = DateRange::new(date("2011-01-01"), date("2011-06-30")).unwrap();

    let err = render(&table, &range, Season::Fall).unwrap_err();
    assert!(matches!(err, DashboardError::EmptyAggregate(_)));
}

#[test]
fn inverted_range_is_rejected() {
    let err = DateRange::new(date("2012-01-02"), date("2012-01-01")).unwrap_err();
    assert!(matches!(err, DashboardError::InvalidRange { .. }));
}

#[test]
fn missing_file_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_file(&dir.path().join("main_data.csv")).unwrap_err();
    assert!(matches!(err, DashboardError::NotFound { .. }));
}
