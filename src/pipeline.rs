use serde::Serialize;

use crate::data::aggregate::{
    hourly_average, peak_hour, season_total, weekday_average, HourlyAggregate, SeasonAggregate,
    WeekdayAggregate,
};
use crate::data::filter::{filter_by_date, filter_by_season, DateRange};
use crate::data::model::{DayOfWeek, Season, Table};
use crate::error::Result;

/// Season whose hourly pattern is shown unless the user picks another.
pub const DEFAULT_HOURLY_SEASON: Season = Season::Fall;

// ---------------------------------------------------------------------------
// Render output
// ---------------------------------------------------------------------------

/// Headline numbers for the selected range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Metrics {
    /// Sum of `cnt`.
    pub total_usage: u64,
    /// Mean `cnt` per row.
    pub mean_usage: f64,
    /// Busiest hour of the hourly aggregate.
    pub peak_hour: u8,
}

/// Everything the presentation layer draws for one date range.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub range: DateRange,
    /// Rows inside `range`.
    pub rows: usize,
    pub metrics: Metrics,
    pub weekday: WeekdayAggregate,
    pub hourly_season: Season,
    pub hourly: HourlyAggregate,
    pub season: SeasonAggregate,
}

/// One full recomputation: filter → three aggregates → metrics.
///
/// Holds no state between calls; the UI invokes it on every change of range
/// or season.  Fails with `EmptyAggregate` when the range has no rows or the
/// hourly season has none inside the range.
pub fn render(table: &Table, range: &DateRange, hourly_season: Season) -> Result<DashboardView> {
    let filtered = filter_by_date(table, range);
    let hourly = hourly_average(&filter_by_season(&filtered, hourly_season));

    log::debug!(
        "render {}..{}: {} of {} rows, {} hourly groups",
        range.start(),
        range.end(),
        filtered.len(),
        table.len(),
        hourly.len()
    );

    let metrics = Metrics {
        total_usage: filtered.total_usage(),
        mean_usage: filtered.mean_usage()?,
        peak_hour: peak_hour(&hourly)?,
    };

    Ok(DashboardView {
        range: *range,
        rows: filtered.len(),
        metrics,
        weekday: weekday_average(&filtered),
        hourly_season,
        hourly,
        season: season_total(&filtered),
    })
}

// ---------------------------------------------------------------------------
// Serializable report
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct WeekdayRow {
    pub weekday: DayOfWeek,
    pub code: u8,
    pub avg_usage: f64,
}

#[derive(Debug, Serialize)]
pub struct HourlyRow {
    pub hour: u8,
    pub working_day: bool,
    pub avg_usage: f64,
}

#[derive(Debug, Serialize)]
pub struct SeasonRow {
    pub season: Season,
    pub code: u8,
    pub total_usage: u64,
}

/// Row-shaped copy of a [`DashboardView`] for JSON output.
#[derive(Debug, Serialize)]
pub struct Report {
    pub range: DateRange,
    pub rows: usize,
    pub metrics: Metrics,
    pub hourly_season: Season,
    pub weekday: Vec<WeekdayRow>,
    pub hourly: Vec<HourlyRow>,
    pub season: Vec<SeasonRow>,
}

impl DashboardView {
    pub fn report(&self) -> Report {
        Report {
            range: self.range,
            rows: self.rows,
            metrics: self.metrics,
            hourly_season: self.hourly_season,
            weekday: self
                .weekday
                .iter()
                .map(|(&weekday, &avg_usage)| WeekdayRow {
                    weekday,
                    code: weekday.code(),
                    avg_usage,
                })
                .collect(),
            hourly: self
                .hourly
                .iter()
                .map(|(&(hour, working_day), &avg_usage)| HourlyRow {
                    hour,
                    working_day,
                    avg_usage,
                })
                .collect(),
            season: self
                .season
                .iter()
                .map(|(&season, &total_usage)| SeasonRow {
                    season,
                    code: season.code(),
                    total_usage,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::{date, record};
    use crate::error::DashboardError;

    fn table() -> Table {
        Table::from_records(vec![
            record(date(2011, 9, 1), 8, 100, Season::Summer),
            record(date(2011, 9, 30), 8, 200, Season::Fall),
            record(date(2011, 9, 30), 17, 400, Season::Fall),
            record(date(2011, 12, 30), 17, 60, Season::Winter),
        ])
    }

    #[test]
    fn test_render_full_range() {
        let t = table();
        let range = DateRange::full(&t).unwrap();
        let view = render(&t, &range, DEFAULT_HOURLY_SEASON).unwrap();

        assert_eq!(view.rows, 4);
        assert_eq!(view.metrics.total_usage, 760);
        assert_eq!(view.metrics.mean_usage, 190.0);
        assert_eq!(view.metrics.peak_hour, 17);
        assert_eq!(view.hourly.len(), 2);
        assert_eq!(view.season[&Season::Fall], 600);
        assert_eq!(view.season.len(), 3);
    }

    #[test]
    fn test_render_without_fall_rows_fails() {
        let t = table();
        let range = DateRange::new(date(2011, 12, 1), date(2011, 12, 31)).unwrap();
        assert!(matches!(
            render(&t, &range, Season::Fall),
            Err(DashboardError::EmptyAggregate("peak hour"))
        ));
        // same range, season that is present
        let view = render(&t, &range, Season::Winter).unwrap();
        assert_eq!(view.metrics.peak_hour, 17);
    }

    #[test]
    fn test_render_empty_range_fails() {
        let t = table();
        let range = DateRange::new(date(2012, 1, 1), date(2012, 1, 31)).unwrap();
        assert!(matches!(
            render(&t, &range, Season::Fall),
            Err(DashboardError::EmptyAggregate(_))
        ));
    }

    #[test]
    fn test_render_is_repeatable() {
        let t = table();
        let range = DateRange::full(&t).unwrap();
        let a = render(&t, &range, Season::Fall).unwrap();
        let b = render(&t, &range, Season::Fall).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_report_serializes() {
        let t = table();
        let range = DateRange::full(&t).unwrap();
        let report = render(&t, &range, Season::Fall).unwrap().report();
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["range"]["start"], "2011-09-01");
        assert_eq!(json["metrics"]["peak_hour"], 17);
        assert_eq!(json["hourly_season"], "Fall");
        assert_eq!(json["season"][0]["season"], "Summer");
        assert_eq!(json["season"][0]["code"], 2);
        assert_eq!(json["weekday"][0]["weekday"], "Monday");
    }
}
