use chrono::NaiveDate;
use serde::Serialize;

use super::model::{Season, Table};
use crate::error::{DashboardError, Result};

// ---------------------------------------------------------------------------
// Date range predicate
// ---------------------------------------------------------------------------

/// Closed interval `[start, end]` of calendar days.
///
/// Construction rejects `start > end`; bounds are never swapped silently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(DashboardError::InvalidRange { start, end });
        }
        Ok(DateRange { start, end })
    }

    /// The range spanning every row of `table`, `None` when it is empty.
    pub fn full(table: &Table) -> Option<Self> {
        table
            .date_bounds()
            .map(|(start, end)| DateRange { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Inclusive on both ends.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

// ---------------------------------------------------------------------------
// Filters: each returns a fresh table, source order preserved
// ---------------------------------------------------------------------------

/// Rows whose date lies in `range`.  An empty result is valid.
pub fn filter_by_date(table: &Table, range: &DateRange) -> Table {
    // Rows are date-sorted, so the match is one contiguous run.
    let records = table.records();
    let lo = records.partition_point(|r| r.date < range.start);
    let hi = records.partition_point(|r| r.date <= range.end);
    Table::from_sorted(records[lo..hi].to_vec())
}

/// Rows of a single season; used to restrict input to the hourly aggregate.
pub fn filter_by_season(table: &Table, season: Season) -> Table {
    Table::from_sorted(
        table
            .iter()
            .filter(|r| r.season == season)
            .cloned()
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::{date, record};
    use crate::data::model::Record;

    fn sample() -> Table {
        Table::from_records(vec![
            record(date(2011, 1, 1), 0, 1, Season::Spring),
            record(date(2011, 1, 1), 1, 2, Season::Spring),
            record(date(2011, 1, 2), 0, 3, Season::Spring),
            record(date(2011, 6, 1), 0, 4, Season::Summer),
            record(date(2011, 9, 30), 7, 5, Season::Fall),
            record(date(2011, 10, 1), 8, 6, Season::Fall),
        ])
    }

    #[test]
    fn test_inverted_range_is_error() {
        let err = DateRange::new(date(2011, 2, 1), date(2011, 1, 1)).unwrap_err();
        assert!(matches!(err, DashboardError::InvalidRange { .. }));
    }

    #[test]
    fn test_single_day_range() {
        let t = sample();
        let (min, _) = t.date_bounds().unwrap();
        let day = DateRange::new(min, min).unwrap();
        let out = filter_by_date(&t, &day);
        let counts: Vec<u32> = out.iter().map(|r| r.cnt).collect();
        assert_eq!(counts, vec![1, 2]);
    }

    #[test]
    fn test_filter_is_sound_complete_and_ordered() {
        let t = sample();
        let range = DateRange::new(date(2011, 1, 2), date(2011, 9, 30)).unwrap();
        let out = filter_by_date(&t, &range);

        assert!(out.iter().all(|r| range.contains(r.date)));
        let expected: Vec<&Record> = t.iter().filter(|r| range.contains(r.date)).collect();
        let got: Vec<&Record> = out.iter().collect();
        assert_eq!(got, expected);
    }

    #[test]
    fn test_range_without_rows_is_empty() {
        let t = sample();
        let range = DateRange::new(date(2011, 3, 1), date(2011, 3, 31)).unwrap();
        assert!(filter_by_date(&t, &range).is_empty());
    }

    #[test]
    fn test_filter_leaves_source_untouched() {
        let t = sample();
        let before = t.clone();
        let range = DateRange::new(date(2011, 1, 1), date(2011, 1, 1)).unwrap();
        let _ = filter_by_date(&t, &range);
        assert_eq!(t, before);
    }

    #[test]
    fn test_season_filter() {
        let t = sample();
        let fall = filter_by_season(&t, Season::Fall);
        assert_eq!(fall.len(), 2);
        assert!(fall.iter().all(|r| r.season == Season::Fall));
        assert!(filter_by_season(&t, Season::Winter).is_empty());
    }

    #[test]
    fn test_full_range() {
        let t = sample();
        let full = DateRange::full(&t).unwrap();
        assert_eq!(full.start(), date(2011, 1, 1));
        assert_eq!(full.end(), date(2011, 10, 1));
        assert_eq!(filter_by_date(&t, &full), t);
        assert_eq!(DateRange::full(&Table::default()), None);
    }
}
