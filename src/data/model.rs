use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::{DashboardError, Result};

// ---------------------------------------------------------------------------
// Season – categorical code 1..=4
// ---------------------------------------------------------------------------

/// Meteorological season as coded in the `season_day` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Season {
    Spring = 1,
    Summer = 2,
    Fall = 3,
    Winter = 4,
}

impl Season {
    pub const ALL: [Season; 4] = [Season::Spring, Season::Summer, Season::Fall, Season::Winter];

    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(Season::Spring),
            2 => Some(Season::Summer),
            3 => Some(Season::Fall),
            4 => Some(Season::Winter),
            _ => None,
        }
    }

    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn label(self) -> &'static str {
        match self {
            Season::Spring => "Spring",
            Season::Summer => "Summer",
            Season::Fall => "Fall",
            Season::Winter => "Winter",
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// DayOfWeek – ordinal 0 = Sunday .. 6 = Saturday
// ---------------------------------------------------------------------------

/// Weekday as coded in the `weekday_day` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum DayOfWeek {
    Sunday = 0,
    Monday = 1,
    Tuesday = 2,
    Wednesday = 3,
    Thursday = 4,
    Friday = 5,
    Saturday = 6,
}

impl DayOfWeek {
    pub const ALL: [DayOfWeek; 7] = [
        DayOfWeek::Sunday,
        DayOfWeek::Monday,
        DayOfWeek::Tuesday,
        DayOfWeek::Wednesday,
        DayOfWeek::Thursday,
        DayOfWeek::Friday,
        DayOfWeek::Saturday,
    ];

    pub fn from_code(code: i64) -> Option<Self> {
        usize::try_from(code)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
    }

    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn label(self) -> &'static str {
        match self {
            DayOfWeek::Sunday => "Sunday",
            DayOfWeek::Monday => "Monday",
            DayOfWeek::Tuesday => "Tuesday",
            DayOfWeek::Wednesday => "Wednesday",
            DayOfWeek::Thursday => "Thursday",
            DayOfWeek::Friday => "Friday",
            DayOfWeek::Saturday => "Saturday",
        }
    }

    /// Three-letter axis label.
    pub fn short_label(self) -> &'static str {
        &self.label()[..3]
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Record – one row of the dataset
// ---------------------------------------------------------------------------

/// One hourly observation, validated at load time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Calendar day (`dteday`).
    pub date: NaiveDate,
    /// Hour of day, 0..=23 (`hr`).
    pub hour: u8,
    /// Rentals in that hour (`cnt`).
    pub cnt: u32,
    /// `weekday_day`.
    pub weekday: DayOfWeek,
    /// `workingday_day`.
    pub working_day: bool,
    /// `season_day`.
    pub season: Season,
}

// ---------------------------------------------------------------------------
// Table – the ordered set of records
// ---------------------------------------------------------------------------

/// Records ordered ascending by date. Never mutated after construction;
/// filters produce new tables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    records: Vec<Record>,
}

impl Table {
    /// Build a table, sorting by date. The sort is stable so rows sharing a
    /// date keep their source order.
    pub fn from_records(mut records: Vec<Record>) -> Self {
        records.sort_by_key(|r| r.date);
        Table { records }
    }

    /// Wrap records that are already in date order (e.g. a filtered subset).
    pub(crate) fn from_sorted(records: Vec<Record>) -> Self {
        debug_assert!(records.windows(2).all(|w| w[0].date <= w[1].date));
        Table { records }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// First and last date present, `None` for an empty table.
    pub fn date_bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        let first = self.records.first()?;
        let last = self.records.last()?;
        Some((first.date, last.date))
    }

    /// Sum of `cnt` over all rows.
    pub fn total_usage(&self) -> u64 {
        self.records.iter().map(|r| u64::from(r.cnt)).sum()
    }

    /// Arithmetic mean of `cnt`.
    pub fn mean_usage(&self) -> Result<f64> {
        if self.records.is_empty() {
            return Err(DashboardError::EmptyAggregate("mean usage"));
        }
        Ok(self.total_usage() as f64 / self.records.len() as f64)
    }
}

impl<'a> IntoIterator for &'a Table {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
