//! Grouped summaries over a [`Table`].
//!
//! All three aggregates are pure and key their output with a `BTreeMap`, so
//! each group appears once and iteration follows key order.  Groups with no
//! rows are absent rather than zero.

use std::collections::BTreeMap;

use super::model::{DayOfWeek, Season, Table};
use crate::error::{DashboardError, Result};

/// Mean usage per weekday.
pub type WeekdayAggregate = BTreeMap<DayOfWeek, f64>;

/// Mean usage per `(hour, working_day)`.
pub type HourlyAggregate = BTreeMap<(u8, bool), f64>;

/// Total usage per season.
pub type SeasonAggregate = BTreeMap<Season, u64>;

#[derive(Debug, Default, Clone, Copy)]
struct Accumulator {
    sum: u64,
    count: u64,
}

impl Accumulator {
    fn add(&mut self, cnt: u32) {
        self.sum += u64::from(cnt);
        self.count += 1;
    }

    fn mean(self) -> f64 {
        self.sum as f64 / self.count as f64
    }
}

fn group_mean<K: Ord>(groups: BTreeMap<K, Accumulator>) -> BTreeMap<K, f64> {
    groups.into_iter().map(|(k, acc)| (k, acc.mean())).collect()
}

/// Arithmetic mean of `cnt` for each weekday present.  At most 7 entries.
pub fn weekday_average(table: &Table) -> WeekdayAggregate {
    let mut groups: BTreeMap<DayOfWeek, Accumulator> = BTreeMap::new();
    for r in table {
        groups.entry(r.weekday).or_default().add(r.cnt);
    }
    group_mean(groups)
}

/// Arithmetic mean of `cnt` for each `(hour, working_day)` pair present.
/// At most 48 entries.
///
/// The caller restricts the table to one season first
/// (see [`filter_by_season`](super::filter::filter_by_season)).
pub fn hourly_average(table: &Table) -> HourlyAggregate {
    let mut groups: BTreeMap<(u8, bool), Accumulator> = BTreeMap::new();
    for r in table {
        groups.entry((r.hour, r.working_day)).or_default().add(r.cnt);
    }
    group_mean(groups)
}

/// Sum of `cnt` for each season present.  At most 4 entries.
pub fn season_total(table: &Table) -> SeasonAggregate {
    let mut totals = SeasonAggregate::new();
    for r in table {
        *totals.entry(r.season).or_default() += u64::from(r.cnt);
    }
    totals
}

/// Hour with the highest mean usage in `hourly`.
///
/// Ties go to the first key in `(hour, working_day)` order.
pub fn peak_hour(hourly: &HourlyAggregate) -> Result<u8> {
    let mut best: Option<(u8, f64)> = None;
    for (&(hour, _), &mean) in hourly {
        match best {
            Some((_, top)) if mean <= top => {}
            _ => best = Some((hour, mean)),
        }
    }
    best.map(|(hour, _)| hour)
        .ok_or(DashboardError::EmptyAggregate("peak hour"))
}
