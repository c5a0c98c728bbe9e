use std::path::{Path, PathBuf};

use bikeshare_dashboard::data::loader::load_file;
use bikeshare_dashboard::pipeline::DEFAULT_HOURLY_SEASON;
use bikeshare_dashboard::{render, DashboardView, DateRange, Season, Table};
use chrono::NaiveDate;

use crate::color::ChartColors;

/// File shown at the top of the side panel when it sits next to the data.
const SIDEBAR_IMAGE: &str = "img.png";

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded dataset (None until a file loads).
    pub table: Option<Table>,

    /// Where `table` came from.
    pub data_path: Option<PathBuf>,

    /// Optional decoration for the side panel.
    pub sidebar_image: Option<PathBuf>,

    /// Date-picker values.  Not validated until the next render.
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,

    /// Season whose hourly pattern is drawn.
    pub hourly_season: Season,

    /// Result of the last successful render.
    pub view: Option<DashboardView>,

    pub colors: ChartColors,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            table: None,
            data_path: None,
            sidebar_image: None,
            start_date: NaiveDate::default(),
            end_date: NaiveDate::default(),
            hourly_season: DEFAULT_HOURLY_SEASON,
            view: None,
            colors: ChartColors::default(),
            status_message: None,
        }
    }
}

impl AppState {
    /// Load `path` and make it the current dataset.  Errors land in
    /// `status_message`; the previous dataset (if any) is dropped.
    pub fn load(&mut self, path: &Path) {
        match load_file(path) {
            Ok(table) => self.set_table(table, path),
            Err(e) => {
                log::error!("Failed to load {}: {e}", path.display());
                self.table = None;
                self.view = None;
                self.data_path = Some(path.to_path_buf());
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    /// Ingest a newly loaded table, select its full date range and render.
    pub fn set_table(&mut self, table: Table, path: &Path) {
        if let Some((min, max)) = table.date_bounds() {
            self.start_date = min;
            self.end_date = max;
        }
        self.sidebar_image = path
            .parent()
            .map(|dir| dir.join(SIDEBAR_IMAGE))
            .filter(|p| p.is_file());
        self.data_path = Some(path.to_path_buf());
        self.table = Some(table);
        self.recompute();
    }

    /// Dataset bounds, used to clamp the pickers.
    pub fn date_bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        self.table.as_ref().and_then(Table::date_bounds)
    }

    /// Apply new picker values, clamped into the dataset bounds.
    pub fn set_range(&mut self, start: NaiveDate, end: NaiveDate) {
        let (start, end) = match self.date_bounds() {
            Some((min, max)) => (start.clamp(min, max), end.clamp(min, max)),
            None => (start, end),
        };
        self.start_date = start;
        self.end_date = end;
        self.recompute();
    }

    /// Back to the full dataset range.
    pub fn reset_range(&mut self) {
        if let Some((min, max)) = self.date_bounds() {
            self.set_range(min, max);
        }
    }

    pub fn set_hourly_season(&mut self, season: Season) {
        self.hourly_season = season;
        self.recompute();
    }

    /// One synchronous render pass.  Any error replaces the view.
    pub fn recompute(&mut self) {
        let Some(table) = &self.table else {
            self.view = None;
            return;
        };
        if table.is_empty() {
            self.view = None;
            self.status_message = Some("The dataset contains no rows.".to_string());
            return;
        }

        let result = DateRange::new(self.start_date, self.end_date)
            .and_then(|range| render(table, &range, self.hourly_season));

        match result {
            Ok(view) => {
                self.view = Some(view);
                self.status_message = None;
            }
            Err(e) => {
                log::warn!("Render failed: {e}");
                self.view = None;
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bikeshare_dashboard::{DayOfWeek, Record};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn table() -> Table {
        let rec = |date, hour, cnt, season| Record {
            date,
            hour,
            cnt,
            weekday: DayOfWeek::Friday,
            working_day: true,
            season,
        };
        Table::from_records(vec![
            rec(date(2011, 9, 23), 8, 120, Season::Fall),
            rec(date(2011, 9, 23), 18, 300, Season::Fall),
            rec(date(2011, 12, 23), 18, 90, Season::Winter),
        ])
    }

    fn loaded() -> AppState {
        let mut state = AppState::default();
        state.set_table(table(), Path::new("/nonexistent/main_data.csv"));
        state
    }

    #[test]
    fn test_set_table_selects_full_range() {
        let state = loaded();
        assert_eq!(state.start_date, date(2011, 9, 23));
        assert_eq!(state.end_date, date(2011, 12, 23));
        assert!(state.sidebar_image.is_none());
        let view = state.view.as_ref().unwrap();
        assert_eq!(view.metrics.total_usage, 510);
        assert_eq!(view.metrics.peak_hour, 18);
        assert!(state.status_message.is_none());
    }

    #[test]
    fn test_inverted_range_shows_error() {
        let mut state = loaded();
        state.set_range(date(2011, 12, 1), date(2011, 10, 1));
        assert!(state.view.is_none());
        assert!(state
            .status_message
            .as_deref()
            .unwrap()
            .contains("Invalid date range"));
    }

    #[test]
    fn test_range_is_clamped() {
        let mut state = loaded();
        state.set_range(date(2000, 1, 1), date(2030, 1, 1));
        assert_eq!(state.start_date, date(2011, 9, 23));
        assert_eq!(state.end_date, date(2011, 12, 23));
        assert!(state.view.is_some());
    }

    #[test]
    fn test_season_without_rows_reports_error_then_recovers() {
        let mut state = loaded();
        state.set_hourly_season(Season::Spring);
        assert!(state.view.is_none());
        assert!(state.status_message.is_some());

        state.set_hourly_season(Season::Winter);
        assert_eq!(state.view.as_ref().unwrap().metrics.peak_hour, 18);
        assert!(state.status_message.is_none());
    }

    #[test]
    fn test_load_missing_file_sets_status() {
        let mut state = AppState::default();
        state.load(Path::new("/nonexistent/main_data.csv"));
        assert!(state.table.is_none());
        assert!(state
            .status_message
            .as_deref()
            .unwrap()
            .contains("not found"));
    }
}
