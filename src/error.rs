use std::path::PathBuf;

use chrono::NaiveDate;
use thiserror::Error;

/// Errors produced while loading, filtering or aggregating the dataset.
///
/// Every variant is terminal for the render pass that raised it; the UI shows
/// the message and waits for the next interaction.
#[derive(Error, Debug)]
pub enum DashboardError {
    /// The input path does not resolve to an existing readable file.
    #[error("Data file not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// A row, column or cell could not be interpreted.
    #[error("Parse error ({context}): {message}")]
    Parse { context: String, message: String },

    /// The file extension maps to no known loader.
    #[error("Unsupported file extension: .{0}")]
    UnsupportedFormat(String),

    /// The requested interval starts after it ends.
    #[error("Invalid date range: {start} is after {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    /// A maximum or mean was requested over zero rows.
    #[error("Cannot compute {0} over an empty selection")]
    EmptyAggregate(&'static str),
}

impl DashboardError {
    pub(crate) fn parse(context: impl Into<String>, message: impl ToString) -> Self {
        DashboardError::Parse {
            context: context.into(),
            message: message.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, DashboardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_mentions_path() {
        let err = DashboardError::NotFound {
            path: PathBuf::from("dashboard/main_data.csv"),
        };
        assert_eq!(
            err.to_string(),
            "Data file not found: dashboard/main_data.csv"
        );
    }

    #[test]
    fn test_invalid_range_message() {
        let err = DashboardError::InvalidRange {
            start: NaiveDate::from_ymd_opt(2012, 5, 2).unwrap(),
            end: NaiveDate::from_ymd_opt(2012, 5, 1).unwrap(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid date range: 2012-05-02 is after 2012-05-01"
        );
    }

    #[test]
    fn test_parse_helper_builds_context() {
        let err = DashboardError::parse("row 3, column 'hr'", "'25' is not an hour");
        assert_eq!(err.to_string(), "Parse error (row 3, column 'hr'): '25' is not an hour");
    }

    #[test]
    fn test_empty_aggregate_message() {
        let err = DashboardError::EmptyAggregate("peak hour");
        assert_eq!(err.to_string(), "Cannot compute peak hour over an empty selection");
    }
}
