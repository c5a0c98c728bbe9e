//! Core of the bike-sharing dashboard: load the hourly usage dataset, cut it
//! to a date range and compute the summaries the dashboard draws.

pub mod data;
pub mod error;
pub mod pipeline;

pub use data::filter::DateRange;
pub use data::model::{DayOfWeek, Record, Season, Table};
pub use error::{DashboardError, Result};
pub use pipeline::{render, DashboardView, Metrics};
