/// Data layer: core types, loading, filtering and aggregation.
///
/// Architecture:
/// ```text
///  main_data.csv / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader  │  parse file → Table (sorted by date)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter  │  date range / season → new Table
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate │  weekday mean, hourly mean, season total
///   └───────────┘
/// ```

pub mod aggregate;
pub mod filter;
pub mod loader;
pub mod model;
