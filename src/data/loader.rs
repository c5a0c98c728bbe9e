use std::path::Path;

use arrow::array::{Array, AsArray};
use arrow::compute::cast;
use arrow::datatypes::DataType;
use chrono::{NaiveDate, NaiveDateTime};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::Deserialize;

use super::model::{DayOfWeek, Record, Season, Table};
use crate::error::{DashboardError, Result};

/// Columns every input file must carry. Anything else is ignored.
pub const REQUIRED_COLUMNS: [&str; 6] = [
    "dteday",
    "hr",
    "cnt",
    "weekday_day",
    "workingday_day",
    "season_day",
];

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the usage dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – comma-delimited with a header row (the usual `main_data.csv`)
/// * `.parquet` – same columns, any integer / string / date physical types
///
/// The returned [`Table`] is sorted ascending by `dteday`.
pub fn load_file(path: &Path) -> Result<Table> {
    if !path.is_file() {
        return Err(DashboardError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    log::debug!("Loading {} as .{ext}", path.display());

    let table = match ext.as_str() {
        "csv" => load_csv(path)?,
        "parquet" | "pq" => load_parquet(path)?,
        other => return Err(DashboardError::UnsupportedFormat(other.to_string())),
    };

    match table.date_bounds() {
        Some((first, last)) => log::info!(
            "Loaded {} rows from {} ({first} .. {last})",
            table.len(),
            path.display()
        ),
        None => log::warn!("{} contains no rows", path.display()),
    }

    Ok(table)
}

// ---------------------------------------------------------------------------
// Shared row conversion
// ---------------------------------------------------------------------------

/// The six raw cells the core depends on, still as text.
struct RawFields<'a> {
    dteday: &'a str,
    hr: &'a str,
    cnt: &'a str,
    weekday_day: &'a str,
    workingday_day: &'a str,
    season_day: &'a str,
}

fn parse_record(ctx: &str, raw: RawFields<'_>) -> Result<Record> {
    let date = parse_date(raw.dteday).map_err(|m| cell_error(ctx, "dteday", m))?;

    let hour = parse_int(raw.hr)
        .ok()
        .and_then(|h| u8::try_from(h).ok())
        .filter(|h| *h < 24)
        .ok_or_else(|| cell_error(ctx, "hr", format!("'{}' is not an hour 0-23", raw.hr)))?;

    let cnt = parse_int(raw.cnt)
        .ok()
        .and_then(|c| u32::try_from(c).ok())
        .ok_or_else(|| {
            cell_error(ctx, "cnt", format!("'{}' is not a non-negative count", raw.cnt))
        })?;

    let weekday = parse_int(raw.weekday_day)
        .ok()
        .and_then(DayOfWeek::from_code)
        .ok_or_else(|| {
            cell_error(ctx, "weekday_day", format!("'{}' is not a weekday code 0-6", raw.weekday_day))
        })?;

    let working_day = parse_flag(raw.workingday_day).map_err(|m| cell_error(ctx, "workingday_day", m))?;

    let season = parse_int(raw.season_day)
        .ok()
        .and_then(Season::from_code)
        .ok_or_else(|| {
            cell_error(ctx, "season_day", format!("'{}' is not a season code 1-4", raw.season_day))
        })?;

    Ok(Record {
        date,
        hour,
        cnt,
        weekday,
        working_day,
        season,
    })
}

fn cell_error(ctx: &str, column: &str, message: impl ToString) -> DashboardError {
    DashboardError::parse(format!("{ctx}, column '{column}'"), message)
}

/// Accepts `YYYY-MM-DD`, or a timestamp whose date part is kept.
fn parse_date(s: &str) -> std::result::Result<NaiveDate, String> {
    let s = s.trim();
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(d);
    }
    for fmt in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(dt.date());
        }
    }
    Err(format!("'{s}' is not a YYYY-MM-DD date"))
}

/// Integer cell.  Whole-valued floats (`"3.0"`) are accepted since pandas
/// writes them for integer columns that once held NaN.
fn parse_int(s: &str) -> std::result::Result<i64, String> {
    let s = s.trim();
    if let Ok(i) = s.parse::<i64>() {
        return Ok(i);
    }
    match s.parse::<f64>() {
        Ok(f) if f.is_finite() && f.fract() == 0.0 => Ok(f as i64),
        _ => Err(format!("'{s}' is not an integer")),
    }
}

fn parse_flag(s: &str) -> std::result::Result<bool, String> {
    match s.trim().to_ascii_lowercase().as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        other => match parse_int(other) {
            Ok(0) => Ok(false),
            Ok(1) => Ok(true),
            _ => Err(format!("'{s}' is not a 0/1 flag")),
        },
    }
}

fn check_columns<'a>(present: impl IntoIterator<Item = &'a str>) -> Result<()> {
    let present: Vec<&str> = present.into_iter().collect();
    let missing: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|c| !present.contains(c))
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(DashboardError::parse(
            "header",
            format!("missing required column(s): {}", missing.join(", ")),
        ))
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct CsvRow {
    dteday: String,
    hr: String,
    cnt: String,
    weekday_day: String,
    workingday_day: String,
    season_day: String,
}

impl CsvRow {
    fn fields(&self) -> RawFields<'_> {
        RawFields {
            dteday: &self.dteday,
            hr: &self.hr,
            cnt: &self.cnt,
            weekday_day: &self.weekday_day,
            workingday_day: &self.workingday_day,
            season_day: &self.season_day,
        }
    }
}

/// CSV layout: header row with column names, one hourly observation per row.
fn load_csv(path: &Path) -> Result<Table> {
    let file = std::fs::File::open(path).map_err(|_| DashboardError::NotFound {
        path: path.to_path_buf(),
    })?;
    // Trimmed headers so `dteday, hr, ...` matches the serde field names too.
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_reader(file);

    let headers = reader
        .headers()
        .map_err(|e| DashboardError::parse("reading CSV headers", e))?
        .clone();
    check_columns(headers.iter())?;

    let mut records = Vec::new();
    for (row_no, result) in reader.deserialize::<CsvRow>().enumerate() {
        // +2: one for the header, one for 1-based line numbers
        let ctx = format!("line {}", row_no + 2);
        let row = result.map_err(|e| DashboardError::parse(ctx.as_str(), e))?;
        records.push(parse_record(&ctx, row.fields())?);
    }

    Ok(Table::from_records(records))
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with the same columns as the CSV.
///
/// Each required column is cast to text and then goes through the same cell
/// parsers as the CSV path, so integer, boolean, string and `Date32` physical
/// types all work (files written by Pandas or Polars alike).
fn load_parquet(path: &Path) -> Result<Table> {
    let file = std::fs::File::open(path).map_err(|_| DashboardError::NotFound {
        path: path.to_path_buf(),
    })?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .map_err(|e| DashboardError::parse("reading parquet metadata", e))?;
    {
        let schema = builder.schema();
        check_columns(schema.fields().iter().map(|f| f.name().as_str()))?;
    }
    let reader = builder
        .build()
        .map_err(|e| DashboardError::parse("building parquet reader", e))?;

    let mut records = Vec::new();
    let mut offset = 0usize;

    for batch_result in reader {
        let batch = batch_result.map_err(|e| DashboardError::parse("reading parquet record batch", e))?;
        let schema = batch.schema();

        let mut text_columns = Vec::with_capacity(REQUIRED_COLUMNS.len());
        for name in REQUIRED_COLUMNS {
            let idx = schema
                .index_of(name)
                .map_err(|_| DashboardError::parse("parquet schema", format!("missing column '{name}'")))?;
            let as_text = cast(batch.column(idx), &DataType::Utf8)
                .map_err(|e| DashboardError::parse(format!("column '{name}'"), e))?;
            text_columns.push(as_text);
        }
        let cols: Vec<_> = text_columns.iter().map(|c| c.as_string::<i32>()).collect();

        for row in 0..batch.num_rows() {
            let ctx = format!("row {}", offset + row);
            let mut cells = [""; 6];
            for (i, col) in cols.iter().enumerate() {
                if col.is_null(row) {
                    return Err(cell_error(&ctx, REQUIRED_COLUMNS[i], "null value"));
                }
                cells[i] = col.value(row);
            }
            let [dteday, hr, cnt, weekday_day, workingday_day, season_day] = cells;
            records.push(parse_record(
                &ctx,
                RawFields {
                    dteday,
                    hr,
                    cnt,
                    weekday_day,
                    workingday_day,
                    season_day,
                },
            )?);
        }
        offset += batch.num_rows();
    }

    Ok(Table::from_records(records))
}
