use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use arrow::array::{BooleanArray, Date32Array, Int64Array, StringArray, UInt32Array, UInt8Array};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use chrono::{Datelike, Duration, NaiveDate};
use clap::Parser;
use parquet::arrow::ArrowWriter;
use serde::Serialize;

/// Write a synthetic hourly bike-sharing dataset with the dashboard's schema.
#[derive(Parser, Debug)]
#[command(about)]
struct Args {
    /// Output file; `.csv` or `.parquet`.
    #[arg(default_value = "dashboard/main_data.csv")]
    output: PathBuf,

    /// First day of the series.
    #[arg(long, default_value = "2011-01-01")]
    start: NaiveDate,

    /// Number of days to generate.
    #[arg(long, default_value_t = 731)]
    days: u32,

    #[arg(long, default_value_t = 42)]
    seed: u64,
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

#[derive(Debug)]
struct SampleRow {
    instant: i64,
    dteday: String,
    season_day: u8,
    mnth: u8,
    hr: u8,
    weekday_day: u8,
    workingday_day: bool,
    casual: u32,
    registered: u32,
    cnt: u32,
}

fn season_of(date: NaiveDate) -> u8 {
    match date.month() {
        1..=3 => 1,
        4..=6 => 2,
        7..=9 => 3,
        _ => 4,
    }
}

/// Relative demand by hour: commute peaks on working days, a midday hump
/// otherwise.
fn hour_profile(hour: u8, working_day: bool) -> f64 {
    let h = f64::from(hour);
    let bump = |mu: f64, sigma: f64, amp: f64| amp * (-(h - mu).powi(2) / (2.0 * sigma.powi(2))).exp();
    if working_day {
        0.05 + bump(8.0, 1.0, 1.0) + bump(17.5, 1.5, 1.1) + bump(12.5, 2.5, 0.3)
    } else {
        0.05 + bump(14.0, 3.5, 0.8)
    }
}

fn season_scale(season: u8) -> f64 {
    match season {
        1 => 0.45,
        2 => 0.9,
        3 => 1.0,
        _ => 0.75,
    }
}

fn generate(args: &Args) -> Vec<SampleRow> {
    let mut rng = SimpleRng::new(args.seed);
    let mut rows = Vec::with_capacity(args.days as usize * 24);

    for day in 0..args.days {
        let date = args.start + Duration::days(i64::from(day));
        let weekday = date.weekday().num_days_from_sunday() as u8;
        let working_day = (1..=5).contains(&weekday);
        let season = season_of(date);
        // second year busier, as in a growing scheme
        let growth = 1.0 + 0.6 * f64::from(day) / 365.0;

        for hour in 0..24u8 {
            let expected = 450.0 * growth * season_scale(season) * hour_profile(hour, working_day);
            let cnt = rng.gauss(expected, expected.sqrt().max(1.0)).round().max(0.0) as u32;
            let casual_share = if working_day { 0.15 } else { 0.4 };
            let casual = (f64::from(cnt) * casual_share).round() as u32;

            rows.push(SampleRow {
                instant: rows.len() as i64 + 1,
                dteday: date.format("%Y-%m-%d").to_string(),
                season_day: season,
                mnth: date.month() as u8,
                hr: hour,
                weekday_day: weekday,
                workingday_day: working_day,
                casual,
                registered: cnt - casual,
                cnt,
            });
        }
    }
    rows
}

fn write_csv(path: &Path, rows: &[SampleRow]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV output")?;
    for row in rows {
        // 0/1 like the source data rather than true/false
        writer.serialize(SampleRowCsv::from(row))?;
    }
    writer.flush()?;
    Ok(())
}

#[derive(Serialize)]
struct SampleRowCsv<'a> {
    instant: i64,
    dteday: &'a str,
    season_day: u8,
    mnth: u8,
    hr: u8,
    weekday_day: u8,
    workingday_day: u8,
    casual: u32,
    registered: u32,
    cnt: u32,
}

impl<'a> From<&'a SampleRow> for SampleRowCsv<'a> {
    fn from(r: &'a SampleRow) -> Self {
        SampleRowCsv {
            instant: r.instant,
            dteday: &r.dteday,
            season_day: r.season_day,
            mnth: r.mnth,
            hr: r.hr,
            weekday_day: r.weekday_day,
            workingday_day: u8::from(r.workingday_day),
            casual: r.casual,
            registered: r.registered,
            cnt: r.cnt,
        }
    }
}

fn write_parquet(path: &Path, rows: &[SampleRow], start: NaiveDate) -> Result<()> {
    let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).context("epoch")?;
    let first_day = (start - epoch).num_days();

    let schema = Arc::new(Schema::new(vec![
        Field::new("instant", DataType::Int64, false),
        Field::new("dteday", DataType::Date32, false),
        Field::new("season_day", DataType::UInt8, false),
        Field::new("mnth", DataType::UInt8, false),
        Field::new("hr", DataType::UInt8, false),
        Field::new("weekday_day", DataType::UInt8, false),
        Field::new("workingday_day", DataType::Boolean, false),
        Field::new("casual", DataType::UInt32, false),
        Field::new("registered", DataType::UInt32, false),
        Field::new("cnt", DataType::UInt32, false),
        Field::new("source", DataType::Utf8, false),
    ]));

    let days: Vec<i32> = rows
        .iter()
        .map(|r| i32::try_from(first_day + (r.instant - 1) / 24))
        .collect::<std::result::Result<_, _>>()
        .context("date out of Date32 range")?;

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.instant))),
            Arc::new(Date32Array::from(days)),
            Arc::new(UInt8Array::from_iter_values(rows.iter().map(|r| r.season_day))),
            Arc::new(UInt8Array::from_iter_values(rows.iter().map(|r| r.mnth))),
            Arc::new(UInt8Array::from_iter_values(rows.iter().map(|r| r.hr))),
            Arc::new(UInt8Array::from_iter_values(rows.iter().map(|r| r.weekday_day))),
            Arc::new(BooleanArray::from(
                rows.iter().map(|r| r.workingday_day).collect::<Vec<_>>(),
            )),
            Arc::new(UInt32Array::from_iter_values(rows.iter().map(|r| r.casual))),
            Arc::new(UInt32Array::from_iter_values(rows.iter().map(|r| r.registered))),
            Arc::new(UInt32Array::from_iter_values(rows.iter().map(|r| r.cnt))),
            Arc::new(StringArray::from(vec!["synthetic"; rows.len()])),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path).context("creating parquet output")?;
    let mut writer = ArrowWriter::try_new(file, schema, None)?;
    writer.write(&batch)?;
    writer.close()?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let rows = generate(&args);

    if let Some(dir) = args.output.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }

    let ext = args
        .output
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    match ext.as_str() {
        "csv" => write_csv(&args.output, &rows)?,
        "parquet" | "pq" => write_parquet(&args.output, &rows, args.start)?,
        other => bail!("Unsupported output extension: .{other}"),
    }

    log::info!("Wrote {} rows to {}", rows.len(), args.output.display());
    println!(
        "Wrote {} hourly rows ({} days from {}) to {}",
        rows.len(),
        args.days,
        args.start,
        args.output.display()
    );
    Ok(())
}
