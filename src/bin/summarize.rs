use std::path::PathBuf;

use anyhow::{Context, Result};
use bikeshare_dashboard::data::loader::load_file;
use bikeshare_dashboard::pipeline::DEFAULT_HOURLY_SEASON;
use bikeshare_dashboard::{render, DateRange, Season};
use chrono::NaiveDate;
use clap::Parser;

/// Print the dashboard summary for a date range as JSON.
#[derive(Parser, Debug)]
#[command(about)]
struct Args {
    /// Hourly usage dataset (.csv or .parquet).
    #[arg(env = "BIKESHARE_DATA", default_value = "dashboard/main_data.csv")]
    data: PathBuf,

    /// First day (inclusive); defaults to the first day in the data.
    #[arg(long)]
    start: Option<NaiveDate>,

    /// Last day (inclusive); defaults to the last day in the data.
    #[arg(long)]
    end: Option<NaiveDate>,

    /// Season code (1-4) for the hourly pattern and peak hour.
    #[arg(long, default_value_t = DEFAULT_HOURLY_SEASON.code(), value_parser = clap::value_parser!(u8).range(1..=4))]
    season: u8,

    /// Indent the output.
    #[arg(long)]
    pretty: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let table = load_file(&args.data)
        .with_context(|| format!("loading {}", args.data.display()))?;
    let (min, max) = table
        .date_bounds()
        .context("the dataset contains no rows")?;

    let range = DateRange::new(args.start.unwrap_or(min), args.end.unwrap_or(max))?;
    let season = Season::from_code(i64::from(args.season)).context("season code out of range")?;

    let view = render(&table, &range, season)?;
    let report = view.report();

    let json = if args.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    println!("{json}");
    Ok(())
}
