mod app;
mod color;
mod state;
mod ui;

use std::path::PathBuf;

use app::BikeshareApp;
use clap::Parser;
use eframe::egui;

/// Bike-sharing usage dashboard.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Hourly usage dataset (.csv or .parquet).
    #[arg(env = "BIKESHARE_DATA", default_value = "dashboard/main_data.csv")]
    data: PathBuf,
}

fn main() -> eframe::Result {
    env_logger::init();
    let args = Args::parse();
    log::info!("Starting dashboard with {}", args.data.display());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 900.0])
            .with_min_inner_size([640.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Bike Sharing Dashboard",
        options,
        Box::new(move |cc| {
            // Install image loaders so the sidebar image can be read from disk.
            egui_extras::install_image_loaders(&cc.egui_ctx);
            Ok(Box::new(BikeshareApp::new(&args.data)))
        }),
    )
}
