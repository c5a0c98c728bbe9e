use bikeshare_dashboard::Season;
use eframe::egui::{self, Color32, RichText, Ui};
use egui_extras::DatePickerButton;

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – range and season widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    // ---- Optional image (centered) ----
    if let Some(path) = &state.sidebar_image {
        let uri = format!("file://{}", path.display());
        ui.vertical_centered(|ui: &mut Ui| {
            ui.add(
                egui::Image::new(uri)
                    .max_width(ui.available_width() * 0.8)
                    .max_height(120.0)
                    .rounding(4.0),
            );
        });
        ui.add_space(4.0);
    }

    ui.heading("Date range");
    ui.separator();

    let Some((min, max)) = state.date_bounds() else {
        ui.label("No dataset loaded.");
        return;
    };

    // Pickers edit copies; the state only changes through `set_range`.
    let mut start = state.start_date;
    let mut end = state.end_date;
    let mut changed = false;

    egui::Grid::new("date_range_grid")
        .num_columns(2)
        .show(ui, |ui: &mut Ui| {
            ui.label("From");
            changed |= ui
                .add(DatePickerButton::new(&mut start).id_salt("start_date"))
                .changed();
            ui.end_row();

            ui.label("To");
            changed |= ui
                .add(DatePickerButton::new(&mut end).id_salt("end_date"))
                .changed();
            ui.end_row();
        });

    if changed {
        state.set_range(start, end);
    }

    ui.label(RichText::new(format!("Available: {min} to {max}")).weak());
    if ui.button("Full range").clicked() {
        state.reset_range();
    }

    ui.add_space(8.0);
    ui.separator();

    // ---- Season for the hourly chart ----
    ui.strong("Hourly pattern season");
    let current = state.hourly_season;
    egui::ComboBox::from_id_salt("hourly_season")
        .selected_text(current.label())
        .show_ui(ui, |ui: &mut Ui| {
            for season in Season::ALL {
                if ui
                    .selectable_label(current == season, season.label())
                    .clicked()
                    && season != current
                {
                    state.set_hourly_season(season);
                }
            }
        });

    if let Some(view) = &state.view {
        ui.add_space(8.0);
        ui.separator();
        ui.label(format!("{} rows in range", view.rows));
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(path) = &state.data_path {
            ui.label(path.display().to_string());
        }
        if let Some(table) = &state.table {
            ui.label(format!("{} rows loaded", table.len()));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open bike-sharing data")
        .add_filter("Supported files", &["csv", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.load(&path);
    }
}
