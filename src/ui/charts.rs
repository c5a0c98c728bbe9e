use std::ops::RangeInclusive;

use bikeshare_dashboard::{DashboardView, DayOfWeek, Season};
use eframe::egui::{Color32, RichText, ScrollArea, Ui};
use egui_plot::{Bar, BarChart, GridMark, Legend, Line, Plot, PlotPoints};

use crate::color::ChartColors;
use crate::state::AppState;

const CHART_HEIGHT: f32 = 280.0;

// ---------------------------------------------------------------------------
// Dashboard (central panel)
// ---------------------------------------------------------------------------

/// Render the metrics and charts in the central panel.
pub fn dashboard(ui: &mut Ui, state: &AppState) {
    let view = match &state.view {
        Some(v) => v,
        None => {
            ui.centered_and_justified(|ui: &mut Ui| match &state.status_message {
                Some(msg) => {
                    ui.label(RichText::new(msg).color(Color32::RED).heading());
                }
                None => {
                    ui.heading("Open a dataset to view the dashboard  (File → Open…)");
                }
            });
            return;
        }
    };

    let start = view.range.start();
    let end = view.range.end();
    let years = format!("{} - {}", start.format("%Y"), end.format("%Y"));

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.heading("Bike Sharing Dashboard");
            ui.label(RichText::new(format!("Key metrics ({start} to {end})")).strong());
            ui.add_space(6.0);
            metrics_row(ui, view);

            ui.add_space(12.0);
            ui.strong(format!("Average usage per weekday ({years})"));
            weekday_chart(ui, view, &state.colors);

            ui.add_space(12.0);
            ui.strong(format!(
                "Hourly usage pattern ({} {years})",
                view.hourly_season
            ));
            hourly_chart(ui, view, &state.colors);

            ui.add_space(12.0);
            ui.strong(format!("Total usage per season ({years})"));
            season_chart(ui, view, &state.colors);
        });
}

fn metrics_row(ui: &mut Ui, view: &DashboardView) {
    let m = &view.metrics;
    let cells = [
        ("Total Usage".to_string(), m.total_usage.to_string()),
        ("Average Usage".to_string(), format!("{}", m.mean_usage.trunc())),
        (
            format!("Peak Hour ({})", view.hourly_season),
            format!("{}:00", m.peak_hour),
        ),
    ];
    ui.columns(cells.len(), |cols| {
        for (col, (label, value)) in cols.iter_mut().zip(cells) {
            col.label(RichText::new(label).weak());
            col.label(RichText::new(value).size(28.0).strong());
        }
    });
}

/// Axis labels only on whole-number ticks.
fn integer_ticks(
    label: impl Fn(i64) -> Option<String>,
) -> impl Fn(GridMark, &RangeInclusive<f64>) -> String {
    move |mark: GridMark, _range: &RangeInclusive<f64>| {
        if mark.value.fract() != 0.0 {
            return String::new();
        }
        label(mark.value as i64).unwrap_or_default()
    }
}

fn bar_label(bar: &Bar, _chart: &BarChart) -> String {
    format!("{}\n{:.0}", bar.name, bar.value)
}

// ---------------------------------------------------------------------------
// Individual charts
// ---------------------------------------------------------------------------

/// Bars at x = weekday code.  Every weekday is labelled; days without rows
/// in the range have no bar.
fn weekday_chart(ui: &mut Ui, view: &DashboardView, colors: &ChartColors) {
    let bars: Vec<Bar> = DayOfWeek::ALL
        .iter()
        .filter_map(|day| {
            let avg = view.weekday.get(day)?;
            Some(
                Bar::new(f64::from(day.code()), *avg)
                    .name(day.label())
                    .fill(colors.weekday.color_for(day)),
            )
        })
        .collect();

    let chart = BarChart::new(bars)
        .width(0.7)
        .element_formatter(Box::new(bar_label));

    Plot::new("weekday_chart")
        .height(CHART_HEIGHT)
        .y_axis_label("Average usage")
        .include_y(0.0)
        .include_x(-0.5)
        .include_x(6.5)
        .x_axis_formatter(integer_ticks(|i| {
            DayOfWeek::from_code(i).map(|d| d.short_label().to_string())
        }))
        .allow_scroll(false)
        .allow_drag(false)
        .show(ui, |plot_ui| plot_ui.bar_chart(chart));
}

/// One line per working-day flag, hours 0–23 on x.
fn hourly_chart(ui: &mut Ui, view: &DashboardView, colors: &ChartColors) {
    Plot::new("hourly_chart")
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .y_axis_label("Average usage")
        .include_y(0.0)
        .include_x(0.0)
        .include_x(23.0)
        .x_axis_formatter(integer_ticks(|h| {
            (0..24).contains(&h).then(|| format!("{h:02}"))
        }))
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            for working_day in [false, true] {
                let points: PlotPoints = view
                    .hourly
                    .iter()
                    .filter(|((_, flag), _)| *flag == working_day)
                    .map(|(&(hour, _), &avg)| [f64::from(hour), avg])
                    .collect();
                let name = if working_day { "Working day" } else { "Weekend / holiday" };
                plot_ui.line(
                    Line::new(points)
                        .name(name)
                        .color(colors.working_day.color_for(&working_day))
                        .width(2.0),
                );
            }
        });
}

/// Bars at fixed season slots, in season order.
fn season_chart(ui: &mut Ui, view: &DashboardView, colors: &ChartColors) {
    let bars: Vec<Bar> = view
        .season
        .iter()
        .map(|(season, &total)| {
            Bar::new(f64::from(season.code() - 1), total as f64)
                .name(season.label())
                .fill(colors.season.color_for(season))
        })
        .collect();

    let chart = BarChart::new(bars)
        .width(0.7)
        .element_formatter(Box::new(bar_label));

    Plot::new("season_chart")
        .height(CHART_HEIGHT)
        .y_axis_label("Total usage")
        .include_y(0.0)
        .include_x(-0.5)
        .include_x(3.5)
        .x_axis_formatter(integer_ticks(|i| {
            Season::from_code(i + 1).map(|s| s.label().to_string())
        }))
        .allow_scroll(false)
        .allow_drag(false)
        .show(ui, |plot_ui| plot_ui.bar_chart(chart));
}
