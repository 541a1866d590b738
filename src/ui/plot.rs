use eframe::egui::{Color32, Ui};
use egui_plot::{Bar, BarChart, Line, Plot, PlotPoints, Points};

use crate::color::disease_color;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Predicted severity bars
// ---------------------------------------------------------------------------

/// One bar per disease for the current slider values.
pub fn severity_bars(ui: &mut Ui, state: &AppState) {
    let bars: Vec<Bar> = state
        .report
        .estimates
        .iter()
        .enumerate()
        .map(|(i, e)| {
            Bar::new(i as f64, e.pdi)
                .name(e.disease.label())
                .fill(disease_color(e.disease))
                .width(0.6)
        })
        .collect();

    Plot::new("severity_bars")
        .height(180.0)
        .y_axis_label("PDI (%)")
        .include_y(0.0)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .show_x(false)
        .x_axis_formatter(|mark, _range| {
            let i = mark.value.round();
            if (mark.value - i).abs() > f64::EPSILON || i < 0.0 {
                return String::new();
            }
            soy_pdi::Disease::ALL
                .get(i as usize)
                .map(|d| d.label().to_string())
                .unwrap_or_default()
        })
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars));
        });
}

// ---------------------------------------------------------------------------
// Weekly PDI progression (central panel)
// ---------------------------------------------------------------------------

/// Mean historical PDI per SMW for the selected variety.
pub fn weekly_plot(ui: &mut Ui, state: &AppState) {
    let Some(variety) = state.selected_variety.as_deref() else {
        ui.label("Select a variety to see its progression.");
        return;
    };
    if state.weekly.is_empty() {
        ui.label(format!("No positive PDI records for {variety}."));
        return;
    }

    let series: Vec<[f64; 2]> = state
        .weekly
        .iter()
        .map(|&(smw, pdi)| [smw as f64, pdi])
        .collect();
    let line_points: PlotPoints = series.iter().copied().collect();
    let markers: PlotPoints = series.iter().copied().collect();

    Plot::new("weekly_plot")
        .height(300.0)
        .legend(egui_plot::Legend::default())
        .x_axis_label("Standard Meteorological Week (SMW)")
        .y_axis_label("Average PDI")
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new(line_points)
                    .name(format!("{variety} Disease Progression"))
                    .color(Color32::LIGHT_BLUE)
                    .width(1.5),
            );
            plot_ui.points(
                Points::new(markers)
                    .radius(3.5)
                    .color(Color32::LIGHT_BLUE),
            );
        });
}
