use eframe::egui::{self, Color32, RichText, Ui};

use soy_pdi::severity::{MEAN_RH_RANGE, MIN_TEMP_RANGE, RAINFALL_RANGE};
use soy_pdi::Disease;

use crate::color::severity_color;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – input widgets
// ---------------------------------------------------------------------------

/// Render the input parameter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Input Parameters");
    ui.separator();

    match &state.dataset {
        Some(ds) => {
            let varieties: Vec<String> = ds
                .list_varieties()
                .iter()
                .map(|v| v.column_name().to_string())
                .collect();
            let current = state.selected_variety.clone().unwrap_or_default();

            ui.strong("Select Soybean Variety");
            if varieties.is_empty() {
                ui.label("No variety columns in this file.");
            }
            let mut picked = None;
            egui::ComboBox::from_id_salt("variety")
                .selected_text(&current)
                .width(ui.available_width())
                .show_ui(ui, |ui: &mut Ui| {
                    for v in &varieties {
                        if ui.selectable_label(current == *v, v).clicked() {
                            picked = Some(v.clone());
                        }
                    }
                });
            if let Some(v) = picked.filter(|v| *v != current) {
                state.select_variety(v);
            }
        }
        None => {
            ui.label("No dataset loaded.");
        }
    }
    ui.add_space(8.0);

    let mut inputs = state.inputs;
    let mut changed = false;
    changed |= ui
        .add(egui::Slider::new(&mut inputs.mean_rh, MEAN_RH_RANGE).text("Mean Relative Humidity (%)"))
        .changed();
    changed |= ui
        .add(egui::Slider::new(&mut inputs.rainfall, RAINFALL_RANGE).text("Rainfall (mm)"))
        .changed();
    changed |= ui
        .add(egui::Slider::new(&mut inputs.min_temp, MIN_TEMP_RANGE).text("Minimum Temperature (°C)"))
        .changed();
    if changed {
        state.set_inputs(inputs);
    }
}

// ---------------------------------------------------------------------------
// Severity metrics
// ---------------------------------------------------------------------------

/// Render the four predicted PDI values as large metrics.
pub fn severity_metrics(ui: &mut Ui, state: &AppState) {
    ui.horizontal_wrapped(|ui: &mut Ui| {
        for estimate in &state.report.estimates {
            ui.group(|ui: &mut Ui| {
                ui.vertical(|ui: &mut Ui| {
                    ui.label(estimate.disease.display_name());
                    ui.label(
                        RichText::new(format!("{} %", estimate.pdi))
                            .size(26.0)
                            .strong()
                            .color(severity_color(estimate.pdi)),
                    );
                });
            });
        }
    });
}

/// Header text: title and description of the four modelled diseases.
pub fn intro(ui: &mut Ui) {
    ui.heading(RichText::new("Soybean Disease Severity Predictor").size(28.0));
    let names: Vec<&str> = Disease::ALL.iter().map(|d| d.display_name()).collect();
    ui.label(format!(
        "Predicts the severity of {} in soybean from weather conditions and the \
         selected variety, using regression models derived from field research.",
        names.join(", ")
    ));
}

/// Closing disclaimer.
pub fn footnote(ui: &mut Ui) {
    ui.label(
        RichText::new(
            "Note: this model uses simplified regression equations for each disease \
             and is intended for indicative forecasting only.",
        )
        .strong(),
    );
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

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{}: {} records, {} for {}",
                state.source.data.display(),
                ds.len(),
                state.history.len(),
                state.selected_variety.as_deref().unwrap_or("-"),
            ));
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
        .set_title("Open weather / severity sheet")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        let mut source = state.source.clone();
        source.data = path;
        state.open(source);
    }
}
