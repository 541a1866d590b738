use eframe::egui::Ui;
use egui_extras::{Column, TableBuilder};

use crate::state::AppState;

/// Render the historical-records table for the selected variety.
pub fn history_table(ui: &mut Ui, state: &AppState) {
    let Some(variety) = state.selected_variety.as_deref() else {
        return;
    };
    if state.history.is_empty() {
        ui.label(format!("No records with a positive PDI for {variety}."));
        return;
    }

    let headers = [
        "Year",
        "SMW",
        variety,
        "Max_Temp",
        "Min_Temp",
        "Rainfall",
        "Max_Humidity",
        "Min_Humidity",
    ];
    let rows = &state.history.rows;

    ui.push_id("history_table", |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .columns(Column::auto().at_least(56.0), headers.len())
            .max_scroll_height(280.0)
            .header(20.0, |mut header| {
                for name in headers {
                    header.col(|ui: &mut Ui| {
                        ui.strong(name);
                    });
                }
            })
            .body(|body| {
                body.rows(18.0, rows.len(), |mut row| {
                    let r = &rows[row.index()];
                    let cells = [
                        r.year.to_string(),
                        r.smw.to_string(),
                        format!("{:.2}", r.pdi),
                        format!("{:.1}", r.max_temp),
                        format!("{:.1}", r.min_temp),
                        format!("{:.1}", r.rainfall),
                        format!("{:.1}", r.max_humidity),
                        format!("{:.1}", r.min_humidity),
                    ];
                    for text in cells {
                        row.col(|ui: &mut Ui| {
                            ui.label(text);
                        });
                    }
                });
            });
    });
}
