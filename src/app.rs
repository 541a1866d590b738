use eframe::egui::{self, ScrollArea, Ui};

use soy_pdi::config::DataArgs;

use crate::state::AppState;
use crate::ui::{panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct SoyPdiApp {
    pub state: AppState,
}

impl SoyPdiApp {
    /// Start with the configured sheet; a failed load leaves the UI usable
    /// with the error in the status line.
    pub fn new(source: DataArgs) -> Self {
        let mut state = AppState::new(source.clone());
        state.open(source);
        Self { state }
    }
}

impl eframe::App for SoyPdiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: inputs ----
        egui::SidePanel::left("input_panel")
            .default_width(260.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: estimates, history, chart ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui: &mut Ui| {
                    let state = &self.state;
                    panels::intro(ui);
                    ui.separator();

                    ui.heading("Predicted Disease Severity (PDI)");
                    panels::severity_metrics(ui, state);
                    plot::severity_bars(ui, state);
                    ui.separator();

                    let variety = state.selected_variety.as_deref().unwrap_or("-");
                    ui.heading(format!("Historical Records for {variety}"));
                    table::history_table(ui, state);
                    ui.separator();

                    ui.heading(format!("{variety} Weekly PDI Over Time"));
                    plot::weekly_plot(ui, state);
                    ui.separator();

                    panels::footnote(ui);
                });
        });
    }
}
