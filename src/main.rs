mod app;
mod color;
mod state;
mod ui;

use app::SoyPdiApp;
use clap::Parser;
use eframe::egui;
use soy_pdi::config::DataArgs;

/// Soybean disease severity dashboard.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    #[command(flatten)]
    data: DataArgs,
}

fn main() -> eframe::Result {
    env_logger::init();
    let cli = Cli::parse();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 900.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Soybean Disease Severity Predictor",
        options,
        Box::new(|_cc| Ok(Box::new(SoyPdiApp::new(cli.data)))),
    )
}
