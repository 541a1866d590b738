//! Non-interactive report: severity estimates, historical records and
//! weekly averages for one variety, as text or JSON.

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use soy_pdi::config::DataArgs;
use soy_pdi::data::filter::HistoryTable;
use soy_pdi::severity::{estimate_all, SeverityReport, WeatherInputs};

#[derive(Debug, Parser)]
#[command(name = "pdi-report", version, about)]
struct Args {
    #[command(flatten)]
    data: DataArgs,

    /// Variety column to report on (default: first in the file).
    #[arg(long)]
    variety: Option<String>,

    /// Mean relative humidity, %.
    #[arg(long, default_value_t = WeatherInputs::default().mean_rh)]
    mean_rh: f64,

    /// Rainfall, mm.
    #[arg(long, default_value_t = WeatherInputs::default().rainfall)]
    rainfall: f64,

    /// Minimum temperature, °C.
    #[arg(long, default_value_t = WeatherInputs::default().min_temp)]
    min_temp: f64,

    /// Emit JSON instead of text.
    #[arg(long)]
    json: bool,

    /// Print the variety columns and exit.
    #[arg(long)]
    list_varieties: bool,
}

#[derive(Debug, Serialize)]
struct Report {
    severity: SeverityReport,
    variety: Option<String>,
    history: HistoryTable,
    weekly_average: Vec<WeeklyPoint>,
}

#[derive(Debug, Serialize)]
struct WeeklyPoint {
    smw: i64,
    mean_pdi: f64,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let store = args.data.store();
    let dataset = args
        .data
        .load(&store)
        .with_context(|| format!("loading {}", args.data.data.display()))?;

    if args.list_varieties {
        for v in dataset.list_varieties() {
            println!("{v}");
        }
        return Ok(());
    }

    let severity = estimate_all(WeatherInputs {
        mean_rh: args.mean_rh,
        rainfall: args.rainfall,
        min_temp: args.min_temp,
    });

    let variety = args.variety.clone().or_else(|| {
        dataset
            .list_varieties()
            .first()
            .map(|v| v.column_name().to_string())
    });

    let (history, weekly_average) = match &variety {
        Some(v) => {
            let views = dataset.variety_history(v)?;
            let weekly = views
                .weekly
                .into_iter()
                .map(|(smw, mean_pdi)| WeeklyPoint { smw, mean_pdi })
                .collect();
            (views.table, weekly)
        }
        None => {
            log::warn!("{} has no variety columns", args.data.data.display());
            (HistoryTable::default(), Vec::new())
        }
    };

    let report = Report {
        severity,
        variety,
        history,
        weekly_average,
    };

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&report).context("serializing report")?
        );
    } else {
        print_text(&report);
    }
    Ok(())
}

fn print_text(report: &Report) {
    let inputs = &report.severity.inputs;
    println!(
        "Predicted Disease Severity (PDI)  [Mean RH {}%, rainfall {} mm, min temp {} °C]",
        inputs.mean_rh, inputs.rainfall, inputs.min_temp
    );
    for e in &report.severity.estimates {
        println!("  {:<34} {} %", e.disease.display_name(), e.pdi);
    }

    let Some(variety) = &report.variety else {
        return;
    };

    println!();
    println!("Historical Records for {variety}");
    println!(
        "  {:>6} {:>4} {:>10} {:>9} {:>9} {:>9} {:>13} {:>13}",
        "Year", "SMW", variety, "Max_Temp", "Min_Temp", "Rainfall", "Max_Humidity", "Min_Humidity"
    );
    for r in &report.history.rows {
        println!(
            "  {:>6} {:>4} {:>10.2} {:>9.1} {:>9.1} {:>9.1} {:>13.1} {:>13.1}",
            r.year, r.smw, r.pdi, r.max_temp, r.min_temp, r.rainfall, r.max_humidity, r.min_humidity
        );
    }

    println!();
    println!("{variety} Weekly PDI Over Time (mean per SMW)");
    for p in &report.weekly_average {
        println!("  SMW {:>2}  {:.2}", p.smw, p.mean_pdi);
    }
}
