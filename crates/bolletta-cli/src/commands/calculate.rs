//! Calculate command - price a consumption against a tariff.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use console::style;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::warn;

use bolletta_core::tariff::amounts::parse_decimal_comma;
use bolletta_core::{Band, ConsumptionRecord, CostBreakdown, TariffRecord, TextReport, compute_costs};

use super::{config, input};

/// Arguments for the calculate command.
#[derive(Args)]
pub struct CalculateArgs {
    /// Tariff source: stored tariff JSON, or a contract (PDF or text)
    #[arg(short, long, required = true)]
    tariff: PathBuf,

    /// Consumption JSON file (overridden by the per-band flags)
    #[arg(long)]
    consumption: Option<PathBuf>,

    /// F0 consumption in kWh
    #[arg(long)]
    f0: Option<String>,

    /// F1 consumption in kWh
    #[arg(long)]
    f1: Option<String>,

    /// F2 consumption in kWh
    #[arg(long)]
    f2: Option<String>,

    /// F3 consumption in kWh
    #[arg(long)]
    f3: Option<String>,

    /// Gas consumption in m³
    #[arg(long)]
    gas: Option<String>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text report
    Text,
}

/// A priced consumption, as persisted alongside its document.
#[derive(Serialize)]
struct Calculation<'a> {
    consumption: &'a ConsumptionRecord,
    results: &'a CostBreakdown,
}

pub fn run(args: CalculateArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = config::load(config_path)?;

    let tariff = input::load_tariff(&args.tariff, &config)?;
    let consumption = build_consumption(&args)?;
    let costs = compute_costs(&tariff, &consumption);

    let output = match args.format {
        OutputFormat::Json => input::to_json(
            &Calculation {
                consumption: &consumption,
                results: &costs,
            },
            &config,
        )?,
        OutputFormat::Csv => format_csv(&tariff, &costs)?,
        OutputFormat::Text => {
            let generated = chrono::Local::now().format("%Y-%m-%d");
            TextReport::new(&tariff, &consumption, &costs)
                .with_footer(format!("Generated on: {generated}"))
                .render()
        }
    };

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    Ok(())
}

fn build_consumption(args: &CalculateArgs) -> anyhow::Result<ConsumptionRecord> {
    let mut consumption = match &args.consumption {
        Some(path) => input::load_consumption(path)?,
        None => ConsumptionRecord::default(),
    };

    let bands = [
        (Band::F0, &args.f0),
        (Band::F1, &args.f1),
        (Band::F2, &args.f2),
        (Band::F3, &args.f3),
    ];
    for (band, value) in bands {
        if let Some(kwh) = value.as_deref().and_then(|v| parse_flag(band.as_str(), v)) {
            consumption = consumption.with_electricity(band, kwh);
        }
    }
    if let Some(gas) = args.gas.as_deref().and_then(|v| parse_flag("gas", v)) {
        consumption = consumption.with_gas(gas);
    }

    Ok(consumption)
}

/// Non-numeric values count as no usage.
fn parse_flag(name: &str, value: &str) -> Option<Decimal> {
    let parsed = parse_decimal_comma(value);
    if parsed.is_none() {
        warn!("Ignoring non-numeric {} value '{}'", name, value);
    }
    parsed
}

fn format_csv(tariff: &TariffRecord, costs: &CostBreakdown) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    let monthly = &costs.monthly_costs;
    let annual = &costs.annual_costs;

    wtr.write_record([
        "offer_name",
        "electricity_f0",
        "electricity_f1",
        "electricity_f2",
        "electricity_f3",
        "fixed_costs",
        "total_electricity",
        "gas",
        "monthly_total",
        "annual_electricity",
        "annual_gas",
        "annual_total",
    ])?;

    wtr.write_record([
        tariff.offer_name.clone(),
        monthly.electricity_by_band.f0.to_string(),
        monthly.electricity_by_band.f1.to_string(),
        monthly.electricity_by_band.f2.to_string(),
        monthly.electricity_by_band.f3.to_string(),
        monthly.fixed_costs.to_string(),
        monthly.total_electricity.to_string(),
        monthly.gas.to_string(),
        monthly.total.to_string(),
        annual.electricity.to_string(),
        annual.gas.to_string(),
        annual.total.to_string(),
    ])?;

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}
