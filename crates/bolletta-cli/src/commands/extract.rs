//! Extract command - read tariff terms from a single contract.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use tracing::debug;

use bolletta_core::tariff::FieldStatus;
use bolletta_core::{TariffExtraction, TariffExtractor};

use super::{config, input};

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Contract file (PDF or plain text)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: ExtractFormat,

    /// Fail if any field had to be defaulted
    #[arg(long)]
    strict: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum ExtractFormat {
    /// Tariff with per-field provenance as JSON
    Json,
    /// Plain text field listing
    Text,
}

pub fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let mut config = config::load(config_path)?;
    config.extraction.strict |= args.strict;

    let extractor = TariffExtractor::from_config(&config);
    let extraction = input::load_extraction(&args.input, &extractor, &config)?;

    let output = match args.format {
        ExtractFormat::Json => input::to_json(&extraction, &config)?,
        ExtractFormat::Text => format_text(&extraction),
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

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

fn format_text(extraction: &TariffExtraction) -> String {
    let mut output = String::new();

    output.push_str(&format!("Offer: {}\n\n", extraction.tariff.offer_name));

    for provenance in &extraction.fields {
        let status = match provenance.status {
            FieldStatus::Extracted => "extracted",
            FieldStatus::Defaulted => "defaulted",
        };
        output.push_str(&format!(
            "  {:<32} {:<36} {}\n",
            provenance.field.path(),
            provenance.field.value_in(&extraction.tariff),
            status
        ));
    }

    output.push_str(&format!(
        "\n{} of {} fields extracted\n",
        extraction.extracted().len(),
        extraction.fields.len()
    ));

    output
}
