//! Batch extraction over many contract files.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::Semaphore;
use tracing::{debug, error, warn};

use bolletta_core::models::config::BollettaConfig;
use bolletta_core::{TariffExtraction, TariffExtractor};

use super::{config, input};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files or glob pattern
    #[arg(required = true)]
    input: String,

    /// Output directory for the extracted tariffs
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,

    /// Number of parallel workers
    #[arg(short = 'j', long, default_value = "4")]
    jobs: usize,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,

    /// Fail files with defaulted fields
    #[arg(long)]
    strict: bool,
}

/// Result of processing a single file.
struct ProcessResult {
    path: PathBuf,
    extraction: Option<TariffExtraction>,
    error: Option<String>,
    processing_time_ms: u64,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let mut config = config::load(config_path)?;
    config.extraction.strict |= args.strict;

    let files = expand_inputs(&args.input)?;
    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let progress = ProgressBar::new(files.len() as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let config = Arc::new(config);
    let extractor = Arc::new(TariffExtractor::from_config(&config));
    let semaphore = Arc::new(Semaphore::new(args.jobs.max(1)));

    let mut handles = Vec::with_capacity(files.len());
    for path in files {
        let permit = semaphore.clone().acquire_owned().await?;
        let extractor = Arc::clone(&extractor);
        let config = Arc::clone(&config);

        handles.push(tokio::task::spawn_blocking(move || {
            let _permit = permit;
            let file_start = Instant::now();
            let result = input::load_extraction(&path, &extractor, &config);
            (path, result, file_start.elapsed().as_millis() as u64)
        }));
    }

    let mut results = Vec::with_capacity(handles.len());
    for handle in handles {
        let (path, result, processing_time_ms) = handle.await?;

        match result {
            Ok(extraction) => results.push(ProcessResult {
                path,
                extraction: Some(extraction),
                error: None,
                processing_time_ms,
            }),
            Err(e) => {
                let error_msg = e.to_string();
                if !args.continue_on_error {
                    progress.abandon();
                    error!("Failed to process {}: {}", path.display(), error_msg);
                    anyhow::bail!("Processing failed: {}", error_msg);
                }
                warn!("Failed to process {}: {}", path.display(), error_msg);
                results.push(ProcessResult {
                    path,
                    extraction: None,
                    error: Some(error_msg),
                    processing_time_ms,
                });
            }
        }

        progress.inc(1);
    }

    progress.finish_with_message("Complete");

    if let Some(ref output_dir) = args.output_dir {
        let paths: Vec<&Path> = results.iter().map(|r| r.path.as_path()).collect();
        for (result, name) in results.iter().zip(output_names(&paths)) {
            if let Some(extraction) = &result.extraction {
                let output_path = output_dir.join(name);
                fs::write(&output_path, input::to_json(&extraction.tariff, &config)?)?;
                debug!("Wrote output to {}", output_path.display());
            }
        }
    }

    if args.summary {
        let summary_path = args
            .output_dir
            .as_ref()
            .map(|d| d.join("summary.csv"))
            .unwrap_or_else(|| PathBuf::from("summary.csv"));

        write_summary(&summary_path, &results)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    print_totals(&results, start, &config);

    Ok(())
}

/// Expand a glob into the contract files it names, in sorted order.
fn expand_inputs(pattern: &str) -> anyhow::Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = glob(pattern)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            let ext = p.extension().and_then(|e| e.to_str()).unwrap_or("");
            matches!(ext.to_lowercase().as_str(), "pdf" | "txt")
        })
        .collect();
    files.sort();
    Ok(files)
}

/// `<stem>.tariff.json` per input; repeated stems get a `-2`, `-3`... suffix.
fn output_names(paths: &[&Path]) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    let mut taken: HashSet<String> = HashSet::new();

    paths
        .iter()
        .map(|path| {
            let stem = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("contract")
                .to_string();

            let first = format!("{}.tariff.json", stem);
            let mut name = first.clone();
            while !taken.insert(name.clone()) {
                let count = seen.entry(stem.clone()).or_insert(1);
                *count += 1;
                name = format!("{}-{}.tariff.json", stem, count);
            }
            if name != first {
                warn!("{} would overwrite {}, writing {}", path.display(), first, name);
            }
            name
        })
        .collect()
}

fn print_totals(results: &[ProcessResult], start: Instant, config: &BollettaConfig) {
    let failed: Vec<_> = results.iter().filter(|r| r.error.is_some()).collect();
    let incomplete = results
        .iter()
        .filter_map(|r| r.extraction.as_ref())
        .filter(|e| !e.is_complete())
        .count();

    println!();
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    println!(
        "   {} successful, {} failed",
        style(results.len() - failed.len()).green(),
        style(failed.len()).red()
    );
    if incomplete > 0 && !config.extraction.strict {
        println!(
            "   {} with defaulted fields",
            style(incomplete).yellow()
        );
    }

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for result in &failed {
            println!(
                "  - {}: {}",
                result.path.display(),
                result.error.as_deref().unwrap_or("unknown error")
            );
        }
    }
}

fn write_summary(path: &Path, results: &[ProcessResult]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "filename",
        "status",
        "offer_name",
        "offer_code",
        "defaulted_fields",
        "processing_time_ms",
        "error",
    ])?;

    for result in results {
        let filename = result
            .path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("");

        if let Some(extraction) = &result.extraction {
            let defaulted: Vec<&str> = extraction.defaulted().iter().map(|f| f.path()).collect();
            wtr.write_record([
                filename,
                "success",
                &extraction.tariff.offer_name,
                &extraction.tariff.offer_code,
                &defaulted.join(";"),
                &result.processing_time_ms.to_string(),
                "",
            ])?;
        } else {
            wtr.write_record([
                filename,
                "error",
                "",
                "",
                "",
                &result.processing_time_ms.to_string(),
                result.error.as_deref().unwrap_or(""),
            ])?;
        }
    }

    wtr.flush()?;
    Ok(())
}
