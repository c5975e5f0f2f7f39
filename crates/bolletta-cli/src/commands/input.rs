//! Loading contracts, tariffs and consumption from files.

use std::fs;
use std::path::Path;

use tracing::{info, warn};

use bolletta_core::models::config::BollettaConfig;
use bolletta_core::{ConsumptionRecord, TariffExtraction, TariffExtractor, TariffRecord};

fn extension(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}

/// Extract a tariff from a PDF or plain-text contract.
///
/// An unreadable PDF yields the reference tariff when the configuration
/// allows it. Strict mode rejects any defaulted field.
pub fn load_extraction(
    path: &Path,
    extractor: &TariffExtractor,
    config: &BollettaConfig,
) -> anyhow::Result<TariffExtraction> {
    if !path.exists() {
        anyhow::bail!("Input file not found: {}", path.display());
    }

    info!("Processing file: {}", path.display());

    let extraction = match extension(path).as_str() {
        "pdf" => {
            let data = fs::read(path)?;
            match extractor.extract_from_pdf(&data) {
                Ok(extraction) => extraction,
                Err(e) if config.extraction.fallback_on_unreadable_pdf => {
                    warn!(
                        "Could not read {} ({}), using reference tariff",
                        path.display(),
                        e
                    );
                    TariffExtraction::fallback()
                }
                Err(e) => return Err(e.into()),
            }
        }
        "txt" => extractor.extract(&fs::read_to_string(path)?),
        other => anyhow::bail!("Unsupported file format: {}", other),
    };

    if config.extraction.strict {
        return Ok(extraction.ensure_complete()?);
    }
    Ok(extraction)
}

/// Load a tariff from a stored JSON record or by extracting it from a contract.
pub fn load_tariff(path: &Path, config: &BollettaConfig) -> anyhow::Result<TariffRecord> {
    if extension(path) == "json" {
        let content = fs::read_to_string(path)?;
        let tariff = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Invalid tariff file {}: {}", path.display(), e))?;
        return Ok(tariff);
    }

    let extractor = TariffExtractor::from_config(config);
    Ok(load_extraction(path, &extractor, config)?.into_tariff())
}

/// Load a consumption record from JSON.
pub fn load_consumption(path: &Path) -> anyhow::Result<ConsumptionRecord> {
    let content = fs::read_to_string(path)?;
    serde_json::from_str(&content)
        .map_err(|e| anyhow::anyhow!("Invalid consumption file {}: {}", path.display(), e))
}

/// Serialize output according to the configuration.
pub fn to_json<T: serde::Serialize>(value: &T, config: &BollettaConfig) -> anyhow::Result<String> {
    if config.output.pretty_json {
        Ok(serde_json::to_string_pretty(value)?)
    } else {
        Ok(serde_json::to_string(value)?)
    }
}
