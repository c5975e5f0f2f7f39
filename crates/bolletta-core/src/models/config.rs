//! Configuration structures for the extraction pipeline.

use serde::{Deserialize, Serialize};

use crate::error::{BollettaError, Result};

/// Main configuration for bolletta.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BollettaConfig {
    /// Tariff extraction configuration.
    pub extraction: ExtractionConfig,

    /// PDF processing configuration.
    pub pdf: PdfConfig,

    /// Output configuration.
    pub output: OutputConfig,
}

/// Tariff extraction configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Log every defaulted field at warn level instead of debug.
    pub warn_on_fallback: bool,

    /// Fail extraction when any field had to be defaulted.
    pub strict: bool,

    /// Use the reference tariff when a PDF cannot be read at all.
    pub fallback_on_unreadable_pdf: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            warn_on_fallback: false,
            strict: false,
            fallback_on_unreadable_pdf: true,
        }
    }
}

/// PDF processing configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Non-whitespace characters below which a PDF is reported as likely scanned.
    pub min_text_length: usize,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self { min_text_length: 50 }
    }
}

/// Output configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Pretty-print JSON output.
    pub pretty_json: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { pretty_json: true }
    }
}

impl BollettaConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| BollettaError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: BollettaConfig =
            serde_json::from_str(r#"{"extraction": {"strict": true}}"#).unwrap();
        assert!(config.extraction.strict);
        assert!(config.extraction.fallback_on_unreadable_pdf);
        assert_eq!(config.pdf.min_text_length, 50);
        assert!(config.output.pretty_json);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = BollettaConfig::from_file(std::path::Path::new("/nonexistent/bolletta.json"))
            .unwrap_err();
        assert!(matches!(err, BollettaError::Io(_)));
    }
}
