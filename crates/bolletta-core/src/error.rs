//! Error types for the bolletta-core library.

use thiserror::Error;

use crate::tariff::TariffField;

/// Main error type for the bolletta library.
#[derive(Error, Debug)]
pub enum BollettaError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// Tariff extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,
}

/// Errors related to tariff extraction.
///
/// Plain extraction never fails; this surfaces only from the opt-in strict check.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// One or more fields were not found and carry their fallback value.
    #[error("{} field(s) fell back to defaults: {}", .fields.len(), join_fields(.fields))]
    Defaulted { fields: Vec<TariffField> },
}

fn join_fields(fields: &[TariffField]) -> String {
    fields
        .iter()
        .map(|f| f.path())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Result type for the bolletta library.
pub type Result<T> = std::result::Result<T, BollettaError>;
