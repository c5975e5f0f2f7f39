//! PDF processing module.

mod extractor;

pub use extractor::PdfExtractor;

use crate::error::PdfError;

/// Type of PDF content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PdfType {
    /// Contains extractable text.
    Text,
    /// No usable text (scanned or blank).
    Empty,
}

impl PdfType {
    /// Classify extracted text by its non-whitespace length.
    pub fn classify(text: &str, min_text_length: usize) -> Self {
        let meaningful = text.chars().filter(|c| !c.is_whitespace()).count();
        if meaningful >= min_text_length.max(1) {
            PdfType::Text
        } else {
            PdfType::Empty
        }
    }
}

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// Trait for PDF processing implementations.
pub trait PdfProcessor {
    /// Load a PDF from bytes.
    fn load(&mut self, data: &[u8]) -> Result<()>;

    /// Get the number of pages in the PDF.
    fn page_count(&self) -> u32;

    /// Extract text from the entire PDF.
    fn extract_text(&self) -> Result<String>;
}
