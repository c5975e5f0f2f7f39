//! Tariff extraction from contract text.

pub mod amounts;
mod extractor;
pub mod fields;
pub mod patterns;

pub use extractor::{FieldProvenance, FieldStatus, TariffExtraction, TariffExtractor, extract_tariff};
pub use fields::TariffField;

/// A value found in the source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionMatch<T> {
    /// Extracted value.
    pub value: T,
    /// Position in source text.
    pub position: Option<(usize, usize)>,
    /// Source text that was matched.
    pub source: String,
}

impl<T> ExtractionMatch<T> {
    pub fn new(value: T, source: impl Into<String>) -> Self {
        Self {
            value,
            position: None,
            source: source.into(),
        }
    }

    pub fn with_position(mut self, start: usize, end: usize) -> Self {
        self.position = Some((start, end));
        self
    }
}

/// Outcome of extracting one field: found in the text, or defaulted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldOutcome<T> {
    Matched(ExtractionMatch<T>),
    Fallback(T),
}

impl<T> FieldOutcome<T> {
    pub fn value(&self) -> &T {
        match self {
            FieldOutcome::Matched(m) => &m.value,
            FieldOutcome::Fallback(v) => v,
        }
    }

    pub fn into_value(self) -> T {
        match self {
            FieldOutcome::Matched(m) => m.value,
            FieldOutcome::Fallback(v) => v,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, FieldOutcome::Fallback(_))
    }

    /// Use the match when present, otherwise the fallback.
    pub fn from_match(found: Option<ExtractionMatch<T>>, fallback: impl FnOnce() -> T) -> Self {
        match found {
            Some(m) => FieldOutcome::Matched(m),
            None => FieldOutcome::Fallback(fallback()),
        }
    }
}
