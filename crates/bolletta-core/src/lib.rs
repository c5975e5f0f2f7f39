//! Core library for utility contract cost estimation.
//!
//! This crate provides:
//! - PDF text loading for uploaded contracts
//! - Tariff extraction from contract text (per-field patterns with fallbacks)
//! - Monthly and annual electricity/gas cost calculation
//! - Plain-text report formatting for calculation results

pub mod calculation;
pub mod error;
pub mod models;
pub mod pdf;
pub mod report;
pub mod tariff;

pub use calculation::{CostCalculator, compute_costs};
pub use error::{BollettaError, Result};
pub use models::consumption::ConsumptionRecord;
pub use models::costs::{AnnualCosts, CalculationSummary, CostBreakdown, CostComponent, MonthlyCosts};
pub use models::tariff::{Band, TariffRecord};
pub use pdf::{PdfExtractor, PdfProcessor, PdfType};
pub use report::{TextReport, format_euro};
pub use tariff::{FieldOutcome, TariffExtraction, TariffExtractor, TariffField, extract_tariff};
