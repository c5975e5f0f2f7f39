//! Table-driven tariff extractor.

use regex::Regex;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, info, trace, warn};

use crate::error::ExtractionError;
use crate::models::config::BollettaConfig;
use crate::models::tariff::TariffRecord;
use crate::pdf::{PdfExtractor, PdfProcessor, PdfType};

use super::amounts::parse_decimal_comma;
use super::fields::{Slot, TariffField};
use super::{ExtractionMatch, FieldOutcome};

/// Whether a field was read from the document or defaulted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldStatus {
    Extracted,
    Defaulted,
}

/// Per-field record of how its value was obtained.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldProvenance {
    pub field: TariffField,
    pub status: FieldStatus,
    /// Matched source text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Byte span of the match in the input.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<(usize, usize)>,
}

impl FieldProvenance {
    fn from_outcome<T>(field: TariffField, outcome: &FieldOutcome<T>) -> Self {
        match outcome {
            FieldOutcome::Matched(m) => Self {
                field,
                status: FieldStatus::Extracted,
                source: Some(m.source.clone()),
                position: m.position,
            },
            FieldOutcome::Fallback(_) => Self {
                field,
                status: FieldStatus::Defaulted,
                source: None,
                position: None,
            },
        }
    }
}

/// A fully-populated tariff with per-field provenance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TariffExtraction {
    pub tariff: TariffRecord,
    pub fields: Vec<FieldProvenance>,
}

impl TariffExtraction {
    /// The reference tariff with every field marked as defaulted.
    pub fn fallback() -> Self {
        Self {
            tariff: TariffRecord::reference(),
            fields: TariffField::ALL
                .iter()
                .map(|&field| FieldProvenance {
                    field,
                    status: FieldStatus::Defaulted,
                    source: None,
                    position: None,
                })
                .collect(),
        }
    }

    /// Fields that carry their fallback value.
    pub fn defaulted(&self) -> Vec<TariffField> {
        self.with_status(FieldStatus::Defaulted)
    }

    /// Fields read from the document.
    pub fn extracted(&self) -> Vec<TariffField> {
        self.with_status(FieldStatus::Extracted)
    }

    pub fn is_complete(&self) -> bool {
        self.fields.iter().all(|f| f.status == FieldStatus::Extracted)
    }

    /// Reject the extraction if any field was defaulted.
    pub fn ensure_complete(self) -> Result<Self, ExtractionError> {
        let fields = self.defaulted();
        if fields.is_empty() {
            Ok(self)
        } else {
            Err(ExtractionError::Defaulted { fields })
        }
    }

    pub fn into_tariff(self) -> TariffRecord {
        self.tariff
    }

    fn with_status(&self, status: FieldStatus) -> Vec<TariffField> {
        self.fields
            .iter()
            .filter(|f| f.status == status)
            .map(|f| f.field)
            .collect()
    }
}

/// Extracts tariff terms from contract text.
///
/// Every field is searched independently; a field whose pattern does not
/// match, or whose capture cannot be parsed, takes the reference value.
pub struct TariffExtractor {
    /// Log defaulted fields at warn level.
    warn_on_fallback: bool,
    /// Below this many non-whitespace characters a PDF is reported as likely scanned.
    min_text_length: usize,
}

impl TariffExtractor {
    /// Create a new extractor with default settings.
    pub fn new() -> Self {
        Self {
            warn_on_fallback: false,
            min_text_length: 1,
        }
    }

    /// Create an extractor from configuration.
    pub fn from_config(config: &BollettaConfig) -> Self {
        Self::new()
            .with_fallback_warnings(config.extraction.warn_on_fallback)
            .with_min_text_length(config.pdf.min_text_length)
    }

    /// Set fallback warnings.
    pub fn with_fallback_warnings(mut self, warn: bool) -> Self {
        self.warn_on_fallback = warn;
        self
    }

    /// Set the text length below which a PDF is reported as likely scanned.
    pub fn with_min_text_length(mut self, len: usize) -> Self {
        self.min_text_length = len;
        self
    }

    /// Extract a tariff from plain text. Never fails.
    pub fn extract(&self, text: &str) -> TariffExtraction {
        info!("Extracting tariff from {} characters of text", text.len());

        let mut reference = TariffRecord::reference();
        let mut tariff = TariffRecord::reference();
        let mut fields = Vec::with_capacity(TariffField::ALL.len());

        for field in TariffField::ALL {
            let provenance = match field.slot() {
                Slot::Text(slot) => {
                    let outcome = FieldOutcome::from_match(find_text(field.pattern(), text), || {
                        slot(&mut reference).clone()
                    });
                    let provenance = FieldProvenance::from_outcome(field, &outcome);
                    *slot(&mut tariff) = outcome.into_value();
                    provenance
                }
                Slot::Amount(slot) => {
                    let outcome = FieldOutcome::from_match(find_amount(field.pattern(), text), || {
                        *slot(&mut reference)
                    });
                    let provenance = FieldProvenance::from_outcome(field, &outcome);
                    *slot(&mut tariff) = outcome.into_value();
                    provenance
                }
            };
            self.log_outcome(&provenance);
            fields.push(provenance);
        }

        let extraction = TariffExtraction { tariff, fields };
        info!(
            "Extracted tariff '{}' ({} of {} fields matched)",
            extraction.tariff.offer_name,
            extraction.extracted().len(),
            TariffField::ALL.len()
        );
        extraction
    }

    /// Load a PDF and extract a tariff from its text.
    ///
    /// Only load and text-extraction failures are errors. Whatever text the
    /// document yields goes through the field patterns, however short.
    pub fn extract_from_pdf(&self, data: &[u8]) -> crate::Result<TariffExtraction> {
        let mut pdf = PdfExtractor::new();
        pdf.load(data)?;
        debug!("Extracting text from {} page(s)", pdf.page_count());

        let text = pdf.extract_text()?;
        Ok(self.extract_document_text(&text))
    }

    fn extract_document_text(&self, text: &str) -> TariffExtraction {
        if PdfType::classify(text, self.min_text_length) == PdfType::Empty {
            warn!(
                "Document yielded little text ({} characters), it may be scanned",
                text.trim().len()
            );
        }
        self.extract(text)
    }

    fn log_outcome(&self, provenance: &FieldProvenance) {
        match provenance.status {
            FieldStatus::Extracted => trace!(
                "{} matched {:?}",
                provenance.field,
                provenance.source.as_deref().unwrap_or_default()
            ),
            FieldStatus::Defaulted if self.warn_on_fallback => {
                warn!("{} not found, using reference value", provenance.field)
            }
            FieldStatus::Defaulted => {
                debug!("{} not found, using reference value", provenance.field)
            }
        }
    }
}

impl Default for TariffExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Extract a tariff from contract text, defaulting any field not found.
pub fn extract_tariff(text: &str) -> TariffRecord {
    TariffExtractor::new().extract(text).into_tariff()
}

fn find_text(pattern: &Regex, text: &str) -> Option<ExtractionMatch<String>> {
    let caps = pattern.captures(text)?;
    let full = caps.get(0)?;
    let value = caps.get(1)?.as_str().trim();
    if value.is_empty() {
        return None;
    }
    Some(ExtractionMatch::new(value.to_string(), full.as_str()).with_position(full.start(), full.end()))
}

fn find_amount(pattern: &Regex, text: &str) -> Option<ExtractionMatch<Decimal>> {
    let caps = pattern.captures(text)?;
    let full = caps.get(0)?;
    let value = parse_decimal_comma(caps.get(1)?.as_str())?;
    Some(ExtractionMatch::new(value, full.as_str()).with_position(full.start(), full.end()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::tariff::Band;
    use pretty_assertions::assert_eq;
    use std::str::FromStr;

    const CONTRACT: &str = r#"
        CONDIZIONI TECNICO ECONOMICHE
        Nome Offerta: Luce Verde Flex
        Cod. Offerta: 011234LVF01XXLUCEVERDE2025
        PREZZO OFFERTA
        PUN + 0,06 €/kWh
        Il prezzo della componente energia è pari a 0,12500 €/kWh in fascia F0,
        pari a 0,14000 €/kWh in fascia F1, pari a 0,13000 €/kWh in fascia F2,
        pari a 0,11000 €/kWh in fascia F3 e pari a 0,12000 €/kWh in fascia F23.
        Comm.ne fissa, pari a 12,50 €/mese
        Contributo Mensile, pari a 5,00 €/mese
        Programmazione Prelievi, pari a 0,02 €/kWh
        Comm.ne Variabile, pari a 0,015 €/kWh
    "#;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_extract_full_contract() {
        let extraction = TariffExtractor::new().extract(CONTRACT);
        let tariff = &extraction.tariff;

        assert_eq!(tariff.offer_name, "Luce Verde Flex");
        assert_eq!(tariff.offer_code, "011234LVF01XXLUCEVERDE2025");
        assert_eq!(tariff.price_formula, "PUN + 0,06 €/kWh");
        assert_eq!(tariff.fixed_fees.monthly_fee, dec("12.50"));
        assert_eq!(tariff.fixed_fees.contribution_fee, dec("5.00"));
        assert_eq!(tariff.variable_fees.programmation_fee, dec("0.02"));
        assert_eq!(tariff.variable_fees.variable_commission, dec("0.015"));
        assert_eq!(tariff.pun_rates.rate(Band::F0), dec("0.125"));
        assert_eq!(tariff.pun_rates.rate(Band::F1), dec("0.14"));
        assert_eq!(tariff.pun_rates.rate(Band::F2), dec("0.13"));
        assert_eq!(tariff.pun_rates.rate(Band::F3), dec("0.11"));
        assert_eq!(tariff.pun_rates.rate(Band::F23), dec("0.12"));
        assert!(extraction.is_complete());
    }

    #[test]
    fn test_unmatched_text_gives_reference_tariff() {
        let extraction = TariffExtractor::new().extract("Lorem ipsum dolor sit amet");
        assert_eq!(extraction.tariff, TariffRecord::reference());
        assert_eq!(extraction.defaulted(), TariffField::ALL.to_vec());
        assert_eq!(extraction, TariffExtraction::fallback());
    }

    #[test]
    fn test_empty_text_gives_reference_tariff() {
        assert_eq!(extract_tariff(""), TariffRecord::reference());
    }

    #[test]
    fn test_fields_fall_back_independently() {
        let text = "Nome Offerta: Solo Nome\nComm.ne fissa, pari a 11,50 €/mese\n";
        let extraction = TariffExtractor::new().extract(text);

        assert_eq!(extraction.tariff.offer_name, "Solo Nome");
        assert_eq!(extraction.tariff.fixed_fees.monthly_fee, dec("11.50"));
        assert_eq!(extraction.tariff.fixed_fees.contribution_fee, dec("6.00"));
        assert_eq!(extraction.tariff.offer_code, "027909ESVML01XXENERGYSMARTER2025");
        assert_eq!(
            extraction.extracted(),
            vec![TariffField::OfferName, TariffField::MonthlyFee]
        );
    }

    #[test]
    fn test_decimal_comma_amount() {
        let tariff = extract_tariff("Contributo Mensile, pari a 11,50");
        assert_eq!(tariff.fixed_fees.contribution_fee, dec("11.50"));
    }

    #[test]
    fn test_unparsable_rate_falls_back() {
        let tariff = extract_tariff("pari a ,, €/kWh in fascia F1");
        assert_eq!(tariff.pun_rates.f1, dec("0.14559"));
    }

    #[test]
    fn test_f2_does_not_take_f23_rate() {
        let text = "pari a 0,20000 €/kWh in fascia F23\npari a 0,30000 €/kWh in fascia F2\n";
        let tariff = extract_tariff(text);
        assert_eq!(tariff.pun_rates.f23, dec("0.2"));
        assert_eq!(tariff.pun_rates.f2, dec("0.3"));
    }

    #[test]
    fn test_first_match_wins() {
        let text = "Nome Offerta: Prima\nNome Offerta: Seconda\n";
        assert_eq!(extract_tariff(text).offer_name, "Prima");
    }

    #[test]
    fn test_match_records_source_span() {
        let text = "xx Cod. Offerta: ABC123\n";
        let extraction = TariffExtractor::new().extract(text);
        let code = extraction
            .fields
            .iter()
            .find(|f| f.field == TariffField::OfferCode)
            .unwrap();

        assert_eq!(code.status, FieldStatus::Extracted);
        assert_eq!(code.source.as_deref(), Some("Cod. Offerta: ABC123"));
        assert_eq!(code.position, Some((3, 23)));
    }

    #[test]
    fn test_ensure_complete_lists_defaulted_fields() {
        let err = TariffExtractor::new()
            .extract(CONTRACT.replace("Contributo Mensile", "Contributo").as_str())
            .ensure_complete()
            .unwrap_err();

        match err {
            ExtractionError::Defaulted { fields } => {
                assert_eq!(fields, vec![TariffField::ContributionFee]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_extraction_is_deterministic() {
        let extractor = TariffExtractor::new();
        assert_eq!(extractor.extract(CONTRACT), extractor.extract(CONTRACT));
    }

    #[test]
    fn test_short_document_text_keeps_matches() {
        let extraction = TariffExtractor::new()
            .with_min_text_length(50)
            .extract_document_text("Nome Offerta: Casa Mini\n");

        assert_eq!(extraction.tariff.offer_name, "Casa Mini");
        assert_eq!(extraction.extracted(), vec![TariffField::OfferName]);
        assert_eq!(extraction.defaulted().len(), TariffField::ALL.len() - 1);
        assert_eq!(extraction.tariff.fixed_fees.monthly_fee, dec("11.00"));
    }

    #[test]
    fn test_invalid_pdf_is_error() {
        let result = TariffExtractor::new().extract_from_pdf(b"not a pdf");
        assert!(matches!(result, Err(crate::BollettaError::Pdf(_))));
    }
}
