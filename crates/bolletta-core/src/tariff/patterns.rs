//! Regex patterns for the supported contract template.

use lazy_static::lazy_static;
use regex::Regex;

use crate::models::tariff::Band;

lazy_static! {
    // Offer identification
    pub static ref OFFER_NAME: Regex = Regex::new(
        r"(?i)Nome\s+Offerta:\s+([^\n]+)"
    ).unwrap();

    pub static ref OFFER_CODE: Regex = Regex::new(
        r"(?i)Cod\.\s+Offerta:\s+([^\n]+)"
    ).unwrap();

    // Formula runs to the end of its line
    pub static ref PRICE_FORMULA: Regex = Regex::new(
        r"(?i)PREZZO\s+OFFERTA\s+([^\r\n]*?)\r?\n"
    ).unwrap();

    // Fixed fees (€/month)
    pub static ref MONTHLY_FEE: Regex = Regex::new(
        r"(?i)Comm\.ne\s+fissa,\s+pari\s+a\s+([0-9]+[.,][0-9]+)"
    ).unwrap();

    pub static ref CONTRIBUTION_FEE: Regex = Regex::new(
        r"(?i)Contributo\s+Mensile,\s+pari\s+a\s+([0-9]+[.,][0-9]+)"
    ).unwrap();

    // Variable fees (€/kWh)
    pub static ref PROGRAMMATION_FEE: Regex = Regex::new(
        r"(?i)Programmazione\s+Prelievi,\s+pari\s+a\s+([0-9]+[.,][0-9]+)"
    ).unwrap();

    pub static ref VARIABLE_COMMISSION: Regex = Regex::new(
        r"(?i)Comm\.ne\s+Variabile,\s+pari\s+a\s+([0-9]+[.,][0-9]+)"
    ).unwrap();

    // PUN rates per band (€/kWh)
    pub static ref PUN_F0: Regex = pun_rate_pattern(Band::F0);
    pub static ref PUN_F1: Regex = pun_rate_pattern(Band::F1);
    pub static ref PUN_F2: Regex = pun_rate_pattern(Band::F2);
    pub static ref PUN_F3: Regex = pun_rate_pattern(Band::F3);
    pub static ref PUN_F23: Regex = pun_rate_pattern(Band::F23);
}

/// The band name must end at a word boundary so "F2" never takes an "F23" line.
fn pun_rate_pattern(band: Band) -> Regex {
    Regex::new(&format!(
        r"(?i)pari\s+a\s+([0-9,.]+)\s+€/kWh\s+in\s+fascia\s+{}\b",
        band.as_str()
    ))
    .unwrap()
}

/// PUN rate pattern for a band.
pub fn pun_rate(band: Band) -> &'static Regex {
    match band {
        Band::F0 => &PUN_F0,
        Band::F1 => &PUN_F1,
        Band::F2 => &PUN_F2,
        Band::F3 => &PUN_F3,
        Band::F23 => &PUN_F23,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_patterns_do_not_overlap() {
        let line = "pari a 0,12442 €/kWh in fascia F23";
        assert!(pun_rate(Band::F23).is_match(line));
        assert!(!pun_rate(Band::F2).is_match(line));
    }

    #[test]
    fn test_price_formula_stops_at_line_end() {
        let caps = PRICE_FORMULA
            .captures("PREZZO OFFERTA PUN + 0,06 €/kWh\nAltro testo\n")
            .unwrap();
        assert_eq!(&caps[1], "PUN + 0,06 €/kWh");
    }

    #[test]
    fn test_patterns_are_case_insensitive() {
        assert!(MONTHLY_FEE.is_match("COMM.NE FISSA, PARI A 11,00"));
        assert!(OFFER_NAME.is_match("nome offerta: Casa"));
    }
}
