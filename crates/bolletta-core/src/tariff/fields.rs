//! Field table: every tariff leaf with its pattern and record slot.

use std::fmt;

use regex::Regex;
use rust_decimal::Decimal;
use serde::{Serialize, Serializer};

use crate::models::tariff::{Band, TariffRecord};

use super::patterns;

/// A leaf field of [`TariffRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TariffField {
    OfferName,
    OfferCode,
    PriceFormula,
    MonthlyFee,
    ContributionFee,
    ProgrammationFee,
    VariableCommission,
    PunRate(Band),
}

/// Where a field's value lives inside a [`TariffRecord`].
pub enum Slot {
    Text(fn(&mut TariffRecord) -> &mut String),
    Amount(fn(&mut TariffRecord) -> &mut Decimal),
}

impl TariffField {
    /// All fields in record order.
    pub const ALL: [TariffField; 12] = [
        TariffField::OfferName,
        TariffField::OfferCode,
        TariffField::PriceFormula,
        TariffField::MonthlyFee,
        TariffField::ContributionFee,
        TariffField::ProgrammationFee,
        TariffField::VariableCommission,
        TariffField::PunRate(Band::F0),
        TariffField::PunRate(Band::F1),
        TariffField::PunRate(Band::F2),
        TariffField::PunRate(Band::F3),
        TariffField::PunRate(Band::F23),
    ];

    /// Dotted JSON path of the field.
    pub fn path(&self) -> &'static str {
        match self {
            TariffField::OfferName => "offerName",
            TariffField::OfferCode => "offerCode",
            TariffField::PriceFormula => "priceFormula",
            TariffField::MonthlyFee => "fixedFees.monthlyFee",
            TariffField::ContributionFee => "fixedFees.contributionFee",
            TariffField::ProgrammationFee => "variableFees.programmationFee",
            TariffField::VariableCommission => "variableFees.variableCommission",
            TariffField::PunRate(Band::F0) => "punRates.F0",
            TariffField::PunRate(Band::F1) => "punRates.F1",
            TariffField::PunRate(Band::F2) => "punRates.F2",
            TariffField::PunRate(Band::F3) => "punRates.F3",
            TariffField::PunRate(Band::F23) => "punRates.F23",
        }
    }

    pub fn pattern(&self) -> &'static Regex {
        match self {
            TariffField::OfferName => &patterns::OFFER_NAME,
            TariffField::OfferCode => &patterns::OFFER_CODE,
            TariffField::PriceFormula => &patterns::PRICE_FORMULA,
            TariffField::MonthlyFee => &patterns::MONTHLY_FEE,
            TariffField::ContributionFee => &patterns::CONTRIBUTION_FEE,
            TariffField::ProgrammationFee => &patterns::PROGRAMMATION_FEE,
            TariffField::VariableCommission => &patterns::VARIABLE_COMMISSION,
            TariffField::PunRate(band) => patterns::pun_rate(*band),
        }
    }

    pub fn slot(&self) -> Slot {
        match self {
            TariffField::OfferName => Slot::Text(|t| &mut t.offer_name),
            TariffField::OfferCode => Slot::Text(|t| &mut t.offer_code),
            TariffField::PriceFormula => Slot::Text(|t| &mut t.price_formula),
            TariffField::MonthlyFee => Slot::Amount(|t| &mut t.fixed_fees.monthly_fee),
            TariffField::ContributionFee => Slot::Amount(|t| &mut t.fixed_fees.contribution_fee),
            TariffField::ProgrammationFee => {
                Slot::Amount(|t| &mut t.variable_fees.programmation_fee)
            }
            TariffField::VariableCommission => {
                Slot::Amount(|t| &mut t.variable_fees.variable_commission)
            }
            TariffField::PunRate(Band::F0) => Slot::Amount(|t| t.pun_rates.rate_mut(Band::F0)),
            TariffField::PunRate(Band::F1) => Slot::Amount(|t| t.pun_rates.rate_mut(Band::F1)),
            TariffField::PunRate(Band::F2) => Slot::Amount(|t| t.pun_rates.rate_mut(Band::F2)),
            TariffField::PunRate(Band::F3) => Slot::Amount(|t| t.pun_rates.rate_mut(Band::F3)),
            TariffField::PunRate(Band::F23) => Slot::Amount(|t| t.pun_rates.rate_mut(Band::F23)),
        }
    }

    /// The field's value in `tariff`, rendered as text.
    pub fn value_in(&self, tariff: &TariffRecord) -> String {
        match self {
            TariffField::OfferName => tariff.offer_name.clone(),
            TariffField::OfferCode => tariff.offer_code.clone(),
            TariffField::PriceFormula => tariff.price_formula.clone(),
            TariffField::MonthlyFee => tariff.fixed_fees.monthly_fee.to_string(),
            TariffField::ContributionFee => tariff.fixed_fees.contribution_fee.to_string(),
            TariffField::ProgrammationFee => tariff.variable_fees.programmation_fee.to_string(),
            TariffField::VariableCommission => tariff.variable_fees.variable_commission.to_string(),
            TariffField::PunRate(band) => tariff.pun_rates.rate(*band).to_string(),
        }
    }
}

impl fmt::Display for TariffField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

impl Serialize for TariffField {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_paths_are_unique() {
        let paths: HashSet<&str> = TariffField::ALL.iter().map(|f| f.path()).collect();
        assert_eq!(paths.len(), TariffField::ALL.len());
    }

    #[test]
    fn test_slots_address_distinct_values() {
        let mut tariff = TariffRecord::reference();
        for (i, field) in TariffField::ALL.iter().enumerate() {
            match field.slot() {
                Slot::Text(slot) => *slot(&mut tariff) = format!("text-{i}"),
                Slot::Amount(slot) => *slot(&mut tariff) = Decimal::from(i),
            }
        }

        assert_eq!(tariff.offer_name, "text-0");
        assert_eq!(tariff.price_formula, "text-2");
        assert_eq!(tariff.fixed_fees.monthly_fee, Decimal::from(3));
        assert_eq!(tariff.variable_fees.variable_commission, Decimal::from(6));
        assert_eq!(tariff.pun_rates.f23, Decimal::from(11));
    }

    #[test]
    fn test_value_in() {
        let tariff = TariffRecord::reference();
        assert_eq!(TariffField::OfferName.value_in(&tariff), "Energy Smart Casa 2025");
        assert_eq!(TariffField::MonthlyFee.value_in(&tariff), "11.00");
        assert_eq!(TariffField::PunRate(Band::F1).value_in(&tariff), "0.14559");
    }

    #[test]
    fn test_value_in_reads_what_slot_writes() {
        let mut tariff = TariffRecord::reference();
        for (i, field) in TariffField::ALL.iter().enumerate() {
            match field.slot() {
                Slot::Text(slot) => *slot(&mut tariff) = format!("text-{i}"),
                Slot::Amount(slot) => *slot(&mut tariff) = Decimal::from(i * 10),
            }
        }

        for (i, field) in TariffField::ALL.iter().enumerate() {
            let expected = match field.slot() {
                Slot::Text(_) => format!("text-{i}"),
                Slot::Amount(_) => (i * 10).to_string(),
            };
            assert_eq!(field.value_in(&tariff), expected, "{field}");
        }
    }
}
