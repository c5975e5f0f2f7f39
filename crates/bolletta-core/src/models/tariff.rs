//! Tariff data models.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::lenient;

/// Reference offer used whenever a contract field cannot be read.
pub const REFERENCE_OFFER_NAME: &str = "Energy Smart Casa 2025";
pub const REFERENCE_OFFER_CODE: &str = "027909ESVML01XXENERGYSMARTER2025";
pub const REFERENCE_PRICE_FORMULA: &str = "PUN + 0,05 €/kWh";

/// Electricity time-of-use band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Band {
    /// Flat rate, all hours.
    F0,
    /// Peak hours.
    F1,
    /// Mid-peak hours.
    F2,
    /// Off-peak hours.
    F3,
    /// Combined mid-peak and off-peak.
    F23,
}

impl Band {
    /// Bands that consumption is billed against.
    pub const BILLED: [Band; 4] = [Band::F0, Band::F1, Band::F2, Band::F3];

    pub fn as_str(&self) -> &'static str {
        match self {
            Band::F0 => "F0",
            Band::F1 => "F1",
            Band::F2 => "F2",
            Band::F3 => "F3",
            Band::F23 => "F23",
        }
    }

    /// Human-readable hours covered by the band.
    pub fn hours(&self) -> &'static str {
        match self {
            Band::F0 => "All hours",
            Band::F1 => "Peak hours",
            Band::F2 => "Mid-peak hours",
            Band::F3 => "Off-peak hours",
            Band::F23 => "Mid-peak and off-peak hours",
        }
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Contract terms used to price consumption.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TariffRecord {
    /// Commercial name of the offer.
    #[serde(default)]
    pub offer_name: String,

    /// Offer code printed on the contract.
    #[serde(default)]
    pub offer_code: String,

    /// Price formula as written in the contract.
    #[serde(default)]
    pub price_formula: String,

    /// Flat monthly charges.
    #[serde(default)]
    pub fixed_fees: FixedFees,

    /// Per-kWh surcharges.
    #[serde(default)]
    pub variable_fees: VariableFees,

    /// Baseline energy price per band.
    #[serde(default)]
    pub pun_rates: PunRates,
}

/// Flat monthly charges, in euro.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixedFees {
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub monthly_fee: Decimal,

    #[serde(default, deserialize_with = "lenient::decimal")]
    pub contribution_fee: Decimal,
}

/// Per-kWh surcharges, in euro.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariableFees {
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub programmation_fee: Decimal,

    #[serde(default, deserialize_with = "lenient::decimal")]
    pub variable_commission: Decimal,
}

/// PUN rates per band, in euro per kWh.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PunRates {
    #[serde(rename = "F0", default, deserialize_with = "lenient::decimal")]
    pub f0: Decimal,

    #[serde(rename = "F1", default, deserialize_with = "lenient::decimal")]
    pub f1: Decimal,

    #[serde(rename = "F2", default, deserialize_with = "lenient::decimal")]
    pub f2: Decimal,

    #[serde(rename = "F3", default, deserialize_with = "lenient::decimal")]
    pub f3: Decimal,

    #[serde(rename = "F23", default, deserialize_with = "lenient::decimal")]
    pub f23: Decimal,
}

impl PunRates {
    /// Rate quoted for a band.
    pub fn rate(&self, band: Band) -> Decimal {
        match band {
            Band::F0 => self.f0,
            Band::F1 => self.f1,
            Band::F2 => self.f2,
            Band::F3 => self.f3,
            Band::F23 => self.f23,
        }
    }

    pub fn rate_mut(&mut self, band: Band) -> &mut Decimal {
        match band {
            Band::F0 => &mut self.f0,
            Band::F1 => &mut self.f1,
            Band::F2 => &mut self.f2,
            Band::F3 => &mut self.f3,
            Band::F23 => &mut self.f23,
        }
    }
}

impl TariffRecord {
    /// The "Energy Smart Casa 2025" offer that backs every extraction fallback.
    pub fn reference() -> Self {
        Self {
            offer_name: REFERENCE_OFFER_NAME.to_string(),
            offer_code: REFERENCE_OFFER_CODE.to_string(),
            price_formula: REFERENCE_PRICE_FORMULA.to_string(),
            fixed_fees: FixedFees {
                monthly_fee: Decimal::new(1100, 2),
                contribution_fee: Decimal::new(600, 2),
            },
            variable_fees: VariableFees {
                programmation_fee: Decimal::new(1, 2),
                variable_commission: Decimal::new(1, 2),
            },
            pun_rates: PunRates {
                f0: Decimal::new(13089, 5),
                f1: Decimal::new(14559, 5),
                f2: Decimal::new(13738, 5),
                f3: Decimal::new(11713, 5),
                f23: Decimal::new(12442, 5),
            },
        }
    }

    /// Flat monthly charges applied once per calculation.
    pub fn monthly_fixed(&self) -> Decimal {
        self.fixed_fees
            .monthly_fee
            .saturating_add(self.fixed_fees.contribution_fee)
    }

    /// Per-kWh surcharges added on top of the energy price.
    pub fn per_kwh_surcharge(&self) -> Decimal {
        self.variable_fees
            .programmation_fee
            .saturating_add(self.variable_fees.variable_commission)
    }
}
