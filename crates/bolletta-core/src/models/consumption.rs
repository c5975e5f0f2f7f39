//! User-declared consumption for one billing cycle.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::lenient;
use super::tariff::Band;

/// Electricity per band in kWh, gas in m³. Missing values count as zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsumptionRecord {
    #[serde(
        rename = "electricityF0",
        default,
        deserialize_with = "lenient::optional_decimal",
        skip_serializing_if = "Option::is_none"
    )]
    pub electricity_f0: Option<Decimal>,

    #[serde(
        rename = "electricityF1",
        default,
        deserialize_with = "lenient::optional_decimal",
        skip_serializing_if = "Option::is_none"
    )]
    pub electricity_f1: Option<Decimal>,

    #[serde(
        rename = "electricityF2",
        default,
        deserialize_with = "lenient::optional_decimal",
        skip_serializing_if = "Option::is_none"
    )]
    pub electricity_f2: Option<Decimal>,

    #[serde(
        rename = "electricityF3",
        default,
        deserialize_with = "lenient::optional_decimal",
        skip_serializing_if = "Option::is_none"
    )]
    pub electricity_f3: Option<Decimal>,

    #[serde(
        default,
        deserialize_with = "lenient::optional_decimal",
        skip_serializing_if = "Option::is_none"
    )]
    pub gas: Option<Decimal>,
}

impl ConsumptionRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the kWh consumed in a band. `F23` is not billed and is ignored.
    pub fn with_electricity(mut self, band: Band, kwh: Decimal) -> Self {
        match band {
            Band::F0 => self.electricity_f0 = Some(kwh),
            Band::F1 => self.electricity_f1 = Some(kwh),
            Band::F2 => self.electricity_f2 = Some(kwh),
            Band::F3 => self.electricity_f3 = Some(kwh),
            Band::F23 => {}
        }
        self
    }

    /// Set the gas consumed, in m³.
    pub fn with_gas(mut self, cubic_meters: Decimal) -> Self {
        self.gas = Some(cubic_meters);
        self
    }

    /// kWh consumed in a band, zero when not declared.
    pub fn electricity(&self, band: Band) -> Decimal {
        let value = match band {
            Band::F0 => self.electricity_f0,
            Band::F1 => self.electricity_f1,
            Band::F2 => self.electricity_f2,
            Band::F3 => self.electricity_f3,
            Band::F23 => None,
        };
        value.unwrap_or_default()
    }

    /// Gas consumed in m³, zero when not declared.
    pub fn gas(&self) -> Decimal {
        self.gas.unwrap_or_default()
    }
}
