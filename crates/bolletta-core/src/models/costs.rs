//! Computed cost breakdown models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::tariff::Band;

/// Monthly and annual costs derived from a tariff and a consumption record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostBreakdown {
    pub monthly_costs: MonthlyCosts,
    pub annual_costs: AnnualCosts,
}

/// Costs for one billing month, in euro.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyCosts {
    /// Energy cost per billed band.
    pub electricity_by_band: BandCosts,

    /// Monthly fee plus contribution fee.
    pub fixed_costs: Decimal,

    /// Band costs plus fixed costs.
    pub total_electricity: Decimal,

    /// Gas cost.
    pub gas: Decimal,

    /// Electricity plus gas.
    pub total: Decimal,
}

/// Electricity cost per billed band.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BandCosts {
    #[serde(rename = "F0")]
    pub f0: Decimal,
    #[serde(rename = "F1")]
    pub f1: Decimal,
    #[serde(rename = "F2")]
    pub f2: Decimal,
    #[serde(rename = "F3")]
    pub f3: Decimal,
}

impl BandCosts {
    pub fn get(&self, band: Band) -> Decimal {
        match band {
            Band::F0 => self.f0,
            Band::F1 => self.f1,
            Band::F2 => self.f2,
            Band::F3 => self.f3,
            Band::F23 => Decimal::ZERO,
        }
    }

    pub(crate) fn set(&mut self, band: Band, cost: Decimal) {
        match band {
            Band::F0 => self.f0 = cost,
            Band::F1 => self.f1 = cost,
            Band::F2 => self.f2 = cost,
            Band::F3 => self.f3 = cost,
            Band::F23 => {}
        }
    }

    /// Sum of the billed bands.
    pub fn total(&self) -> Decimal {
        Band::BILLED
            .iter()
            .fold(Decimal::ZERO, |sum, &band| sum.saturating_add(self.get(band)))
    }
}

/// Twelve-month projection, in euro.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnualCosts {
    pub electricity: Decimal,
    pub gas: Decimal,
    pub total: Decimal,
}

/// One labelled line of the monthly breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostComponent {
    pub label: String,
    pub amount: Decimal,
    /// Percentage of the monthly total, two decimals.
    pub share: Decimal,
}

/// Compact view of a calculation for listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationSummary {
    pub offer_name: String,
    pub monthly_cost: Decimal,
    pub annual_cost: Decimal,
}

impl CostBreakdown {
    /// Listing entry for this breakdown.
    pub fn summary(&self, offer_name: impl Into<String>) -> CalculationSummary {
        CalculationSummary {
            offer_name: offer_name.into(),
            monthly_cost: self.monthly_costs.total,
            annual_cost: self.annual_costs.total,
        }
    }

    /// Monthly cost lines with their share of the monthly total.
    ///
    /// Every billed band is listed; gas only when it is positive.
    pub fn components(&self) -> Vec<CostComponent> {
        let monthly = &self.monthly_costs;
        let mut lines: Vec<(String, Decimal)> = Band::BILLED
            .iter()
            .map(|&band| (format!("Electricity {band}"), monthly.electricity_by_band.get(band)))
            .collect();
        lines.push(("Fixed costs".to_string(), monthly.fixed_costs));
        if monthly.gas > Decimal::ZERO {
            lines.push(("Gas".to_string(), monthly.gas));
        }

        lines
            .into_iter()
            .map(|(label, amount)| CostComponent {
                share: share_of(amount, monthly.total),
                label,
                amount,
            })
            .collect()
    }
}

fn share_of(amount: Decimal, total: Decimal) -> Decimal {
    if total.is_zero() {
        return Decimal::ZERO;
    }
    amount
        .checked_div(total)
        .map(|ratio| ratio.saturating_mul(Decimal::ONE_HUNDRED).round_dp(2))
        .unwrap_or_default()
}
