//! Cost calculator for a tariff and a consumption record.

use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::models::consumption::ConsumptionRecord;
use crate::models::costs::{AnnualCosts, BandCosts, CostBreakdown, MonthlyCosts};
use crate::models::tariff::{Band, TariffRecord};

use super::{MONTHS_PER_YEAR, PUN_MARKUP, round_cents};

/// Prices consumption against a tariff.
///
/// Every figure is rounded to cents as soon as it is produced and totals
/// are summed from the rounded parts, so stored and displayed values agree.
/// Arithmetic saturates at the `Decimal` bounds instead of overflowing.
#[derive(Debug, Clone, Copy, Default)]
pub struct CostCalculator;

impl CostCalculator {
    pub fn new() -> Self {
        Self
    }

    /// Unrounded cost of `kwh` consumed in `band`; zero when nothing was used.
    pub fn band_cost(&self, tariff: &TariffRecord, band: Band, kwh: Decimal) -> Decimal {
        if kwh.is_zero() {
            return Decimal::ZERO;
        }
        let price = tariff.pun_rates.rate(band).saturating_add(PUN_MARKUP);
        let energy = kwh.saturating_mul(price);
        let surcharges = kwh.saturating_mul(tariff.per_kwh_surcharge());
        energy.saturating_add(surcharges)
    }

    /// Compute the monthly and annual breakdown.
    pub fn calculate(&self, tariff: &TariffRecord, consumption: &ConsumptionRecord) -> CostBreakdown {
        let mut electricity_by_band = BandCosts::default();
        for band in Band::BILLED {
            let cost = round_cents(self.band_cost(tariff, band, consumption.electricity(band)));
            debug!("Band {} cost: {}", band, cost);
            electricity_by_band.set(band, cost);
        }

        let fixed_costs = round_cents(tariff.monthly_fixed());
        let total_electricity = round_cents(electricity_by_band.total().saturating_add(fixed_costs));

        // Gas consumption is carried through as its cost; no gas rate is applied.
        let gas = round_cents(consumption.gas());
        let total = round_cents(total_electricity.saturating_add(gas));

        let annual_electricity = round_cents(total_electricity.saturating_mul(MONTHS_PER_YEAR));
        let annual_gas = round_cents(gas.saturating_mul(MONTHS_PER_YEAR));

        let breakdown = CostBreakdown {
            monthly_costs: MonthlyCosts {
                electricity_by_band,
                fixed_costs,
                total_electricity,
                gas,
                total,
            },
            annual_costs: AnnualCosts {
                electricity: annual_electricity,
                gas: annual_gas,
                total: round_cents(annual_electricity.saturating_add(annual_gas)),
            },
        };

        info!(
            "Calculated costs for '{}': {} monthly, {} annual",
            tariff.offer_name, breakdown.monthly_costs.total, breakdown.annual_costs.total
        );
        breakdown
    }
}

/// Compute costs for a consumption record under a tariff.
pub fn compute_costs(tariff: &TariffRecord, consumption: &ConsumptionRecord) -> CostBreakdown {
    CostCalculator::new().calculate(tariff, consumption)
}
