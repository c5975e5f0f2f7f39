//! Plain-text rendering of a calculation.

use std::fmt::Write;

use rust_decimal::Decimal;

use crate::models::consumption::ConsumptionRecord;
use crate::models::costs::CostBreakdown;
use crate::models::tariff::{Band, TariffRecord};

pub use crate::tariff::amounts::format_euro;

/// Report over one calculation: the tariff, the declared consumption and the result.
pub struct TextReport<'a> {
    pub tariff: &'a TariffRecord,
    pub consumption: &'a ConsumptionRecord,
    pub costs: &'a CostBreakdown,
    /// Footer line, e.g. the generation date.
    pub footer: Option<String>,
}

impl<'a> TextReport<'a> {
    pub fn new(
        tariff: &'a TariffRecord,
        consumption: &'a ConsumptionRecord,
        costs: &'a CostBreakdown,
    ) -> Self {
        Self {
            tariff,
            consumption,
            costs,
            footer: None,
        }
    }

    pub fn with_footer(mut self, footer: impl Into<String>) -> Self {
        self.footer = Some(footer.into());
        self
    }

    /// Render the report. Zero consumption bands and zero gas lines are left out.
    pub fn render(&self) -> String {
        let mut out = String::new();
        // Writing to a String cannot fail
        let _ = self.write_to(&mut out);
        out
    }

    fn write_to(&self, out: &mut String) -> std::fmt::Result {
        writeln!(out, "Calculation Results")?;
        writeln!(out)?;

        writeln!(out, "Document Information")?;
        writeln!(out, "  Offer: {}", self.tariff.offer_name)?;
        writeln!(out, "  Offer Code: {}", self.tariff.offer_code)?;
        writeln!(out, "  Price Formula: {}", self.tariff.price_formula)?;
        writeln!(out)?;

        writeln!(out, "Consumption Data")?;
        for band in Band::BILLED {
            let kwh = self.consumption.electricity(band);
            if !kwh.is_zero() {
                writeln!(out, "  {} ({}): {} kWh", band, band.hours(), kwh.normalize())?;
            }
        }
        if !self.consumption.gas().is_zero() {
            writeln!(out, "  Gas: {} m³", self.consumption.gas().normalize())?;
        }
        writeln!(out)?;

        let monthly = &self.costs.monthly_costs;
        writeln!(out, "Monthly Costs")?;
        for band in Band::BILLED {
            writeln!(
                out,
                "  {} Cost: {}",
                band,
                format_euro(monthly.electricity_by_band.get(band))
            )?;
        }
        writeln!(out, "  Fixed Costs: {}", format_euro(monthly.fixed_costs))?;
        writeln!(out, "  Total Electricity: {}", format_euro(monthly.total_electricity))?;
        if monthly.gas > Decimal::ZERO {
            writeln!(out, "  Total Gas: {}", format_euro(monthly.gas))?;
        }
        writeln!(out, "  Total Monthly Cost: {}", format_euro(monthly.total))?;
        writeln!(out)?;

        let annual = &self.costs.annual_costs;
        writeln!(out, "Annual Costs")?;
        writeln!(out, "  Electricity: {}", format_euro(annual.electricity))?;
        if annual.gas > Decimal::ZERO {
            writeln!(out, "  Gas: {}", format_euro(annual.gas))?;
        }
        writeln!(out, "  Total Annual Cost: {}", format_euro(annual.total))?;
        writeln!(out)?;

        writeln!(out, "Notes:")?;
        writeln!(
            out,
            "  - Calculations based on the {} contract terms.",
            self.tariff.offer_name
        )?;
        writeln!(out, "  - Actual costs may vary based on real consumption patterns.")?;

        if let Some(footer) = &self.footer {
            writeln!(out)?;
            writeln!(out, "{footer}")?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::compute_costs;

    #[test]
    fn test_report_sections() {
        let tariff = TariffRecord::reference();
        let consumption = ConsumptionRecord::new().with_electricity(Band::F0, Decimal::from(100));
        let costs = compute_costs(&tariff, &consumption);

        let report = TextReport::new(&tariff, &consumption, &costs).render();

        assert!(report.contains("  Offer: Energy Smart Casa 2025\n"));
        assert!(report.contains("  F0 (All hours): 100 kWh\n"));
        assert!(!report.contains("F1 (Peak hours)"));
        assert!(report.contains("  F0 Cost: 20,09 €\n"));
        assert!(report.contains("  Total Monthly Cost: 37,09 €\n"));
        assert!(report.contains("  Total Annual Cost: 445,08 €\n"));
        assert!(!report.contains("Gas"));
    }

    #[test]
    fn test_report_gas_lines() {
        let tariff = TariffRecord::reference();
        let consumption = ConsumptionRecord::new().with_gas(Decimal::new(505, 1));
        let costs = compute_costs(&tariff, &consumption);

        let report = TextReport::new(&tariff, &consumption, &costs)
            .with_footer("Generated on: 2025-01-31")
            .render();

        assert!(report.contains("  Gas: 50.5 m³\n"));
        assert!(report.contains("  Total Gas: 50,50 €\n"));
        assert!(report.contains("  Gas: 606,00 €\n"));
        assert!(report.ends_with("Generated on: 2025-01-31\n"));
    }
}
