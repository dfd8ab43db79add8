use crate::{
    emissions::{calculate_emissions, round_to},
    scenarios::generate_scenarios,
};
use carbonledger_schemas::{activity::ActivityInput, factors::FactorTables, report::CarbonReport};

pub const PROJECTION_YEARS: f64 = 10.0;

/// Runs both calculation stages and assembles the display record.
pub fn build_report(input: &ActivityInput, tables: &FactorTables) -> CarbonReport {
    let emissions = calculate_emissions(input, tables);
    let scenarios = generate_scenarios(input, &emissions, tables);

    let (ten_year_savings, ten_year_reduction) = scenarios
        .iter()
        .find(|s| s.is_combined)
        .map(|combined| {
            (
                combined.annual_savings * PROJECTION_YEARS,
                combined.carbon_reduction * PROJECTION_YEARS,
            )
        })
        .unwrap_or((0.0, 0.0));

    let scope1 = round_to(emissions.scope1_total, 2);
    let scope2 = round_to(emissions.scope2_total, 2);
    let scope3 = round_to(emissions.scope3_total, 2);

    CarbonReport {
        scope1,
        scope2,
        scope3,
        total: round_to(emissions.total, 2),
        intensity: round_to(emissions.intensity, 4),
        renewable: input.renewable,
        production: input.production,
        by_scope: [scope1, scope2, scope3],
        by_source: emissions.by_source,
        carbon_costs_by_source: emissions.carbon_costs_by_source,
        share_by_source: emissions.share_by_source,
        carbon_cost: round_to(emissions.total * tables.carbon_price, 2),
        scenarios,
        ten_year_savings: round_to(ten_year_savings, 2),
        ten_year_reduction: round_to(ten_year_reduction, 2),
        hotspots: emissions.hotspots,
    }
}
