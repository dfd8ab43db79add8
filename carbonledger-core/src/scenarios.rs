//! Costed reduction scenarios.
//!
//! Each measure is an independent function that returns `None` when the
//! facility has no activity the measure could act on. The parameters below
//! are policy assumptions, not derived values.

use crate::emissions::{round_to, safe_ratio};
use carbonledger_schemas::{
    activity::ActivityInput,
    emissions::{EmissionSource, EmissionsResult},
    factors::FactorTables,
    scenario::{Priority, Scenario, ScenarioKind},
};
use std::cmp::Ordering;

pub const SOLAR_OFFSET_PCT: f64 = 40.0;
/// Monthly kWh generated per installed kW.
pub const SOLAR_KWH_PER_KW: f64 = 150.0;
pub const SOLAR_COST_PER_KW: f64 = 60_000.0;
pub const SOLAR_HIGH_ROI: f64 = 15.0;

pub const EV_TRANSITION_PCT: f64 = 30.0;
/// Running cost of an EV relative to the fuel it replaces.
pub const EV_RELATIVE_RUNNING_COST: f64 = 0.6;
pub const EV_LITRES_PER_VEHICLE: f64 = 1000.0;
pub const EV_COST_PER_VEHICLE: f64 = 1_500_000.0;
pub const EV_DIESEL_THRESHOLD: f64 = 1000.0;
pub const EV_PETROL_THRESHOLD: f64 = 500.0;
pub const EV_HIGH_ROI: f64 = 12.0;

pub const EFFICIENCY_SAVINGS_PCT: f64 = 15.0;
pub const EFFICIENCY_COST_PER_KWH: f64 = 0.5;
pub const EFFICIENCY_HIGH_ROI: f64 = 20.0;

pub const WASTE_DIVERSION_PCT: f64 = 50.0;
pub const WASTE_SAVINGS_PER_TONNE: f64 = 2000.0;
pub const WASTE_BASE_INVESTMENT: f64 = 300_000.0;
pub const WASTE_INVESTMENT_PER_TONNE: f64 = 10_000.0;

pub const GREEN_TARGET_CAP_PCT: f64 = 50.0;
pub const GREEN_STEP_PCT: f64 = 30.0;
pub const GREEN_PREMIUM_PER_KWH: f64 = 1.5;
pub const MONTHS_PER_YEAR: f64 = 12.0;
/// Reported ROI when procurement pays for itself with no upfront spend.
pub const IMMEDIATE_RETURN_ROI: f64 = 999.0;

pub const MATERIAL_EFFICIENCY_PCT: f64 = 10.0;
/// Raw-material emissions (tCO2e) below which the measure is not worth proposing.
pub const MATERIAL_MIN_EMISSIONS: f64 = 10.0;
pub const MATERIAL_SAVINGS_PER_TONNE_CO2E: f64 = 50_000.0;
pub const MATERIAL_INVESTMENT: f64 = 500_000.0;

/// Figures shared by every measure with an upfront investment.
struct Costing {
    investment: f64,
    annual_savings: f64,
    carbon_reduction: f64,
}

impl Costing {
    /// Rounds the figures and derives payback, ROI and priority. Priority is
    /// High when the unrounded ROI beats `high_roi`, otherwise Medium.
    fn into_scenario(
        self,
        kind: ScenarioKind,
        name: String,
        description: String,
        high_roi: Option<f64>,
    ) -> Scenario {
        let roi = safe_ratio(self.annual_savings * 100.0, self.investment);
        let priority = match high_roi {
            Some(threshold) if roi > threshold => Priority::High,
            _ => Priority::Medium,
        };

        Scenario {
            kind,
            name,
            investment: round_to(self.investment, 2),
            annual_savings: round_to(self.annual_savings, 2),
            carbon_reduction: round_to(self.carbon_reduction.max(0.0), 2),
            payback_years: round_to(safe_ratio(self.investment, self.annual_savings), 1),
            roi_percent: round_to(roi, 1),
            priority,
            description,
            is_combined: false,
        }
    }
}

pub fn rooftop_solar(input: &ActivityInput, tables: &FactorTables) -> Option<Scenario> {
    if input.electricity <= 0.0 {
        return None;
    }

    let solar_kwh = input.electricity * SOLAR_OFFSET_PCT / 100.0;
    let system_size_kw = solar_kwh / SOLAR_KWH_PER_KW;
    let costing = Costing {
        investment: system_size_kw * SOLAR_COST_PER_KW,
        annual_savings: solar_kwh * tables.energy_costs.electricity,
        carbon_reduction: solar_kwh * tables.emission_factors.electricity,
    };

    Some(costing.into_scenario(
        ScenarioKind::RooftopSolar,
        format!("Rooftop Solar ({SOLAR_OFFSET_PCT}% offset)"),
        format!(
            "Install {:.1} kW solar PV to offset {:.0} kWh/month",
            system_size_kw, solar_kwh
        ),
        Some(SOLAR_HIGH_ROI),
    ))
}

pub fn ev_fleet(input: &ActivityInput, tables: &FactorTables) -> Option<Scenario> {
    if input.diesel <= EV_DIESEL_THRESHOLD && input.petrol <= EV_PETROL_THRESHOLD {
        return None;
    }

    let costs = &tables.energy_costs;
    let factors = &tables.emission_factors;
    let vehicle_fuel_cost = input.diesel * costs.diesel + input.petrol * costs.petrol;
    let vehicle_emissions = input.diesel * factors.diesel + input.petrol * factors.petrol;
    let share = EV_TRANSITION_PCT / 100.0;
    let annual_savings = vehicle_fuel_cost * share * EV_RELATIVE_RUNNING_COST;
    let vehicles = ((input.diesel + input.petrol) / EV_LITRES_PER_VEHICLE)
        .floor()
        .max(1.0);

    let costing = Costing {
        investment: vehicles * EV_COST_PER_VEHICLE,
        annual_savings,
        carbon_reduction: vehicle_emissions * share,
    };

    Some(costing.into_scenario(
        ScenarioKind::EvFleet,
        format!("EV Fleet ({EV_TRANSITION_PCT}% transition)"),
        format!(
            "Replace {} vehicles with EVs, save {:.0} {}/year",
            vehicles, annual_savings, tables.currency
        ),
        Some(EV_HIGH_ROI),
    ))
}

pub fn energy_efficiency(input: &ActivityInput, tables: &FactorTables) -> Option<Scenario> {
    if input.electricity <= 0.0 {
        return None;
    }

    let kwh_saved = input.electricity * EFFICIENCY_SAVINGS_PCT / 100.0;
    let costing = Costing {
        investment: input.electricity * EFFICIENCY_COST_PER_KWH,
        annual_savings: kwh_saved * tables.energy_costs.electricity,
        carbon_reduction: kwh_saved * tables.emission_factors.electricity,
    };

    Some(costing.into_scenario(
        ScenarioKind::EnergyEfficiency,
        format!("Energy Efficiency ({EFFICIENCY_SAVINGS_PCT}% reduction)"),
        format!("LED lighting, smart HVAC to save {:.0} kWh/month", kwh_saved),
        Some(EFFICIENCY_HIGH_ROI),
    ))
}

pub fn waste_diversion(input: &ActivityInput, tables: &FactorTables) -> Option<Scenario> {
    if input.waste_landfill <= 0.0 {
        return None;
    }

    let factors = &tables.emission_factors;
    let diverted = input.waste_landfill * WASTE_DIVERSION_PCT / 100.0;
    let costing = Costing {
        investment: WASTE_BASE_INVESTMENT + input.waste_landfill * WASTE_INVESTMENT_PER_TONNE,
        annual_savings: diverted * WASTE_SAVINGS_PER_TONNE,
        carbon_reduction: diverted * (factors.waste_landfill - factors.waste_recycled),
    };

    Some(costing.into_scenario(
        ScenarioKind::WasteDiversion,
        format!("Waste Diversion ({WASTE_DIVERSION_PCT}% to recycling)"),
        format!("Divert {:.1} tonnes from landfill to recycling", diverted),
        None,
    ))
}

/// Green tariffs have no upfront cost, so ROI is the sentinel
/// [`IMMEDIATE_RETURN_ROI`] when net savings are positive and 0 otherwise.
pub fn green_energy_procurement(input: &ActivityInput, tables: &FactorTables) -> Option<Scenario> {
    if input.renewable >= GREEN_TARGET_CAP_PCT {
        return None;
    }

    let target = (input.renewable + GREEN_STEP_PCT).min(GREEN_TARGET_CAP_PCT);
    let additional_kwh = input.electricity * (target - input.renewable) / 100.0;
    let carbon_reduction = additional_kwh * tables.emission_factors.electricity;
    let green_premium = additional_kwh * MONTHS_PER_YEAR * GREEN_PREMIUM_PER_KWH;
    let net_savings = carbon_reduction * tables.carbon_price - green_premium;
    let profitable = net_savings > 0.0;

    Some(Scenario {
        kind: ScenarioKind::GreenEnergyProcurement,
        name: format!("Green Energy Procurement ({:.0}% renewable)", target),
        investment: 0.0,
        annual_savings: round_to(net_savings, 2),
        carbon_reduction: round_to(carbon_reduction, 2),
        payback_years: 0.0,
        roi_percent: if profitable { IMMEDIATE_RETURN_ROI } else { 0.0 },
        priority: if profitable { Priority::High } else { Priority::Low },
        description: format!(
            "Switch to green tariffs, increase renewable from {:.0}% to {:.0}%",
            input.renewable, target
        ),
        is_combined: false,
    })
}

pub fn material_efficiency(emissions: &EmissionsResult) -> Option<Scenario> {
    let raw_materials = emissions
        .scope3
        .get(&EmissionSource::RawMaterials)
        .copied()
        .unwrap_or(0.0);
    if raw_materials <= MATERIAL_MIN_EMISSIONS {
        return None;
    }

    let carbon_reduction = raw_materials * MATERIAL_EFFICIENCY_PCT / 100.0;
    let costing = Costing {
        investment: MATERIAL_INVESTMENT,
        annual_savings: carbon_reduction * MATERIAL_SAVINGS_PER_TONNE_CO2E,
        carbon_reduction,
    };

    Some(costing.into_scenario(
        ScenarioKind::MaterialEfficiency,
        format!("Material Efficiency ({MATERIAL_EFFICIENCY_PCT}% reduction)"),
        "Optimize material use, reduce waste in production processes".to_string(),
        None,
    ))
}

/// Aggregates the (already rounded) figures of every measure into one scenario.
pub fn combined_scenario(measures: &[Scenario]) -> Scenario {
    let investment: f64 = measures
        .iter()
        .map(|s| s.investment)
        .filter(|investment| *investment > 0.0)
        .sum();
    let annual_savings: f64 = measures.iter().map(|s| s.annual_savings).sum();
    let carbon_reduction: f64 = measures.iter().map(|s| s.carbon_reduction).sum();

    Scenario {
        kind: ScenarioKind::Combined,
        name: "Combined Optimization (All Measures)".to_string(),
        investment: round_to(investment, 2),
        annual_savings: round_to(annual_savings, 2),
        carbon_reduction: round_to(carbon_reduction, 2),
        payback_years: round_to(safe_ratio(investment, annual_savings), 1),
        roi_percent: round_to(safe_ratio(annual_savings * 100.0, investment), 1),
        priority: Priority::Recommended,
        description: "Implement all measures for maximum impact".to_string(),
        is_combined: true,
    }
}

/// Highest ROI first, combined scenario last. Ties keep generation order.
pub fn rank_scenarios(mut scenarios: Vec<Scenario>) -> Vec<Scenario> {
    scenarios.sort_by(|a, b| {
        a.is_combined.cmp(&b.is_combined).then_with(|| {
            b.roi_percent
                .partial_cmp(&a.roi_percent)
                .unwrap_or(Ordering::Equal)
        })
    });
    scenarios
}

pub fn generate_scenarios(
    input: &ActivityInput,
    emissions: &EmissionsResult,
    tables: &FactorTables,
) -> Vec<Scenario> {
    let mut scenarios: Vec<Scenario> = [
        rooftop_solar(input, tables),
        ev_fleet(input, tables),
        energy_efficiency(input, tables),
        waste_diversion(input, tables),
        green_energy_procurement(input, tables),
        material_efficiency(emissions),
    ]
    .into_iter()
    .flatten()
    .collect();

    scenarios.push(combined_scenario(&scenarios));
    rank_scenarios(scenarios)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emissions::calculate_emissions;
    use serde_json::json;

    fn input(values: serde_json::Value) -> ActivityInput {
        ActivityInput::from_values(values.as_object().unwrap())
    }

    fn tables() -> &'static FactorTables {
        FactorTables::standard()
    }

    fn scenario(kind: ScenarioKind, name: &str, roi_percent: f64) -> Scenario {
        Scenario {
            kind,
            name: name.to_string(),
            investment: 100.0,
            annual_savings: roi_percent,
            carbon_reduction: 1.0,
            payback_years: 0.0,
            roi_percent,
            priority: Priority::Medium,
            description: String::new(),
            is_combined: kind == ScenarioKind::Combined,
        }
    }

    #[test]
    fn solar_figures() {
        let solar = rooftop_solar(&input(json!({ "electricity": 10000 })), tables()).unwrap();
        // 4000 kWh offset, 26.67 kW system.
        assert_eq!(solar.name, "Rooftop Solar (40% offset)");
        assert_eq!(solar.investment, 1_600_000.0);
        assert_eq!(solar.annual_savings, 34_000.0);
        assert_eq!(solar.carbon_reduction, 2.84);
        assert_eq!(solar.payback_years, 47.1);
        assert_eq!(solar.roi_percent, 2.1);
        assert_eq!(solar.priority, Priority::Medium);
        assert_eq!(solar.description, "Install 26.7 kW solar PV to offset 4000 kWh/month");
    }

    #[test]
    fn solar_needs_electricity() {
        assert!(rooftop_solar(&ActivityInput::default(), tables()).is_none());
        assert!(energy_efficiency(&ActivityInput::default(), tables()).is_none());
    }

    #[test]
    fn ev_fleet_thresholds() {
        assert!(ev_fleet(&input(json!({ "diesel": 1000, "petrol": 500 })), tables()).is_none());
        assert!(ev_fleet(&input(json!({ "diesel": 1000.5 })), tables()).is_some());
        assert!(ev_fleet(&input(json!({ "petrol": 501 })), tables()).is_some());
    }

    #[test]
    fn ev_fleet_figures() {
        let ev = ev_fleet(&input(json!({ "diesel": 5000, "petrol": 600 })), tables()).unwrap();
        // Fuel cost 475000 + 63000 = 538000; 30% at 60% running cost.
        assert_eq!(ev.name, "EV Fleet (30% transition)");
        assert_eq!(ev.investment, 5.0 * 1_500_000.0);
        assert_eq!(ev.annual_savings, 96_840.0);
        assert_eq!(ev.carbon_reduction, 4.44);
        assert_eq!(ev.roi_percent, 1.3);
        assert_eq!(ev.payback_years, 77.4);
        assert_eq!(ev.priority, Priority::Medium);
        assert_eq!(ev.description, "Replace 5 vehicles with EVs, save 96840 INR/year");
    }

    #[test]
    fn ev_fleet_replaces_at_least_one_vehicle() {
        let ev = ev_fleet(&input(json!({ "petrol": 600 })), tables()).unwrap();
        assert_eq!(ev.investment, 1_500_000.0);
    }

    #[test]
    fn efficiency_is_high_priority() {
        let efficiency =
            energy_efficiency(&input(json!({ "electricity": 20000 })), tables()).unwrap();
        // 3000 kWh saved at 8.5 against 10000 invested.
        assert_eq!(efficiency.investment, 10_000.0);
        assert_eq!(efficiency.annual_savings, 25_500.0);
        assert_eq!(efficiency.carbon_reduction, 2.13);
        assert_eq!(efficiency.roi_percent, 255.0);
        assert_eq!(efficiency.payback_years, 0.4);
        assert_eq!(efficiency.priority, Priority::High);
    }

    #[test]
    fn waste_diversion_is_always_medium() {
        let waste = waste_diversion(&input(json!({ "waste_landfill": 20 })), tables()).unwrap();
        assert_eq!(waste.investment, 500_000.0);
        assert_eq!(waste.annual_savings, 20_000.0);
        assert_eq!(waste.carbon_reduction, 4.0);
        assert_eq!(waste.roi_percent, 4.0);
        assert_eq!(waste.payback_years, 25.0);
        assert_eq!(waste.priority, Priority::Medium);
        assert_eq!(waste.description, "Divert 10.0 tonnes from landfill to recycling");
        assert!(waste_diversion(&ActivityInput::default(), tables()).is_none());
    }

    #[test]
    fn waste_reduction_never_negative() {
        let mut custom = FactorTables::default();
        custom.emission_factors.waste_recycled = 0.9;
        let waste = waste_diversion(&input(json!({ "waste_landfill": 20 })), &custom).unwrap();
        assert_eq!(waste.carbon_reduction, 0.0);
    }

    #[test]
    fn green_procurement_uses_sentinel_roi() {
        let green =
            green_energy_procurement(&input(json!({ "electricity": 10000 })), tables()).unwrap();
        // 3000 kWh more renewable: 2.13 t avoided, 5325 carbon value vs 54000 premium.
        assert_eq!(green.name, "Green Energy Procurement (30% renewable)");
        assert_eq!(green.carbon_reduction, 2.13);
        assert_eq!(green.annual_savings, -48_675.0);
        assert_eq!(green.roi_percent, 0.0);
        assert_eq!(green.priority, Priority::Low);
        assert_eq!(green.investment, 0.0);

        let mut pricey_carbon = FactorTables::default();
        pricey_carbon.carbon_price = 100_000.0;
        let green =
            green_energy_procurement(&input(json!({ "electricity": 10000 })), &pricey_carbon)
                .unwrap();
        assert!(green.annual_savings > 0.0);
        assert_eq!(green.roi_percent, IMMEDIATE_RETURN_ROI);
        assert_eq!(green.priority, Priority::High);
        assert_eq!(green.payback_years, 0.0);
    }

    #[test]
    fn green_procurement_target_is_capped() {
        let green =
            green_energy_procurement(&input(json!({ "electricity": 1000, "renewable": 35 })), tables())
                .unwrap();
        assert_eq!(green.name, "Green Energy Procurement (50% renewable)");
        assert_eq!(
            green.description,
            "Switch to green tariffs, increase renewable from 35% to 50%"
        );
        assert!(green_energy_procurement(&input(json!({ "renewable": 50 })), tables()).is_none());
    }

    #[test]
    fn material_efficiency_needs_significant_materials() {
        let small = calculate_emissions(&input(json!({ "steel": 5 })), tables());
        assert!(material_efficiency(&small).is_none());

        let large = calculate_emissions(&input(json!({ "aluminum": 10 })), tables());
        let material = material_efficiency(&large).unwrap();
        // 127 t from aluminium, 10% of it avoided.
        assert_eq!(material.carbon_reduction, 12.7);
        assert_eq!(material.annual_savings, 635_000.0);
        assert_eq!(material.investment, 500_000.0);
        assert_eq!(material.roi_percent, 127.0);
        assert_eq!(material.payback_years, 0.8);
        assert_eq!(material.priority, Priority::Medium);
    }

    #[test]
    fn combined_sums_measures() {
        let mut measures = vec![
            scenario(ScenarioKind::RooftopSolar, "a", 10.0),
            scenario(ScenarioKind::EvFleet, "b", 20.0),
        ];
        measures.push(Scenario {
            investment: 0.0,
            annual_savings: -50.0,
            ..scenario(ScenarioKind::GreenEnergyProcurement, "c", 0.0)
        });

        let combined = combined_scenario(&measures);
        assert!(combined.is_combined);
        assert_eq!(combined.priority, Priority::Recommended);
        assert_eq!(combined.investment, 200.0);
        assert_eq!(combined.annual_savings, -20.0);
        assert_eq!(combined.carbon_reduction, 3.0);
        assert_eq!(combined.payback_years, 0.0);
        assert_eq!(combined.roi_percent, -10.0);
    }

    #[test]
    fn combined_of_nothing_is_zero() {
        let combined = combined_scenario(&[]);
        assert_eq!(combined.investment, 0.0);
        assert_eq!(combined.annual_savings, 0.0);
        assert_eq!(combined.payback_years, 0.0);
        assert_eq!(combined.roi_percent, 0.0);
    }

    #[test]
    fn ranking_pins_combined_last() {
        let ranked = rank_scenarios(vec![
            scenario(ScenarioKind::Combined, "all", 500.0),
            scenario(ScenarioKind::RooftopSolar, "low", 1.0),
            scenario(ScenarioKind::EnergyEfficiency, "high", 255.0),
            scenario(ScenarioKind::WasteDiversion, "tie-first", 4.0),
            scenario(ScenarioKind::MaterialEfficiency, "tie-second", 4.0),
        ]);
        let names: Vec<&str> = ranked.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["high", "tie-first", "tie-second", "low", "all"]);
    }

    #[test]
    fn electricity_only_facility() {
        let activity = input(json!({ "electricity": 10000, "renewable": 0 }));
        let emissions = calculate_emissions(&activity, tables());
        let scenarios = generate_scenarios(&activity, &emissions, tables());

        let kinds: Vec<ScenarioKind> = scenarios.iter().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            vec![
                ScenarioKind::EnergyEfficiency,
                ScenarioKind::RooftopSolar,
                ScenarioKind::GreenEnergyProcurement,
                ScenarioKind::Combined,
            ]
        );
    }

    #[test]
    fn empty_facility_still_gets_combined() {
        let activity = ActivityInput::default();
        let emissions = calculate_emissions(&activity, tables());
        let scenarios = generate_scenarios(&activity, &emissions, tables());

        assert_eq!(scenarios.len(), 2);
        assert_eq!(scenarios[0].kind, ScenarioKind::GreenEnergyProcurement);
        assert_eq!(scenarios[0].carbon_reduction, 0.0);
        let combined = &scenarios[1];
        assert!(combined.is_combined);
        assert_eq!(combined.investment, 0.0);
        assert_eq!(combined.annual_savings, 0.0);
        assert_eq!(combined.carbon_reduction, 0.0);
    }
}
