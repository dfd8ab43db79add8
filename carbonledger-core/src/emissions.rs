use carbonledger_schemas::{
    activity::ActivityInput,
    emissions::{EmissionSource, EmissionsResult, Hotspot, SourceBreakdown},
    factors::FactorTables,
};

pub const HOTSPOT_LIMIT: usize = 5;

/// Rounds to a fixed number of decimal places, half away from zero.
pub fn round_to(value: f64, places: i32) -> f64 {
    let scale = 10f64.powi(places);
    (value * scale).round() / scale
}

/// `numerator / denominator`, or 0 when the denominator is not positive or
/// the quotient is not finite.
pub fn safe_ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator <= 0.0 {
        return 0.0;
    }
    let ratio = numerator / denominator;
    if ratio.is_finite() {
        ratio
    } else {
        0.0
    }
}

/// Direct combustion plus refrigerant leakage.
pub fn scope1_breakdown(input: &ActivityInput, tables: &FactorTables) -> SourceBreakdown {
    let f = &tables.emission_factors;
    let refrigerants = input.refrigerant_r22 * f.refrigerant_r22
        + input.refrigerant_r410a * f.refrigerant_r410a
        + input.refrigerant_r134a * f.refrigerant_r134a;

    SourceBreakdown::from([
        (EmissionSource::Diesel, input.diesel * f.diesel),
        (EmissionSource::Petrol, input.petrol * f.petrol),
        (EmissionSource::NaturalGas, input.natural_gas * f.natural_gas),
        (EmissionSource::Coal, input.coal * f.coal),
        (EmissionSource::Lpg, input.lpg * f.lpg),
        (EmissionSource::Refrigerants, refrigerants),
    ])
}

/// Purchased electricity. Renewable supply is zero-emission and carries no separate figure.
pub fn scope2_breakdown(input: &ActivityInput, tables: &FactorTables) -> SourceBreakdown {
    let grid_electricity = input.electricity * (1.0 - input.renewable / 100.0);
    SourceBreakdown::from([
        (
            EmissionSource::GridElectricity,
            grid_electricity * tables.emission_factors.electricity,
        ),
        (EmissionSource::Renewable, 0.0),
    ])
}

/// Value chain: purchased materials, freight and waste disposal.
pub fn scope3_breakdown(input: &ActivityInput, tables: &FactorTables) -> SourceBreakdown {
    let f = &tables.emission_factors;
    let raw_materials = input.steel * f.steel
        + input.cement * f.cement
        + input.aluminum * f.aluminum
        + input.plastic * f.plastic
        + input.paper * f.paper
        + input.glass * f.glass;
    let logistics = input.logistics_truck * f.logistics_truck
        + input.logistics_ship * f.logistics_ship
        + input.logistics_air * f.logistics_air;
    let waste = input.waste_landfill * f.waste_landfill + input.waste_recycled * f.waste_recycled;

    SourceBreakdown::from([
        (EmissionSource::RawMaterials, raw_materials),
        (EmissionSource::Logistics, logistics),
        (EmissionSource::Waste, waste),
    ])
}

pub fn calculate_emissions(input: &ActivityInput, tables: &FactorTables) -> EmissionsResult {
    let scope1 = scope1_breakdown(input, tables);
    let scope2 = scope2_breakdown(input, tables);
    let scope3 = scope3_breakdown(input, tables);

    let scope1_total: f64 = scope1.values().sum();
    let scope2_total: f64 = scope2.values().sum();
    let scope3_total: f64 = scope3.values().sum();
    let total = scope1_total + scope2_total + scope3_total;
    let intensity = safe_ratio(total, input.production);

    // Categories that round to zero are dropped along with the absent ones.
    let mut contributors: Vec<(EmissionSource, f64)> = scope1
        .iter()
        .chain(scope2.iter())
        .chain(scope3.iter())
        .filter(|(_, value)| round_to(**value, 2) > 0.0)
        .map(|(source, value)| (*source, *value))
        .collect();

    let by_source: SourceBreakdown = contributors
        .iter()
        .map(|(source, value)| (*source, round_to(*value, 2)))
        .collect();

    let carbon_costs_by_source = by_source
        .iter()
        .map(|(source, value)| (*source, round_to(value * tables.carbon_price, 2)))
        .collect();

    let share_by_source: SourceBreakdown = contributors
        .iter()
        .map(|(source, value)| (*source, safe_ratio(*value, total) * 100.0))
        .collect();

    contributors.sort_by(|(_, a), (_, b)| b.partial_cmp(a).unwrap_or(std::cmp::Ordering::Equal));
    let hotspots = contributors
        .iter()
        .take(HOTSPOT_LIMIT)
        .map(|(source, value)| Hotspot {
            source: *source,
            emission: round_to(*value, 2),
            percent: share_by_source[source],
        })
        .collect();

    EmissionsResult {
        scope1,
        scope2,
        scope3,
        scope1_total,
        scope2_total,
        scope3_total,
        total,
        intensity,
        by_source,
        carbon_costs_by_source,
        share_by_source,
        hotspots,
    }
}
