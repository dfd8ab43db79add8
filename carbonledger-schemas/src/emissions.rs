use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// GHG Protocol scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    Scope1,
    Scope2,
    Scope3,
}

impl Scope {
    pub fn label(&self) -> &'static str {
        match self {
            Scope::Scope1 => "Scope 1",
            Scope::Scope2 => "Scope 2",
            Scope::Scope3 => "Scope 3",
        }
    }
}

/// A reporting category. Declaration order is display order, so ordered maps
/// keyed by this enum list Scope 1 sources first, then Scope 2, then Scope 3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EmissionSource {
    Diesel,
    Petrol,
    #[serde(rename = "Natural Gas")]
    NaturalGas,
    Coal,
    #[serde(rename = "LPG")]
    Lpg,
    Refrigerants,
    #[serde(rename = "Grid Electricity")]
    GridElectricity,
    Renewable,
    #[serde(rename = "Raw Materials")]
    RawMaterials,
    Logistics,
    Waste,
}

impl EmissionSource {
    pub const ALL: [EmissionSource; 11] = [
        EmissionSource::Diesel,
        EmissionSource::Petrol,
        EmissionSource::NaturalGas,
        EmissionSource::Coal,
        EmissionSource::Lpg,
        EmissionSource::Refrigerants,
        EmissionSource::GridElectricity,
        EmissionSource::Renewable,
        EmissionSource::RawMaterials,
        EmissionSource::Logistics,
        EmissionSource::Waste,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            EmissionSource::Diesel => "Diesel",
            EmissionSource::Petrol => "Petrol",
            EmissionSource::NaturalGas => "Natural Gas",
            EmissionSource::Coal => "Coal",
            EmissionSource::Lpg => "LPG",
            EmissionSource::Refrigerants => "Refrigerants",
            EmissionSource::GridElectricity => "Grid Electricity",
            EmissionSource::Renewable => "Renewable",
            EmissionSource::RawMaterials => "Raw Materials",
            EmissionSource::Logistics => "Logistics",
            EmissionSource::Waste => "Waste",
        }
    }

    pub fn scope(&self) -> Scope {
        match self {
            EmissionSource::Diesel
            | EmissionSource::Petrol
            | EmissionSource::NaturalGas
            | EmissionSource::Coal
            | EmissionSource::Lpg
            | EmissionSource::Refrigerants => Scope::Scope1,
            EmissionSource::GridElectricity | EmissionSource::Renewable => Scope::Scope2,
            EmissionSource::RawMaterials | EmissionSource::Logistics | EmissionSource::Waste => {
                Scope::Scope3
            }
        }
    }
}

impl fmt::Display for EmissionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// tCO2e (or currency) per category, in display order.
pub type SourceBreakdown = BTreeMap<EmissionSource, f64>;

/// One of the largest contributors to total emissions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hotspot {
    pub source: EmissionSource,
    /// tCO2e, rounded to 2 dp.
    pub emission: f64,
    /// Share of the grand total, 0-100. Zero when the total is zero.
    pub percent: f64,
}

/// Output of the emissions calculator.
///
/// Scope breakdowns, totals and intensity are kept at full precision so the
/// scenario generator sees exact figures; `by_source`, `carbon_costs_by_source`
/// and `hotspots` are already rounded for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmissionsResult {
    pub scope1: SourceBreakdown,
    pub scope2: SourceBreakdown,
    pub scope3: SourceBreakdown,
    pub scope1_total: f64,
    pub scope2_total: f64,
    pub scope3_total: f64,
    pub total: f64,
    pub intensity: f64,
    pub by_source: SourceBreakdown,
    pub carbon_costs_by_source: SourceBreakdown,
    /// Percent of the total per `by_source` entry, from unrounded figures.
    pub share_by_source: SourceBreakdown,
    pub hotspots: Vec<Hotspot>,
}
