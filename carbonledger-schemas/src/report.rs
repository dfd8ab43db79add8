use crate::emissions::{Hotspot, SourceBreakdown};
use crate::scenario::Scenario;
use serde::{Deserialize, Serialize};

/// The result record handed to whatever presents the calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarbonReport {
    pub scope1: f64,
    pub scope2: f64,
    pub scope3: f64,
    pub total: f64,
    pub intensity: f64,
    pub renewable: f64,
    pub production: f64,
    /// `[scope1, scope2, scope3]`.
    pub by_scope: [f64; 3],
    pub by_source: SourceBreakdown,
    pub carbon_costs_by_source: SourceBreakdown,
    pub share_by_source: SourceBreakdown,
    pub carbon_cost: f64,
    pub scenarios: Vec<Scenario>,
    pub ten_year_savings: f64,
    pub ten_year_reduction: f64,
    pub hotspots: Vec<Hotspot>,
}

impl CarbonReport {
    /// The aggregate scenario, always the last entry.
    pub fn combined(&self) -> Option<&Scenario> {
        self.scenarios.iter().find(|s| s.is_combined)
    }

    /// Every scenario except the aggregate, in ranked order.
    pub fn measures(&self) -> impl Iterator<Item = &Scenario> {
        self.scenarios.iter().filter(|s| !s.is_combined)
    }
}
