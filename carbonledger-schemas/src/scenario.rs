use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioKind {
    RooftopSolar,
    EvFleet,
    EnergyEfficiency,
    WasteDiversion,
    GreenEnergyProcurement,
    MaterialEfficiency,
    Combined,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    High,
    Medium,
    Low,
    Recommended,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
            Priority::Recommended => "Recommended",
        };
        f.write_str(label)
    }
}

/// A costed emission-reduction measure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub kind: ScenarioKind,
    pub name: String,
    /// Upfront cost, currency.
    pub investment: f64,
    /// Currency per year. Can be negative for Green Energy Procurement.
    pub annual_savings: f64,
    /// tCO2e avoided per year.
    pub carbon_reduction: f64,
    pub payback_years: f64,
    pub roi_percent: f64,
    pub priority: Priority,
    pub description: String,
    #[serde(default)]
    pub is_combined: bool,
}
