use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Upper bound for any factor, cost or carbon price in a usable table.
pub const MAX_FACTOR: f64 = 1e9;

/// Emission factors in tCO2e per unit of activity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmissionFactors {
    pub diesel: f64,
    pub petrol: f64,
    pub natural_gas: f64,
    pub coal: f64,
    pub lpg: f64,
    pub electricity: f64,
    pub refrigerant_r22: f64,
    pub refrigerant_r410a: f64,
    pub refrigerant_r134a: f64,
    pub steel: f64,
    pub cement: f64,
    pub aluminum: f64,
    pub plastic: f64,
    pub paper: f64,
    pub glass: f64,
    pub logistics_truck: f64,
    pub logistics_ship: f64,
    pub logistics_air: f64,
    pub waste_landfill: f64,
    pub waste_recycled: f64,
}

impl Default for EmissionFactors {
    fn default() -> Self {
        Self {
            diesel: 0.00268,
            petrol: 0.00231,
            natural_gas: 0.00202,
            coal: 2.86,
            lpg: 0.00151,
            electricity: 0.00071,
            refrigerant_r22: 1.810,
            refrigerant_r410a: 2.088,
            refrigerant_r134a: 1.430,
            steel: 1.85,
            cement: 0.90,
            aluminum: 12.7,
            plastic: 2.70,
            paper: 0.94,
            glass: 0.85,
            logistics_truck: 0.00012,
            logistics_ship: 0.00004,
            logistics_air: 0.00060,
            waste_landfill: 0.50,
            waste_recycled: 0.10,
        }
    }
}

impl EmissionFactors {
    pub fn entries(&self) -> [(&'static str, f64); 20] {
        [
            ("diesel", self.diesel),
            ("petrol", self.petrol),
            ("natural_gas", self.natural_gas),
            ("coal", self.coal),
            ("lpg", self.lpg),
            ("electricity", self.electricity),
            ("refrigerant_r22", self.refrigerant_r22),
            ("refrigerant_r410a", self.refrigerant_r410a),
            ("refrigerant_r134a", self.refrigerant_r134a),
            ("steel", self.steel),
            ("cement", self.cement),
            ("aluminum", self.aluminum),
            ("plastic", self.plastic),
            ("paper", self.paper),
            ("glass", self.glass),
            ("logistics_truck", self.logistics_truck),
            ("logistics_ship", self.logistics_ship),
            ("logistics_air", self.logistics_air),
            ("waste_landfill", self.waste_landfill),
            ("waste_recycled", self.waste_recycled),
        ]
    }
}

/// Energy prices in currency per unit (kWh, litre, SCM or tonne).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnergyCosts {
    pub electricity: f64,
    pub diesel: f64,
    pub petrol: f64,
    pub natural_gas: f64,
    pub coal: f64,
    pub lpg: f64,
}

impl Default for EnergyCosts {
    fn default() -> Self {
        Self {
            electricity: 8.5,
            diesel: 95.0,
            petrol: 105.0,
            natural_gas: 45.0,
            coal: 8000.0,
            lpg: 85.0,
        }
    }
}

impl EnergyCosts {
    pub fn entries(&self) -> [(&'static str, f64); 6] {
        [
            ("electricity", self.electricity),
            ("diesel", self.diesel),
            ("petrol", self.petrol),
            ("natural_gas", self.natural_gas),
            ("coal", self.coal),
            ("lpg", self.lpg),
        ]
    }
}

/// The read-only lookup tables every calculation runs against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorTables {
    /// ISO code used when rendering monetary figures into descriptions.
    pub currency: String,
    /// Currency per tCO2e.
    pub carbon_price: f64,
    pub emission_factors: EmissionFactors,
    pub energy_costs: EnergyCosts,
}

impl Default for FactorTables {
    fn default() -> Self {
        Self {
            currency: "INR".to_string(),
            carbon_price: 2500.0,
            emission_factors: EmissionFactors::default(),
            energy_costs: EnergyCosts::default(),
        }
    }
}

impl FactorTables {
    /// The built-in tables, initialised on first use and shared for the life of the process.
    pub fn standard() -> &'static FactorTables {
        static STANDARD: OnceLock<FactorTables> = OnceLock::new();
        STANDARD.get_or_init(FactorTables::default)
    }

    /// Checks every entry. On failure returns the names of entries that are
    /// negative, not finite or above `MAX_FACTOR`. The carbon price must also be positive.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut invalid: Vec<String> = self
            .emission_factors
            .entries()
            .iter()
            .filter(|(_, value)| !is_usable_factor(*value))
            .map(|(name, _)| format!("emission_factors.{name}"))
            .collect();

        invalid.extend(
            self.energy_costs
                .entries()
                .iter()
                .filter(|(_, value)| !is_usable_factor(*value))
                .map(|(name, _)| format!("energy_costs.{name}")),
        );

        if !is_usable_factor(self.carbon_price) || self.carbon_price == 0.0 {
            invalid.push("carbon_price".to_string());
        }

        if invalid.is_empty() {
            Ok(())
        } else {
            Err(invalid)
        }
    }
}

fn is_usable_factor(value: f64) -> bool {
    (0.0..=MAX_FACTOR).contains(&value)
}
