use serde::Serialize;
use std::collections::HashMap;

/// Raw facility activity data for a single reporting period.
///
/// Every field is a non-negative quantity in the unit its emission factor
/// expects (litres of fuel, kWh of electricity, tonnes of material, etc.).
/// `renewable` is the share of electricity from renewable supply, in percent.
/// Build one through [`ActivityInput::from_form`] or
/// [`ActivityInput::from_values`] so that every value goes through the same
/// coercion rules.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ActivityInput {
    pub diesel: f64,
    pub petrol: f64,
    pub natural_gas: f64,
    pub coal: f64,
    pub lpg: f64,
    pub electricity: f64,
    pub renewable: f64,
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
    pub production: f64,
}

/// Production units assumed when none (or garbage) is supplied.
pub const DEFAULT_PRODUCTION: f64 = 1.0;

/// Largest quantity accepted for any field. Keeps factor × quantity and the
/// sums built on it finite.
pub const MAX_QUANTITY: f64 = 1e12;

impl Default for ActivityInput {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

impl ActivityInput {
    /// Accepted input keys, in canonical order.
    pub const FIELD_NAMES: [&'static str; 22] = [
        "diesel",
        "petrol",
        "natural_gas",
        "coal",
        "lpg",
        "electricity",
        "renewable",
        "refrigerant_r22",
        "refrigerant_r410a",
        "refrigerant_r134a",
        "steel",
        "cement",
        "aluminum",
        "plastic",
        "paper",
        "glass",
        "logistics_truck",
        "logistics_ship",
        "logistics_air",
        "waste_landfill",
        "waste_recycled",
        "production",
    ];

    /// Builds an input from form-style string values.
    pub fn from_form(form: &HashMap<String, String>) -> Self {
        Self::from_lookup(|key| form.get(key).and_then(|raw| parse_number(raw)))
    }

    /// Builds an input from a JSON/YAML mapping whose values are numbers or numeric strings.
    pub fn from_values(values: &serde_json::Map<String, serde_json::Value>) -> Self {
        Self::from_lookup(|key| values.get(key).and_then(value_as_f64))
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<f64>) -> Self {
        let field = |name: &str| coerce_field(lookup(name), 0.0);
        Self {
            diesel: field("diesel"),
            petrol: field("petrol"),
            natural_gas: field("natural_gas"),
            coal: field("coal"),
            lpg: field("lpg"),
            electricity: field("electricity"),
            // A share above 100% would push grid electricity negative.
            renewable: field("renewable").min(100.0),
            refrigerant_r22: field("refrigerant_r22"),
            refrigerant_r410a: field("refrigerant_r410a"),
            refrigerant_r134a: field("refrigerant_r134a"),
            steel: field("steel"),
            cement: field("cement"),
            aluminum: field("aluminum"),
            plastic: field("plastic"),
            paper: field("paper"),
            glass: field("glass"),
            logistics_truck: field("logistics_truck"),
            logistics_ship: field("logistics_ship"),
            logistics_air: field("logistics_air"),
            waste_landfill: field("waste_landfill"),
            waste_recycled: field("waste_recycled"),
            production: coerce_field(lookup("production"), DEFAULT_PRODUCTION),
        }
    }

    /// Looks up a field by its input key.
    pub fn get(&self, name: &str) -> Option<f64> {
        let value = match name {
            "diesel" => self.diesel,
            "petrol" => self.petrol,
            "natural_gas" => self.natural_gas,
            "coal" => self.coal,
            "lpg" => self.lpg,
            "electricity" => self.electricity,
            "renewable" => self.renewable,
            "refrigerant_r22" => self.refrigerant_r22,
            "refrigerant_r410a" => self.refrigerant_r410a,
            "refrigerant_r134a" => self.refrigerant_r134a,
            "steel" => self.steel,
            "cement" => self.cement,
            "aluminum" => self.aluminum,
            "plastic" => self.plastic,
            "paper" => self.paper,
            "glass" => self.glass,
            "logistics_truck" => self.logistics_truck,
            "logistics_ship" => self.logistics_ship,
            "logistics_air" => self.logistics_air,
            "waste_landfill" => self.waste_landfill,
            "waste_recycled" => self.waste_recycled,
            "production" => self.production,
            _ => return None,
        };
        Some(value)
    }

    pub fn is_known_field(name: &str) -> bool {
        Self::FIELD_NAMES.contains(&name)
    }
}

/// Parses a user-supplied number, tolerating surrounding whitespace.
pub fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok()
}

/// Reads a number or numeric string; anything else is `None`.
pub fn value_as_f64(value: &serde_json::Value) -> Option<f64> {
    match value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => parse_number(s),
        _ => None,
    }
}

/// Falls back to `default` for anything outside `0..=MAX_QUANTITY`, NaN included.
pub fn coerce_field(parsed: Option<f64>, default: f64) -> f64 {
    match parsed {
        Some(value) if (0.0..=MAX_QUANTITY).contains(&value) => value,
        _ => default,
    }
}
