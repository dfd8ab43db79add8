use anyhow::{bail, Context, Result};
use carbonledger_core::factors::load_factor_file;
use carbonledger_schemas::{
    activity::{value_as_f64, ActivityInput},
    factors::FactorTables,
};
use serde_json::{Map, Value};
use std::{fs, path::Path};
use tracing::info;

/// Raw activity values as read from disk and the command line, before coercion.
#[derive(Debug, Default)]
pub struct ActivitySheet {
    values: Map<String, Value>,
}

impl ActivitySheet {
    /// Loads a YAML or JSON mapping. `.json` files are read as JSON, anything else as YAML.
    pub fn load(path: &str) -> Result<Self> {
        info!("Loading activity data from '{}'...", path);
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read activity file: {}", path))?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let is_json = Path::new(path)
            .extension()
            .map_or(false, |ext| ext.eq_ignore_ascii_case("json"));
        let document: Value = if is_json {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON from {}", path))?
        } else {
            serde_yaml::from_str(&content)
                .with_context(|| format!("Failed to parse YAML from {}", path))?
        };

        match document {
            Value::Object(values) => Ok(Self { values }),
            Value::Null => Ok(Self::default()),
            _ => bail!("Activity file {} must contain a mapping of field names to values", path),
        }
    }

    /// Applies `field=value` overrides on top of the loaded values.
    pub fn apply_overrides(&mut self, overrides: &[String]) -> Result<()> {
        for raw in overrides {
            let (key, value) = raw
                .split_once('=')
                .with_context(|| format!("Override '{}' is not of the form field=value", raw))?;
            self.values
                .insert(key.trim().to_string(), Value::String(value.trim().to_string()));
        }
        Ok(())
    }

    /// Keys the calculator does not recognise.
    pub fn unknown_fields(&self) -> Vec<&str> {
        self.values
            .keys()
            .map(String::as_str)
            .filter(|key| !ActivityInput::is_known_field(key))
            .collect()
    }

    /// Known keys whose supplied value was replaced or clamped during coercion.
    pub fn coerced_fields(&self, activity: &ActivityInput) -> Vec<String> {
        self.values
            .iter()
            .filter_map(|(key, value)| {
                let used = activity.get(key)?;
                match value_as_f64(value) {
                    Some(supplied) if supplied == used => None,
                    _ => Some(key.clone()),
                }
            })
            .collect()
    }

    pub fn to_activity(&self) -> ActivityInput {
        ActivityInput::from_values(&self.values)
    }
}

/// Returns the factor tables at `path`, or `None` to signal the built-in tables.
pub fn load_factors(path: Option<&str>) -> Result<Option<FactorTables>> {
    match path {
        Some(path) => {
            info!("Loading factor tables from '{}'...", path);
            let tables = load_factor_file(path)
                .with_context(|| format!("Failed to load factor tables from {}", path))?;
            Ok(Some(tables))
        }
        None => Ok(None),
    }
}

/// A YAML activity sheet with every field at its default.
pub fn activity_template() -> Result<String> {
    let body = serde_yaml::to_string(&ActivityInput::default())
        .context("Failed to render activity template")?;
    Ok(format!(
        "# Facility activity for one reporting period.\n\
         # Fuels in litres (coal in tonnes, natural gas in SCM), electricity in kWh/month,\n\
         # renewable as a percentage, refrigerants, materials and waste in tonnes,\n\
         # logistics in tonne-km. Missing or invalid values fall back to these defaults.\n{}",
        body
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    fn sheet_file(suffix: &str, content: &str) -> tempfile::NamedTempFile {
        let mut file = Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_yaml_sheet() {
        let file = sheet_file(".yaml", "electricity: 10000\ndiesel: '1500'\nproduction: 20\n");
        let sheet = ActivitySheet::load(file.path().to_str().unwrap()).unwrap();
        let activity = sheet.to_activity();
        assert_eq!(activity.electricity, 10000.0);
        assert_eq!(activity.diesel, 1500.0);
        assert_eq!(activity.production, 20.0);
    }

    #[test]
    fn loads_json_sheet() {
        let file = sheet_file(".json", r#"{ "coal": 3, "renewable": "20" }"#);
        let activity = ActivitySheet::load(file.path().to_str().unwrap())
            .unwrap()
            .to_activity();
        assert_eq!(activity.coal, 3.0);
        assert_eq!(activity.renewable, 20.0);
    }

    #[test]
    fn empty_sheet_is_all_defaults() {
        let file = sheet_file(".yaml", "");
        let activity = ActivitySheet::load(file.path().to_str().unwrap())
            .unwrap()
            .to_activity();
        assert_eq!(activity, ActivityInput::default());
    }

    #[test]
    fn rejects_non_mapping_sheet() {
        let file = sheet_file(".yaml", "- 1\n- 2\n");
        assert!(ActivitySheet::load(file.path().to_str().unwrap()).is_err());
    }

    #[test]
    fn overrides_replace_file_values() {
        let file = sheet_file(".yaml", "electricity: 10000\n");
        let mut sheet = ActivitySheet::load(file.path().to_str().unwrap()).unwrap();
        sheet
            .apply_overrides(&["electricity=500".to_string(), " steel = 4 ".to_string()])
            .unwrap();
        let activity = sheet.to_activity();
        assert_eq!(activity.electricity, 500.0);
        assert_eq!(activity.steel, 4.0);

        assert!(sheet.apply_overrides(&["steel".to_string()]).is_err());
    }

    #[test]
    fn reports_unknown_and_coerced_fields() {
        let mut sheet = ActivitySheet::default();
        sheet
            .apply_overrides(&[
                "diesel=12".to_string(),
                "petrol=plenty".to_string(),
                "renewable=130".to_string(),
                "uranium=1".to_string(),
            ])
            .unwrap();
        let activity = sheet.to_activity();

        assert_eq!(sheet.unknown_fields(), vec!["uranium"]);
        let mut coerced = sheet.coerced_fields(&activity);
        coerced.sort();
        assert_eq!(coerced, vec!["petrol".to_string(), "renewable".to_string()]);
    }

    #[test]
    fn template_lists_every_field() {
        let template = activity_template().unwrap();
        for name in ActivityInput::FIELD_NAMES {
            assert!(template.contains(&format!("{name}:")), "{name} missing");
        }
        let file = sheet_file(".yaml", &template);
        let activity = ActivitySheet::load(file.path().to_str().unwrap())
            .unwrap()
            .to_activity();
        assert_eq!(activity, ActivityInput::default());
    }

    #[test]
    fn no_factor_file_means_builtin_tables() {
        assert!(load_factors(None).unwrap().is_none());
        assert!(load_factors(Some("/no/such/factors.yaml")).is_err());
    }
}
