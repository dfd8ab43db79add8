use crate::error::CarbonError;
use carbonledger_schemas::{factors::FactorTables, file_formats::FactorFile};
use std::fs;

pub const FACTOR_SCHEMA_VERSION: &str = "1.0";

/// Reads a complete set of factor tables from a YAML `FactorFile` and validates it.
pub fn load_factor_file(path: &str) -> Result<FactorTables, CarbonError> {
    let content =
        fs::read_to_string(path).map_err(|e| CarbonError::FileIO(path.to_string(), e))?;
    let file: FactorFile = serde_yaml::from_str(&content)
        .map_err(|e| CarbonError::YamlParsing(path.to_string(), e))?;

    if file.schema_version != FACTOR_SCHEMA_VERSION {
        return Err(CarbonError::ConfigError(format!(
            "Unsupported factor schema version '{}' in '{}' (expected '{}')",
            file.schema_version, path, FACTOR_SCHEMA_VERSION
        )));
    }

    file.factors.validate().map_err(CarbonError::InvalidFactor)?;
    Ok(file.factors)
}

/// Renders tables in the format `load_factor_file` reads.
pub fn factor_file_yaml(tables: &FactorTables) -> Result<String, CarbonError> {
    let file = FactorFile {
        schema_version: FACTOR_SCHEMA_VERSION.to_string(),
        factors: tables.clone(),
    };
    serde_yaml::to_string(&file)
        .map_err(|e| CarbonError::YamlParsing("<factor tables>".to_string(), e))
}
