use crate::{calculation::engine::Calculation, error::CarbonError, logger::ReportLogger};
use carbonledger_schemas::{activity::ActivityInput, factors::FactorTables};
use std::collections::HashMap;

/// A fluent builder for constructing a `Calculation`.
///
/// Only the activity input is mandatory. Factor tables default to
/// [`FactorTables::standard`], and report artifacts are written only when an
/// output directory is configured.
#[derive(Default)]
pub struct CalculationBuilder<'a> {
    activity: Option<ActivityInput>,
    tables: Option<&'a FactorTables>,
    output_dir: Option<String>,
}

impl<'a> CalculationBuilder<'a> {
    /// Creates a new, empty `CalculationBuilder`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets an already coerced `ActivityInput`.
    pub fn with_activity(mut self, activity: ActivityInput) -> Self {
        self.activity = Some(activity);
        self
    }

    /// Coerces form-style string values into the activity input.
    pub fn with_form(mut self, form: &HashMap<String, String>) -> Self {
        self.activity = Some(ActivityInput::from_form(form));
        self
    }

    /// Runs against the given tables instead of the built-in ones.
    pub fn with_factors(mut self, tables: &'a FactorTables) -> Self {
        self.tables = Some(tables);
        self
    }

    /// Writes `report.json` and the CSV breakdowns into `dir` on every run.
    pub fn with_report_output_to_dir(mut self, dir: &str) -> Self {
        self.output_dir = Some(dir.to_string());
        self
    }

    /// Consumes the builder and returns a ready-to-run `Calculation`.
    ///
    /// # Errors
    ///
    /// Returns a `CarbonError` if no activity input was provided, the factor
    /// tables contain invalid entries, or the output directory cannot be created.
    pub fn build(self) -> Result<Calculation<'a>, CarbonError> {
        let activity = self.activity.ok_or(CarbonError::ActivityNotDefined)?;
        let tables = self.tables.unwrap_or_else(|| FactorTables::standard());

        tables.validate().map_err(CarbonError::InvalidFactor)?;

        let logger = match self.output_dir {
            Some(dir) => Some(
                ReportLogger::new(&dir).map_err(|e| CarbonError::FileIO(dir.clone(), e))?,
            ),
            None => None,
        };

        Ok(Calculation {
            activity,
            tables,
            logger,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn activity_is_required() {
        assert!(matches!(
            CalculationBuilder::new().build(),
            Err(CarbonError::ActivityNotDefined)
        ));
    }

    #[test]
    fn invalid_tables_are_rejected() {
        let mut tables = FactorTables::default();
        tables.emission_factors.coal = -2.86;
        let result = CalculationBuilder::new()
            .with_activity(ActivityInput::default())
            .with_factors(&tables)
            .build();
        match result {
            Err(CarbonError::InvalidFactor(entries)) => {
                assert_eq!(entries, vec!["emission_factors.coal".to_string()])
            }
            other => panic!("expected InvalidFactor, got {:?}", other.err()),
        }
    }

    #[test]
    fn defaults_to_standard_tables() {
        let calculation = CalculationBuilder::new()
            .with_activity(ActivityInput::default())
            .build()
            .unwrap();
        assert!(std::ptr::eq(calculation.tables(), FactorTables::standard()));
    }

    #[test]
    fn form_values_are_coerced() {
        let form = HashMap::from([
            ("electricity".to_string(), "10000".to_string()),
            ("production".to_string(), "".to_string()),
        ]);
        let calculation = CalculationBuilder::new().with_form(&form).build().unwrap();
        assert_eq!(calculation.activity().electricity, 10000.0);
        assert_eq!(calculation.activity().production, 1.0);
    }
}
