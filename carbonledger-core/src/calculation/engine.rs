use crate::{error::CarbonError, logger::ReportLogger, report::build_report};
use carbonledger_schemas::{activity::ActivityInput, factors::FactorTables, report::CarbonReport};

/// A configured calculation. Built by [`super::builder::CalculationBuilder`].
pub struct Calculation<'a> {
    pub(super) activity: ActivityInput,
    pub(super) tables: &'a FactorTables,
    pub(super) logger: Option<ReportLogger>,
}

impl<'a> Calculation<'a> {
    pub fn run(&self) -> Result<CarbonReport, CarbonError> {
        let report = build_report(&self.activity, self.tables);

        if let Some(logger) = &self.logger {
            logger.log_report(&report)?;
        }
        Ok(report)
    }

    pub fn activity(&self) -> &ActivityInput {
        &self.activity
    }

    pub fn tables(&self) -> &'a FactorTables {
        self.tables
    }
}
