use crate::error::CarbonError;
use carbonledger_schemas::report::CarbonReport;
use csv::Writer;
use serde::Serialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub const REPORT_JSON: &str = "report.json";
pub const SOURCES_CSV: &str = "emissions_by_source.csv";
pub const SCENARIOS_CSV: &str = "scenarios.csv";

#[derive(Debug, Serialize)]
struct SourceEntry {
    source: &'static str,
    scope: &'static str,
    tco2e: f64,
    carbon_cost: f64,
    percent_of_total: f64,
}

#[derive(Debug, Serialize)]
struct ScenarioEntry<'a> {
    rank: usize,
    name: &'a str,
    priority: String,
    investment: f64,
    annual_savings: f64,
    carbon_reduction: f64,
    payback_years: f64,
    roi_percent: f64,
    is_combined: bool,
    description: &'a str,
}

/// Writes report artifacts into a single output directory.
pub struct ReportLogger {
    output_dir: PathBuf,
}

impl ReportLogger {
    pub fn new(output_dir: &str) -> Result<Self, io::Error> {
        fs::create_dir_all(output_dir)?;
        Ok(Self {
            output_dir: PathBuf::from(output_dir),
        })
    }

    pub fn log_report(&self, report: &CarbonReport) -> Result<(), CarbonError> {
        self.write_json(report)?;
        self.write_sources(report)?;
        self.write_scenarios(report)?;
        Ok(())
    }

    pub fn write_json(&self, report: &CarbonReport) -> Result<PathBuf, CarbonError> {
        let path = self.output_dir.join(REPORT_JSON);
        let json = serde_json::to_string_pretty(report)?;
        fs::write(&path, json).map_err(|e| CarbonError::FileIO(path.display().to_string(), e))?;
        Ok(path)
    }

    pub fn write_sources(&self, report: &CarbonReport) -> Result<PathBuf, CarbonError> {
        let path = self.output_dir.join(SOURCES_CSV);
        let entries = report.by_source.iter().map(|(source, tco2e)| SourceEntry {
            source: source.label(),
            scope: source.scope().label(),
            tco2e: *tco2e,
            carbon_cost: report
                .carbon_costs_by_source
                .get(source)
                .copied()
                .unwrap_or(0.0),
            percent_of_total: report.share_by_source.get(source).copied().unwrap_or(0.0),
        });
        write_csv(&path, entries)?;
        Ok(path)
    }

    pub fn write_scenarios(&self, report: &CarbonReport) -> Result<PathBuf, CarbonError> {
        let path = self.output_dir.join(SCENARIOS_CSV);
        let entries = report
            .scenarios
            .iter()
            .enumerate()
            .map(|(i, scenario)| ScenarioEntry {
                rank: i + 1,
                name: &scenario.name,
                priority: scenario.priority.to_string(),
                investment: scenario.investment,
                annual_savings: scenario.annual_savings,
                carbon_reduction: scenario.carbon_reduction,
                payback_years: scenario.payback_years,
                roi_percent: scenario.roi_percent,
                is_combined: scenario.is_combined,
                description: &scenario.description,
            });
        write_csv(&path, entries)?;
        Ok(path)
    }
}

fn write_csv<T: Serialize>(
    path: &Path,
    entries: impl IntoIterator<Item = T>,
) -> Result<(), CarbonError> {
    let path_str = path.display().to_string();
    let mut writer =
        Writer::from_path(path).map_err(|e| CarbonError::CsvError(path_str.clone(), e))?;
    for entry in entries {
        writer
            .serialize(entry)
            .map_err(|e| CarbonError::CsvError(path_str.clone(), e))?;
    }
    writer
        .flush()
        .map_err(|e| CarbonError::FileIO(path_str, e))?;
    Ok(())
}
