use crate::config::{self, ActivitySheet};
use anyhow::{Context, Result};
use carbonledger_core::{factors::factor_file_yaml, CalculationBuilder};
use carbonledger_schemas::{factors::FactorTables, report::CarbonReport};
use std::{fmt, fs, path::Path};
use tracing::{info, warn};

/// Options for a single `calculate` run.
#[derive(Debug, Clone, Default)]
pub struct CalculateOptions {
    pub input: Option<String>,
    pub overrides: Vec<String>,
    pub factors: Option<String>,
    pub out: Option<String>,
    pub json: bool,
}

/// Loads the inputs, runs the calculation, writes artifacts and prints the result.
pub fn run_calculation(options: &CalculateOptions) -> Result<CarbonReport> {
    info!("--- [Workflow] Preparing activity data ---");
    let mut sheet = match &options.input {
        Some(path) => ActivitySheet::load(path)?,
        None => ActivitySheet::default(),
    };
    sheet.apply_overrides(&options.overrides)?;

    for field in sheet.unknown_fields() {
        warn!("Ignoring unknown activity field '{}'", field);
    }
    let activity = sheet.to_activity();
    for field in sheet.coerced_fields(&activity) {
        warn!(
            "Value for '{}' was not a usable quantity; using {}",
            field,
            activity.get(&field).unwrap_or_default()
        );
    }

    let custom_tables = config::load_factors(options.factors.as_deref())?;
    let tables = custom_tables.as_ref().unwrap_or_else(|| FactorTables::standard());

    let output_dir = options.out.clone().unwrap_or_else(|| {
        format!(
            "./runs/carbon_report_{}",
            chrono::Utc::now().format("%Y%m%d_%H%M%S")
        )
    });
    fs::create_dir_all(&output_dir)
        .with_context(|| format!("Failed to create output directory: {}", output_dir))?;

    // Keep the coerced input next to the results for traceability.
    let activity_yaml =
        serde_yaml::to_string(&activity).context("Failed to render activity data")?;
    fs::write(Path::new(&output_dir).join("activity.yaml"), activity_yaml)?;

    info!("--- [Workflow] Calculating emissions and scenarios ---");
    let report = CalculationBuilder::new()
        .with_activity(activity)
        .with_factors(tables)
        .with_report_output_to_dir(&output_dir)
        .build()?
        .run()?;

    if options.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&report).context("Failed to render report")?
        );
    } else {
        print!("{}", Summary { report: &report, tables });
    }

    info!("Calculation complete. Results are in '{}'", output_dir);
    Ok(report)
}

/// Writes the activity template to `out`, or prints it.
pub fn write_template(out: Option<&str>) -> Result<()> {
    let template = config::activity_template()?;
    match out {
        Some(path) => {
            fs::write(path, template)
                .with_context(|| format!("Failed to write template: {}", path))?;
            info!("Activity template written to '{}'", path);
        }
        None => print!("{}", template),
    }
    Ok(())
}

/// Prints the active factor tables in loadable form.
pub fn print_factors(path: Option<&str>) -> Result<()> {
    let custom_tables = config::load_factors(path)?;
    let tables = custom_tables.as_ref().unwrap_or_else(|| FactorTables::standard());
    print!("{}", factor_file_yaml(tables)?);
    Ok(())
}

/// Console rendering of a finished report.
pub struct Summary<'a> {
    pub report: &'a CarbonReport,
    pub tables: &'a FactorTables,
}

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.report;
        let currency = &self.tables.currency;

        writeln!(f, "\n--- [Carbon Footprint Summary] ---")?;
        writeln!(f, "========================================")?;
        writeln!(f, "Emissions by Scope:")?;
        writeln!(f, "  - Scope 1 (direct):         {:>12.2} tCO2e", report.scope1)?;
        writeln!(f, "  - Scope 2 (electricity):    {:>12.2} tCO2e", report.scope2)?;
        writeln!(f, "  - Scope 3 (value chain):    {:>12.2} tCO2e", report.scope3)?;
        writeln!(f, "  --------------------------------------")?;
        writeln!(f, "  - Total:                    {:>12.2} tCO2e", report.total)?;
        writeln!(
            f,
            "  - Intensity:                {:>12.4} tCO2e/unit ({} units)",
            report.intensity, report.production
        )?;
        writeln!(f, "  - Renewable electricity:    {:>11.1}%", report.renewable)?;
        writeln!(
            f,
            "  - Carbon cost:              {:>12.2} {}",
            report.carbon_cost, currency
        )?;

        if !report.hotspots.is_empty() {
            writeln!(f, "\nEmission Hotspots:")?;
            for (i, hotspot) in report.hotspots.iter().enumerate() {
                writeln!(
                    f,
                    "  {}. {:<18} {:>10.2} tCO2e ({:.1}%)",
                    i + 1,
                    hotspot.source.label(),
                    hotspot.emission,
                    hotspot.percent
                )?;
            }
        }

        writeln!(f, "\nReduction Scenarios (ranked by ROI):")?;
        for scenario in &report.scenarios {
            writeln!(f, "  - {} [{}]", scenario.name, scenario.priority)?;
            writeln!(
                f,
                "      Investment: {:.2} {c} | Savings: {:.2} {c}/yr | Reduction: {:.2} tCO2e/yr",
                scenario.investment,
                scenario.annual_savings,
                scenario.carbon_reduction,
                c = currency
            )?;
            writeln!(
                f,
                "      Payback: {:.1} yrs | ROI: {:.1}%",
                scenario.payback_years, scenario.roi_percent
            )?;
            writeln!(f, "      {}", scenario.description)?;
        }

        writeln!(f, "\n10-Year Outlook (all measures):")?;
        writeln!(f, "  - Savings:   {:.2} {}", report.ten_year_savings, currency)?;
        writeln!(f, "  - Reduction: {:.2} tCO2e", report.ten_year_reduction)?;
        writeln!(f, "========================================")
    }
}
