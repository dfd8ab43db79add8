use anyhow::Result;
use clap::{Parser, Subcommand};

mod config;
mod workflow;

use workflow::CalculateOptions;

#[derive(Parser, Debug)]
#[command(author, version, about = "Facility carbon footprint and reduction scenarios", long_about = None)]
struct Cli {
    /// Set the logging level
    #[arg(long, default_value = "info")]
    log_level: tracing::Level,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Calculate Scope 1/2/3 emissions and costed reduction scenarios
    Calculate {
        /// Activity sheet (YAML, or JSON with a .json extension)
        #[arg(short, long)]
        input: Option<String>,
        /// Override a single activity field, e.g. --set electricity=12000
        #[arg(long = "set", value_name = "FIELD=VALUE")]
        overrides: Vec<String>,
        /// Factor tables to use instead of the built-in ones
        #[arg(long)]
        factors: Option<String>,
        /// Output directory (defaults to ./runs/carbon_report_<timestamp>)
        #[arg(short, long)]
        out: Option<String>,
        /// Print the full report as JSON instead of the summary
        #[arg(long)]
        json: bool,
    },
    /// Write an activity sheet with every field at its default
    Template {
        /// Write to a file instead of stdout
        #[arg(short, long)]
        out: Option<String>,
    },
    /// Print the active factor tables
    Factors {
        /// Factor tables to show instead of the built-in ones
        #[arg(long)]
        factors: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(cli.log_level)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Calculate {
            input,
            overrides,
            factors,
            out,
            json,
        } => {
            workflow::run_calculation(&CalculateOptions {
                input,
                overrides,
                factors,
                out,
                json,
            })?;
        }
        Commands::Template { out } => workflow::write_template(out.as_deref())?,
        Commands::Factors { factors } => workflow::print_factors(factors.as_deref())?,
    }

    Ok(())
}
