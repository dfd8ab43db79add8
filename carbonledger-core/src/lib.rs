pub mod calculation;
pub mod emissions;
pub mod error;
pub mod factors;
pub mod logger;
pub mod report;
pub mod scenarios;

pub use calculation::{builder::CalculationBuilder, engine::Calculation};
pub use error::CarbonError;
pub use report::build_report;
