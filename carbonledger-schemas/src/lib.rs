pub mod activity;
pub mod emissions;
pub mod factors;
pub mod file_formats;
pub mod report;
pub mod scenario;
