pub mod builder;
pub mod engine;
