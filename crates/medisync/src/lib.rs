pub mod config;
pub mod error;
pub mod interactions;
pub mod telemetry;
