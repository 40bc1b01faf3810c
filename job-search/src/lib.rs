pub mod config;
pub mod domain;
pub mod factory;
pub mod telemetry;
