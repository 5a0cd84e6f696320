pub mod config;
pub mod error;
pub mod intake;
pub mod reputation;
pub mod telemetry;
