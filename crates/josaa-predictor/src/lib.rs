pub mod config;
pub mod counselling;
pub mod cutoffs;
pub mod error;
pub mod telemetry;
