pub mod cli;
pub mod config;
pub mod domain;
pub mod report;
pub mod simulation;
pub mod telemetry;
pub mod view;
