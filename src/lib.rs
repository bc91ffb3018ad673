//! staffdb: schema initializer and seed-data pipeline for the
//! employee-management PostgreSQL database.
//!
//! The binary wires the workspace crates together:
//!
//! - `staff-core`: status enums, row types, seed plan
//! - `staff-generator`: deterministic synthetic values
//! - `staff-populate-postgresql`: schema, batch loader, seeder, verifier
//!
//! This library holds the process-level pieces shared by the binary and the
//! integration tests: environment configuration and logging.

pub mod config;
pub mod logging;

pub use config::{LogArgs, LogConfig};
