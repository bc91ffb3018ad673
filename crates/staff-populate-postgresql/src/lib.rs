//! PostgreSQL side of the staffdb seed pipeline.
//!
//! - [`schema`] drops and recreates the employee-management schema
//! - [`seeder`] fills it phase by phase inside one transaction
//! - [`insert`] is the batch loader both rely on
//! - [`verify`] checks a seeded database for integrity violations
//!
//! # Example
//!
//! ```ignore
//! let mut client = connect("host=localhost user=postgres dbname=employee_management").await?;
//! initialize_schema(&mut client).await?;
//! let report = Seeder::new(SeedPlan::default(), today).run(&mut client).await?;
//! println!("{} rows", report.total_rows());
//! ```

pub mod args;
pub mod connect;
pub mod error;
pub mod insert;
pub mod metrics;
pub mod phases;
pub mod schema;
pub mod seeder;
pub mod verify;

pub use args::{ConnectionArgs, SeedArgs};
pub use connect::connect;
pub use error::SeedError;
pub use insert::{insert_batches, insert_returning_ids, BatchFailure, BatchOutcome, InsertRow};
pub use metrics::{Phase, PhaseMetrics, SeedReport};
pub use schema::{initialize_schema, schema_snapshot, SchemaSnapshot};
pub use seeder::Seeder;
pub use verify::{verify_seed, VerifyCheck, VerifyReport};
