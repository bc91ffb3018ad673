//! Core types for the staffdb seed pipeline.
//!
//! This crate provides the types shared by the generator and the
//! PostgreSQL populator:
//!
//! - [`status`] - categorical status columns and their allowed labels
//! - [`model`] - insertable row types, one per table
//! - [`arena`] - ids returned by each seed phase
//! - [`plan`] - counts, batch sizes and tuning knobs of one run
//!
//! # Architecture
//!
//! ```text
//! staff-core (this crate)
//!    │
//!    ├─── staff-generator            (synthetic values, weighted sampling)
//!    │
//!    └─── staff-populate-postgresql  (schema, batch loader, seeder, verifier)
//! ```

pub mod arena;
pub mod model;
pub mod plan;
pub mod status;

// Re-exports for convenience
pub use arena::{PositionPartition, SeedArena, SeededEmployee, SeededProject, SeededTraining};
pub use model::{
    NewAttendance, NewDepartment, NewEmployee, NewEmployeeProject, NewEmployeeTraining,
    NewPosition, NewProject, NewSalary, NewTraining,
};
pub use plan::{PlanError, SeedPlan, MAX_ATTENDANCE_DAYS, MAX_BIND_PARAMETERS};
pub use status::{
    AttendanceStatus, EmployeeStatus, EnrollmentStatus, ProjectStatus, StatusParseError,
    TrainingStatus,
};
