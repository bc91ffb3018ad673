//! Synthetic data generator for the staffdb seed pipeline.
//!
//! Values are produced from a seeded random source so a run can be
//! reproduced exactly:
//!
//! - [`catalog`] - fixed department, position, project and training tables
//! - [`generators`] - low-level value generators (names, dates, shifts, money)
//! - [`generator`] - [`DomainGenerator`], which assembles whole rows
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use staff_generator::DomainGenerator;
//!
//! let today = NaiveDate::from_ymd_opt(2025, 6, 30).unwrap();
//! let mut generator = DomainGenerator::new(42, today);
//! let department = generator.department(0);
//! assert_eq!(department.name, "Engineering");
//! let person = generator.person(0);
//! assert!(person.email.ends_with("@company.com"));
//! ```

pub mod catalog;
pub mod generator;
pub mod generators;

// Re-exports for convenience
pub use generator::{training_status, DomainGenerator, GeneratorError, Person, Placement};
pub use generators::calendar::DateWindow;
pub use generators::shift::WorkShift;
pub use generators::weighted::WeightedSampler;
