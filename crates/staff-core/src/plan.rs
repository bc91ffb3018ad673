//! Seed plan: how much data one run generates and how it is batched.
//!
//! A plan can be loaded from YAML; every field is optional and falls back to
//! the defaults below.
//!
//! ```yaml
//! departments: 5
//! positions: 10
//! managers: 5
//! employees: 20
//! row_floor: 0
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// PostgreSQL accepts at most this many bind parameters per statement.
pub const MAX_BIND_PARAMETERS: usize = 65_535;

/// Upper bound for the attendance window and the backfill horizon, in days.
pub const MAX_ATTENDANCE_DAYS: u32 = 36_500;

/// Errors raised while loading or validating a plan.
#[derive(Debug, thiserror::Error)]
pub enum PlanError {
    /// Error reading the plan file
    #[error("Failed to read plan file: {0}")]
    Io(#[from] std::io::Error),

    /// Error parsing YAML
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A field holds a value the pipeline cannot work with
    #[error("Invalid plan: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SeedPlan {
    /// Seed for the run's random source
    pub seed: u64,

    pub departments: usize,
    pub positions: usize,
    /// Leading positions reserved for managers
    pub manager_position_slots: usize,
    pub managers: usize,
    /// Employees created after the managers
    pub employees: usize,
    pub projects: usize,
    pub trainings: usize,

    /// Trailing attendance window in calendar days
    pub attendance_days: u32,
    /// Probability of skipping one (employee, business day)
    pub attendance_skip_rate: f64,
    /// Minimum total row count before attendance backfill stops
    pub row_floor: u64,
    pub backfill: bool,
    /// Hard stop for backfill, in calendar days before the window
    pub max_backfill_days: u32,

    pub employee_batch_size: usize,
    pub salary_batch_size: usize,
    pub link_batch_size: usize,
    pub attendance_batch_size: usize,

    /// Domain used for generated email addresses
    pub email_domain: String,
}

impl Default for SeedPlan {
    fn default() -> Self {
        Self {
            seed: 42,
            departments: 8,
            positions: 15,
            manager_position_slots: 3,
            managers: 5,
            employees: 1000,
            projects: 40,
            trainings: 20,
            attendance_days: 365,
            attendance_skip_rate: 0.1,
            row_floor: 100_000,
            backfill: true,
            max_backfill_days: 3650,
            employee_batch_size: 500,
            salary_batch_size: 1000,
            link_batch_size: 1000,
            attendance_batch_size: 2000,
            email_domain: "company.com".to_string(),
        }
    }
}

impl SeedPlan {
    /// Load a plan from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, PlanError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse a plan from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, PlanError> {
        let plan: SeedPlan = serde_yaml::from_str(yaml)?;
        plan.validate()?;
        Ok(plan)
    }

    /// Reject plans that would leave foreign keys unsatisfiable or build
    /// statements PostgreSQL refuses.
    pub fn validate(&self) -> Result<(), PlanError> {
        if self.departments == 0 {
            return Err(PlanError::Invalid("departments must be at least 1".into()));
        }
        if self.positions == 0 {
            return Err(PlanError::Invalid("positions must be at least 1".into()));
        }
        if self.managers == 0 {
            return Err(PlanError::Invalid("managers must be at least 1".into()));
        }
        if !(0.0..1.0).contains(&self.attendance_skip_rate) {
            return Err(PlanError::Invalid(format!(
                "attendance_skip_rate must be in [0, 1), got {}",
                self.attendance_skip_rate
            )));
        }
        for (name, days) in [
            ("attendance_days", self.attendance_days),
            ("max_backfill_days", self.max_backfill_days),
        ] {
            if days > MAX_ATTENDANCE_DAYS {
                return Err(PlanError::Invalid(format!(
                    "{name} of {days} exceeds {MAX_ATTENDANCE_DAYS}"
                )));
            }
        }
        if self.email_domain.trim().is_empty() {
            return Err(PlanError::Invalid("email_domain must not be empty".into()));
        }

        for (name, size) in [
            ("employee_batch_size", self.employee_batch_size),
            ("salary_batch_size", self.salary_batch_size),
            ("link_batch_size", self.link_batch_size),
            ("attendance_batch_size", self.attendance_batch_size),
        ] {
            if size == 0 {
                return Err(PlanError::Invalid(format!("{name} must be at least 1")));
            }
            // Widest table (employees) binds nine columns per row.
            let params = size.checked_mul(9);
            if params.is_none_or(|params| params > MAX_BIND_PARAMETERS) {
                return Err(PlanError::Invalid(format!(
                    "{name} of {size} exceeds the bind parameter limit"
                )));
            }
        }

        Ok(())
    }

    /// Total employees, managers included.
    pub fn total_employees(&self) -> usize {
        self.managers + self.employees
    }
}
