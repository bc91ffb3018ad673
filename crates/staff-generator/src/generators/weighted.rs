//! Weighted categorical sampling.
//!
//! A sampler holds `(category, weight)` pairs whose weights sum to 1.0 and a
//! fallback category. Drawing walks the cumulative weights and returns the
//! first category whose cumulative weight meets or exceeds a uniform draw in
//! `[0, 1)`. If floating-point drift leaves the walk without a match, the
//! fallback is returned.

use crate::generator::GeneratorError;
use rand::Rng;
use staff_core::{AttendanceStatus, EmployeeStatus, EnrollmentStatus, ProjectStatus};
use std::fmt::Debug;

/// Accepted distance between the weight sum and 1.0.
pub const WEIGHT_TOLERANCE: f64 = 1e-6;

#[derive(Debug, Clone, PartialEq)]
pub struct WeightedSampler<T> {
    entries: Vec<(T, f64)>,
    fallback: T,
}

impl<T: Copy + Debug> WeightedSampler<T> {
    /// Build a sampler, rejecting negative, non-finite or non-normalized
    /// weights. Zero-weight categories are dropped.
    pub fn new(entries: Vec<(T, f64)>, fallback: T) -> Result<Self, GeneratorError> {
        if entries.is_empty() {
            return Err(GeneratorError::EmptyDistribution);
        }

        for (label, weight) in &entries {
            if !weight.is_finite() || *weight < 0.0 {
                return Err(GeneratorError::InvalidWeight {
                    label: format!("{label:?}"),
                    weight: *weight,
                });
            }
        }

        let sum: f64 = entries.iter().map(|(_, w)| w).sum();
        if (sum - 1.0).abs() > WEIGHT_TOLERANCE {
            return Err(GeneratorError::WeightSum(sum));
        }

        Ok(Self::from_normalized(entries, fallback))
    }

    /// Build from weights already known to be valid.
    fn from_normalized(entries: Vec<(T, f64)>, fallback: T) -> Self {
        let entries = entries.into_iter().filter(|(_, w)| *w > 0.0).collect();
        Self { entries, fallback }
    }

    /// Map a draw in `[0, 1)` to a category.
    pub fn pick(&self, draw: f64) -> T {
        let mut cumulative = 0.0;
        for (label, weight) in &self.entries {
            cumulative += weight;
            if cumulative >= draw {
                return *label;
            }
        }
        self.fallback
    }

    /// Draw one category from `rng`.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> T {
        self.pick(rng.random::<f64>())
    }

    pub fn fallback(&self) -> T {
        self.fallback
    }

    pub fn entries(&self) -> &[(T, f64)] {
        &self.entries
    }
}

/// Employee status distribution.
pub fn employee_statuses() -> WeightedSampler<EmployeeStatus> {
    WeightedSampler::from_normalized(
        vec![
            (EmployeeStatus::Active, 0.80),
            (EmployeeStatus::OnLeave, 0.08),
            (EmployeeStatus::Resigned, 0.07),
            (EmployeeStatus::Inactive, 0.05),
        ],
        EmployeeStatus::Active,
    )
}

/// Daily attendance outcome distribution.
pub fn attendance_statuses() -> WeightedSampler<AttendanceStatus> {
    WeightedSampler::from_normalized(
        vec![
            (AttendanceStatus::Present, 0.85),
            (AttendanceStatus::Late, 0.05),
            (AttendanceStatus::EarlyLeave, 0.03),
            (AttendanceStatus::Absent, 0.04),
            (AttendanceStatus::SickLeave, 0.02),
            (AttendanceStatus::AnnualLeave, 0.01),
        ],
        AttendanceStatus::Present,
    )
}

/// Project lifecycle distribution.
pub fn project_statuses() -> WeightedSampler<ProjectStatus> {
    WeightedSampler::from_normalized(
        vec![
            (ProjectStatus::Planning, 0.20),
            (ProjectStatus::Active, 0.40),
            (ProjectStatus::Paused, 0.10),
            (ProjectStatus::Completed, 0.30),
        ],
        ProjectStatus::Planning,
    )
}

/// Training enrollment distribution.
pub fn enrollment_statuses() -> WeightedSampler<EnrollmentStatus> {
    WeightedSampler::from_normalized(
        vec![
            (EnrollmentStatus::Enrolled, 0.30),
            (EnrollmentStatus::InProgress, 0.25),
            (EnrollmentStatus::Completed, 0.40),
            (EnrollmentStatus::Dropped, 0.05),
        ],
        EnrollmentStatus::Enrolled,
    )
}
