//! Per-phase metrics of a seed run.

use std::fmt;
use std::time::Duration;

/// Ordered stages of a seed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Departments,
    Positions,
    Managers,
    DepartmentManagers,
    Employees,
    Salaries,
    Projects,
    ProjectLinks,
    Attendance,
    Trainings,
    TrainingLinks,
}

impl Phase {
    pub const ALL: [Phase; 11] = [
        Phase::Departments,
        Phase::Positions,
        Phase::Managers,
        Phase::DepartmentManagers,
        Phase::Employees,
        Phase::Salaries,
        Phase::Projects,
        Phase::ProjectLinks,
        Phase::Attendance,
        Phase::Trainings,
        Phase::TrainingLinks,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Departments => "departments",
            Phase::Positions => "positions",
            Phase::Managers => "managers",
            Phase::DepartmentManagers => "department_managers",
            Phase::Employees => "employees",
            Phase::Salaries => "salaries",
            Phase::Projects => "projects",
            Phase::ProjectLinks => "employee_projects",
            Phase::Attendance => "attendance",
            Phase::Trainings => "trainings",
            Phase::TrainingLinks => "employee_trainings",
        }
    }

    /// Whether the phase creates rows, as opposed to updating them.
    pub fn inserts_rows(&self) -> bool {
        !matches!(self, Phase::DepartmentManagers)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Metrics from one phase.
#[derive(Debug, Clone, PartialEq)]
pub struct PhaseMetrics {
    pub phase: Phase,
    /// Rows inserted, or updated for [`Phase::DepartmentManagers`].
    pub rows: u64,
    /// Number of statements executed.
    pub batches: u64,
    pub duration: Duration,
}

impl PhaseMetrics {
    pub fn rows_per_second(&self) -> f64 {
        rate(self.rows, self.duration)
    }
}

/// Metrics from a whole seed run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeedReport {
    pub phases: Vec<PhaseMetrics>,
    pub total_duration: Duration,
    /// Calendar days added before the attendance window.
    pub backfill_days: u32,
}

impl SeedReport {
    pub fn record(&mut self, metrics: PhaseMetrics) {
        self.phases.push(metrics);
    }

    /// Rows created across every inserting phase.
    pub fn total_rows(&self) -> u64 {
        self.phases
            .iter()
            .filter(|m| m.phase.inserts_rows())
            .map(|m| m.rows)
            .sum()
    }

    pub fn rows_for(&self, phase: Phase) -> u64 {
        self.phases
            .iter()
            .filter(|m| m.phase == phase)
            .map(|m| m.rows)
            .sum()
    }

    pub fn rows_per_second(&self) -> f64 {
        rate(self.total_rows(), self.total_duration)
    }
}

fn rate(rows: u64, duration: Duration) -> f64 {
    if duration.as_secs_f64() > 0.0 {
        rows as f64 / duration.as_secs_f64()
    } else {
        0.0
    }
}
