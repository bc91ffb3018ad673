//! Domain generator producing the content of every seeded row.

use crate::catalog;
use crate::generators::calendar::{date_between, days_after};
use crate::generators::contact::{email, phone};
use crate::generators::names::{person_name, PersonName};
use crate::generators::numeric::{money, percent_of, tenths};
use crate::generators::sample::unique_sample;
use crate::generators::shift::{work_shift, WorkShift};
use crate::generators::weighted::{
    attendance_statuses, employee_statuses, enrollment_statuses, project_statuses,
    WeightedSampler,
};
use chrono::{Duration, NaiveDate};
use rand::rngs::StdRng;
use rand::seq::{IndexedRandom, SliceRandom};
use rand::{Rng, SeedableRng};
use staff_core::{
    AttendanceStatus, EmployeeStatus, EnrollmentStatus, NewDepartment, NewEmployee,
    NewEmployeeProject, NewEmployeeTraining, NewPosition, NewProject, NewSalary, NewTraining,
    ProjectStatus, SeededEmployee, SeededProject, SeededTraining, TrainingStatus,
};

/// Error type for generator operations.
#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    /// A distribution with no categories
    #[error("Weighted distribution has no categories")]
    EmptyDistribution,

    /// Negative or non-finite weight
    #[error("Invalid weight {weight} for category {label}")]
    InvalidWeight { label: String, weight: f64 },

    /// Weights that do not sum to 1.0
    #[error("Weights sum to {0}, expected 1.0")]
    WeightSum(f64),
}

/// A generated person: name plus contact details.
#[derive(Debug, Clone, PartialEq)]
pub struct Person {
    pub name: PersonName,
    pub email: String,
    pub phone: String,
}

/// Foreign keys chosen by the seeder for one employee.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Placement {
    pub department_id: Option<i32>,
    pub position_id: Option<i32>,
    pub manager_id: Option<i32>,
}

/// Produces deterministic synthetic values.
///
/// The generator owns a seeded `StdRng`; the same seed and call sequence
/// always yield the same rows. `today` anchors every relative date so tests
/// do not depend on the wall clock.
pub struct DomainGenerator {
    rng: StdRng,
    today: NaiveDate,
    email_domain: String,
    employee_statuses: WeightedSampler<EmployeeStatus>,
    attendance_statuses: WeightedSampler<AttendanceStatus>,
    project_statuses: WeightedSampler<ProjectStatus>,
    enrollment_statuses: WeightedSampler<EnrollmentStatus>,
}

impl DomainGenerator {
    pub fn new(seed: u64, today: NaiveDate) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            today,
            email_domain: "company.com".to_string(),
            employee_statuses: employee_statuses(),
            attendance_statuses: attendance_statuses(),
            project_statuses: project_statuses(),
            enrollment_statuses: enrollment_statuses(),
        }
    }

    pub fn with_email_domain(mut self, domain: impl Into<String>) -> Self {
        self.email_domain = domain.into();
        self
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Direct access to the random source for ad-hoc draws.
    pub fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    pub fn department(&self, index: usize) -> NewDepartment {
        let table = catalog::DEPARTMENTS;
        let (name, location, description) = table[index % table.len()];
        NewDepartment {
            name: catalog::cycled_name(name, index, table.len()),
            location: location.to_string(),
            description: description.to_string(),
        }
    }

    pub fn position(&self, index: usize) -> NewPosition {
        let table = catalog::POSITIONS;
        let (name, level, description) = table[index % table.len()];
        NewPosition {
            name: catalog::cycled_name(name, index, table.len()),
            level,
            description: description.to_string(),
        }
    }

    pub fn person(&mut self, index: u64) -> Person {
        let name = person_name(index);
        let email = email(&name, index, &self.email_domain, &mut self.rng);
        let phone = phone(&mut self.rng);
        Person { name, email, phone }
    }

    /// Between eight years and thirty days ago.
    pub fn hire_date(&mut self) -> NaiveDate {
        let earliest = self.today - Duration::days(8 * 365);
        let latest = self.today - Duration::days(30);
        date_between(&mut self.rng, earliest, latest)
    }

    pub fn employee(
        &mut self,
        index: u64,
        placement: Placement,
        status: EmployeeStatus,
    ) -> NewEmployee {
        let person = self.person(index);
        NewEmployee {
            first_name: person.name.given_name.to_string(),
            last_name: person.name.surname.to_string(),
            email: person.email,
            phone: person.phone,
            hire_date: self.hire_date(),
            department_id: placement.department_id,
            position_id: placement.position_id,
            manager_id: placement.manager_id,
            status,
        }
    }

    pub fn employee_status(&mut self) -> EmployeeStatus {
        self.employee_statuses.sample(&mut self.rng)
    }

    pub fn attendance_status(&mut self) -> AttendanceStatus {
        self.attendance_statuses.sample(&mut self.rng)
    }

    pub fn project_status(&mut self) -> ProjectStatus {
        self.project_statuses.sample(&mut self.rng)
    }

    pub fn work_shift(&mut self, status: AttendanceStatus) -> Option<WorkShift> {
        work_shift(&mut self.rng, status)
    }

    /// Managers earn from a higher band. Bonus is 5-20% of basic.
    pub fn salary(&mut self, employee: &SeededEmployee, is_manager: bool) -> NewSalary {
        let basic_salary = if is_manager {
            money(&mut self.rng, 20_000, 50_000)
        } else {
            money(&mut self.rng, 5_000, 30_000)
        };
        let bonus = percent_of(&mut self.rng, basic_salary, 5, 20);
        let allowances = money(&mut self.rng, 500, 3_000);

        NewSalary {
            employee_id: employee.id,
            basic_salary,
            bonus,
            allowances,
            effective_date: employee.hire_date,
        }
    }

    /// Starts within the last two years and ends 30-365 days later.
    pub fn project(&mut self, index: usize) -> NewProject {
        let prefix = catalog::PROJECT_PREFIXES[index % catalog::PROJECT_PREFIXES.len()];
        let suffix = catalog::PROJECT_SUFFIXES
            .choose(&mut self.rng)
            .copied()
            .unwrap_or("Initiative");

        let start_date = date_between(
            &mut self.rng,
            self.today - Duration::days(730),
            self.today,
        );
        let end_date = days_after(&mut self.rng, start_date, 30, 365);

        NewProject {
            name: format!("{prefix} {suffix}"),
            description: format!("{suffix} project codenamed {prefix}"),
            start_date,
            end_date,
            status: self.project_status(),
            budget: money(&mut self.rng, 100_000, 5_000_000),
        }
    }

    pub fn project_link(
        &mut self,
        employee_id: i32,
        project: &SeededProject,
    ) -> NewEmployeeProject {
        let role = catalog::PROJECT_ROLES
            .choose(&mut self.rng)
            .copied()
            .unwrap_or("Developer");
        let completed = project.status == ProjectStatus::Completed;
        let end_date = completed.then_some(project.end_date);

        NewEmployeeProject {
            employee_id,
            project_id: project.id,
            role: role.to_string(),
            start_date: project.start_date,
            end_date,
            contribution_hours: tenths(&mut self.rng, 20, 800),
        }
    }

    /// One to five days, somewhere between a year ago and three months ahead.
    pub fn training(&mut self, index: usize) -> NewTraining {
        let table = catalog::TRAINING_TOPICS;
        let (topic, description) = table[index % table.len()];

        let start_date = date_between(
            &mut self.rng,
            self.today - Duration::days(365),
            self.today + Duration::days(90),
        );
        let end_date = days_after(&mut self.rng, start_date, 0, 4);

        NewTraining {
            name: catalog::cycled_name(topic, index, table.len()),
            description: description.to_string(),
            trainer: catalog::TRAINERS
                .choose(&mut self.rng)
                .copied()
                .unwrap_or("Internal Academy")
                .to_string(),
            start_date,
            end_date,
            location: catalog::TRAINING_LOCATIONS
                .choose(&mut self.rng)
                .copied()
                .unwrap_or("Online")
                .to_string(),
            capacity: self.rng.random_range(20..=50),
            status: training_status(start_date, end_date, self.today),
        }
    }

    /// Enrollment outcome consistent with the training's own status.
    pub fn enrollment(
        &mut self,
        employee_id: i32,
        training: &SeededTraining,
    ) -> NewEmployeeTraining {
        let drawn = self.enrollment_statuses.sample(&mut self.rng);
        let status = match (training.status, drawn) {
            (TrainingStatus::Planned, _) => EnrollmentStatus::Enrolled,
            (TrainingStatus::Ongoing, EnrollmentStatus::Completed) => EnrollmentStatus::InProgress,
            (
                TrainingStatus::Completed,
                EnrollmentStatus::Enrolled | EnrollmentStatus::InProgress,
            ) => EnrollmentStatus::Completed,
            (_, other) => other,
        };

        let completed = status == EnrollmentStatus::Completed;
        NewEmployeeTraining {
            employee_id,
            training_id: training.id,
            status,
            score: completed.then(|| tenths(&mut self.rng, 60, 100)),
            completion_date: completed.then_some(training.end_date),
        }
    }

    /// True with probability `p`.
    pub fn chance(&mut self, p: f64) -> bool {
        self.rng.random_bool(p.clamp(0.0, 1.0))
    }

    pub fn pick<T: Copy>(&mut self, items: &[T]) -> Option<T> {
        items.choose(&mut self.rng).copied()
    }

    pub fn sample<T: Clone>(&mut self, pool: &[T], min_len: usize, max_len: usize) -> Vec<T> {
        unique_sample(&mut self.rng, pool, min_len, max_len)
    }

    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.rng);
    }
}

/// Planned before it starts, completed after it ends, ongoing in between.
pub fn training_status(start: NaiveDate, end: NaiveDate, today: NaiveDate) -> TrainingStatus {
    if end < today {
        TrainingStatus::Completed
    } else if start > today {
        TrainingStatus::Planned
    } else {
        TrainingStatus::Ongoing
    }
}
