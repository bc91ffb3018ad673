//! Entity seeder: runs every phase in foreign-key order inside one
//! transaction.
//!
//! Each phase returns the ids it created. They are collected in a
//! [`SeedArena`] that lives only for the duration of [`Seeder::run`] and is
//! read by the later phases for their foreign keys. A failure in any phase
//! rolls the whole run back.

use crate::error::SeedError;
use crate::insert::{insert_batches, insert_returning_ids, BatchOutcome, InsertRow};
use crate::metrics::{Phase, PhaseMetrics, SeedReport};
use crate::phases;
use chrono::NaiveDate;
use staff_core::{NewAttendance, PositionPartition, SeedArena, SeedPlan, SeededEmployee};
use staff_generator::generators::calendar::is_business_day;
use staff_generator::{DateWindow, DomainGenerator};
use std::collections::HashMap;
use std::time::Instant;
use tokio_postgres::{Client, Transaction};
use tracing::{debug, error, info};

/// Batch size for the small reference tables.
pub const DEFAULT_BATCH_SIZE: usize = 100;

const ASSIGN_DEPARTMENT_MANAGERS: &str = "UPDATE departments AS d SET manager_id = v.manager_id \
     FROM unnest($1::int4[], $2::int4[]) AS v(id, manager_id) WHERE d.id = v.id";

/// Seeds a freshly initialized schema.
pub struct Seeder {
    plan: SeedPlan,
    generator: DomainGenerator,
}

impl Seeder {
    /// Create a seeder. `today` anchors the attendance window and every
    /// relative date.
    pub fn new(plan: SeedPlan, today: NaiveDate) -> Self {
        let generator = DomainGenerator::new(plan.seed, today)
            .with_email_domain(plan.email_domain.clone());
        Self { plan, generator }
    }

    pub fn plan(&self) -> &SeedPlan {
        &self.plan
    }

    /// Run every phase and commit, or roll back on the first failure.
    pub async fn run(&mut self, client: &mut Client) -> Result<SeedReport, SeedError> {
        let start_time = Instant::now();
        info!(
            "Seeding {} departments, {} positions, {} managers, {} employees (seed={})",
            self.plan.departments,
            self.plan.positions,
            self.plan.managers,
            self.plan.employees,
            self.plan.seed
        );

        let tx = client.transaction().await?;

        let mut report = match self.run_phases(&tx).await {
            Ok(report) => report,
            Err(e) => {
                match &e {
                    SeedError::PhaseFailed {
                        phase,
                        processed,
                        source,
                    } => error!(
                        phase = %phase,
                        processed = *processed,
                        error = %source,
                        "Seed phase failed, rolling back"
                    ),
                    other => error!(error = %other, "Seeding failed, rolling back"),
                }
                if let Err(rollback_error) = tx.rollback().await {
                    error!("Rollback failed: {}", rollback_error);
                }
                return Err(e);
            }
        };

        tx.commit().await?;
        report.total_duration = start_time.elapsed();

        info!(
            target: "performance",
            total_rows = report.total_rows(),
            backfill_days = report.backfill_days,
            duration_ms = report.total_duration.as_millis() as u64,
            rows_per_second = report.rows_per_second(),
            "Seeding complete"
        );

        Ok(report)
    }

    async fn run_phases(&mut self, tx: &Transaction<'_>) -> Result<SeedReport, SeedError> {
        let Seeder { plan, generator } = self;
        let mut report = SeedReport::default();
        let mut arena = SeedArena::default();

        // Departments, without managers for now
        let started = Instant::now();
        let rows = phases::department_rows(generator, plan.departments);
        let outcome = load_with_ids(tx, Phase::Departments, &rows, DEFAULT_BATCH_SIZE).await?;
        record(&mut report, Phase::Departments, &outcome, started);
        arena.departments = outcome.ids;

        let started = Instant::now();
        let rows = phases::position_rows(generator, plan.positions);
        let outcome = load_with_ids(tx, Phase::Positions, &rows, DEFAULT_BATCH_SIZE).await?;
        record(&mut report, Phase::Positions, &outcome, started);
        arena.positions = PositionPartition::split(&outcome.ids, plan.manager_position_slots);

        let started = Instant::now();
        let rows = phases::manager_rows(
            generator,
            plan.managers,
            &arena.departments,
            &arena.positions,
        );
        let outcome = load_with_ids(tx, Phase::Managers, &rows, plan.employee_batch_size).await?;
        record(&mut report, Phase::Managers, &outcome, started);
        arena.managers = phases::seeded_employees(&rows, &outcome.ids);

        let started = Instant::now();
        let assignments =
            phases::department_manager_assignments(&arena.departments, &arena.manager_ids());
        let (department_ids, manager_ids): (Vec<i32>, Vec<i32>) = assignments.into_iter().unzip();
        let updated = tx
            .execute(ASSIGN_DEPARTMENT_MANAGERS, &[&department_ids, &manager_ids])
            .await
            .map_err(|source| SeedError::PhaseFailed {
                phase: Phase::DepartmentManagers,
                processed: 0,
                source,
            })?;
        let outcome = BatchOutcome {
            ids: Vec::new(),
            rows: updated,
            batches: 1,
        };
        record(&mut report, Phase::DepartmentManagers, &outcome, started);

        let started = Instant::now();
        let rows = phases::staff_rows(
            generator,
            plan.managers as u64,
            plan.employees,
            &arena.departments,
            &arena.positions.staff,
            &arena.manager_ids(),
        );
        let outcome = load_with_ids(tx, Phase::Employees, &rows, plan.employee_batch_size).await?;
        record(&mut report, Phase::Employees, &outcome, started);
        arena.staff = phases::seeded_employees(&rows, &outcome.ids);

        let started = Instant::now();
        let rows = phases::salary_rows(generator, &arena.managers, &arena.staff);
        let outcome = load(tx, Phase::Salaries, &rows, plan.salary_batch_size).await?;
        record(&mut report, Phase::Salaries, &outcome, started);

        let started = Instant::now();
        let rows = phases::project_rows(generator, plan.projects);
        let outcome = load_with_ids(tx, Phase::Projects, &rows, DEFAULT_BATCH_SIZE).await?;
        record(&mut report, Phase::Projects, &outcome, started);
        arena.projects = phases::seeded_projects(&rows, &outcome.ids);

        let employees: Vec<SeededEmployee> = arena.employees().copied().collect();

        let started = Instant::now();
        let links = phases::project_links(generator, &arena.projects, &employees);
        let outcome = load(tx, Phase::ProjectLinks, &links, plan.link_batch_size).await?;
        record(&mut report, Phase::ProjectLinks, &outcome, started);
        arena.project_links = links
            .iter()
            .map(|l| (l.employee_id, l.project_id))
            .collect();

        // Trainings are written after attendance, so their guaranteed rows
        // count towards the floor up front.
        let started = Instant::now();
        let assignments = phases::project_assignments(&links);
        let rows_before =
            report.total_rows() + phases::minimum_training_rows(plan.trainings, employees.len());
        let (outcome, backfill_days) =
            seed_attendance(tx, generator, plan, &employees, &assignments, rows_before).await?;
        record(&mut report, Phase::Attendance, &outcome, started);
        report.backfill_days = backfill_days;

        let started = Instant::now();
        let rows = phases::training_rows(generator, plan.trainings);
        let outcome = load_with_ids(tx, Phase::Trainings, &rows, DEFAULT_BATCH_SIZE).await?;
        record(&mut report, Phase::Trainings, &outcome, started);
        arena.trainings = phases::seeded_trainings(&rows, &outcome.ids);

        let started = Instant::now();
        let employee_ids: Vec<i32> = employees.iter().map(|e| e.id).collect();
        let links = phases::training_links(generator, &arena.trainings, &employee_ids);
        let outcome = load(tx, Phase::TrainingLinks, &links, plan.link_batch_size).await?;
        record(&mut report, Phase::TrainingLinks, &outcome, started);
        arena.training_links = links
            .iter()
            .map(|l| (l.employee_id, l.training_id))
            .collect();

        debug!(
            "Arena: {} employees, {} project links, {} training links",
            arena.employee_count(),
            arena.project_links.len(),
            arena.training_links.len()
        );

        Ok(report)
    }
}

/// Attendance over the trailing window, then earlier days until the row
/// floor is met. Rows are flushed to the database whenever a full batch
/// has accumulated.
async fn seed_attendance(
    tx: &Transaction<'_>,
    generator: &mut DomainGenerator,
    plan: &SeedPlan,
    employees: &[SeededEmployee],
    assignments: &HashMap<i32, Vec<i32>>,
    rows_before: u64,
) -> Result<(BatchOutcome, u32), SeedError> {
    let batch_size = plan.attendance_batch_size;
    let mut buffer: Vec<NewAttendance> = Vec::with_capacity(batch_size);
    let mut total = BatchOutcome::default();
    let mut generated: u64 = 0;

    let window = DateWindow::trailing(generator.today(), plan.attendance_days);
    let days: Vec<NaiveDate> = window.business_days().collect();
    info!(
        "Generating attendance for {} employees over {} business days",
        employees.len(),
        days.len()
    );

    for employee in employees {
        let projects = assignments.get(&employee.id).map_or(&[][..], Vec::as_slice);
        let rows = phases::employee_attendance(
            generator,
            employee.id,
            projects,
            days.iter().copied(),
            plan.attendance_skip_rate,
        );
        generated += rows.len() as u64;
        buffer.extend(rows);
        if buffer.len() >= batch_size {
            flush_attendance(tx, &mut buffer, batch_size, &mut total).await?;
        }
    }

    let mut backfill_days = 0;
    if plan.backfill {
        let mut next_day = window.day_before();
        while let Some(day) = next_day {
            if !phases::needs_backfill(
                rows_before + generated,
                plan.row_floor,
                backfill_days,
                plan.max_backfill_days,
            ) {
                break;
            }

            if is_business_day(day) {
                for employee in employees {
                    let projects = assignments.get(&employee.id).map_or(&[][..], Vec::as_slice);
                    let rows = phases::employee_attendance(
                        generator,
                        employee.id,
                        projects,
                        [day],
                        plan.attendance_skip_rate,
                    );
                    generated += rows.len() as u64;
                    buffer.extend(rows);
                }
                if buffer.len() >= batch_size {
                    flush_attendance(tx, &mut buffer, batch_size, &mut total).await?;
                }
            }

            backfill_days += 1;
            next_day = day.pred_opt();
        }

        if backfill_days > 0 {
            info!(
                "Backfilled {} days before {} to reach {} rows",
                backfill_days, window.start, plan.row_floor
            );
        }
    }

    flush_attendance(tx, &mut buffer, batch_size, &mut total).await?;
    Ok((total, backfill_days))
}

async fn flush_attendance(
    tx: &Transaction<'_>,
    buffer: &mut Vec<NewAttendance>,
    batch_size: usize,
    total: &mut BatchOutcome,
) -> Result<(), SeedError> {
    if buffer.is_empty() {
        return Ok(());
    }
    let outcome = insert_batches(tx, buffer.as_slice(), batch_size)
        .await
        .map_err(|failure| SeedError::phase(Phase::Attendance, total.rows, failure))?;
    total.rows += outcome.rows;
    total.batches += outcome.batches;
    buffer.clear();
    Ok(())
}

async fn load_with_ids<R: InsertRow>(
    tx: &Transaction<'_>,
    phase: Phase,
    rows: &[R],
    batch_size: usize,
) -> Result<BatchOutcome, SeedError> {
    insert_returning_ids(tx, rows, batch_size)
        .await
        .map_err(|failure| SeedError::phase(phase, 0, failure))
}

async fn load<R: InsertRow>(
    tx: &Transaction<'_>,
    phase: Phase,
    rows: &[R],
    batch_size: usize,
) -> Result<BatchOutcome, SeedError> {
    insert_batches(tx, rows, batch_size)
        .await
        .map_err(|failure| SeedError::phase(phase, 0, failure))
}

fn record(report: &mut SeedReport, phase: Phase, outcome: &BatchOutcome, started: Instant) {
    let metrics = PhaseMetrics {
        phase,
        rows: outcome.rows,
        batches: outcome.batches,
        duration: started.elapsed(),
    };

    info!(
        target: "performance",
        phase = %phase,
        rows = metrics.rows,
        batches = metrics.batches,
        duration_ms = metrics.duration.as_millis() as u64,
        rows_per_second = metrics.rows_per_second(),
        "Phase complete"
    );

    report.record(metrics);
}
