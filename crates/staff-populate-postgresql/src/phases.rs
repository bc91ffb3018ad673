//! Row planning for each seed phase.
//!
//! These functions decide what to insert and which foreign keys to use.
//! They never touch the database: the seeder feeds them the ids returned by
//! earlier phases and hands the rows they build to the batch loader.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use staff_core::{
    EmployeeStatus, NewAttendance, NewDepartment, NewEmployee, NewEmployeeProject,
    NewEmployeeTraining, NewPosition, NewProject, NewSalary, NewTraining, PositionPartition,
    ProjectStatus, SeededEmployee, SeededProject, SeededTraining,
};
use staff_generator::{DomainGenerator, Placement};
use std::collections::{HashMap, HashSet};

/// Share of attendance rows that reference one of the employee's projects.
pub const PROJECT_ATTENDANCE_RATE: f64 = 0.3;

/// Members drawn per project.
pub const PROJECT_TEAM_SIZE: (usize, usize) = (5, 8);

/// Enrollments drawn per training.
pub const TRAINING_CLASS_SIZE: (usize, usize) = (10, 20);

pub fn department_rows(generator: &DomainGenerator, count: usize) -> Vec<NewDepartment> {
    (0..count).map(|i| generator.department(i)).collect()
}

pub fn position_rows(generator: &DomainGenerator, count: usize) -> Vec<NewPosition> {
    (0..count).map(|i| generator.position(i)).collect()
}

/// Active, unmanaged employees spread round-robin over the departments.
pub fn manager_rows(
    generator: &mut DomainGenerator,
    count: usize,
    departments: &[i32],
    positions: &PositionPartition,
) -> Vec<NewEmployee> {
    (0..count)
        .map(|i| {
            let placement = Placement {
                department_id: round_robin(departments, i),
                position_id: generator.pick(&positions.manager_eligible),
                manager_id: None,
            };
            generator.employee(i as u64, placement, EmployeeStatus::Active)
        })
        .collect()
}

/// Department `i` is managed by `managers[i % managers.len()]`.
pub fn department_manager_assignments(departments: &[i32], managers: &[i32]) -> Vec<(i32, i32)> {
    if managers.is_empty() {
        return Vec::new();
    }
    departments
        .iter()
        .enumerate()
        .map(|(i, &department)| (department, managers[i % managers.len()]))
        .collect()
}

/// Non-manager employees. Name indexes start at `first_index` so they never
/// repeat a manager's.
pub fn staff_rows(
    generator: &mut DomainGenerator,
    first_index: u64,
    count: usize,
    departments: &[i32],
    staff_positions: &[i32],
    manager_ids: &[i32],
) -> Vec<NewEmployee> {
    (0..count as u64)
        .map(|offset| {
            let placement = Placement {
                department_id: generator.pick(departments),
                position_id: generator.pick(staff_positions),
                manager_id: generator.pick(manager_ids),
            };
            let status = generator.employee_status();
            generator.employee(first_index + offset, placement, status)
        })
        .collect()
}

/// Pair inserted rows with the ids the database returned for them.
pub fn seeded_employees(rows: &[NewEmployee], ids: &[i32]) -> Vec<SeededEmployee> {
    rows.iter()
        .zip(ids)
        .map(|(row, &id)| SeededEmployee {
            id,
            status: row.status,
            hire_date: row.hire_date,
            manager_id: row.manager_id,
        })
        .collect()
}

/// One salary per employee, managers first.
pub fn salary_rows(
    generator: &mut DomainGenerator,
    managers: &[SeededEmployee],
    staff: &[SeededEmployee],
) -> Vec<NewSalary> {
    let mut rows = Vec::with_capacity(managers.len() + staff.len());
    rows.extend(managers.iter().map(|m| generator.salary(m, true)));
    rows.extend(staff.iter().map(|e| generator.salary(e, false)));
    rows
}

pub fn project_rows(generator: &mut DomainGenerator, count: usize) -> Vec<NewProject> {
    (0..count).map(|i| generator.project(i)).collect()
}

pub fn seeded_projects(rows: &[NewProject], ids: &[i32]) -> Vec<SeededProject> {
    rows.iter()
        .zip(ids)
        .map(|(row, &id)| SeededProject {
            id,
            status: row.status,
            start_date: row.start_date,
            end_date: row.end_date,
        })
        .collect()
}

/// Employees a project in `status` may take on.
///
/// Planning, active and paused projects only take active employees;
/// completed projects take anyone.
pub fn candidate_pool<'a>(
    status: ProjectStatus,
    employees: impl IntoIterator<Item = &'a SeededEmployee>,
) -> Vec<i32> {
    employees
        .into_iter()
        .filter(|e| status.accepts(e.status))
        .map(|e| e.id)
        .collect()
}

/// Project memberships.
///
/// Each project draws a team from its candidate pool. A repair pass then
/// gives every active employee left without an ongoing project a place on a
/// random ongoing one. Pairs are never repeated.
pub fn project_links(
    generator: &mut DomainGenerator,
    projects: &[SeededProject],
    employees: &[SeededEmployee],
) -> Vec<NewEmployeeProject> {
    let mut seen: HashSet<(i32, i32)> = HashSet::new();
    let mut staffed: HashSet<i32> = HashSet::new();
    let mut links = Vec::new();

    for project in projects {
        let pool = candidate_pool(project.status, employees);
        let (min_team, max_team) = PROJECT_TEAM_SIZE;
        for employee_id in generator.sample(&pool, min_team, max_team) {
            if !seen.insert((employee_id, project.id)) {
                continue;
            }
            if project.status.is_ongoing() {
                staffed.insert(employee_id);
            }
            links.push(generator.project_link(employee_id, project));
        }
    }

    let ongoing: Vec<SeededProject> = projects
        .iter()
        .filter(|p| p.status.is_ongoing())
        .copied()
        .collect();

    for employee in employees {
        if employee.status != EmployeeStatus::Active || staffed.contains(&employee.id) {
            continue;
        }
        let Some(project) = generator.pick(&ongoing) else {
            break;
        };
        if seen.insert((employee.id, project.id)) {
            staffed.insert(employee.id);
            links.push(generator.project_link(employee.id, &project));
        }
    }

    links
}

/// Project ids per employee.
pub fn project_assignments(links: &[NewEmployeeProject]) -> HashMap<i32, Vec<i32>> {
    let mut assignments: HashMap<i32, Vec<i32>> = HashMap::new();
    for link in links {
        assignments
            .entry(link.employee_id)
            .or_default()
            .push(link.project_id);
    }
    assignments
}

/// Attendance rows for one employee over `days`.
///
/// Each day is skipped with probability `skip_rate`. Present and late days
/// carry a work shift; every other status leaves both times empty.
pub fn employee_attendance(
    generator: &mut DomainGenerator,
    employee_id: i32,
    projects: &[i32],
    days: impl IntoIterator<Item = NaiveDate>,
    skip_rate: f64,
) -> Vec<NewAttendance> {
    let mut rows = Vec::new();

    for date in days {
        if generator.chance(skip_rate) {
            continue;
        }

        let status = generator.attendance_status();
        let shift = generator.work_shift(status);
        let project_id = if generator.chance(PROJECT_ATTENDANCE_RATE) {
            generator.pick(projects)
        } else {
            None
        };

        rows.push(NewAttendance {
            employee_id,
            project_id,
            date,
            check_in: shift.map(|s| s.check_in),
            check_out: shift.map(|s| s.check_out),
            status,
            overtime_hours: shift.map_or(Decimal::ZERO, |s| s.overtime_hours),
        });
    }

    rows
}

/// Whether attendance backfill should add another day.
pub fn needs_backfill(rows_so_far: u64, row_floor: u64, days_added: u32, max_days: u32) -> bool {
    rows_so_far < row_floor && days_added < max_days
}

pub fn training_rows(generator: &mut DomainGenerator, count: usize) -> Vec<NewTraining> {
    (0..count).map(|i| generator.training(i)).collect()
}

pub fn seeded_trainings(rows: &[NewTraining], ids: &[i32]) -> Vec<SeededTraining> {
    rows.iter()
        .zip(ids)
        .map(|(row, &id)| SeededTraining {
            id,
            status: row.status,
            start_date: row.start_date,
            end_date: row.end_date,
        })
        .collect()
}

/// Enrollments drawn from the whole workforce, never repeating a pair.
pub fn training_links(
    generator: &mut DomainGenerator,
    trainings: &[SeededTraining],
    employee_ids: &[i32],
) -> Vec<NewEmployeeTraining> {
    let mut seen: HashSet<(i32, i32)> = HashSet::new();
    let mut links = Vec::new();
    let (min_class, max_class) = TRAINING_CLASS_SIZE;

    for training in trainings {
        for employee_id in generator.sample(employee_ids, min_class, max_class) {
            if seen.insert((employee_id, training.id)) {
                links.push(generator.enrollment(employee_id, training));
            }
        }
    }

    links
}

/// Rows the training phases are certain to write: every training plus the
/// smallest class each one can draw from `employee_count` employees.
pub fn minimum_training_rows(trainings: usize, employee_count: usize) -> u64 {
    let class = TRAINING_CLASS_SIZE.0.min(employee_count);
    (trainings + trainings * class) as u64
}

fn round_robin(ids: &[i32], index: usize) -> Option<i32> {
    if ids.is_empty() {
        None
    } else {
        Some(ids[index % ids.len()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use staff_core::{AttendanceStatus, TrainingStatus};
    use staff_generator::DateWindow;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 30).unwrap()
    }

    fn generator() -> DomainGenerator {
        DomainGenerator::new(42, today())
    }

    fn employee(id: i32, status: EmployeeStatus) -> SeededEmployee {
        SeededEmployee {
            id,
            status,
            hire_date: today() - Duration::days(400),
            manager_id: None,
        }
    }

    fn project(id: i32, status: ProjectStatus) -> SeededProject {
        SeededProject {
            id,
            status,
            start_date: today() - Duration::days(100),
            end_date: today() + Duration::days(100),
        }
    }

    fn mixed_workforce() -> Vec<SeededEmployee> {
        let statuses = EmployeeStatus::ALL;
        (1..=60)
            .map(|id| employee(id, statuses[id as usize % statuses.len()]))
            .collect()
    }

    #[test]
    fn test_managers_round_robin_departments() {
        let mut generator = generator();
        let positions = PositionPartition::split(&[11, 12, 13, 14], 2);
        let rows = manager_rows(&mut generator, 5, &[1, 2, 3], &positions);

        let departments: Vec<Option<i32>> = rows.iter().map(|r| r.department_id).collect();
        assert_eq!(
            departments,
            vec![Some(1), Some(2), Some(3), Some(1), Some(2)]
        );
        for row in &rows {
            assert_eq!(row.status, EmployeeStatus::Active);
            assert_eq!(row.manager_id, None);
            assert!(matches!(row.position_id, Some(11) | Some(12)));
        }
    }

    #[test]
    fn test_department_managers_wrap_when_fewer_managers() {
        let assignments = department_manager_assignments(&[1, 2, 3, 4, 5], &[100, 200]);
        assert_eq!(
            assignments,
            vec![(1, 100), (2, 200), (3, 100), (4, 200), (5, 100)]
        );
        assert!(department_manager_assignments(&[1], &[]).is_empty());
    }

    #[test]
    fn test_staff_report_to_managers() {
        let mut generator = generator();
        let managers = [100, 101, 102];
        let rows = staff_rows(&mut generator, 3, 200, &[1, 2], &[20, 21], &managers);

        assert_eq!(rows.len(), 200);
        for row in &rows {
            let manager = row.manager_id.unwrap();
            assert!(managers.contains(&manager));
            assert!(matches!(row.position_id, Some(20) | Some(21)));
        }

        let emails: HashSet<&str> = rows.iter().map(|r| r.email.as_str()).collect();
        assert_eq!(emails.len(), rows.len());
    }

    #[test]
    fn test_salary_per_employee() {
        let mut generator = generator();
        let managers = vec![employee(1, EmployeeStatus::Active)];
        let staff = vec![
            employee(2, EmployeeStatus::Active),
            employee(3, EmployeeStatus::Resigned),
        ];
        let rows = salary_rows(&mut generator, &managers, &staff);

        let ids: Vec<i32> = rows.iter().map(|r| r.employee_id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_candidate_pools() {
        let workforce = mixed_workforce();

        let active_pool = candidate_pool(ProjectStatus::Active, &workforce);
        assert!(!active_pool.is_empty());
        for id in &active_pool {
            let e = workforce.iter().find(|e| e.id == *id).unwrap();
            assert_eq!(e.status, EmployeeStatus::Active);
        }

        let completed_pool = candidate_pool(ProjectStatus::Completed, &workforce);
        assert_eq!(completed_pool.len(), workforce.len());
    }

    #[test]
    fn test_project_links_unique_and_repaired() {
        let mut generator = generator();
        let workforce = mixed_workforce();
        let projects = vec![
            project(1, ProjectStatus::Active),
            project(2, ProjectStatus::Completed),
            project(3, ProjectStatus::Planning),
        ];
        let links = project_links(&mut generator, &projects, &workforce);

        let pairs: HashSet<(i32, i32)> = links
            .iter()
            .map(|l| (l.employee_id, l.project_id))
            .collect();
        assert_eq!(pairs.len(), links.len());

        for e in workforce
            .iter()
            .filter(|e| e.status == EmployeeStatus::Active)
        {
            assert!(
                links
                    .iter()
                    .any(|l| l.employee_id == e.id && l.project_id != 2),
                "active employee {} has no ongoing project",
                e.id
            );
        }

        for link in &links {
            let e = workforce.iter().find(|e| e.id == link.employee_id).unwrap();
            if link.project_id != 2 {
                assert_eq!(e.status, EmployeeStatus::Active);
                assert_eq!(link.end_date, None);
            } else {
                assert_eq!(link.end_date, Some(projects[1].end_date));
            }
        }
    }

    #[test]
    fn test_team_size_bounded() {
        let mut generator = generator();
        let workforce = mixed_workforce();
        let projects = vec![project(9, ProjectStatus::Completed)];
        let links = project_links(&mut generator, &projects, &workforce);
        // completed only, so no repair links
        assert!((5..=8).contains(&links.len()), "got {}", links.len());
    }

    #[test]
    fn test_attendance_times() {
        let mut generator = generator();
        let window = DateWindow::trailing(today(), 120);
        let rows = employee_attendance(&mut generator, 7, &[1, 2], window.business_days(), 0.1);

        assert!(!rows.is_empty());
        for row in &rows {
            assert_eq!(row.employee_id, 7);
            assert!(window.contains(row.date));
            if row.status.has_clock_times() {
                assert!(row.check_out.unwrap() > row.check_in.unwrap());
            } else {
                assert!(row.check_in.is_none() && row.check_out.is_none());
                assert_eq!(row.overtime_hours, Decimal::ZERO);
            }
            if let Some(p) = row.project_id {
                assert!(p == 1 || p == 2);
            }
        }
        assert!(rows.iter().any(|r| r.status == AttendanceStatus::Present));
    }

    #[test]
    fn test_attendance_without_projects() {
        let mut generator = generator();
        let window = DateWindow::trailing(today(), 30);
        let rows = employee_attendance(&mut generator, 7, &[], window.business_days(), 0.0);
        assert_eq!(rows.len(), window.business_days().count());
        assert!(rows.iter().all(|r| r.project_id.is_none()));
    }

    #[test]
    fn test_backfill_stops() {
        assert!(needs_backfill(10, 100, 0, 5));
        assert!(!needs_backfill(100, 100, 0, 5));
        assert!(!needs_backfill(10, 100, 5, 5));
    }

    #[test]
    fn test_training_links_unique() {
        let mut generator = generator();
        let trainings = vec![
            SeededTraining {
                id: 1,
                status: TrainingStatus::Completed,
                start_date: today() - Duration::days(30),
                end_date: today() - Duration::days(28),
            },
            SeededTraining {
                id: 2,
                status: TrainingStatus::Planned,
                start_date: today() + Duration::days(30),
                end_date: today() + Duration::days(31),
            },
        ];
        let employee_ids: Vec<i32> = (1..=50).collect();
        let links = training_links(&mut generator, &trainings, &employee_ids);

        let pairs: HashSet<(i32, i32)> = links
            .iter()
            .map(|l| (l.employee_id, l.training_id))
            .collect();
        assert_eq!(pairs.len(), links.len());
        for training in &trainings {
            let class = links
                .iter()
                .filter(|l| l.training_id == training.id)
                .count();
            assert!((10..=20).contains(&class));
        }
    }

    #[test]
    fn test_minimum_training_rows_is_a_lower_bound() {
        assert_eq!(minimum_training_rows(4, 100), 4 + 4 * 10);
        assert_eq!(minimum_training_rows(4, 3), 4 + 4 * 3);
        assert_eq!(minimum_training_rows(0, 100), 0);

        let mut generator = generator();
        let trainings = seeded_trainings(&training_rows(&mut generator, 6), &[1, 2, 3, 4, 5, 6]);
        let employee_ids: Vec<i32> = (1..=40).collect();
        let links = training_links(&mut generator, &trainings, &employee_ids);
        let written = (trainings.len() + links.len()) as u64;
        assert!(written >= minimum_training_rows(6, employee_ids.len()));
    }

    #[test]
    fn test_small_workforce_caps_class_size() {
        let mut generator = generator();
        let trainings = vec![SeededTraining {
            id: 1,
            status: TrainingStatus::Ongoing,
            start_date: today(),
            end_date: today(),
        }];
        let links = training_links(&mut generator, &trainings, &[1, 2, 3]);
        assert_eq!(links.len(), 3);
    }
}
