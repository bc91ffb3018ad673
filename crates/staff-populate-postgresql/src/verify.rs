//! Post-seed verification.
//!
//! Every check is one `SELECT COUNT(*)` returning the number of violating
//! rows; a clean database yields zero for each.

use crate::schema::TABLES;
use tokio_postgres::GenericClient;
use tracing::{info, warn};

/// (name, description, query)
pub const CHECKS: &[(&str, &str, &str)] = &[
    (
        "staff_manager_not_manager",
        "employees whose manager is not a manager-phase employee",
        "SELECT COUNT(*) FROM employees e \
         WHERE e.manager_id IS NOT NULL AND NOT EXISTS ( \
             SELECT 1 FROM employees m WHERE m.id = e.manager_id AND m.manager_id IS NULL)",
    ),
    (
        "duplicate_project_links",
        "repeated (employee, project) pairs",
        "SELECT COUNT(*) FROM ( \
             SELECT employee_id, project_id FROM employee_projects \
             GROUP BY employee_id, project_id HAVING COUNT(*) > 1) d",
    ),
    (
        "duplicate_training_links",
        "repeated (employee, training) pairs",
        "SELECT COUNT(*) FROM ( \
             SELECT employee_id, training_id FROM employee_trainings \
             GROUP BY employee_id, training_id HAVING COUNT(*) > 1) d",
    ),
    (
        "ongoing_project_inactive_member",
        "non-active employees on planning, active or paused projects",
        "SELECT COUNT(*) FROM employee_projects ep \
         JOIN projects p ON p.id = ep.project_id \
         JOIN employees e ON e.id = ep.employee_id \
         WHERE p.status <> 'completed' AND e.status <> 'active'",
    ),
    (
        "attendance_missing_times",
        "present or late attendance without increasing check-in/check-out",
        "SELECT COUNT(*) FROM attendance \
         WHERE status IN ('present', 'late') \
         AND (check_in IS NULL OR check_out IS NULL OR check_out <= check_in)",
    ),
    (
        "attendance_unexpected_times",
        "attendance with times for a status that has none",
        "SELECT COUNT(*) FROM attendance \
         WHERE status NOT IN ('present', 'late') \
         AND (check_in IS NOT NULL OR check_out IS NOT NULL)",
    ),
    (
        "department_without_manager",
        "departments with a null or dangling manager",
        "SELECT COUNT(*) FROM departments d \
         WHERE d.manager_id IS NULL \
         OR NOT EXISTS (SELECT 1 FROM employees e WHERE e.id = d.manager_id)",
    ),
    (
        "employee_without_salary",
        "employees with no salary row",
        "SELECT COUNT(*) FROM employees e \
         WHERE NOT EXISTS (SELECT 1 FROM salaries s WHERE s.employee_id = e.id)",
    ),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyCheck {
    pub name: &'static str,
    pub description: &'static str,
    pub violations: i64,
}

impl VerifyCheck {
    pub fn passed(&self) -> bool {
        self.violations == 0
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VerifyReport {
    pub checks: Vec<VerifyCheck>,
    /// (table, rows) in dependency order
    pub row_counts: Vec<(String, i64)>,
}

impl VerifyReport {
    pub fn is_clean(&self) -> bool {
        self.checks.iter().all(VerifyCheck::passed)
    }

    pub fn failures(&self) -> impl Iterator<Item = &VerifyCheck> {
        self.checks.iter().filter(|c| !c.passed())
    }

    pub fn row_count(&self, table: &str) -> Option<i64> {
        self.row_counts
            .iter()
            .find(|(t, _)| t == table)
            .map(|(_, count)| *count)
    }
}

/// Row count of every table.
pub async fn row_counts<C: GenericClient>(
    client: &C,
) -> Result<Vec<(String, i64)>, tokio_postgres::Error> {
    let mut counts = Vec::with_capacity(TABLES.len());
    for table in TABLES {
        let sql = format!("SELECT COUNT(*) FROM {table}");
        let row = client.query_one(sql.as_str(), &[]).await?;
        counts.push((table.to_string(), row.get::<_, i64>(0)));
    }
    Ok(counts)
}

/// Run every check and collect row counts.
pub async fn verify_seed<C: GenericClient>(
    client: &C,
) -> Result<VerifyReport, tokio_postgres::Error> {
    let mut report = VerifyReport {
        checks: Vec::with_capacity(CHECKS.len()),
        row_counts: row_counts(client).await?,
    };

    for &(name, description, sql) in CHECKS {
        let row = client.query_one(sql, &[]).await?;
        let check = VerifyCheck {
            name,
            description,
            violations: row.get::<_, i64>(0),
        };
        if check.passed() {
            info!("Check {} passed", check.name);
        } else {
            warn!(
                check = check.name,
                violations = check.violations,
                "Check failed: {}",
                check.description
            );
        }
        report.checks.push(check);
    }

    Ok(report)
}
