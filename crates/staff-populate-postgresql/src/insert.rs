//! Batched multi-row INSERT logic.

use chrono::NaiveDate;
use staff_core::{
    NewAttendance, NewDepartment, NewEmployee, NewEmployeeProject, NewEmployeeTraining,
    NewPosition, NewProject, NewSalary, NewTraining, MAX_BIND_PARAMETERS,
};
use thiserror::Error;
use tokio_postgres::types::ToSql;
use tokio_postgres::GenericClient;
use tracing::debug;

/// One owned bind parameter.
pub type SqlParam = Box<dyn ToSql + Sync + Send>;

/// A row type that knows its table and how to bind its columns.
pub trait InsertRow {
    const TABLE: &'static str;
    const COLUMNS: &'static [&'static str];

    /// Push exactly `COLUMNS.len()` parameters, in column order.
    fn push_params(&self, params: &mut Vec<SqlParam>);
}

/// Rows and statements written by one load.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchOutcome {
    /// Generated ids in input order; empty unless ids were requested.
    pub ids: Vec<i32>,
    pub rows: u64,
    pub batches: u64,
}

/// A chunk failed. Earlier chunks of the same load were already executed.
#[derive(Error, Debug)]
#[error("Insert into {table} failed after {processed} rows")]
pub struct BatchFailure {
    pub table: &'static str,
    pub processed: u64,
    #[source]
    pub source: tokio_postgres::Error,
}

/// Largest chunk that keeps one statement under the bind-parameter limit.
pub fn effective_batch_size(batch_size: usize, column_count: usize) -> usize {
    let cap = MAX_BIND_PARAMETERS / column_count.max(1);
    batch_size.clamp(1, cap.max(1))
}

/// Build `INSERT INTO t (cols) VALUES ($1, ..), (..)` for `row_count` rows.
pub fn build_insert_sql(
    table: &str,
    columns: &[&str],
    row_count: usize,
    returning_id: bool,
) -> String {
    let col_count = columns.len();
    let mut placeholders: Vec<String> = Vec::with_capacity(row_count);
    let mut param_idx = 1;

    for _ in 0..row_count {
        let row_placeholders: Vec<String> = (0..col_count)
            .map(|_| {
                let p = format!("${param_idx}");
                param_idx += 1;
                p
            })
            .collect();
        placeholders.push(format!("({})", row_placeholders.join(", ")));
    }

    let mut sql = format!(
        "INSERT INTO {} ({}) VALUES {}",
        table,
        columns.join(", "),
        placeholders.join(", ")
    );
    if returning_id {
        sql.push_str(" RETURNING id");
    }
    sql
}

/// Insert `rows` in chunks and collect the generated ids in input order.
pub async fn insert_returning_ids<C, R>(
    client: &C,
    rows: &[R],
    batch_size: usize,
) -> Result<BatchOutcome, BatchFailure>
where
    C: GenericClient,
    R: InsertRow,
{
    load(client, rows, batch_size, true).await
}

/// Insert `rows` in chunks without reading anything back.
pub async fn insert_batches<C, R>(
    client: &C,
    rows: &[R],
    batch_size: usize,
) -> Result<BatchOutcome, BatchFailure>
where
    C: GenericClient,
    R: InsertRow,
{
    load(client, rows, batch_size, false).await
}

async fn load<C, R>(
    client: &C,
    rows: &[R],
    batch_size: usize,
    returning_id: bool,
) -> Result<BatchOutcome, BatchFailure>
where
    C: GenericClient,
    R: InsertRow,
{
    let mut outcome = BatchOutcome::default();
    if rows.is_empty() {
        return Ok(outcome);
    }

    let chunk_size = effective_batch_size(batch_size, R::COLUMNS.len());

    for chunk in rows.chunks(chunk_size) {
        let sql = build_insert_sql(R::TABLE, R::COLUMNS, chunk.len(), returning_id);

        let mut params: Vec<SqlParam> = Vec::with_capacity(chunk.len() * R::COLUMNS.len());
        for row in chunk {
            row.push_params(&mut params);
        }
        let param_refs: Vec<&(dyn ToSql + Sync)> = params
            .iter()
            .map(|p| p.as_ref() as &(dyn ToSql + Sync))
            .collect();

        let processed = outcome.rows;
        let failed = |source| BatchFailure {
            table: R::TABLE,
            processed,
            source,
        };

        if returning_id {
            let returned = client
                .query(sql.as_str(), &param_refs)
                .await
                .map_err(failed)?;
            outcome
                .ids
                .extend(returned.iter().map(|row| row.get::<_, i32>(0)));
        } else {
            client
                .execute(sql.as_str(), &param_refs)
                .await
                .map_err(failed)?;
        }

        outcome.rows += chunk.len() as u64;
        outcome.batches += 1;

        debug!(
            "{}: batch {} complete, {} rows so far",
            R::TABLE,
            outcome.batches,
            outcome.rows
        );
    }

    Ok(outcome)
}

fn date(value: NaiveDate) -> SqlParam {
    Box::new(value)
}

impl InsertRow for NewDepartment {
    const TABLE: &'static str = "departments";
    const COLUMNS: &'static [&'static str] = &["name", "location", "description"];

    fn push_params(&self, params: &mut Vec<SqlParam>) {
        params.push(Box::new(self.name.clone()));
        params.push(Box::new(self.location.clone()));
        params.push(Box::new(self.description.clone()));
    }
}

impl InsertRow for NewPosition {
    const TABLE: &'static str = "positions";
    const COLUMNS: &'static [&'static str] = &["name", "level", "description"];

    fn push_params(&self, params: &mut Vec<SqlParam>) {
        params.push(Box::new(self.name.clone()));
        params.push(Box::new(self.level));
        params.push(Box::new(self.description.clone()));
    }
}

impl InsertRow for NewEmployee {
    const TABLE: &'static str = "employees";
    const COLUMNS: &'static [&'static str] = &[
        "first_name",
        "last_name",
        "email",
        "phone",
        "hire_date",
        "department_id",
        "position_id",
        "manager_id",
        "status",
    ];

    fn push_params(&self, params: &mut Vec<SqlParam>) {
        params.push(Box::new(self.first_name.clone()));
        params.push(Box::new(self.last_name.clone()));
        params.push(Box::new(self.email.clone()));
        params.push(Box::new(self.phone.clone()));
        params.push(date(self.hire_date));
        params.push(Box::new(self.department_id));
        params.push(Box::new(self.position_id));
        params.push(Box::new(self.manager_id));
        params.push(Box::new(self.status.as_str()));
    }
}

impl InsertRow for NewSalary {
    const TABLE: &'static str = "salaries";
    const COLUMNS: &'static [&'static str] = &[
        "employee_id",
        "basic_salary",
        "bonus",
        "allowances",
        "effective_date",
    ];

    fn push_params(&self, params: &mut Vec<SqlParam>) {
        params.push(Box::new(self.employee_id));
        params.push(Box::new(self.basic_salary));
        params.push(Box::new(self.bonus));
        params.push(Box::new(self.allowances));
        params.push(date(self.effective_date));
    }
}

impl InsertRow for NewProject {
    const TABLE: &'static str = "projects";
    const COLUMNS: &'static [&'static str] = &[
        "name",
        "description",
        "start_date",
        "end_date",
        "status",
        "budget",
    ];

    fn push_params(&self, params: &mut Vec<SqlParam>) {
        params.push(Box::new(self.name.clone()));
        params.push(Box::new(self.description.clone()));
        params.push(date(self.start_date));
        params.push(date(self.end_date));
        params.push(Box::new(self.status.as_str()));
        params.push(Box::new(self.budget));
    }
}

impl InsertRow for NewEmployeeProject {
    const TABLE: &'static str = "employee_projects";
    const COLUMNS: &'static [&'static str] = &[
        "employee_id",
        "project_id",
        "role",
        "start_date",
        "end_date",
        "contribution_hours",
    ];

    fn push_params(&self, params: &mut Vec<SqlParam>) {
        params.push(Box::new(self.employee_id));
        params.push(Box::new(self.project_id));
        params.push(Box::new(self.role.clone()));
        params.push(date(self.start_date));
        params.push(Box::new(self.end_date));
        params.push(Box::new(self.contribution_hours));
    }
}

impl InsertRow for NewAttendance {
    const TABLE: &'static str = "attendance";
    const COLUMNS: &'static [&'static str] = &[
        "employee_id",
        "project_id",
        "date",
        "check_in",
        "check_out",
        "status",
        "overtime_hours",
    ];

    fn push_params(&self, params: &mut Vec<SqlParam>) {
        params.push(Box::new(self.employee_id));
        params.push(Box::new(self.project_id));
        params.push(date(self.date));
        params.push(Box::new(self.check_in));
        params.push(Box::new(self.check_out));
        params.push(Box::new(self.status.as_str()));
        params.push(Box::new(self.overtime_hours));
    }
}

impl InsertRow for NewTraining {
    const TABLE: &'static str = "trainings";
    const COLUMNS: &'static [&'static str] = &[
        "name",
        "description",
        "trainer",
        "start_date",
        "end_date",
        "location",
        "capacity",
        "status",
    ];

    fn push_params(&self, params: &mut Vec<SqlParam>) {
        params.push(Box::new(self.name.clone()));
        params.push(Box::new(self.description.clone()));
        params.push(Box::new(self.trainer.clone()));
        params.push(date(self.start_date));
        params.push(date(self.end_date));
        params.push(Box::new(self.location.clone()));
        params.push(Box::new(self.capacity));
        params.push(Box::new(self.status.as_str()));
    }
}

impl InsertRow for NewEmployeeTraining {
    const TABLE: &'static str = "employee_trainings";
    const COLUMNS: &'static [&'static str] = &[
        "employee_id",
        "training_id",
        "status",
        "score",
        "completion_date",
    ];

    fn push_params(&self, params: &mut Vec<SqlParam>) {
        params.push(Box::new(self.employee_id));
        params.push(Box::new(self.training_id));
        params.push(Box::new(self.status.as_str()));
        params.push(Box::new(self.score));
        params.push(Box::new(self.completion_date));
    }
}
