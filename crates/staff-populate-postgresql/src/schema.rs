//! Schema initializer: drops and recreates every table, constraint and
//! index in dependency order inside one transaction.
//!
//! `departments.manager_id` and every foreign key are added only after all
//! tables exist, which resolves the departments/employees cycle.

use crate::error::SeedError;
use staff_core::{
    AttendanceStatus, EmployeeStatus, EnrollmentStatus, ProjectStatus, TrainingStatus,
};
use std::time::Instant;
use tokio_postgres::{Client, GenericClient};
use tracing::{debug, error, info};

/// Tables in dependency order.
pub const TABLES: &[&str] = &[
    "departments",
    "positions",
    "employees",
    "salaries",
    "projects",
    "employee_projects",
    "attendance",
    "trainings",
    "employee_trainings",
];

/// A named foreign key: (constraint, table, column, referenced table, on delete).
pub const FOREIGN_KEYS: &[(&str, &str, &str, &str, &str)] = &[
    (
        "departments_manager_id_fkey",
        "departments",
        "manager_id",
        "employees",
        "SET NULL",
    ),
    (
        "employees_department_id_fkey",
        "employees",
        "department_id",
        "departments",
        "SET NULL",
    ),
    (
        "employees_position_id_fkey",
        "employees",
        "position_id",
        "positions",
        "SET NULL",
    ),
    (
        "employees_manager_id_fkey",
        "employees",
        "manager_id",
        "employees",
        "SET NULL",
    ),
    (
        "salaries_employee_id_fkey",
        "salaries",
        "employee_id",
        "employees",
        "CASCADE",
    ),
    (
        "employee_projects_employee_id_fkey",
        "employee_projects",
        "employee_id",
        "employees",
        "CASCADE",
    ),
    (
        "employee_projects_project_id_fkey",
        "employee_projects",
        "project_id",
        "projects",
        "CASCADE",
    ),
    (
        "attendance_employee_id_fkey",
        "attendance",
        "employee_id",
        "employees",
        "CASCADE",
    ),
    (
        "attendance_project_id_fkey",
        "attendance",
        "project_id",
        "projects",
        "SET NULL",
    ),
    (
        "employee_trainings_employee_id_fkey",
        "employee_trainings",
        "employee_id",
        "employees",
        "CASCADE",
    ),
    (
        "employee_trainings_training_id_fkey",
        "employee_trainings",
        "training_id",
        "trainings",
        "CASCADE",
    ),
];

/// (index, table, columns)
pub const INDEXES: &[(&str, &str, &str)] = &[
    ("idx_employees_department_id", "employees", "department_id"),
    ("idx_employees_position_id", "employees", "position_id"),
    ("idx_employees_manager_id", "employees", "manager_id"),
    ("idx_employees_status", "employees", "status"),
    ("idx_projects_status", "projects", "status"),
    (
        "idx_employee_projects_project_id",
        "employee_projects",
        "project_id",
    ),
    (
        "idx_attendance_employee_date",
        "attendance",
        "employee_id, date",
    ),
    ("idx_attendance_project_id", "attendance", "project_id"),
    ("idx_attendance_date", "attendance", "date"),
    ("idx_trainings_status", "trainings", "status"),
    (
        "idx_employee_trainings_training_id",
        "employee_trainings",
        "training_id",
    ),
];

/// Stage of the initializer a statement belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SchemaStep {
    DropForeignKeys,
    DropTables,
    CreateTables,
    AddForeignKeys,
    CreateIndexes,
}

/// One DDL statement with a label for logs and errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaStatement {
    pub step: SchemaStep,
    pub label: String,
    pub sql: String,
}

impl SchemaStatement {
    fn new(step: SchemaStep, label: impl Into<String>, sql: impl Into<String>) -> Self {
        Self {
            step,
            label: label.into(),
            sql: sql.into(),
        }
    }
}

fn status_check(table: &str, labels: &[&str]) -> String {
    let allowed = labels
        .iter()
        .map(|l| format!("'{l}'"))
        .collect::<Vec<_>>()
        .join(", ");
    format!("CONSTRAINT {table}_status_check CHECK (status IN ({allowed}))")
}

fn create_table_sql(table: &str) -> String {
    let body = match table {
        "departments" => "name VARCHAR(100) NOT NULL UNIQUE,
    location VARCHAR(100),
    description TEXT"
            .to_string(),
        "positions" => "name VARCHAR(100) NOT NULL UNIQUE,
    level INTEGER NOT NULL CHECK (level > 0),
    description TEXT"
            .to_string(),
        "employees" => format!(
            "first_name VARCHAR(50) NOT NULL,
    last_name VARCHAR(50) NOT NULL,
    email VARCHAR(255) NOT NULL UNIQUE,
    phone VARCHAR(20),
    hire_date DATE NOT NULL,
    department_id INTEGER,
    position_id INTEGER,
    manager_id INTEGER,
    status VARCHAR(20) NOT NULL DEFAULT 'active',
    {}",
            status_check(table, &EmployeeStatus::labels())
        ),
        "salaries" => "employee_id INTEGER NOT NULL UNIQUE,
    basic_salary NUMERIC(12,2) NOT NULL,
    bonus NUMERIC(12,2) NOT NULL DEFAULT 0,
    allowances NUMERIC(12,2) NOT NULL DEFAULT 0,
    effective_date DATE NOT NULL"
            .to_string(),
        "projects" => format!(
            "name VARCHAR(200) NOT NULL,
    description TEXT,
    start_date DATE NOT NULL,
    end_date DATE,
    status VARCHAR(20) NOT NULL DEFAULT 'planning',
    budget NUMERIC(14,2),
    {},
    CONSTRAINT projects_dates_check CHECK (end_date IS NULL OR end_date > start_date)",
            status_check(table, &ProjectStatus::labels())
        ),
        "employee_projects" => "employee_id INTEGER NOT NULL,
    project_id INTEGER NOT NULL,
    role VARCHAR(100),
    start_date DATE NOT NULL,
    end_date DATE,
    contribution_hours NUMERIC(7,1) NOT NULL DEFAULT 0,
    CONSTRAINT employee_projects_pair_key UNIQUE (employee_id, project_id)"
            .to_string(),
        "attendance" => format!(
            "employee_id INTEGER NOT NULL,
    project_id INTEGER,
    date DATE NOT NULL,
    check_in TIME,
    check_out TIME,
    status VARCHAR(20) NOT NULL DEFAULT 'present',
    overtime_hours NUMERIC(4,2) NOT NULL DEFAULT 0,
    {},
    CONSTRAINT attendance_times_check CHECK (check_in IS NULL OR check_out IS NULL OR check_out > check_in)",
            status_check(table, &AttendanceStatus::labels())
        ),
        "trainings" => format!(
            "name VARCHAR(200) NOT NULL,
    description TEXT,
    trainer VARCHAR(100),
    start_date DATE NOT NULL,
    end_date DATE NOT NULL,
    location VARCHAR(200),
    capacity INTEGER NOT NULL CHECK (capacity > 0),
    status VARCHAR(20) NOT NULL DEFAULT 'planned',
    {}",
            status_check(table, &TrainingStatus::labels())
        ),
        "employee_trainings" => format!(
            "employee_id INTEGER NOT NULL,
    training_id INTEGER NOT NULL,
    status VARCHAR(20) NOT NULL DEFAULT 'enrolled',
    score NUMERIC(5,2),
    completion_date DATE,
    {},
    CONSTRAINT employee_trainings_pair_key UNIQUE (employee_id, training_id)",
            status_check(table, &EnrollmentStatus::labels())
        ),
        other => unreachable!("no definition for table {other}"),
    };

    format!(
        "CREATE TABLE {table} (
    id SERIAL PRIMARY KEY,
    {body},
    created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
)"
    )
}

/// Every statement the initializer runs, in execution order.
pub fn schema_statements() -> Vec<SchemaStatement> {
    let mut statements = Vec::new();

    for (name, table, ..) in FOREIGN_KEYS {
        statements.push(SchemaStatement::new(
            SchemaStep::DropForeignKeys,
            format!("drop constraint {name}"),
            format!("ALTER TABLE IF EXISTS {table} DROP CONSTRAINT IF EXISTS {name}"),
        ));
    }

    for table in TABLES.iter().rev() {
        statements.push(SchemaStatement::new(
            SchemaStep::DropTables,
            format!("drop table {table}"),
            format!("DROP TABLE IF EXISTS {table} CASCADE"),
        ));
    }

    for table in TABLES {
        statements.push(SchemaStatement::new(
            SchemaStep::CreateTables,
            format!("create table {table}"),
            create_table_sql(table),
        ));
    }

    statements.push(SchemaStatement::new(
        SchemaStep::AddForeignKeys,
        "add column departments.manager_id",
        "ALTER TABLE departments ADD COLUMN manager_id INTEGER",
    ));
    for (name, table, column, referenced, on_delete) in FOREIGN_KEYS {
        statements.push(SchemaStatement::new(
            SchemaStep::AddForeignKeys,
            format!("add constraint {name}"),
            format!(
                "ALTER TABLE {table} ADD CONSTRAINT {name} FOREIGN KEY ({column}) \
                 REFERENCES {referenced}(id) ON DELETE {on_delete}"
            ),
        ));
    }

    for (name, table, columns) in INDEXES {
        statements.push(SchemaStatement::new(
            SchemaStep::CreateIndexes,
            format!("create index {name}"),
            format!("CREATE INDEX {name} ON {table} ({columns})"),
        ));
    }

    statements
}

/// Drop and recreate the whole schema in one transaction.
///
/// Returns the number of statements executed. Any failure rolls back every
/// statement, including the drops.
pub async fn initialize_schema(client: &mut Client) -> Result<usize, SeedError> {
    let start_time = Instant::now();
    let statements = schema_statements();

    info!("Initializing schema ({} statements)", statements.len());
    let tx = client.transaction().await?;

    for statement in &statements {
        debug!("Schema: {}", statement.label);
        if let Err(source) = tx.batch_execute(&statement.sql).await {
            error!(
                step = %statement.label,
                error = %source,
                "Schema initialization failed, rolling back"
            );
            if let Err(rollback_error) = tx.rollback().await {
                error!("Rollback failed: {}", rollback_error);
            }
            return Err(SeedError::SchemaFailed {
                step: statement.label.clone(),
                source,
            });
        }
    }

    tx.commit().await?;

    info!(
        target: "performance",
        statements = statements.len(),
        duration_ms = start_time.elapsed().as_millis() as u64,
        "Schema initialized"
    );

    Ok(statements.len())
}

/// Sorted catalog names describing the current schema.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaSnapshot {
    pub tables: Vec<String>,
    /// `table.column type`
    pub columns: Vec<String>,
    /// `table.constraint`
    pub constraints: Vec<String>,
    /// `table.index`
    pub indexes: Vec<String>,
}

impl SchemaSnapshot {
    pub fn has_table(&self, table: &str) -> bool {
        self.tables.iter().any(|t| t == table)
    }

    pub fn has_constraint(&self, table: &str, constraint: &str) -> bool {
        let wanted = format!("{table}.{constraint}");
        self.constraints.iter().any(|c| *c == wanted)
    }
}

async fn names<C: GenericClient>(
    client: &C,
    sql: &str,
) -> Result<Vec<String>, tokio_postgres::Error> {
    let rows = client.query(sql, &[]).await?;
    Ok(rows.iter().map(|row| row.get::<_, String>(0)).collect())
}

/// Read table, column, constraint and index names of the `public` schema.
pub async fn schema_snapshot<C: GenericClient>(
    client: &C,
) -> Result<SchemaSnapshot, tokio_postgres::Error> {
    let tables = names(
        client,
        "SELECT table_name::text FROM information_schema.tables \
         WHERE table_schema = 'public' AND table_type = 'BASE TABLE' ORDER BY 1",
    )
    .await?;
    let columns = names(
        client,
        "SELECT table_name || '.' || column_name || ' ' || data_type \
         FROM information_schema.columns WHERE table_schema = 'public' ORDER BY 1",
    )
    .await?;
    let constraints = names(
        client,
        "SELECT c.conrelid::regclass::text || '.' || c.conname::text \
         FROM pg_constraint c JOIN pg_namespace n ON n.oid = c.connamespace \
         WHERE n.nspname = 'public' AND c.conrelid <> 0 ORDER BY 1",
    )
    .await?;
    let indexes = names(
        client,
        "SELECT tablename::text || '.' || indexname::text FROM pg_indexes \
         WHERE schemaname = 'public' ORDER BY 1",
    )
    .await?;

    Ok(SchemaSnapshot {
        tables,
        columns,
        constraints,
        indexes,
    })
}
