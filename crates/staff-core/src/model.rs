//! Row types prepared by the seed phases before insertion.
//!
//! Each `New*` struct mirrors one table's insertable columns in column order.
//! Identity columns are assigned by the database and come back through
//! `RETURNING id`.

use crate::status::{
    AttendanceStatus, EmployeeStatus, EnrollmentStatus, ProjectStatus, TrainingStatus,
};
use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;

#[derive(Debug, Clone, PartialEq)]
pub struct NewDepartment {
    pub name: String,
    pub location: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewPosition {
    pub name: String,
    /// 1 is the most senior level.
    pub level: i32,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewEmployee {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub hire_date: NaiveDate,
    pub department_id: Option<i32>,
    pub position_id: Option<i32>,
    pub manager_id: Option<i32>,
    pub status: EmployeeStatus,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewSalary {
    pub employee_id: i32,
    pub basic_salary: Decimal,
    pub bonus: Decimal,
    pub allowances: Decimal,
    pub effective_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewProject {
    pub name: String,
    pub description: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: ProjectStatus,
    pub budget: Decimal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewEmployeeProject {
    pub employee_id: i32,
    pub project_id: i32,
    pub role: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub contribution_hours: Decimal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewAttendance {
    pub employee_id: i32,
    pub project_id: Option<i32>,
    pub date: NaiveDate,
    pub check_in: Option<NaiveTime>,
    pub check_out: Option<NaiveTime>,
    pub status: AttendanceStatus,
    pub overtime_hours: Decimal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewTraining {
    pub name: String,
    pub description: String,
    pub trainer: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub location: String,
    pub capacity: i32,
    pub status: TrainingStatus,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewEmployeeTraining {
    pub employee_id: i32,
    pub training_id: i32,
    pub status: EnrollmentStatus,
    pub score: Option<Decimal>,
    pub completion_date: Option<NaiveDate>,
}
