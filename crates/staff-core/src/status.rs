//! Categorical status columns.
//!
//! Every status is stored as lowercase snake_case text guarded by a `CHECK`
//! constraint, so each enum exposes its textual form and the full list of
//! allowed values for DDL generation.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Error returned when parsing an unknown status label.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown {kind} status: '{value}'")]
pub struct StatusParseError {
    pub kind: &'static str,
    pub value: String,
}

macro_rules! status_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $($(#[$vmeta:meta])* $variant:ident => $label:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($(#[$vmeta])* $variant),+
        }

        impl $name {
            /// Every value, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Textual form stored in the database.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }

            /// Allowed labels, for `CHECK (... IN (...))` clauses.
            pub fn labels() -> Vec<&'static str> {
                Self::ALL.iter().map(|s| s.as_str()).collect()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = StatusParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($label => Ok($name::$variant),)+
                    other => Err(StatusParseError {
                        kind: $kind,
                        value: other.to_string(),
                    }),
                }
            }
        }
    };
}

status_enum! {
    /// Employment status of an employee.
    EmployeeStatus, "employee" {
        Active => "active",
        Resigned => "resigned",
        OnLeave => "on_leave",
        Inactive => "inactive",
    }
}

status_enum! {
    /// Outcome of one attendance day.
    AttendanceStatus, "attendance" {
        Present => "present",
        Absent => "absent",
        Late => "late",
        EarlyLeave => "early_leave",
        SickLeave => "sick_leave",
        AnnualLeave => "annual_leave",
    }
}

status_enum! {
    /// Lifecycle of a project.
    ProjectStatus, "project" {
        Planning => "planning",
        Active => "active",
        Paused => "paused",
        Completed => "completed",
    }
}

status_enum! {
    /// Lifecycle of a training session.
    TrainingStatus, "training" {
        Planned => "planned",
        Ongoing => "ongoing",
        Completed => "completed",
    }
}

status_enum! {
    /// Progress of one employee through one training.
    EnrollmentStatus, "enrollment" {
        Enrolled => "enrolled",
        InProgress => "in_progress",
        Completed => "completed",
        Dropped => "dropped",
    }
}

impl AttendanceStatus {
    /// Only days the employee actually worked carry check-in/check-out times.
    pub fn has_clock_times(&self) -> bool {
        matches!(self, AttendanceStatus::Present | AttendanceStatus::Late)
    }
}

impl ProjectStatus {
    /// Planning, active and paused projects still staff people.
    pub fn is_ongoing(&self) -> bool {
        !matches!(self, ProjectStatus::Completed)
    }

    /// Whether an employee with the given status may be assigned to a
    /// project in this state.
    pub fn accepts(&self, employee: EmployeeStatus) -> bool {
        if self.is_ongoing() {
            employee == EmployeeStatus::Active
        } else {
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_labels() {
        for status in EmployeeStatus::ALL {
            assert_eq!(status.as_str().parse::<EmployeeStatus>().unwrap(), *status);
        }
        assert_eq!(
            "early_leave".parse::<AttendanceStatus>().unwrap(),
            AttendanceStatus::EarlyLeave
        );
    }

    #[test]
    fn test_unknown_label() {
        let err = "fired".parse::<EmployeeStatus>().unwrap_err();
        assert_eq!(err.kind, "employee");
        assert_eq!(err.to_string(), "Unknown employee status: 'fired'");
    }

    #[test]
    fn test_clock_times() {
        let with_times: Vec<_> = AttendanceStatus::ALL
            .iter()
            .filter(|s| s.has_clock_times())
            .collect();
        assert_eq!(
            with_times,
            vec![&AttendanceStatus::Present, &AttendanceStatus::Late]
        );
    }

    #[test]
    fn test_project_accepts() {
        for status in [
            ProjectStatus::Planning,
            ProjectStatus::Active,
            ProjectStatus::Paused,
        ] {
            assert!(status.accepts(EmployeeStatus::Active));
            assert!(!status.accepts(EmployeeStatus::Resigned));
            assert!(!status.accepts(EmployeeStatus::OnLeave));
        }
        for employee in EmployeeStatus::ALL {
            assert!(ProjectStatus::Completed.accepts(*employee));
        }
    }

    #[test]
    fn test_serde_snake_case() {
        let yaml = serde_yaml::to_string(&EmployeeStatus::OnLeave).unwrap();
        assert_eq!(yaml.trim(), "on_leave");
    }
}
