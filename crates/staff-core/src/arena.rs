//! Identifiers produced by one seed run.
//!
//! Each phase returns the ids it created; the seeder stores them here and
//! hands slices of them to later phases as foreign-key sources. The arena
//! lives for exactly one run and is never shared.

use crate::status::{EmployeeStatus, ProjectStatus, TrainingStatus};
use chrono::NaiveDate;

/// An employee row that now exists in the database.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeededEmployee {
    pub id: i32,
    pub status: EmployeeStatus,
    pub hire_date: NaiveDate,
    pub manager_id: Option<i32>,
}

/// A project row that now exists in the database.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeededProject {
    pub id: i32,
    pub status: ProjectStatus,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// A training row that now exists in the database.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeededTraining {
    pub id: i32,
    pub status: TrainingStatus,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Position ids split by the role they are handed out for.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PositionPartition {
    pub manager_eligible: Vec<i32>,
    pub staff: Vec<i32>,
}

impl PositionPartition {
    /// The first `manager_slots` positions are reserved for managers.
    ///
    /// When either side would be empty it falls back to the full list so
    /// that every employee can still be given a position.
    pub fn split(position_ids: &[i32], manager_slots: usize) -> Self {
        let cut = manager_slots.min(position_ids.len());
        let (head, tail) = position_ids.split_at(cut);

        let manager_eligible = if head.is_empty() {
            position_ids.to_vec()
        } else {
            head.to_vec()
        };
        let staff = if tail.is_empty() {
            position_ids.to_vec()
        } else {
            tail.to_vec()
        };

        Self {
            manager_eligible,
            staff,
        }
    }
}

/// All ids generated so far in a run.
#[derive(Debug, Clone, Default)]
pub struct SeedArena {
    pub departments: Vec<i32>,
    pub positions: PositionPartition,
    pub managers: Vec<SeededEmployee>,
    pub staff: Vec<SeededEmployee>,
    pub projects: Vec<SeededProject>,
    pub project_links: Vec<(i32, i32)>,
    pub trainings: Vec<SeededTraining>,
    pub training_links: Vec<(i32, i32)>,
}

impl SeedArena {
    /// Managers first, then staff, in insertion order.
    pub fn employees(&self) -> impl Iterator<Item = &SeededEmployee> {
        self.managers.iter().chain(self.staff.iter())
    }

    pub fn employee_count(&self) -> usize {
        self.managers.len() + self.staff.len()
    }

    pub fn manager_ids(&self) -> Vec<i32> {
        self.managers.iter().map(|m| m.id).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partition_split() {
        let ids = [1, 2, 3, 4, 5, 6];
        let partition = PositionPartition::split(&ids, 2);
        assert_eq!(partition.manager_eligible, vec![1, 2]);
        assert_eq!(partition.staff, vec![3, 4, 5, 6]);
    }

    #[test]
    fn test_partition_falls_back_when_one_side_empty() {
        let ids = [7, 8];
        let all_managers = PositionPartition::split(&ids, 5);
        assert_eq!(all_managers.manager_eligible, vec![7, 8]);
        assert_eq!(all_managers.staff, vec![7, 8]);

        let no_managers = PositionPartition::split(&ids, 0);
        assert_eq!(no_managers.manager_eligible, vec![7, 8]);
        assert_eq!(no_managers.staff, vec![7, 8]);
    }

    #[test]
    fn test_employees_order() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let make = |id| SeededEmployee {
            id,
            status: EmployeeStatus::Active,
            hire_date: date,
            manager_id: None,
        };
        let arena = SeedArena {
            managers: vec![make(1), make(2)],
            staff: vec![make(3)],
            ..Default::default()
        };
        let ids: Vec<i32> = arena.employees().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(arena.employee_count(), 3);
        assert_eq!(arena.manager_ids(), vec![1, 2]);
    }
}
