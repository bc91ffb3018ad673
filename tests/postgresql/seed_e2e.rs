use crate::common::{count, fresh_database, small_plan, today};
use staff_core::SeedPlan;
use staff_populate_postgresql::{Phase, SeedError, Seeder};

#[tokio::test]
#[ignore = "Requires a running PostgreSQL instance"]
async fn test_small_seed_run() {
    let (_guard, mut client) = fresh_database().await;

    let report = Seeder::new(small_plan(), today())
        .run(&mut client)
        .await
        .unwrap();

    assert_eq!(report.rows_for(Phase::Departments), 5);
    assert_eq!(report.rows_for(Phase::Managers), 5);
    assert_eq!(report.rows_for(Phase::Employees), 20);
    assert_eq!(report.rows_for(Phase::DepartmentManagers), 5);

    assert_eq!(count(&client, "SELECT COUNT(*) FROM departments").await, 5);
    let headless = "SELECT COUNT(*) FROM departments WHERE manager_id IS NULL";
    assert_eq!(count(&client, headless).await, 0);
    assert_eq!(count(&client, "SELECT COUNT(*) FROM employees").await, 25);
    assert!(count(&client, "SELECT COUNT(*) FROM salaries").await >= 20);
    let top_level = "SELECT COUNT(*) FROM employees WHERE manager_id IS NULL";
    assert_eq!(count(&client, top_level).await, 5);
    assert!(count(&client, "SELECT COUNT(*) FROM attendance").await > 0);
    let enrollments = count(&client, "SELECT COUNT(*) FROM employee_trainings").await;
    assert!(enrollments > 0);
}

#[tokio::test]
#[ignore = "Requires a running PostgreSQL instance"]
async fn test_same_seed_same_data() {
    let (_guard, mut client) = fresh_database().await;

    Seeder::new(small_plan(), today())
        .run(&mut client)
        .await
        .unwrap();
    let first: Vec<String> = client
        .query("SELECT email FROM employees ORDER BY id", &[])
        .await
        .unwrap()
        .iter()
        .map(|r| r.get(0))
        .collect();

    staff_populate_postgresql::initialize_schema(&mut client)
        .await
        .unwrap();
    Seeder::new(small_plan(), today())
        .run(&mut client)
        .await
        .unwrap();
    let second: Vec<String> = client
        .query("SELECT email FROM employees ORDER BY id", &[])
        .await
        .unwrap()
        .iter()
        .map(|r| r.get(0))
        .collect();

    assert_eq!(first.len(), 25);
    assert_eq!(first, second);
}

#[tokio::test]
#[ignore = "Requires a running PostgreSQL instance"]
async fn test_backfill_reaches_row_floor() {
    let (_guard, mut client) = fresh_database().await;

    let plan = SeedPlan {
        attendance_days: 5,
        row_floor: 3_000,
        backfill: true,
        ..small_plan()
    };
    let report = Seeder::new(plan, today()).run(&mut client).await.unwrap();

    assert!(report.backfill_days > 0);
    assert!(report.total_rows() >= 3_000, "got {}", report.total_rows());

    let earliest: chrono::NaiveDate = client
        .query_one("SELECT MIN(date) FROM attendance", &[])
        .await
        .unwrap()
        .get(0);
    assert!(earliest < today() - chrono::Duration::days(5));
}

#[tokio::test]
#[ignore = "Requires a running PostgreSQL instance"]
async fn test_failed_run_rolls_back_everything() {
    let (_guard, mut client) = fresh_database().await;

    Seeder::new(small_plan(), today())
        .run(&mut client)
        .await
        .unwrap();
    let employees_before = count(&client, "SELECT COUNT(*) FROM employees").await;

    // Department names are unique, so a second run fails in its first phase
    let result = Seeder::new(small_plan(), today()).run(&mut client).await;
    match result {
        Err(SeedError::PhaseFailed { phase, .. }) => assert_eq!(phase, Phase::Departments),
        other => panic!("expected phase failure, got {other:?}"),
    }

    assert_eq!(count(&client, "SELECT COUNT(*) FROM departments").await, 5);
    assert_eq!(
        count(&client, "SELECT COUNT(*) FROM employees").await,
        employees_before
    );
}
