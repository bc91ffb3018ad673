use crate::common::{fresh_database, small_plan, today};
use staff_populate_postgresql::{verify_seed, Seeder};

#[tokio::test]
#[ignore = "Requires a running PostgreSQL instance"]
async fn test_seeded_database_passes_every_check() {
    let (_guard, mut client) = fresh_database().await;
    Seeder::new(small_plan(), today())
        .run(&mut client)
        .await
        .unwrap();

    let report = verify_seed(&client).await.unwrap();
    let failed: Vec<_> = report.failures().collect();
    assert!(failed.is_empty(), "failed checks: {failed:?}");
    assert_eq!(report.row_count("employees"), Some(25));
    assert_eq!(report.row_count("salaries"), Some(25));
}

#[tokio::test]
#[ignore = "Requires a running PostgreSQL instance"]
async fn test_verify_reports_department_without_manager() {
    let (_guard, mut client) = fresh_database().await;
    Seeder::new(small_plan(), today())
        .run(&mut client)
        .await
        .unwrap();

    client
        .execute(
            "UPDATE departments SET manager_id = NULL WHERE id = (SELECT MIN(id) FROM departments)",
            &[],
        )
        .await
        .unwrap();

    let report = verify_seed(&client).await.unwrap();
    assert!(!report.is_clean());
    let check = report
        .checks
        .iter()
        .find(|c| c.name == "department_without_manager")
        .unwrap();
    assert_eq!(check.violations, 1);
}

#[tokio::test]
#[ignore = "Requires a running PostgreSQL instance"]
async fn test_verify_reports_inverted_attendance_times() {
    let (_guard, mut client) = fresh_database().await;
    Seeder::new(small_plan(), today())
        .run(&mut client)
        .await
        .unwrap();

    // Bypass the table constraint to plant one bad row
    client
        .batch_execute(
            "ALTER TABLE attendance DROP CONSTRAINT attendance_times_check; \
             INSERT INTO attendance (employee_id, date, check_in, check_out, status) \
             SELECT MIN(id), DATE '2025-06-02', TIME '17:00', TIME '09:00', 'present' FROM employees",
        )
        .await
        .unwrap();

    let report = verify_seed(&client).await.unwrap();
    let check = report
        .checks
        .iter()
        .find(|c| c.name == "attendance_missing_times")
        .unwrap();
    assert_eq!(check.violations, 1);
}
