use crate::common::{count, fresh_database};
use staff_populate_postgresql::schema::{FOREIGN_KEYS, INDEXES, TABLES};
use staff_populate_postgresql::{initialize_schema, schema_snapshot};

#[tokio::test]
#[ignore = "Requires a running PostgreSQL instance"]
async fn test_initialize_schema_twice_yields_same_structure() {
    let (_guard, mut client) = fresh_database().await;

    let first = schema_snapshot(&client).await.unwrap();
    initialize_schema(&mut client).await.unwrap();
    let second = schema_snapshot(&client).await.unwrap();

    assert_eq!(first, second);
    for table in TABLES {
        assert!(second.has_table(table), "missing table {table}");
    }
    for (name, table, ..) in FOREIGN_KEYS {
        assert!(
            second.has_constraint(table, name),
            "missing constraint {name}"
        );
    }
    for (name, table, _) in INDEXES {
        let wanted = format!("{table}.{name}");
        assert!(second.indexes.contains(&wanted), "missing index {name}");
    }
}

#[tokio::test]
#[ignore = "Requires a running PostgreSQL instance"]
async fn test_initialize_schema_discards_existing_rows() {
    let (_guard, mut client) = fresh_database().await;

    client
        .execute(
            "INSERT INTO departments (name, location, description) VALUES ('Temp', 'Nowhere', '')",
            &[],
        )
        .await
        .unwrap();
    assert_eq!(count(&client, "SELECT COUNT(*) FROM departments").await, 1);

    initialize_schema(&mut client).await.unwrap();
    assert_eq!(count(&client, "SELECT COUNT(*) FROM departments").await, 0);
}

#[tokio::test]
#[ignore = "Requires a running PostgreSQL instance"]
async fn test_status_check_rejects_unknown_value() {
    let (_guard, client) = fresh_database().await;

    let result = client
        .execute(
            "INSERT INTO employees (first_name, last_name, email, hire_date, status) \
             VALUES ('伟', '王', 'x@company.com', DATE '2024-01-01', 'retired')",
            &[],
        )
        .await;
    assert!(result.is_err());
}
