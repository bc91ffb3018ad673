//! Connection setup.

use crate::error::SeedError;
use std::time::Duration;
use tokio_postgres::{Client, NoTls};
use tracing::{debug, error};

/// Give up on an unreachable server after this long.
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

/// Connect, spawn the connection task and check the session with `SELECT 1`.
pub async fn connect(connection_string: &str) -> Result<Client, SeedError> {
    let connecting = tokio_postgres::connect(connection_string, NoTls);
    let (client, connection) = tokio::time::timeout(CONNECT_TIMEOUT, connecting)
        .await
        .map_err(|_| {
            SeedError::Connection(format!("timed out after {}s", CONNECT_TIMEOUT.as_secs()))
        })?
        .map_err(|e| SeedError::Connection(e.to_string()))?;

    // Spawn the connection task
    tokio::spawn(async move {
        if let Err(e) = connection.await {
            error!("PostgreSQL connection error: {}", e);
        }
    });

    client
        .simple_query("SELECT 1")
        .await
        .map_err(|e| SeedError::Connection(e.to_string()))?;
    debug!("PostgreSQL connection established");

    Ok(client)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unreachable_server_is_connection_error() {
        let result = tokio_test::block_on(connect(
            "host=127.0.0.1 port=1 user=postgres dbname=employee_management connect_timeout=2",
        ));
        assert!(matches!(result, Err(SeedError::Connection(_))));
    }
}
