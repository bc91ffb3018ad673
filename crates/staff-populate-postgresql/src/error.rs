//! Error types for the PostgreSQL seeder.

use crate::insert::BatchFailure;
use crate::metrics::Phase;
use thiserror::Error;

/// Errors that can occur while initializing, seeding or verifying.
#[derive(Error, Debug)]
pub enum SeedError {
    /// PostgreSQL query error outside a tracked phase.
    #[error("PostgreSQL error: {0}")]
    PostgreSQL(#[from] tokio_postgres::Error),

    /// Connection error.
    #[error("Connection error: {0}")]
    Connection(String),

    /// A schema statement failed; the whole change was rolled back.
    #[error("Schema step '{step}' failed")]
    SchemaFailed {
        step: String,
        #[source]
        source: tokio_postgres::Error,
    },

    /// A seed phase failed; the whole run was rolled back.
    #[error("Phase '{phase}' failed after {processed} rows")]
    PhaseFailed {
        phase: Phase,
        processed: u64,
        #[source]
        source: tokio_postgres::Error,
    },
}

impl SeedError {
    /// Attach the phase and the rows it had already written.
    pub fn phase(phase: Phase, processed: u64, failure: BatchFailure) -> Self {
        SeedError::PhaseFailed {
            phase,
            processed: processed + failure.processed,
            source: failure.source,
        }
    }
}
