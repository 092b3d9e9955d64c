//! PostgreSQL implementation of the storage adapters.

mod appointment;
mod dentist;
mod patient;

use sqlx::PgPool;

/// Encapsulates all SQL for the clinic tables. One value implements every
/// store trait and is cheap to clone.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Creates a new `PgStore` with a shared database connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Fails with `NotFound` when a write touched no rows.
fn expect_affected(result: sqlx::postgres::PgQueryResult) -> Result<(), crate::DbError> {
    if result.rows_affected() == 0 {
        Err(crate::DbError::NotFound)
    } else {
        Ok(())
    }
}
