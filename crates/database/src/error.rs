use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("Failed to load configuration for database connection: {0}")]
    ConnectionConfigError(String),

    #[error("Database query failed: {0}")]
    Query(#[from] sqlx::Error),

    #[error("Database migration failed: {0}")]
    MigrationError(#[from] sqlx::migrate::MigrateError),

    #[error("The requested data was not found in the database.")]
    NotFound,

    #[error("Unique constraint violated: {0}")]
    UniqueViolation(String),

    #[error("Foreign key constraint violated: {0}")]
    ForeignKeyViolation(String),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

impl DbError {
    /// Maps the constraint failures a write can hit onto their own variants.
    pub(crate) fn from_write(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                DbError::UniqueViolation(db.message().to_string())
            }
            sqlx::Error::Database(db) if db.is_foreign_key_violation() => {
                DbError::ForeignKeyViolation(db.message().to_string())
            }
            _ => DbError::Query(err),
        }
    }

    /// Maps `RowNotFound` onto `NotFound`.
    pub(crate) fn from_read(err: sqlx::Error) -> Self {
        if let sqlx::Error::RowNotFound = err {
            DbError::NotFound
        } else {
            DbError::Query(err)
        }
    }
}
