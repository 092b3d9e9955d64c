use database::DbError;
use thiserror::Error;

/// The domain-level failure kinds every service reports.
///
/// The storage cause is dropped for `NotFound` and `DuplicateKey`, whose
/// meaning is fully captured by the kind, and kept on `Conflict`.
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    DuplicateKey(String),

    #[error("{message}")]
    Conflict {
        message: String,
        #[source]
        source: Option<DbError>,
    },
}

impl ServiceError {
    pub(crate) fn conflict(message: impl Into<String>, source: DbError) -> Self {
        ServiceError::Conflict {
            message: message.into(),
            source: Some(source),
        }
    }

    /// Rewraps a failed read. Any read failure is reported as not found; the
    /// cause is logged unless the row was simply missing.
    pub(crate) fn from_read(entity: &'static str, err: DbError) -> Self {
        if !matches!(err, DbError::NotFound) {
            tracing::error!(error = %err, entity, "Read failed.");
        }
        ServiceError::NotFound(format!("{entity} not found"))
    }

    /// Rewraps a failed create, update or delete.
    pub(crate) fn from_write(
        entity: &'static str,
        key: &'static str,
        action: &'static str,
        err: DbError,
    ) -> Self {
        match err {
            DbError::NotFound => ServiceError::NotFound(format!("{entity} not found")),
            DbError::UniqueViolation(_) => {
                ServiceError::DuplicateKey(format!("that {key} already exists"))
            }
            other => {
                tracing::error!(error = %other, entity, action, "Write failed.");
                ServiceError::conflict(format!("error {action} {entity}"), other)
            }
        }
    }
}
