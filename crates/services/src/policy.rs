/// Listing operations never fail outward. When the store cannot produce the
/// list, the failure is logged and callers receive an empty sequence.
pub const LIST_FAILURES_ARE_EMPTY: bool = true;

/// Applies [`LIST_FAILURES_ARE_EMPTY`] to the outcome of a `read_all`.
pub(crate) fn list_or_empty<T>(
    entity: &'static str,
    result: Result<Vec<T>, database::DbError>,
) -> Result<Vec<T>, crate::ServiceError> {
    match result {
        Ok(items) => Ok(items),
        Err(e) if LIST_FAILURES_ARE_EMPTY => {
            tracing::warn!(error = %e, entity, "Listing failed; returning an empty list.");
            Ok(Vec::new())
        }
        Err(e) => Err(crate::ServiceError::conflict(
            format!("{entity}s could not be listed"),
            e,
        )),
    }
}
