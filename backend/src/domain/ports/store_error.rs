//! Errors shared by the record store ports.
//!
//! Student, faculty, course, and roster repositories are views over one
//! logical store, so they share one error vocabulary. Services translate
//! these into domain errors; mapping to HTTP happens further out.

use serde_json::json;
use tracing::error;

use crate::domain::Error;

use super::define_port_error;

define_port_error! {
    /// Failures raised by record store adapters.
    pub enum StoreError {
        /// The store could not be reached.
        Connection { message: String } => "record store connection failed: {message}",
        /// A read or write failed during execution.
        Query { message: String } => "record store query failed: {message}",
        /// A write carried a stale revision; nothing was applied.
        RevisionMismatch { entity: String, id: u64, expected: u64, actual: u64 } =>
            "{entity} {id} revision mismatch: expected {expected}, found {actual}",
        /// A write targeted a record that does not exist.
        Missing { entity: String, id: u64 } => "{entity} {id} does not exist",
        /// A unique field already belongs to another record.
        Duplicate { entity: String, field: String } => "{entity} {field} already in use",
    }
}

impl StoreError {
    /// Whether a fresh read may resolve the failure: the record changed or
    /// vanished after it was read.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::RevisionMismatch { .. } | Self::Missing { .. })
    }
}

/// Translate a store failure that a service has no specific rule for.
///
/// Connection failures become `ServiceUnavailable`; everything else is an
/// internal persistence error, never a `Conflict`, so callers can tell a
/// rejected rule from a failed write.
pub fn persistence_failure(err: StoreError) -> Error {
    error!(error = %err, kind = err.kind(), "record store failure");
    match err {
        StoreError::Connection { message } => {
            Error::service_unavailable(format!("record store unavailable: {message}"))
        }
        other => Error::internal(format!("record store error: {other}"))
            .with_details(json!({ "code": "persistence_error" })),
    }
}

/// Translate a failed create or update.
///
/// A unique-field clash becomes `Conflict` with `email_taken`, the only
/// unique field the stores enforce; everything else goes through
/// [`persistence_failure`].
pub fn write_failure(err: StoreError) -> Error {
    match err {
        StoreError::Duplicate { entity, field } => Error::rule_conflict(
            format!("{entity} {field} already in use"),
            "email_taken",
            json!({ "resource": entity, "field": field }),
        ),
        other => persistence_failure(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    #[case(StoreError::connection("refused"), ErrorCode::ServiceUnavailable)]
    #[case(StoreError::query("syntax"), ErrorCode::InternalError)]
    #[case(StoreError::missing("course", 4_u64), ErrorCode::InternalError)]
    fn persistence_failures_are_never_conflicts(
        #[case] err: StoreError,
        #[case] expected: ErrorCode,
    ) {
        assert_eq!(persistence_failure(err).code(), expected);
    }

    #[rstest]
    fn duplicate_writes_are_email_taken_conflicts() {
        let err = write_failure(StoreError::duplicate("faculty", "email"));
        assert_eq!(err.code(), ErrorCode::Conflict);
        assert_eq!(err.detail_code(), Some("email_taken"));
    }

    #[rstest]
    fn stale_and_missing_records_are_retryable() {
        let err = StoreError::revision_mismatch("student", 1_u64, 2_u64, 3_u64);
        assert!(err.is_retryable());
        assert!(StoreError::missing("course", 2_u64).is_retryable());
        assert!(!StoreError::query("boom").is_retryable());
        assert_eq!(err.kind(), "revision_mismatch");
        assert_eq!(
            err.to_string(),
            "student 1 revision mismatch: expected 2, found 3"
        );
    }
}
