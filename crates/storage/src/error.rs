use jobcard_core::ServiceCode;

/// All errors that can be returned by a JobCardStorage implementation.
///
/// Not-found conditions are distinct variants so callers can tell "the
/// record does not exist" (a normal outcome for lazy checklist creation)
/// apart from a transient backend failure.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// No job card with the given id.
    #[error("job card not found: {job_card_id}")]
    JobCardNotFound { job_card_id: String },

    /// No checklist for the given {job card, service} pair.
    #[error("checklist not found: {job_card_id}/{service}")]
    ChecklistNotFound {
        job_card_id: String,
        service: ServiceCode,
    },

    /// A backend-specific storage error (DB connection, serialization, etc.).
    #[error("storage backend error: {0}")]
    Backend(String),
}

impl StorageError {
    /// Whether this error is a not-found signal rather than a failure.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            StorageError::JobCardNotFound { .. } | StorageError::ChecklistNotFound { .. }
        )
    }
}
