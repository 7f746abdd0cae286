use async_trait::async_trait;

use jobcard_core::ServiceCode;

use crate::error::StorageError;
use crate::record::{ChecklistRecord, ChecklistUpdate, JobCardRecord};

/// The storage trait for job-card persistence backends.
///
/// Each call is assumed atomic: a returned `Ok` means the whole record was
/// read or written; there are no partial writes visible across calls.
/// Not-found is signalled by the dedicated `StorageError` variants, never
/// by `Backend`, so callers can distinguish "create it" from "retry later".
///
/// Checklists are scoped to one {job_card_id, service} pair. Concurrent
/// technician sessions writing different pairs never contend; same-pair
/// writes go through `merge_checklist`, which merges named fields inside
/// the backend's atomicity boundary so no session can lose another's
/// update to a read-modify-write window.
///
/// Implementations must be `Send + Sync + 'static` to be shared across
/// async task boundaries.
#[async_trait]
pub trait JobCardStorage: Send + Sync + 'static {
    /// Read a job card by id.
    ///
    /// Returns `Err(StorageError::JobCardNotFound)` if absent.
    async fn load_job_card(&self, id: &str) -> Result<JobCardRecord, StorageError>;

    /// Write a job card, inserting or replacing by id.
    async fn save_job_card(&self, card: &JobCardRecord) -> Result<(), StorageError>;

    /// Read the checklist for one {job card, service} pair.
    ///
    /// Returns `Err(StorageError::ChecklistNotFound)` if absent -- the
    /// normal signal that an upsert should create the record.
    async fn load_checklist(
        &self,
        job_card_id: &str,
        service: ServiceCode,
    ) -> Result<ChecklistRecord, StorageError>;

    /// Write a checklist, inserting or replacing by {job_card_id, service}.
    async fn save_checklist(&self, record: &ChecklistRecord) -> Result<(), StorageError>;

    /// Atomically create-or-merge the checklist scoped to `template`'s
    /// {job_card_id, service} pair, returning the stored record.
    ///
    /// If no record exists, `template` is inserted first; the update's
    /// named parts are then merged via [`ChecklistUpdate::apply_to`]. The
    /// whole sequence happens within one atomic call, so two sessions
    /// merging different fields of the same checklist both land.
    async fn merge_checklist(
        &self,
        template: &ChecklistRecord,
        update: &ChecklistUpdate,
    ) -> Result<ChecklistRecord, StorageError>;

    /// The selected services recorded on a job card.
    ///
    /// Returns `Err(StorageError::JobCardNotFound)` if the card is absent.
    async fn load_services_for_job_card(
        &self,
        job_card_id: &str,
    ) -> Result<Vec<ServiceCode>, StorageError>;

    /// All checklists attached to a job card, in no particular order.
    /// An existing card with no checklists yields an empty list.
    async fn list_checklists(
        &self,
        job_card_id: &str,
    ) -> Result<Vec<ChecklistRecord>, StorageError>;
}
