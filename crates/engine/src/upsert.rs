//! Idempotent create-or-update for one checklist record.
//!
//! Each upsert is scoped to one {job card, service} pair and merges only
//! the fields named in the patch. After validating the patch against the
//! catalog, the whole write is a single `merge_checklist` call, so the
//! field merge happens inside the backend's atomicity boundary: two
//! technicians updating different checklists, or different fields of the
//! same checklist, never clobber each other even when the calls interleave.
//! Two sessions writing the same boolean concurrently resolve
//! last-writer-wins, which is acceptable for idempotent attestations.
//!
//! Boolean fields use explicit presence, not truthiness: a patch entry of
//! `false` is a deliberate overwrite, an absent entry leaves the stored
//! value untouched.

use std::collections::BTreeMap;
use std::fmt;

use jobcard_core::{catalog, ServiceCode};
use jobcard_storage::{ChecklistRecord, ChecklistUpdate, JobCardStorage, StorageError};

/// Partial update for one checklist. Only named fields are written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChecklistPatch {
    /// Attestation fields to set. Presence in the map is what matters;
    /// `false` is a valid overwrite.
    pub fields: BTreeMap<String, bool>,
    pub notes: Option<String>,
    /// Overrides the record timestamp. When absent, a created record gets
    /// `now` and an updated record keeps its stored timestamp.
    pub completed_at: Option<String>,
}

/// Errors from the upsert protocol.
#[derive(Debug)]
pub enum UpsertError {
    /// The service's catalog entry declares no checklist.
    ChecklistNotRequired { service: ServiceCode },
    /// The patch names a field the catalog does not declare for this
    /// checklist type. A caller bug, refused before any write.
    UnknownField { service: ServiceCode, field: String },
    /// Persistence failure, propagated unchanged. Nothing was partially
    /// applied: the write is a single atomic merge call.
    Storage(StorageError),
}

impl fmt::Display for UpsertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpsertError::ChecklistNotRequired { service } => {
                write!(f, "service '{}' does not take a checklist", service)
            }
            UpsertError::UnknownField { service, field } => {
                write!(
                    f,
                    "checklist for '{}' has no field named '{}'",
                    service, field
                )
            }
            UpsertError::Storage(e) => write!(f, "storage error: {}", e),
        }
    }
}

impl std::error::Error for UpsertError {}

impl From<StorageError> for UpsertError {
    fn from(e: StorageError) -> Self {
        UpsertError::Storage(e)
    }
}

/// Create or update the checklist for `{job_card_id, service}`.
///
/// On create, every catalog-declared field defaults to `false` and
/// `completed_at` to `now` unless the patch supplies them. On update, only
/// the patch's named fields change. The write itself is one atomic
/// `merge_checklist` call, so there is no load/save window in which a
/// concurrent session's fields could be lost. `technician_id` is threaded
/// explicitly and recorded as `updated_by`; `now` is an RFC 3339 timestamp
/// supplied by the caller so the protocol itself stays clock-free.
pub async fn upsert_checklist<S: JobCardStorage>(
    storage: &S,
    job_card_id: &str,
    service: ServiceCode,
    patch: &ChecklistPatch,
    technician_id: &str,
    now: &str,
) -> Result<ChecklistRecord, UpsertError> {
    let Some(entry) = catalog::entry_for(service) else {
        return Err(UpsertError::ChecklistNotRequired { service });
    };
    if !entry.requires_checklist {
        return Err(UpsertError::ChecklistNotRequired { service });
    }
    for field in patch.fields.keys() {
        if !entry.checklist_fields.contains(&field.as_str()) {
            return Err(UpsertError::UnknownField {
                service,
                field: field.clone(),
            });
        }
    }

    let template = ChecklistRecord {
        id: format!("{job_card_id}:{service}"),
        job_card_id: job_card_id.to_string(),
        service,
        fields: entry
            .checklist_fields
            .iter()
            .map(|name| (name.to_string(), false))
            .collect(),
        notes: None,
        completed_at: now.to_string(),
        updated_by: technician_id.to_string(),
    };
    let update = ChecklistUpdate {
        fields: patch.fields.clone(),
        notes: patch.notes.clone(),
        completed_at: patch.completed_at.clone(),
        updated_by: technician_id.to_string(),
    };

    let record = storage.merge_checklist(&template, &update).await?;
    Ok(record)
}
