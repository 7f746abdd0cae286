//! The Pending -> Completed status transition.
//!
//! Loads persisted state, consults the completion gate, and performs the
//! transition only when the gate allows it. A gate refusal is a normal
//! outcome carrying the full missing list; only persistence failures are
//! errors. Completing an already-Completed card is an idempotent no-op
//! success and skips the gate entirely.

use std::collections::BTreeMap;

use jobcard_core::ServiceCode;
use jobcard_storage::{ChecklistRecord, JobCardStorage, JobStatus, StorageError};

use crate::gate::{evaluate_gate, GateDecision};

/// Outcome of a completion attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionOutcome {
    /// Gate passed; the card's status is now Completed.
    Completed,
    /// The card was already Completed. Nothing was re-run or re-saved.
    AlreadyCompleted,
    /// Gate refused; status unchanged. The decision carries the full
    /// missing list, surfaced to the caller in one response.
    Refused(GateDecision),
}

/// Attempt the status transition for one job card.
///
/// `technician_id` identifies who is attempting completion and `now` is the
/// RFC 3339 timestamp to stamp on success; both are threaded explicitly.
/// Storage failures propagate unchanged and leave the card untouched: the
/// save happens only after the gate passes.
pub async fn complete_job_card<S: JobCardStorage>(
    storage: &S,
    job_card_id: &str,
    technician_id: &str,
    now: &str,
) -> Result<CompletionOutcome, StorageError> {
    let mut card = storage.load_job_card(job_card_id).await?;
    if card.status == JobStatus::Completed {
        return Ok(CompletionOutcome::AlreadyCompleted);
    }

    let selected = storage.load_services_for_job_card(job_card_id).await?;
    let attached: BTreeMap<ServiceCode, ChecklistRecord> = storage
        .list_checklists(job_card_id)
        .await?
        .into_iter()
        .map(|record| (record.service, record))
        .collect();

    let decision = evaluate_gate(&selected, &attached);
    if !decision.allowed {
        return Ok(CompletionOutcome::Refused(decision));
    }

    card.status = JobStatus::Completed;
    card.completed_by = Some(technician_id.to_string());
    card.updated_at = now.to_string();
    storage.save_job_card(&card).await?;
    Ok(CompletionOutcome::Completed)
}
