//! Server-side job-card protocols.
//!
//! Everything here runs against shared persisted state through the
//! `JobCardStorage` trait: the field-level checklist upsert, the pure
//! completion gate, and the Pending -> Completed transition it authorizes.
//! The session-side intake flow lives in `jobcard-core`.

pub mod complete;
pub mod gate;
pub mod upsert;

pub use complete::{complete_job_card, CompletionOutcome};
pub use gate::{evaluate_gate, GateDecision, MissingChecklist, MissingReason};
pub use upsert::{upsert_checklist, ChecklistPatch, UpsertError};
