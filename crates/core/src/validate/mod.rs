//! Per-step validation.
//!
//! One pure function per step: draft in, error map out. The map is keyed by
//! field path (`"balancing.weights.front_right"`) and recomputed wholesale
//! on every call -- never merged incrementally. An empty map means the step
//! is valid.
//!
//! Service steps dispatch through the validator registered on their catalog
//! entry. A step with no registered validator passes silently; that is the
//! declared contract for steps whose fields are all optional, and the
//! catalog makes it visible as `validate: None`.
//!
//! Free-text complaint and notes fields are never required anywhere.

pub mod intake;
pub mod service;

use std::collections::BTreeMap;
use time::Date;

use crate::catalog::{self, StepId};
use crate::draft::Draft;

/// Field path → human-readable message. Empty means valid.
pub type ErrorMap = BTreeMap<String, String>;

/// Validate one step against the draft. `today` is threaded explicitly so
/// the check stays pure and testable; no ambient clock is consulted.
pub fn validate_step(step: StepId, draft: &Draft, today: Date) -> ErrorMap {
    match step {
        StepId::Customer => intake::customer(draft, today),
        StepId::ServiceSelection => intake::service_selection(draft),
        // Terminal read-only aggregation; nothing to check.
        StepId::Summary => ErrorMap::new(),
        service_step => catalog::entry_for_step(service_step)
            .and_then(|entry| entry.validate)
            .map(|validate| validate(draft))
            .unwrap_or_default(),
    }
}
