//! Navigation state for the intake flow.
//!
//! Holds the current step index and the visible error map for one session.
//! Advancing validates the current step first; the step sequence is
//! recomputed before the index moves, because the selection may have
//! changed since the last call. Backward navigation never validates.
//!
//! Purely in-memory; no persistence side effects.

use time::Date;

use crate::catalog::StepId;
use crate::draft::Draft;
use crate::sequence::compute_steps;
use crate::validate::{validate_step, ErrorMap};

/// Navigation state machine over `[0, steps.len())`.
#[derive(Debug, Clone, Default)]
pub struct Navigation {
    index: usize,
    errors: ErrorMap,
}

impl Navigation {
    pub fn new() -> Self {
        Navigation::default()
    }

    /// The step the session is currently on. The stored index is clamped
    /// against the freshly computed sequence, so a selection change that
    /// shortened the flow can never point past the summary.
    pub fn current_step(&self, draft: &Draft) -> StepId {
        let steps = compute_steps(draft);
        steps[self.index.min(steps.len() - 1)]
    }

    pub fn current_index(&self) -> usize {
        self.index
    }

    /// Errors from the most recent failed advance. Empty after any
    /// successful advance, retreat, or jump.
    pub fn errors(&self) -> &ErrorMap {
        &self.errors
    }

    /// Validate the current step and move forward on success.
    ///
    /// On failure the error map becomes visible and the index stays put.
    /// On success errors are cleared and the index advances, clamped to
    /// the last step of the recomputed sequence.
    pub fn advance(&mut self, draft: &Draft, today: Date) -> bool {
        let step = self.current_step(draft);
        let errors = validate_step(step, draft, today);
        if !errors.is_empty() {
            self.errors = errors;
            return false;
        }
        self.errors.clear();
        let steps = compute_steps(draft);
        self.index = (self.index + 1).min(steps.len() - 1);
        true
    }

    /// Move one step back, floored at the first step. Never validates;
    /// errors are cleared unconditionally.
    pub fn retreat(&mut self) {
        self.index = self.index.saturating_sub(1);
        self.errors.clear();
    }

    /// Unconditional jump for edit-in-place flows. Clamped to the current
    /// sequence; clears errors.
    pub fn jump_to(&mut self, index: usize, draft: &Draft) {
        let steps = compute_steps(draft);
        self.index = index.min(steps.len() - 1);
        self.errors.clear();
    }

    /// Back to the first step with no visible errors. Used on draft reset.
    pub fn reset(&mut self) {
        self.index = 0;
        self.errors.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ServiceCode;
    use time::macros::date;

    const TODAY: Date = date!(2026 - 08 - 24);

    fn draft_with_valid_intake() -> Draft {
        let mut draft = Draft::new();
        draft.customer.name = "Ravi Iyer".to_string();
        draft.customer.phone = "9876500022".to_string();
        draft.vehicle.registration = "KA01CD5678".to_string();
        draft.vehicle.make = "Hyundai".to_string();
        draft.vehicle.model = "i20".to_string();
        draft.service_date = Some(TODAY);
        draft
    }

    #[test]
    fn failed_advance_stays_put_and_exposes_errors() {
        let draft = Draft::new();
        let mut nav = Navigation::new();
        assert!(!nav.advance(&draft, TODAY));
        assert_eq!(nav.current_step(&draft), StepId::Customer);
        assert!(!nav.errors().is_empty());
    }

    #[test]
    fn successful_advance_clears_errors_and_moves_on() {
        let mut draft = draft_with_valid_intake();
        draft.toggle_service(ServiceCode::CarWash);
        let mut nav = Navigation::new();

        assert!(!nav.advance(&Draft::new(), TODAY));
        assert!(!nav.errors().is_empty());

        assert!(nav.advance(&draft, TODAY));
        assert!(nav.errors().is_empty());
        assert_eq!(nav.current_step(&draft), StepId::ServiceSelection);
    }

    #[test]
    fn retreat_clears_errors_without_validating() {
        let draft = Draft::new();
        let mut nav = Navigation::new();
        assert!(!nav.advance(&draft, TODAY));
        nav.retreat();
        assert!(nav.errors().is_empty());
        assert_eq!(nav.current_index(), 0);
    }

    #[test]
    fn advance_clamps_at_summary() {
        let mut draft = draft_with_valid_intake();
        draft.toggle_service(ServiceCode::CarWash);
        let mut nav = Navigation::new();

        assert!(nav.advance(&draft, TODAY)); // customer -> services
        assert!(nav.advance(&draft, TODAY)); // services -> car wash
        assert!(nav.advance(&draft, TODAY)); // car wash -> summary
        assert_eq!(nav.current_step(&draft), StepId::Summary);
        assert!(nav.advance(&draft, TODAY)); // summary validates empty, clamps
        assert_eq!(nav.current_step(&draft), StepId::Summary);
    }

    #[test]
    fn selection_shrink_mid_flow_clamps_current_step() {
        let mut draft = draft_with_valid_intake();
        draft.set_selected_services(ServiceCode::ALL);
        let mut nav = Navigation::new();
        nav.jump_to(9, &draft); // deep into the service steps
        draft.set_selected_services([ServiceCode::CarWash]);
        // Sequence is now 4 steps long; current step clamps to summary.
        assert_eq!(nav.current_step(&draft), StepId::Summary);
    }

    #[test]
    fn jump_to_is_unconditional_and_clamped() {
        let draft = draft_with_valid_intake();
        let mut nav = Navigation::new();
        assert!(!nav.advance(&Draft::new(), TODAY));
        nav.jump_to(99, &draft);
        assert!(nav.errors().is_empty());
        assert_eq!(nav.current_step(&draft), StepId::Summary);
    }
}
