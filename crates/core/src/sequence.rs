//! Step sequencing for the intake flow.
//!
//! The sequence is a fixed prefix (customer intake, service selection), a
//! variable middle (one step per selected service, in catalog order), and a
//! fixed terminal summary. Catalog order, never toggle order, governs the
//! middle: identical selection sets always sequence identically.
//!
//! The sequence is recomputed on every call. It is cheap, and caching it
//! across a selection change is exactly the bug this module exists to avoid.

use crate::catalog::{self, StepId};
use crate::draft::Draft;

/// Compute the ordered step sequence for the draft's current selection.
pub fn compute_steps(draft: &Draft) -> Vec<StepId> {
    let mut steps = vec![StepId::Customer, StepId::ServiceSelection];
    for entry in catalog::entries() {
        if draft.is_selected(entry.code) {
            steps.push(entry.step);
        }
    }
    steps.push(StepId::Summary);
    steps
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ServiceCode;

    #[test]
    fn empty_selection_yields_prefix_and_suffix_only() {
        let draft = Draft::new();
        assert_eq!(
            compute_steps(&draft),
            vec![StepId::Customer, StepId::ServiceSelection, StepId::Summary]
        );
    }

    #[test]
    fn catalog_order_governs_regardless_of_toggle_order() {
        let mut a = Draft::new();
        a.toggle_service(ServiceCode::CarWash);
        a.toggle_service(ServiceCode::WheelBalancing);

        let mut b = Draft::new();
        b.toggle_service(ServiceCode::WheelBalancing);
        b.toggle_service(ServiceCode::CarWash);

        let expected = vec![
            StepId::Customer,
            StepId::ServiceSelection,
            StepId::WheelBalancing,
            StepId::CarWash,
            StepId::Summary,
        ];
        assert_eq!(compute_steps(&a), expected);
        assert_eq!(compute_steps(&b), expected);
    }

    #[test]
    fn deselection_drops_the_step_on_recompute() {
        let mut draft = Draft::new();
        draft.toggle_service(ServiceCode::TyreRotation);
        assert!(compute_steps(&draft).contains(&StepId::TyreRotation));
        draft.toggle_service(ServiceCode::TyreRotation);
        assert!(!compute_steps(&draft).contains(&StepId::TyreRotation));
    }

    #[test]
    fn full_selection_visits_every_catalog_step_in_order() {
        let mut draft = Draft::new();
        draft.set_selected_services(ServiceCode::ALL);
        let steps = compute_steps(&draft);
        assert_eq!(steps.len(), 2 + ServiceCode::ALL.len() + 1);
        let middle: Vec<StepId> = steps[2..steps.len() - 1].to_vec();
        let catalog_order: Vec<StepId> = catalog::entries().iter().map(|e| e.step).collect();
        assert_eq!(middle, catalog_order);
    }
}
