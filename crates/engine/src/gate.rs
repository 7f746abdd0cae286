//! Checklist completion gate.
//!
//! Pure decision logic: given a card's selected services and the checklists
//! attached to it, decide whether the Pending -> Completed transition is
//! authorized. Refusal is a normal outcome carrying the full missing list,
//! not an error.
//!
//! The gate walks the catalog in declaration order, so the missing list is
//! always reported in catalog order regardless of how the inputs were
//! collected.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use jobcard_core::{catalog, ServiceCode};
use jobcard_storage::ChecklistRecord;

/// Why a required checklist does not satisfy the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingReason {
    /// No checklist record exists for the service yet.
    NotCreated,
    /// A record exists but at least one required field is unaffirmed.
    Incomplete,
}

/// One required checklist the gate found wanting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingChecklist {
    pub service: ServiceCode,
    pub reason: MissingReason,
}

impl MissingChecklist {
    /// User-facing description. The two-variant phrasing is load-bearing:
    /// it is what technicians see on a refused completion.
    pub fn describe(&self) -> String {
        match self.reason {
            MissingReason::NotCreated => {
                format!("{} Checklist (not created)", self.service.label())
            }
            MissingReason::Incomplete => {
                format!("{} Checklist (incomplete)", self.service.label())
            }
        }
    }
}

impl fmt::Display for MissingChecklist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

/// The gate's verdict on one card. All-or-nothing: `allowed` is true only
/// when `missing` is empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateDecision {
    pub allowed: bool,
    /// Catalog-ordered list of unsatisfied required checklists.
    pub missing: Vec<MissingChecklist>,
}

impl GateDecision {
    /// The missing list as user-facing strings, in catalog order.
    pub fn describe_missing(&self) -> Vec<String> {
        self.missing.iter().map(MissingChecklist::describe).collect()
    }
}

/// Decide whether every service that requires a checklist has a complete
/// one attached. `checklists` is keyed by service; extra entries for
/// deselected services are ignored (stale checklists are tolerated, they
/// just stop counting).
pub fn evaluate_gate(
    selected: &[ServiceCode],
    checklists: &BTreeMap<ServiceCode, ChecklistRecord>,
) -> GateDecision {
    let selected: BTreeSet<ServiceCode> = selected.iter().copied().collect();
    let mut missing = Vec::new();

    for entry in catalog::entries() {
        if !entry.requires_checklist || !selected.contains(&entry.code) {
            continue;
        }
        match checklists.get(&entry.code) {
            None => missing.push(MissingChecklist {
                service: entry.code,
                reason: MissingReason::NotCreated,
            }),
            Some(record) if !record.is_complete(entry.checklist_fields) => {
                missing.push(MissingChecklist {
                    service: entry.code,
                    reason: MissingReason::Incomplete,
                });
            }
            Some(_) => {}
        }
    }

    GateDecision {
        allowed: missing.is_empty(),
        missing,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_checklist(service: ServiceCode) -> ChecklistRecord {
        let entry = catalog::entry_for(service).unwrap();
        ChecklistRecord {
            id: format!("jc-1:{service}"),
            job_card_id: "jc-1".to_string(),
            service,
            fields: entry
                .checklist_fields
                .iter()
                .map(|name| (name.to_string(), true))
                .collect(),
            notes: None,
            completed_at: "2026-08-24T10:00:00Z".to_string(),
            updated_by: "tech-1".to_string(),
        }
    }

    #[test]
    fn absent_checklist_reports_not_created() {
        let selected = [ServiceCode::TyreInspection, ServiceCode::PucCheck];
        let checklists = BTreeMap::from([(
            ServiceCode::TyreInspection,
            complete_checklist(ServiceCode::TyreInspection),
        )]);
        let decision = evaluate_gate(&selected, &checklists);
        assert!(!decision.allowed);
        assert_eq!(
            decision.missing,
            vec![MissingChecklist {
                service: ServiceCode::PucCheck,
                reason: MissingReason::NotCreated,
            }]
        );
    }

    #[test]
    fn unaffirmed_field_reports_incomplete() {
        let mut record = complete_checklist(ServiceCode::PucCheck);
        record.fields.insert("certificate_issued".to_string(), false);
        let checklists = BTreeMap::from([(ServiceCode::PucCheck, record)]);
        let decision = evaluate_gate(&[ServiceCode::PucCheck], &checklists);
        assert!(!decision.allowed);
        assert_eq!(decision.missing[0].reason, MissingReason::Incomplete);
    }

    #[test]
    fn all_required_checklists_complete_allows() {
        let selected = [ServiceCode::TyreInspection, ServiceCode::PucCheck];
        let checklists: BTreeMap<_, _> = selected
            .iter()
            .map(|&s| (s, complete_checklist(s)))
            .collect();
        let decision = evaluate_gate(&selected, &checklists);
        assert!(decision.allowed);
        assert!(decision.missing.is_empty());
    }

    #[test]
    fn services_without_checklist_requirement_are_skipped() {
        // Car wash requires no checklist; nothing attached, still allowed.
        let decision = evaluate_gate(&[ServiceCode::CarWash], &BTreeMap::new());
        assert!(decision.allowed);
    }

    #[test]
    fn stale_checklist_for_deselected_service_is_ignored() {
        let checklists = BTreeMap::from([(
            ServiceCode::OilChange,
            complete_checklist(ServiceCode::OilChange),
        )]);
        let decision = evaluate_gate(&[ServiceCode::CarWash], &checklists);
        assert!(decision.allowed);
    }

    #[test]
    fn missing_list_is_catalog_ordered_with_exact_phrasing() {
        // Selected in reverse catalog order; report comes back in catalog order.
        let selected = [ServiceCode::TyreRotation, ServiceCode::TyreInspection];
        let decision = evaluate_gate(&selected, &BTreeMap::new());
        assert_eq!(
            decision.describe_missing(),
            vec![
                "Tyre Inspection Checklist (not created)".to_string(),
                "Tyre Rotation Checklist (not created)".to_string(),
            ]
        );
    }
}
