use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use jobcard_core::ServiceCode;

/// Lifecycle status of a persisted job card.
///
/// The only defined transition is `Pending -> Completed`, authorized by the
/// completion gate. No reopening transition exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Pending,
    Completed,
}

/// A persisted job card as stored in the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobCardRecord {
    pub id: String,
    pub customer_name: String,
    pub customer_phone: String,
    pub vehicle_registration: String,
    pub vehicle_make: String,
    pub vehicle_model: String,
    pub status: JobStatus,
    pub selected_services: Vec<ServiceCode>,
    /// Technician who completed the card. None while Pending.
    pub completed_by: Option<String>,
    /// ISO 8601 / RFC 3339 timestamp string.
    pub created_at: String,
    /// ISO 8601 / RFC 3339 timestamp string.
    pub updated_at: String,
}

/// A persisted technician checklist, one per {job card, service} pair for
/// services whose catalog entry requires one.
///
/// `fields` holds the boolean attestations keyed by the catalog-declared
/// field names. `notes`, `completed_at`, and `updated_by` are bookkeeping
/// and excluded from the completeness predicate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistRecord {
    pub id: String,
    pub job_card_id: String,
    pub service: ServiceCode,
    pub fields: BTreeMap<String, bool>,
    pub notes: Option<String>,
    /// ISO 8601 / RFC 3339 timestamp string.
    pub completed_at: String,
    /// Technician who last wrote the record. Threaded explicitly by
    /// callers, never taken from ambient state.
    pub updated_by: String,
}

impl ChecklistRecord {
    /// Whether every named attestation field is affirmed. Fields absent
    /// from the record count as false.
    pub fn is_complete(&self, required_fields: &[&str]) -> bool {
        required_fields
            .iter()
            .all(|name| self.fields.get(*name).copied().unwrap_or(false))
    }
}

/// Named-field update for one checklist, applied by the backend inside its
/// atomicity boundary (see `JobCardStorage::merge_checklist`).
///
/// Only the parts present here are written: `fields` entries overwrite per
/// key (`false` is a deliberate overwrite), `notes` and `completed_at`
/// only when `Some`. `updated_by` is always stamped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistUpdate {
    pub fields: BTreeMap<String, bool>,
    pub notes: Option<String>,
    pub completed_at: Option<String>,
    pub updated_by: String,
}

impl ChecklistUpdate {
    /// Merge the named parts into `record`, leaving everything else
    /// untouched. Shared by backends so merge semantics cannot drift.
    pub fn apply_to(&self, record: &mut ChecklistRecord) {
        for (field, value) in &self.fields {
            record.fields.insert(field.clone(), *value);
        }
        if let Some(notes) = &self.notes {
            record.notes = Some(notes.clone());
        }
        if let Some(completed_at) = &self.completed_at {
            record.completed_at = completed_at.clone();
        }
        record.updated_by = self.updated_by.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checklist(fields: &[(&str, bool)]) -> ChecklistRecord {
        ChecklistRecord {
            id: "cl-1".to_string(),
            job_card_id: "jc-1".to_string(),
            service: ServiceCode::PucCheck,
            fields: fields
                .iter()
                .map(|(k, v)| (k.to_string(), *v))
                .collect(),
            notes: None,
            completed_at: "2026-08-24T10:00:00Z".to_string(),
            updated_by: "tech-7".to_string(),
        }
    }

    #[test]
    fn completeness_requires_every_named_field_true() {
        let record = checklist(&[("emission_measured", true), ("certificate_issued", false)]);
        assert!(!record.is_complete(&["emission_measured", "certificate_issued"]));

        let record = checklist(&[("emission_measured", true), ("certificate_issued", true)]);
        assert!(record.is_complete(&["emission_measured", "certificate_issued"]));
    }

    #[test]
    fn absent_field_counts_as_false() {
        let record = checklist(&[("emission_measured", true)]);
        assert!(!record.is_complete(&["emission_measured", "certificate_issued"]));
    }

    #[test]
    fn notes_are_excluded_from_the_predicate() {
        let mut record = checklist(&[("emission_measured", true)]);
        record.notes = Some("meter recalibrated".to_string());
        assert!(record.is_complete(&["emission_measured"]));
    }

    #[test]
    fn update_writes_only_its_named_parts() {
        let mut record = checklist(&[("emission_measured", true), ("certificate_issued", false)]);
        record.notes = Some("meter recalibrated".to_string());

        let update = ChecklistUpdate {
            fields: [("certificate_issued".to_string(), true)].into_iter().collect(),
            notes: None,
            completed_at: None,
            updated_by: "tech-2".to_string(),
        };
        update.apply_to(&mut record);

        assert_eq!(record.fields.get("emission_measured"), Some(&true));
        assert_eq!(record.fields.get("certificate_issued"), Some(&true));
        assert_eq!(record.notes.as_deref(), Some("meter recalibrated"));
        assert_eq!(record.completed_at, "2026-08-24T10:00:00Z");
        assert_eq!(record.updated_by, "tech-2");
    }

    #[test]
    fn records_round_trip_through_json() {
        let record = checklist(&[("emission_measured", true)]);
        let json = serde_json::to_string(&record).unwrap();
        let back: ChecklistRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}
