//! Completion workflow integration tests.
//!
//! Exercises the full server-side path against the in-memory backend:
//! upsert checklists field by field, attempt completion, and verify the
//! gate's all-or-nothing refusal, the exact user-facing missing list, and
//! completion idempotency.

use jobcard_core::ServiceCode;
use jobcard_engine::{
    complete_job_card, upsert_checklist, ChecklistPatch, CompletionOutcome, MissingReason,
};
use jobcard_storage::{JobCardRecord, JobCardStorage, JobStatus, MemoryStorage};

const NOW: &str = "2026-08-24T12:00:00Z";

fn pending_card(id: &str, services: &[ServiceCode]) -> JobCardRecord {
    JobCardRecord {
        id: id.to_string(),
        customer_name: "Meera Nair".to_string(),
        customer_phone: "9876500033".to_string(),
        vehicle_registration: "TN09EF9012".to_string(),
        vehicle_make: "Tata".to_string(),
        vehicle_model: "Nexon".to_string(),
        status: JobStatus::Pending,
        selected_services: services.to_vec(),
        completed_by: None,
        created_at: "2026-08-24T09:00:00Z".to_string(),
        updated_at: "2026-08-24T09:00:00Z".to_string(),
    }
}

fn patch(fields: &[(&str, bool)]) -> ChecklistPatch {
    ChecklistPatch {
        fields: fields.iter().map(|(k, v)| (k.to_string(), *v)).collect(),
        ..ChecklistPatch::default()
    }
}

async fn affirm_all(storage: &MemoryStorage, job_card_id: &str, service: ServiceCode) {
    let fields: Vec<(&str, bool)> = jobcard_core::entry_for(service)
        .unwrap()
        .checklist_fields
        .iter()
        .map(|name| (*name, true))
        .collect();
    upsert_checklist(storage, job_card_id, service, &patch(&fields), "tech-1", NOW)
        .await
        .unwrap();
}

#[tokio::test]
async fn refusal_lists_every_unsatisfied_checklist_in_one_response() {
    let storage = MemoryStorage::new();
    let services = [ServiceCode::TyreInspection, ServiceCode::PucCheck];
    storage.save_job_card(&pending_card("jc-1", &services)).await.unwrap();

    // Only the tyre inspection checklist exists, fully affirmed.
    affirm_all(&storage, "jc-1", ServiceCode::TyreInspection).await;

    let outcome = complete_job_card(&storage, "jc-1", "tech-1", NOW).await.unwrap();
    let CompletionOutcome::Refused(decision) = outcome else {
        panic!("expected refusal, got {outcome:?}");
    };
    assert!(!decision.allowed);
    assert_eq!(decision.missing.len(), 1);
    assert_eq!(decision.missing[0].service, ServiceCode::PucCheck);
    assert_eq!(decision.missing[0].reason, MissingReason::NotCreated);
    assert_eq!(
        decision.describe_missing(),
        vec!["PUC Checklist (not created)".to_string()]
    );

    // Refusal mutates nothing.
    let card = storage.load_job_card("jc-1").await.unwrap();
    assert_eq!(card.status, JobStatus::Pending);
    assert_eq!(card.updated_at, "2026-08-24T09:00:00Z");
}

#[tokio::test]
async fn partially_affirmed_checklist_refuses_as_incomplete() {
    let storage = MemoryStorage::new();
    storage
        .save_job_card(&pending_card("jc-1", &[ServiceCode::PucCheck]))
        .await
        .unwrap();
    upsert_checklist(
        &storage,
        "jc-1",
        ServiceCode::PucCheck,
        &patch(&[("emission_measured", true)]),
        "tech-1",
        NOW,
    )
    .await
    .unwrap();

    let outcome = complete_job_card(&storage, "jc-1", "tech-1", NOW).await.unwrap();
    let CompletionOutcome::Refused(decision) = outcome else {
        panic!("expected refusal, got {outcome:?}");
    };
    assert_eq!(
        decision.describe_missing(),
        vec!["PUC Checklist (incomplete)".to_string()]
    );
}

#[tokio::test]
async fn completing_after_every_checklist_is_affirmed_succeeds() {
    let storage = MemoryStorage::new();
    let services = [ServiceCode::TyreInspection, ServiceCode::PucCheck];
    storage.save_job_card(&pending_card("jc-1", &services)).await.unwrap();
    affirm_all(&storage, "jc-1", ServiceCode::TyreInspection).await;

    // First attempt refused: the PUC checklist is missing.
    let refused = complete_job_card(&storage, "jc-1", "tech-1", NOW).await.unwrap();
    assert!(matches!(refused, CompletionOutcome::Refused(_)));

    affirm_all(&storage, "jc-1", ServiceCode::PucCheck).await;
    let outcome = complete_job_card(&storage, "jc-1", "tech-1", NOW).await.unwrap();
    assert_eq!(outcome, CompletionOutcome::Completed);

    let card = storage.load_job_card("jc-1").await.unwrap();
    assert_eq!(card.status, JobStatus::Completed);
    assert_eq!(card.completed_by.as_deref(), Some("tech-1"));
    assert_eq!(card.updated_at, NOW);
}

#[tokio::test]
async fn completion_is_idempotent() {
    let storage = MemoryStorage::new();
    storage
        .save_job_card(&pending_card("jc-1", &[ServiceCode::CarWash]))
        .await
        .unwrap();

    let first = complete_job_card(&storage, "jc-1", "tech-1", NOW).await.unwrap();
    assert_eq!(first, CompletionOutcome::Completed);

    // Second attempt is a no-op success that skips the gate; the card is
    // not re-stamped.
    let later = "2026-08-25T08:00:00Z";
    let second = complete_job_card(&storage, "jc-1", "tech-2", later).await.unwrap();
    assert_eq!(second, CompletionOutcome::AlreadyCompleted);

    let card = storage.load_job_card("jc-1").await.unwrap();
    assert_eq!(card.updated_at, NOW);
    assert_eq!(card.completed_by.as_deref(), Some("tech-1"));
}

#[tokio::test]
async fn missing_card_propagates_the_storage_error() {
    let storage = MemoryStorage::new();
    let result = complete_job_card(&storage, "missing", "tech-1", NOW).await;
    assert!(matches!(
        result,
        Err(jobcard_storage::StorageError::JobCardNotFound { .. })
    ));
}

#[tokio::test]
async fn concurrent_technicians_on_different_checklists_compose() {
    let storage = MemoryStorage::new();
    let services = [ServiceCode::WheelAlignment, ServiceCode::WheelBalancing];
    storage.save_job_card(&pending_card("jc-1", &services)).await.unwrap();

    // Two sessions interleave upserts to different checklist types.
    upsert_checklist(
        &storage,
        "jc-1",
        ServiceCode::WheelAlignment,
        &patch(&[("camber_set", true), ("toe_set", true)]),
        "tech-1",
        NOW,
    )
    .await
    .unwrap();
    upsert_checklist(
        &storage,
        "jc-1",
        ServiceCode::WheelBalancing,
        &patch(&[("weights_applied", true), ("wheels_torqued", true), ("road_tested", true)]),
        "tech-2",
        NOW,
    )
    .await
    .unwrap();
    upsert_checklist(
        &storage,
        "jc-1",
        ServiceCode::WheelAlignment,
        &patch(&[("steering_centered", true)]),
        "tech-1",
        NOW,
    )
    .await
    .unwrap();

    let outcome = complete_job_card(&storage, "jc-1", "tech-1", NOW).await.unwrap();
    assert_eq!(outcome, CompletionOutcome::Completed);
}
