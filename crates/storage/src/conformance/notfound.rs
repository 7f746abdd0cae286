use std::future::Future;

use jobcard_core::ServiceCode;

use super::TestResult;
use crate::{JobCardStorage, StorageError};

pub(super) async fn run_not_found_tests<S, F, Fut>(factory: &F) -> Vec<TestResult>
where
    S: JobCardStorage,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    let mut results = Vec::new();

    results.push(TestResult::from_result(
        "not_found",
        "missing_job_card_is_job_card_not_found",
        missing_job_card_is_job_card_not_found(factory).await,
    ));
    results.push(TestResult::from_result(
        "not_found",
        "missing_checklist_is_checklist_not_found",
        missing_checklist_is_checklist_not_found(factory).await,
    ));
    results.push(TestResult::from_result(
        "not_found",
        "services_read_on_missing_card_is_job_card_not_found",
        services_read_on_missing_card_is_job_card_not_found(factory).await,
    ));
    results.push(TestResult::from_result(
        "not_found",
        "checklist_not_found_carries_the_scope",
        checklist_not_found_carries_the_scope(factory).await,
    ));

    results
}

// ── Test implementations ──────────────────────────────────────────────────────

/// Loading an absent card must signal JobCardNotFound, not Backend.
async fn missing_job_card_is_job_card_not_found<S, F, Fut>(factory: &F) -> Result<(), String>
where
    S: JobCardStorage,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    let s = factory().await;
    match s.load_job_card("missing").await {
        Err(StorageError::JobCardNotFound { job_card_id }) if job_card_id == "missing" => Ok(()),
        Err(e) => Err(format!("expected JobCardNotFound, got: {e}")),
        Ok(_) => Err("expected JobCardNotFound, got a record".to_string()),
    }
}

/// Loading an absent checklist must signal ChecklistNotFound -- the normal
/// cue for the upsert protocol to create the record.
async fn missing_checklist_is_checklist_not_found<S, F, Fut>(factory: &F) -> Result<(), String>
where
    S: JobCardStorage,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    let s = factory().await;
    match s.load_checklist("jc-1", ServiceCode::PucCheck).await {
        Err(StorageError::ChecklistNotFound { .. }) => Ok(()),
        Err(e) => Err(format!("expected ChecklistNotFound, got: {e}")),
        Ok(_) => Err("expected ChecklistNotFound, got a record".to_string()),
    }
}

/// Service reads on an absent card must signal JobCardNotFound.
async fn services_read_on_missing_card_is_job_card_not_found<S, F, Fut>(
    factory: &F,
) -> Result<(), String>
where
    S: JobCardStorage,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    let s = factory().await;
    match s.load_services_for_job_card("missing").await {
        Err(StorageError::JobCardNotFound { .. }) => Ok(()),
        Err(e) => Err(format!("expected JobCardNotFound, got: {e}")),
        Ok(_) => Err("expected JobCardNotFound, got a service list".to_string()),
    }
}

/// The ChecklistNotFound error must carry the scope it was asked about.
async fn checklist_not_found_carries_the_scope<S, F, Fut>(factory: &F) -> Result<(), String>
where
    S: JobCardStorage,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    let s = factory().await;
    match s.load_checklist("jc-9", ServiceCode::OilChange).await {
        Err(StorageError::ChecklistNotFound {
            job_card_id,
            service,
        }) => {
            if job_card_id != "jc-9" {
                return Err(format!("expected job_card_id \"jc-9\", got \"{job_card_id}\""));
            }
            if service != ServiceCode::OilChange {
                return Err(format!("expected service oil_change, got {service}"));
            }
            Ok(())
        }
        Err(e) => Err(format!("expected ChecklistNotFound, got: {e}")),
        Ok(_) => Err("expected ChecklistNotFound, got a record".to_string()),
    }
}
