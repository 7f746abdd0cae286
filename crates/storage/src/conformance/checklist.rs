use std::future::Future;

use jobcard_core::ServiceCode;

use super::{make_checklist, make_job_card, TestResult};
use crate::JobCardStorage;

pub(super) async fn run_checklist_tests<S, F, Fut>(factory: &F) -> Vec<TestResult>
where
    S: JobCardStorage,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    let mut results = Vec::new();

    results.push(TestResult::from_result(
        "checklist",
        "save_then_load_round_trips",
        save_then_load_round_trips(factory).await,
    ));
    results.push(TestResult::from_result(
        "checklist",
        "scoped_per_job_card_and_service",
        scoped_per_job_card_and_service(factory).await,
    ));
    results.push(TestResult::from_result(
        "checklist",
        "save_replaces_same_scope",
        save_replaces_same_scope(factory).await,
    ));
    results.push(TestResult::from_result(
        "checklist",
        "list_returns_only_the_cards_checklists",
        list_returns_only_the_cards_checklists(factory).await,
    ));
    results.push(TestResult::from_result(
        "checklist",
        "list_is_empty_for_card_without_checklists",
        list_is_empty_for_card_without_checklists(factory).await,
    ));

    results
}

// ── Test implementations ──────────────────────────────────────────────────────

/// A saved checklist must load back field-for-field identical.
async fn save_then_load_round_trips<S, F, Fut>(factory: &F) -> Result<(), String>
where
    S: JobCardStorage,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    let s = factory().await;
    let record = make_checklist("jc-1", ServiceCode::PucCheck, &[("emission_measured", true)]);
    s.save_checklist(&record).await.map_err(|e| e.to_string())?;

    let loaded = s
        .load_checklist("jc-1", ServiceCode::PucCheck)
        .await
        .map_err(|e| e.to_string())?;
    if loaded != record {
        return Err(format!("loaded checklist differs from saved: {loaded:?}"));
    }
    Ok(())
}

/// Checklists for different {job card, service} pairs must not interfere,
/// even when they share one of the two key components.
async fn scoped_per_job_card_and_service<S, F, Fut>(factory: &F) -> Result<(), String>
where
    S: JobCardStorage,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    let s = factory().await;
    let same_card = make_checklist("jc-1", ServiceCode::PucCheck, &[("emission_measured", true)]);
    let other_service =
        make_checklist("jc-1", ServiceCode::OilChange, &[("oil_drained", false)]);
    let other_card = make_checklist("jc-2", ServiceCode::PucCheck, &[("emission_measured", false)]);
    s.save_checklist(&same_card)
        .await
        .map_err(|e| e.to_string())?;
    s.save_checklist(&other_service)
        .await
        .map_err(|e| e.to_string())?;
    s.save_checklist(&other_card)
        .await
        .map_err(|e| e.to_string())?;

    let loaded = s
        .load_checklist("jc-1", ServiceCode::PucCheck)
        .await
        .map_err(|e| e.to_string())?;
    if loaded.fields.get("emission_measured") != Some(&true) {
        return Err("jc-1/puc_check clobbered by a different scope".to_string());
    }
    Ok(())
}

/// Saving into an existing scope must replace the stored record.
async fn save_replaces_same_scope<S, F, Fut>(factory: &F) -> Result<(), String>
where
    S: JobCardStorage,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    let s = factory().await;
    let first = make_checklist("jc-1", ServiceCode::PucCheck, &[("emission_measured", false)]);
    s.save_checklist(&first).await.map_err(|e| e.to_string())?;

    let second = make_checklist("jc-1", ServiceCode::PucCheck, &[("emission_measured", true)]);
    s.save_checklist(&second).await.map_err(|e| e.to_string())?;

    let loaded = s
        .load_checklist("jc-1", ServiceCode::PucCheck)
        .await
        .map_err(|e| e.to_string())?;
    if loaded.fields.get("emission_measured") != Some(&true) {
        return Err("second save did not replace the record".to_string());
    }
    Ok(())
}

/// Listing must return exactly the card's checklists, nothing else.
async fn list_returns_only_the_cards_checklists<S, F, Fut>(factory: &F) -> Result<(), String>
where
    S: JobCardStorage,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    let s = factory().await;
    let mine_a = make_checklist("jc-1", ServiceCode::PucCheck, &[]);
    let mine_b = make_checklist("jc-1", ServiceCode::OilChange, &[]);
    let other = make_checklist("jc-2", ServiceCode::PucCheck, &[]);
    s.save_checklist(&mine_a).await.map_err(|e| e.to_string())?;
    s.save_checklist(&mine_b).await.map_err(|e| e.to_string())?;
    s.save_checklist(&other).await.map_err(|e| e.to_string())?;

    let listed = s.list_checklists("jc-1").await.map_err(|e| e.to_string())?;
    if listed.len() != 2 {
        return Err(format!("expected 2 checklists, got {}", listed.len()));
    }
    if listed.iter().any(|r| r.job_card_id != "jc-1") {
        return Err("listing leaked another card's checklist".to_string());
    }
    Ok(())
}

/// An existing card with no checklists must list empty, not error.
async fn list_is_empty_for_card_without_checklists<S, F, Fut>(factory: &F) -> Result<(), String>
where
    S: JobCardStorage,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    let s = factory().await;
    let card = make_job_card("jc-1", &[ServiceCode::CarWash]);
    s.save_job_card(&card).await.map_err(|e| e.to_string())?;

    let listed = s.list_checklists("jc-1").await.map_err(|e| e.to_string())?;
    if !listed.is_empty() {
        return Err(format!("expected empty list, got {}", listed.len()));
    }
    Ok(())
}
