use std::future::Future;

use jobcard_core::ServiceCode;

use super::{make_job_card, TestResult};
use crate::record::JobStatus;
use crate::JobCardStorage;

pub(super) async fn run_job_card_tests<S, F, Fut>(factory: &F) -> Vec<TestResult>
where
    S: JobCardStorage,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    let mut results = Vec::new();

    results.push(TestResult::from_result(
        "job_card",
        "save_then_load_round_trips",
        save_then_load_round_trips(factory).await,
    ));
    results.push(TestResult::from_result(
        "job_card",
        "save_replaces_by_id",
        save_replaces_by_id(factory).await,
    ));
    results.push(TestResult::from_result(
        "job_card",
        "different_ids_are_independent",
        different_ids_are_independent(factory).await,
    ));
    results.push(TestResult::from_result(
        "job_card",
        "services_read_matches_saved_card",
        services_read_matches_saved_card(factory).await,
    ));

    results
}

// ── Test implementations ──────────────────────────────────────────────────────

/// A saved card must load back field-for-field identical.
async fn save_then_load_round_trips<S, F, Fut>(factory: &F) -> Result<(), String>
where
    S: JobCardStorage,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    let s = factory().await;
    let card = make_job_card("jc-1", &[ServiceCode::PucCheck]);
    s.save_job_card(&card).await.map_err(|e| e.to_string())?;

    let loaded = s.load_job_card("jc-1").await.map_err(|e| e.to_string())?;
    if loaded != card {
        return Err(format!("loaded card differs from saved: {loaded:?}"));
    }
    Ok(())
}

/// Saving a card with an existing id must replace the stored record.
async fn save_replaces_by_id<S, F, Fut>(factory: &F) -> Result<(), String>
where
    S: JobCardStorage,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    let s = factory().await;
    let mut card = make_job_card("jc-1", &[ServiceCode::CarWash]);
    s.save_job_card(&card).await.map_err(|e| e.to_string())?;

    card.status = JobStatus::Completed;
    card.updated_at = "2026-01-02T00:00:00Z".to_string();
    s.save_job_card(&card).await.map_err(|e| e.to_string())?;

    let loaded = s.load_job_card("jc-1").await.map_err(|e| e.to_string())?;
    if loaded.status != JobStatus::Completed {
        return Err(format!("expected Completed, got {:?}", loaded.status));
    }
    if loaded.updated_at != "2026-01-02T00:00:00Z" {
        return Err(format!("updated_at not replaced: {}", loaded.updated_at));
    }
    Ok(())
}

/// Cards with different ids must not interfere.
async fn different_ids_are_independent<S, F, Fut>(factory: &F) -> Result<(), String>
where
    S: JobCardStorage,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    let s = factory().await;
    let a = make_job_card("jc-a", &[ServiceCode::OilChange]);
    let b = make_job_card("jc-b", &[ServiceCode::BatteryCheck]);
    s.save_job_card(&a).await.map_err(|e| e.to_string())?;
    s.save_job_card(&b).await.map_err(|e| e.to_string())?;

    let loaded_a = s.load_job_card("jc-a").await.map_err(|e| e.to_string())?;
    let loaded_b = s.load_job_card("jc-b").await.map_err(|e| e.to_string())?;
    if loaded_a.selected_services != vec![ServiceCode::OilChange] {
        return Err("card jc-a services clobbered".to_string());
    }
    if loaded_b.selected_services != vec![ServiceCode::BatteryCheck] {
        return Err("card jc-b services clobbered".to_string());
    }
    Ok(())
}

/// load_services_for_job_card must reflect the saved card's selection.
async fn services_read_matches_saved_card<S, F, Fut>(factory: &F) -> Result<(), String>
where
    S: JobCardStorage,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    let s = factory().await;
    let services = [ServiceCode::TyreInspection, ServiceCode::PucCheck];
    let card = make_job_card("jc-1", &services);
    s.save_job_card(&card).await.map_err(|e| e.to_string())?;

    let loaded = s
        .load_services_for_job_card("jc-1")
        .await
        .map_err(|e| e.to_string())?;
    if loaded != services {
        return Err(format!("expected {services:?}, got {loaded:?}"));
    }
    Ok(())
}
