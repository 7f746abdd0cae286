use std::future::Future;

use jobcard_core::ServiceCode;

use super::{make_checklist, TestResult};
use crate::record::ChecklistUpdate;
use crate::JobCardStorage;

pub(super) async fn run_merge_tests<S, F, Fut>(factory: &F) -> Vec<TestResult>
where
    S: JobCardStorage,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    let mut results = Vec::new();

    results.push(TestResult::from_result(
        "merge",
        "absent_scope_is_created_from_the_template",
        absent_scope_is_created_from_the_template(factory).await,
    ));
    results.push(TestResult::from_result(
        "merge",
        "existing_record_keeps_unnamed_fields",
        existing_record_keeps_unnamed_fields(factory).await,
    ));
    results.push(TestResult::from_result(
        "merge",
        "explicit_false_overwrites_a_stored_true",
        explicit_false_overwrites_a_stored_true(factory).await,
    ));
    results.push(TestResult::from_result(
        "merge",
        "absent_notes_and_timestamp_stay_untouched",
        absent_notes_and_timestamp_stay_untouched(factory).await,
    ));
    results.push(TestResult::from_result(
        "merge",
        "merges_from_two_writers_compose",
        merges_from_two_writers_compose(factory).await,
    ));

    results
}

fn update(fields: &[(&str, bool)], updated_by: &str) -> ChecklistUpdate {
    ChecklistUpdate {
        fields: fields.iter().map(|(k, v)| (k.to_string(), *v)).collect(),
        notes: None,
        completed_at: None,
        updated_by: updated_by.to_string(),
    }
}

// ── Test implementations ──────────────────────────────────────────────────────

/// When no record exists for the scope, the template seeds it and the
/// update's fields land on top.
async fn absent_scope_is_created_from_the_template<S, F, Fut>(factory: &F) -> Result<(), String>
where
    S: JobCardStorage,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    let s = factory().await;
    let template = make_checklist(
        "jc-1",
        ServiceCode::PucCheck,
        &[("emission_measured", false), ("certificate_issued", false)],
    );
    let stored = s
        .merge_checklist(&template, &update(&[("emission_measured", true)], "tech-1"))
        .await
        .map_err(|e| e.to_string())?;

    if stored.fields.get("emission_measured") != Some(&true) {
        return Err("update field did not land on the created record".to_string());
    }
    if stored.fields.get("certificate_issued") != Some(&false) {
        return Err("template default missing from the created record".to_string());
    }
    let loaded = s
        .load_checklist("jc-1", ServiceCode::PucCheck)
        .await
        .map_err(|e| e.to_string())?;
    if loaded != stored {
        return Err("returned record differs from the stored one".to_string());
    }
    Ok(())
}

/// Merging into an existing record must not reset fields the update does
/// not name; the template is ignored once a record exists.
async fn existing_record_keeps_unnamed_fields<S, F, Fut>(factory: &F) -> Result<(), String>
where
    S: JobCardStorage,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    let s = factory().await;
    let existing = make_checklist(
        "jc-1",
        ServiceCode::PucCheck,
        &[("emission_measured", true), ("certificate_issued", false)],
    );
    s.save_checklist(&existing).await.map_err(|e| e.to_string())?;

    // The template carries all-false defaults; it must not win.
    let template = make_checklist(
        "jc-1",
        ServiceCode::PucCheck,
        &[("emission_measured", false), ("certificate_issued", false)],
    );
    let stored = s
        .merge_checklist(&template, &update(&[("certificate_issued", true)], "tech-2"))
        .await
        .map_err(|e| e.to_string())?;

    if stored.fields.get("emission_measured") != Some(&true) {
        return Err("merge reset a field the update did not name".to_string());
    }
    if stored.fields.get("certificate_issued") != Some(&true) {
        return Err("named field did not land".to_string());
    }
    Ok(())
}

/// A `false` entry in the update is a deliberate overwrite.
async fn explicit_false_overwrites_a_stored_true<S, F, Fut>(factory: &F) -> Result<(), String>
where
    S: JobCardStorage,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    let s = factory().await;
    let existing = make_checklist("jc-1", ServiceCode::PucCheck, &[("emission_measured", true)]);
    s.save_checklist(&existing).await.map_err(|e| e.to_string())?;

    let template = make_checklist("jc-1", ServiceCode::PucCheck, &[("emission_measured", false)]);
    let stored = s
        .merge_checklist(&template, &update(&[("emission_measured", false)], "tech-1"))
        .await
        .map_err(|e| e.to_string())?;

    if stored.fields.get("emission_measured") != Some(&false) {
        return Err("explicit false did not overwrite".to_string());
    }
    Ok(())
}

/// `notes` and `completed_at` are written only when the update carries
/// them; `updated_by` is always stamped.
async fn absent_notes_and_timestamp_stay_untouched<S, F, Fut>(factory: &F) -> Result<(), String>
where
    S: JobCardStorage,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    let s = factory().await;
    let mut existing = make_checklist("jc-1", ServiceCode::PucCheck, &[]);
    existing.notes = Some("meter recalibrated".to_string());
    existing.completed_at = "2026-02-02T12:00:00Z".to_string();
    s.save_checklist(&existing).await.map_err(|e| e.to_string())?;

    let template = make_checklist("jc-1", ServiceCode::PucCheck, &[]);
    let stored = s
        .merge_checklist(&template, &update(&[], "tech-9"))
        .await
        .map_err(|e| e.to_string())?;

    if stored.notes.as_deref() != Some("meter recalibrated") {
        return Err("merge dropped the stored notes".to_string());
    }
    if stored.completed_at != existing.completed_at {
        return Err("merge rewrote the timestamp without being asked".to_string());
    }
    if stored.updated_by != "tech-9" {
        return Err("merge did not stamp updated_by".to_string());
    }
    Ok(())
}

/// Two writers merging different fields of the same checklist must both
/// land; neither call may clobber the other's field.
async fn merges_from_two_writers_compose<S, F, Fut>(factory: &F) -> Result<(), String>
where
    S: JobCardStorage,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    let s = factory().await;
    let template = make_checklist(
        "jc-1",
        ServiceCode::PucCheck,
        &[("emission_measured", false), ("certificate_issued", false)],
    );
    s.merge_checklist(&template, &update(&[("emission_measured", true)], "tech-1"))
        .await
        .map_err(|e| e.to_string())?;
    let stored = s
        .merge_checklist(&template, &update(&[("certificate_issued", true)], "tech-2"))
        .await
        .map_err(|e| e.to_string())?;

    if stored.fields.get("emission_measured") != Some(&true)
        || stored.fields.get("certificate_issued") != Some(&true)
    {
        return Err("second merge lost the first writer's field".to_string());
    }
    Ok(())
}
