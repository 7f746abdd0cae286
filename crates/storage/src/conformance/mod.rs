//! Conformance test suite for `JobCardStorage` implementations.
//!
//! A backend-agnostic suite that any `JobCardStorage` implementation can
//! run to verify correctness. The suite covers:
//!
//! - **Job cards**: save/load round-trips, replace-by-id semantics,
//!   service-list reads
//! - **Checklists**: scoping per {job_card_id, service}, replace semantics,
//!   listing per card
//! - **Merges**: atomic create-or-merge semantics of `merge_checklist` --
//!   template-seeded creation, named-fields-only writes, composition of
//!   updates from different writers
//! - **Not-found signalling**: the dedicated error variants, distinct from
//!   backend failures, with correct identifying fields
//!
//! # Usage
//!
//! Backend crates call [`run_conformance_suite`] with a factory function
//! that creates a fresh, empty storage instance for each test:
//!
//! ```ignore
//! use jobcard_storage::conformance::run_conformance_suite;
//!
//! #[tokio::test]
//! async fn postgres_conformance() {
//!     let report = run_conformance_suite(|| async {
//!         create_test_postgres_storage().await
//!     }).await;
//!     assert!(report.failed == 0, "{report}");
//! }
//! ```

mod checklist;
mod jobcard;
mod merge;
mod notfound;

use std::collections::BTreeMap;
use std::fmt;
use std::future::Future;

use jobcard_core::ServiceCode;

use crate::record::{ChecklistRecord, JobCardRecord, JobStatus};
use crate::JobCardStorage;

/// Result of a single conformance test.
#[derive(Debug, Clone)]
pub struct TestResult {
    /// Test category (e.g. "job_card", "checklist").
    pub category: String,
    /// Test name (e.g. "save_then_load_round_trips").
    pub name: String,
    /// Whether the test passed.
    pub passed: bool,
    /// Error message if the test failed.
    pub message: Option<String>,
}

impl TestResult {
    fn from_result(category: &str, name: &str, result: Result<(), String>) -> Self {
        match result {
            Ok(()) => Self {
                category: category.to_string(),
                name: name.to_string(),
                passed: true,
                message: None,
            },
            Err(msg) => Self {
                category: category.to_string(),
                name: name.to_string(),
                passed: false,
                message: Some(msg),
            },
        }
    }
}

/// Aggregated report from a full conformance suite run.
#[derive(Debug, Clone)]
pub struct ConformanceReport {
    pub results: Vec<TestResult>,
    pub passed: usize,
    pub failed: usize,
    pub total: usize,
}

impl fmt::Display for ConformanceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Conformance: {}/{} passed ({} failed)",
            self.passed, self.total, self.failed
        )?;
        for r in &self.results {
            if !r.passed {
                writeln!(
                    f,
                    "  FAIL [{}/{}]: {}",
                    r.category,
                    r.name,
                    r.message.as_deref().unwrap_or("(no message)")
                )?;
            }
        }
        Ok(())
    }
}

/// Run the full conformance suite against a storage backend.
///
/// The `factory` function is called once per test to create a fresh, empty
/// storage instance, ensuring test isolation.
pub async fn run_conformance_suite<S, F, Fut>(factory: F) -> ConformanceReport
where
    S: JobCardStorage,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    let mut results = Vec::new();

    results.extend(jobcard::run_job_card_tests(&factory).await);
    results.extend(checklist::run_checklist_tests(&factory).await);
    results.extend(merge::run_merge_tests(&factory).await);
    results.extend(notfound::run_not_found_tests(&factory).await);

    let passed = results.iter().filter(|r| r.passed).count();
    let total = results.len();

    ConformanceReport {
        results,
        passed,
        failed: total - passed,
        total,
    }
}

// ── Helpers: record constructors with sensible defaults ──────────────────────

fn make_job_card(id: &str, services: &[ServiceCode]) -> JobCardRecord {
    JobCardRecord {
        id: id.to_string(),
        customer_name: "Test Customer".to_string(),
        customer_phone: "9000000000".to_string(),
        vehicle_registration: "MH00XX0000".to_string(),
        vehicle_make: "Test".to_string(),
        vehicle_model: "Model".to_string(),
        status: JobStatus::Pending,
        selected_services: services.to_vec(),
        completed_by: None,
        created_at: "2026-01-01T00:00:00Z".to_string(),
        updated_at: "2026-01-01T00:00:00Z".to_string(),
    }
}

fn make_checklist(
    job_card_id: &str,
    service: ServiceCode,
    fields: &[(&str, bool)],
) -> ChecklistRecord {
    ChecklistRecord {
        id: format!("{job_card_id}:{service}"),
        job_card_id: job_card_id.to_string(),
        service,
        fields: fields
            .iter()
            .map(|(k, v)| (k.to_string(), *v))
            .collect::<BTreeMap<_, _>>(),
        notes: None,
        completed_at: "2026-01-01T00:00:00Z".to_string(),
        updated_by: "test-tech".to_string(),
    }
}
