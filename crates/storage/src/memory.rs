//! In-memory reference backend.
//!
//! Mutex-guarded maps keyed the same way a relational backend would index:
//! job cards by id, checklists by {job_card_id, service}. Used by the
//! engine tests and as the baseline the conformance suite is developed
//! against. Every call locks, acts, and releases -- the per-call atomicity
//! the trait requires.

use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;

use jobcard_core::ServiceCode;

use crate::error::StorageError;
use crate::record::{ChecklistRecord, ChecklistUpdate, JobCardRecord};
use crate::traits::JobCardStorage;

#[derive(Default)]
struct Tables {
    job_cards: BTreeMap<String, JobCardRecord>,
    checklists: BTreeMap<(String, ServiceCode), ChecklistRecord>,
}

/// In-memory `JobCardStorage` backend.
#[derive(Default)]
pub struct MemoryStorage {
    tables: Mutex<Tables>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        MemoryStorage::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Tables>, StorageError> {
        self.tables
            .lock()
            .map_err(|_| StorageError::Backend("storage mutex poisoned".to_string()))
    }
}

#[async_trait]
impl JobCardStorage for MemoryStorage {
    async fn load_job_card(&self, id: &str) -> Result<JobCardRecord, StorageError> {
        let tables = self.lock()?;
        tables
            .job_cards
            .get(id)
            .cloned()
            .ok_or_else(|| StorageError::JobCardNotFound {
                job_card_id: id.to_string(),
            })
    }

    async fn save_job_card(&self, card: &JobCardRecord) -> Result<(), StorageError> {
        let mut tables = self.lock()?;
        tables.job_cards.insert(card.id.clone(), card.clone());
        Ok(())
    }

    async fn load_checklist(
        &self,
        job_card_id: &str,
        service: ServiceCode,
    ) -> Result<ChecklistRecord, StorageError> {
        let tables = self.lock()?;
        tables
            .checklists
            .get(&(job_card_id.to_string(), service))
            .cloned()
            .ok_or_else(|| StorageError::ChecklistNotFound {
                job_card_id: job_card_id.to_string(),
                service,
            })
    }

    async fn save_checklist(&self, record: &ChecklistRecord) -> Result<(), StorageError> {
        let mut tables = self.lock()?;
        tables
            .checklists
            .insert((record.job_card_id.clone(), record.service), record.clone());
        Ok(())
    }

    async fn merge_checklist(
        &self,
        template: &ChecklistRecord,
        update: &ChecklistUpdate,
    ) -> Result<ChecklistRecord, StorageError> {
        let mut tables = self.lock()?;
        let record = tables
            .checklists
            .entry((template.job_card_id.clone(), template.service))
            .or_insert_with(|| template.clone());
        update.apply_to(record);
        Ok(record.clone())
    }

    async fn load_services_for_job_card(
        &self,
        job_card_id: &str,
    ) -> Result<Vec<ServiceCode>, StorageError> {
        let tables = self.lock()?;
        tables
            .job_cards
            .get(job_card_id)
            .map(|card| card.selected_services.clone())
            .ok_or_else(|| StorageError::JobCardNotFound {
                job_card_id: job_card_id.to_string(),
            })
    }

    async fn list_checklists(
        &self,
        job_card_id: &str,
    ) -> Result<Vec<ChecklistRecord>, StorageError> {
        let tables = self.lock()?;
        Ok(tables
            .checklists
            .values()
            .filter(|record| record.job_card_id == job_card_id)
            .cloned()
            .collect())
    }
}
